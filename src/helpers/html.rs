//! HTML helper functions

use super::url::url_for;
use crate::config::SiteConfig;

/// Generate a CSS link tag
///
/// # Examples
/// ```ignore
/// css(&config, "site") // -> <link rel="stylesheet" href="/css/site.css">
/// ```
pub fn css(config: &SiteConfig, path: &str) -> String {
    let path = if super::url::is_external(path) {
        path.to_string()
    } else {
        let path = if path.ends_with(".css") {
            path.to_string()
        } else {
            format!("{}.css", path)
        };
        url_for(config, &format!("css/{}", path.trim_start_matches('/')))
    };

    format!(r#"<link rel="stylesheet" href="{}">"#, html_escape(&path))
}

/// Generate a favicon link tag
pub fn favicon_tag(config: &SiteConfig, path: &str) -> String {
    let href = url_for(config, path);
    format!(r#"<link rel="icon" href="{}">"#, html_escape(&href))
}

/// `<meta name=... content=...>`
pub fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        html_escape(name),
        html_escape(content)
    )
}

/// `<meta property=... content=...>`
pub fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        html_escape(property),
        html_escape(content)
    )
}

pub fn canonical_link(url: &str) -> String {
    format!(r#"<link rel="canonical" href="{}">"#, html_escape(url))
}

/// An image for social previews
pub struct SocialImage<'a> {
    pub url: &'a str,
    pub alt: &'a str,
    pub width: u32,
    pub height: u32,
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    site_name: &str,
    locale: &str,
    image: Option<&SocialImage<'_>>,
) -> String {
    let mut tags = vec![
        meta_property("og:type", "website"),
        meta_property("og:title", title),
        meta_property("og:url", url),
        meta_property("og:site_name", site_name),
        meta_property("og:locale", locale),
    ];

    if !description.is_empty() {
        tags.push(meta_property("og:description", description));
    }

    if let Some(img) = image {
        tags.push(meta_property("og:image", img.url));
        tags.push(meta_property("og:image:width", &img.width.to_string()));
        tags.push(meta_property("og:image:height", &img.height.to_string()));
        if !img.alt.is_empty() {
            tags.push(meta_property("og:image:alt", img.alt));
        }
    }

    tags.join("\n")
}

/// Generate Twitter card meta tags
pub fn twitter_card(title: &str, description: &str, image: Option<&str>) -> String {
    let mut tags = vec![
        meta_name("twitter:card", "summary_large_image"),
        meta_name("twitter:title", title),
    ];

    if !description.is_empty() {
        tags.push(meta_name("twitter:description", description));
    }

    if let Some(img) = image {
        tags.push(meta_name("twitter:image", img));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    meta_name(
        "generator",
        concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
    )
}

/// Wrap a JSON document in a JSON-LD script tag
///
/// `</` is escaped so the payload cannot close the script element.
pub fn json_ld(json: &str) -> String {
    format!(
        r#"<script type="application/ld+json">{}</script>"#,
        json.replace("</", "<\\/")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
