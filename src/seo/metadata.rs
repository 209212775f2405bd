//! Per-page head metadata

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{Image, PageRecord};
use crate::helpers::{
    canonical_link, full_url_for, html_escape, meta_generator, meta_name, open_graph,
    twitter_card, SocialImage,
};

/// Everything rendered into a page's `<head>` besides assets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    pub site_name: String,
    pub locale: String,
    pub image: Option<Image>,
    pub theme_color: String,
    pub google_verification: Option<String>,
    pub index: bool,
    pub follow: bool,
}

impl PageMetadata {
    /// Metadata for a page at `path`
    ///
    /// Record fields win: `seoTitle` over `title`, `seoDescription` over
    /// `description`. Missing values and a missing record fall back to the
    /// site defaults.
    pub fn new(site: &SiteConfig, record: Option<&PageRecord>, path: &str) -> Self {
        let pick = |value: Option<&str>, default: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default)
                .to_string()
        };

        let keywords = match record {
            Some(record) if !record.seo.keywords.is_empty() => record.seo.keywords.clone(),
            _ => site.keywords.clone(),
        };

        let image = record
            .and_then(|r| r.og_image.clone())
            .filter(|image| !image.is_placeholder())
            .map(|mut image| {
                image.src = full_url_for(site, &image.src);
                image
            });

        Self {
            title: pick(record.map(PageRecord::meta_title), &site.title),
            description: pick(record.map(PageRecord::meta_description), &site.description),
            keywords,
            canonical_url: full_url_for(site, path),
            site_name: site.brand.clone(),
            locale: site.locale.clone(),
            image,
            theme_color: site.theme_color.clone(),
            google_verification: site
                .google_verification
                .clone()
                .filter(|id| !id.trim().is_empty()),
            index: true,
            follow: true,
        }
    }

    pub fn keywords_content(&self) -> String {
        self.keywords.join(", ")
    }

    pub fn robots_content(&self) -> String {
        format!(
            "{}, {}",
            if self.index { "index" } else { "noindex" },
            if self.follow { "follow" } else { "nofollow" }
        )
    }

    /// Render the head tags, one per line
    pub fn to_html(&self) -> String {
        let mut tags = vec![
            format!("<title>{}</title>", html_escape(&self.title)),
            meta_name("description", &self.description),
        ];

        if !self.keywords.is_empty() {
            tags.push(meta_name("keywords", &self.keywords_content()));
        }

        tags.push(meta_name("robots", &self.robots_content()));
        tags.push(canonical_link(&self.canonical_url));
        tags.push(meta_name("theme-color", &self.theme_color));

        if let Some(id) = &self.google_verification {
            tags.push(meta_name("google-site-verification", id));
        }

        let social = self.image.as_ref().map(|image| SocialImage {
            url: &image.src,
            alt: &image.alt,
            width: image.width,
            height: image.height,
        });
        tags.push(open_graph(
            &self.title,
            &self.description,
            &self.canonical_url,
            &self.site_name,
            &self.locale,
            social.as_ref(),
        ));
        tags.push(twitter_card(
            &self.title,
            &self.description,
            self.image.as_ref().map(|image| image.src.as_str()),
        ));
        tags.push(meta_generator());

        tags.join("\n")
    }
}
