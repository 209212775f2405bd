//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/site.css") // -> "/site/css/site.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) || path.starts_with('#') {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/pricing/") // -> "https://example.com/pricing/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Site-relative path of a page; the default page lives at the root
pub fn page_path(slug: &str, default_slug: &str) -> String {
    if slug.is_empty() || slug == default_slug {
        "/".to_string()
    } else {
        format!("/{}/", slug)
    }
}

/// Absolute or protocol-relative URL
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Whether a link may be emitted as an `href`
///
/// Relative paths, anchors and `http`, `https` or `mailto` URLs pass; any
/// other scheme (`javascript:`, `data:`, ...) does not. Whitespace and
/// control characters are ignored when reading the scheme, as browsers do.
pub fn is_safe_link(href: &str) -> bool {
    let compact: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();

    match compact.find([':', '/', '?', '#']) {
        Some(i) if compact[i..].starts_with(':') => matches!(
            compact[..i].to_ascii_lowercase().as_str(),
            "http" | "https" | "mailto"
        ),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/site/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/site.css"), "/site/css/site.css");
        assert_eq!(url_for(&config, "pricing/"), "/site/pricing/");
        assert_eq!(url_for(&config, ""), "/site/");
        assert_eq!(url_for(&config, "#contact"), "#contact");
        assert_eq!(url_for(&config, "https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(full_url_for(&config, "/pricing/"), "https://example.com/site/pricing/");

        let config = SiteConfig {
            url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(full_url_for(&config, "/"), "https://example.com/");
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path("landing-page", "landing-page"), "/");
        assert_eq!(page_path("", "landing-page"), "/");
        assert_eq!(page_path("pricing", "landing-page"), "/pricing/");
    }

    #[test]
    fn test_is_safe_link() {
        for href in [
            "/pricing",
            "pricing/",
            "#contact",
            "?ref=nav",
            "//cdn.example.com/a",
            "https://example.com/a:b",
            "HTTP://example.com",
            "mailto:sales@example.com",
            "",
        ] {
            assert!(is_safe_link(href), "{}", href);
        }
        for href in [
            "javascript:alert(1)",
            "JavaScript:alert(1)",
            " java\tscript:alert(1)",
            "data:text/html,<script>",
            "vbscript:msgbox",
        ] {
            assert!(!is_safe_link(href), "{}", href);
        }
    }
}
