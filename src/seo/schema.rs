//! JSON-LD structured data

use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::helpers::{full_url_for, json_ld};

/// The site's `Organization` schema
pub fn organization(site: &SiteConfig) -> Value {
    let org = &site.organization;
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.brand,
        "url": full_url_for(site, "/"),
        "logo": full_url_for(site, &site.logo),
        "description": site.description,
        "sameAs": org.same_as,
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": org.contact_type,
            "areaServed": org.area_served,
            "availableLanguage": org.available_language,
        }
    })
}

/// The organization schema as a script tag
pub fn organization_tag(site: &SiteConfig) -> String {
    json_ld(&organization(site).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization() {
        let site = SiteConfig {
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        };
        let schema = organization(&site);
        assert_eq!(schema["@type"], "Organization");
        assert_eq!(schema["name"], "Acme Software");
        assert_eq!(schema["url"], "https://example.com/");
        assert_eq!(schema["logo"], "https://example.com/logo.svg");
        assert_eq!(schema["contactPoint"]["contactType"], "sales");
        assert_eq!(schema["sameAs"].as_array().map(Vec::len), Some(2));

        let tag = organization_tag(&site);
        assert!(tag.starts_with(r#"<script type="application/ld+json">{"@context""#));
    }
}
