//! Populate variants and request URLs
//!
//! Deeply nested `populate` expansions differ between CMS versions and break
//! easily, so a page request walks an ordered list of query strings from the
//! most complete expansion down to none at all.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched when a slug is placed in a query string
const SLUG_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Relations of every block kind, expanded per component
const COMPONENT_RELATIONS: &[&str] = &[
    "populate[dynamicZone][on][layout.navbar][populate][navItems][populate][dropdownCategories][populate][items]=true",
    "populate[dynamicZone][on][layout.navbar][populate][navItems][populate][dropdownFooterActions]=true",
    "populate[dynamicZone][on][layout.navbar][populate][ctaButtons]=true",
    "populate[dynamicZone][on][layout.navbar][populate][logo]=true",
    "populate[dynamicZone][on][sections.hero][populate][ctaButtons]=true",
    "populate[dynamicZone][on][sections.hero][populate][bottomImage]=true",
    "populate[dynamicZone][on][sections.content][populate][ctaButton]=true",
    "populate[dynamicZone][on][sections.content][populate][image]=true",
];

/// Number of leading relations that belong to the navbar
const NAVBAR_RELATIONS: usize = 4;

const COMPONENT_WILDCARDS: &str = "populate[dynamicZone][on][layout.navbar][populate]=*&populate[dynamicZone][on][sections.hero][populate]=*&populate[dynamicZone][on][sections.content][populate]=*";

const ZONE_WILDCARD: &str = "populate[dynamicZone][populate]=*";

/// The built-in variant list, most detailed first
pub fn default_queries() -> Vec<String> {
    vec![
        COMPONENT_RELATIONS.join("&"),
        COMPONENT_RELATIONS[..NAVBAR_RELATIONS].join("&"),
        COMPONENT_WILDCARDS.to_string(),
        ZONE_WILDCARD.to_string(),
        String::new(),
    ]
}

/// One entry of the ordered attempt list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateVariant {
    /// 1-based position in the attempt order
    pub attempt: usize,
    pub query: String,
}

impl PopulateVariant {
    /// Short description for logs
    pub fn label(&self) -> &str {
        if self.query.is_empty() {
            "none"
        } else {
            &self.query
        }
    }
}

/// Number the configured query strings in attempt order
pub fn variants(queries: &[String]) -> Vec<PopulateVariant> {
    queries
        .iter()
        .enumerate()
        .map(|(i, query)| PopulateVariant {
            attempt: i + 1,
            query: query.trim().trim_start_matches('&').to_string(),
        })
        .collect()
}

/// `GET {base}/api/landing-pages?filters[slug][$eq]={slug}[&{populate}]`
pub fn page_url(base_url: &str, slug: &str, variant: &PopulateVariant) -> String {
    let mut url = format!(
        "{}/api/landing-pages?filters[slug][$eq]={}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(slug, SLUG_ENCODE_SET)
    );
    if !variant.query.is_empty() {
        url.push('&');
        url.push_str(&variant.query);
    }
    url
}

/// `GET {base}/api/landing-pages?fields[0]=slug`
pub fn slugs_url(base_url: &str) -> String {
    format!(
        "{}/api/landing-pages?fields[0]=slug",
        base_url.trim_end_matches('/')
    )
}
