//! robots.txt generation

use crate::config::SiteConfig;
use crate::helpers::full_url_for;

/// Allow every crawler and point at the sitemap
pub fn render(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        full_url_for(site, "/sitemap.xml")
    )
}
