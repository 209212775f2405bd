//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cms::populate;

/// Environment variable holding the CMS base URL
pub const ENV_CMS_URL: &str = "STRAPI_URL";
/// Environment variable holding the CMS bearer token
pub const ENV_CMS_TOKEN: &str = "STRAPI_API_TOKEN";
/// Environment variable holding the public site URL
pub const ENV_SITE_URL: &str = "SITE_URL";
/// Environment variable enabling verbose diagnostics
pub const ENV_VERBOSE_LOGS: &str = "ENABLE_PRODUCTION_LOGS";
/// Environment variable holding the search-engine verification token
pub const ENV_GOOGLE_VERIFICATION: &str = "GOOGLE_VERIFICATION_ID";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub brand: String,
    pub language: String,
    pub locale: String,
    pub theme_color: String,
    pub logo: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // SEO
    pub google_verification: Option<String>,
    #[serde(default)]
    pub organization: OrganizationConfig,

    // Diagnostics
    pub verbose_logs: bool,

    // Content source
    #[serde(default)]
    pub cms: CmsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Acme Software - Custom Software Development".to_string(),
            description: "We build custom web, mobile and enterprise software that grows your business."
                .to_string(),
            keywords: vec![
                "software development".to_string(),
                "web applications".to_string(),
                "enterprise software".to_string(),
                "mobile development".to_string(),
            ],
            brand: "Acme Software".to_string(),
            language: "en".to_string(),
            locale: "en_US".to_string(),
            theme_color: "#2563eb".to_string(),
            logo: "/logo.svg".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            google_verification: None,
            organization: OrganizationConfig::default(),

            verbose_logs: false,

            cms: CmsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// clobber the file configuration.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_CMS_URL) {
            self.cms.url = url;
        }
        if let Some(token) = get(ENV_CMS_TOKEN) {
            self.cms.token = Some(token);
        }
        if let Some(url) = get(ENV_SITE_URL) {
            self.url = url;
        }
        if let Some(flag) = get(ENV_VERBOSE_LOGS) {
            self.verbose_logs = is_truthy(&flag);
        }
        if let Some(id) = get(ENV_GOOGLE_VERIFICATION) {
            self.google_verification = Some(id);
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

/// Organization details for the JSON-LD block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    pub same_as: Vec<String>,
    pub contact_type: String,
    pub area_served: String,
    pub available_language: String,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            same_as: vec![
                "https://linkedin.com/company/acme-software".to_string(),
                "https://github.com/acme-software".to_string(),
            ],
            contact_type: "sales".to_string(),
            area_served: "US".to_string(),
            available_language: "English".to_string(),
        }
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub url: String,
    /// Usually supplied through `STRAPI_API_TOKEN` rather than the file
    pub token: Option<String>,
    pub timeout_ms: u64,
    pub revalidate_secs: u64,
    pub default_slug: String,
    /// Query strings tried in order until one succeeds; empty means no populate
    pub populate_variants: Vec<String>,
    pub fallback_slugs: Vec<String>,
    /// JSON file replacing the embedded fallback page
    pub fallback_path: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:1337".to_string(),
            token: None,
            timeout_ms: 10_000,
            revalidate_secs: 60,
            default_slug: "landing-page".to_string(),
            populate_variants: populate::default_queries(),
            fallback_slugs: vec![
                "landing-page".to_string(),
                "home".to_string(),
                "pricing".to_string(),
                "about".to_string(),
                "services".to_string(),
            ],
            fallback_path: None,
        }
    }
}
