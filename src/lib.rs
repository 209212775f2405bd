//! landing-rs: a marketing site server and static generator backed by a headless CMS
//!
//! Landing pages are fetched from the CMS by slug, normalized into a single
//! page model, split into navigation, hero and body blocks, and rendered with
//! embedded Tera templates. When the CMS is unavailable a built-in fallback
//! page is rendered instead.

pub mod cache;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod seo;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application
#[derive(Debug, Clone)]
pub struct Landing {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets copied into the output and served as-is
    pub static_dir: PathBuf,
}

impl Landing {
    /// Load the site in a directory
    ///
    /// `_config.yml` is optional; environment overrides are applied on top.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Build from an already prepared configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            public_dir,
            static_dir,
        }
    }

    /// A page loader for this site's CMS settings
    pub fn loader(&self) -> Result<cms::PageLoader> {
        cms::PageLoader::new(&self.config.cms, &self.base_dir)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<generator::GenerateSummary> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
