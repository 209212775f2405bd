//! Built-in content used when the CMS cannot be reached

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::response;
use crate::config::CmsConfig;
use crate::content::PageRecord;

const EMBEDDED_PAGE: &str = include_str!("fallback.json");

lazy_static! {
    static ref EMBEDDED: Arc<PageRecord> = Arc::new(parse_embedded());
}

fn parse_embedded() -> PageRecord {
    match response::parse_page(EMBEDDED_PAGE) {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::error!("Embedded fallback page has no record");
            PageRecord::empty("landing-page")
        }
        Err(e) => {
            tracing::error!("Embedded fallback page is invalid: {}", e);
            PageRecord::empty("landing-page")
        }
    }
}

/// Supplies the fallback page and slug list
#[derive(Debug, Clone)]
pub struct FallbackProvider {
    page: Arc<PageRecord>,
    slugs: Vec<String>,
}

impl FallbackProvider {
    /// The dataset compiled into the binary
    pub fn embedded(slugs: Vec<String>) -> Self {
        Self {
            page: EMBEDDED.clone(),
            slugs,
        }
    }

    /// Load a page document from disk; either response shape is accepted
    pub fn from_file<P: AsRef<Path>>(path: P, slugs: Vec<String>) -> Result<Self> {
        let path = path.as_ref();
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fallback page {:?}", path))?;
        let record = response::parse_page(&body)
            .with_context(|| format!("Failed to parse fallback page {:?}", path))?
            .with_context(|| format!("Fallback page {:?} contains no record", path))?;

        Ok(Self {
            page: Arc::new(record),
            slugs,
        })
    }

    /// Honors `cms.fallback_path`, relative to the site directory
    pub fn from_config(config: &CmsConfig, base_dir: &Path) -> Result<Self> {
        let slugs = config.fallback_slugs.clone();
        match &config.fallback_path {
            Some(path) => Self::from_file(base_dir.join(path), slugs),
            None => Ok(Self::embedded(slugs)),
        }
    }

    pub fn page(&self) -> Arc<PageRecord> {
        self.page.clone()
    }

    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }
}
