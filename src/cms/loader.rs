//! Page loading with fallback
//!
//! [`PageLoader::load`] never fails: a CMS problem of any kind is logged and
//! answered with the fallback page.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use super::client::{CmsClient, FetchedPage};
use super::fallback::FallbackProvider;
use crate::config::CmsConfig;
use crate::content::PageRecord;

/// Where the content of a loaded page came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    Cms,
    /// The CMS answered but has no page with this slug
    NotFound,
    Fallback,
}

impl ContentOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentOrigin::Cms => "cms",
            ContentOrigin::NotFound => "not-found",
            ContentOrigin::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub slug: String,
    /// `None` only for [`ContentOrigin::NotFound`]
    pub record: Option<Arc<PageRecord>>,
    pub origin: ContentOrigin,
}

pub struct PageLoader {
    client: CmsClient,
    fallback: FallbackProvider,
    default_slug: String,
}

impl PageLoader {
    pub fn new(config: &CmsConfig, base_dir: &Path) -> Result<Self> {
        Ok(Self::with_parts(
            CmsClient::new(config)?,
            FallbackProvider::from_config(config, base_dir)?,
            &config.default_slug,
        ))
    }

    pub fn with_parts(client: CmsClient, fallback: FallbackProvider, default_slug: &str) -> Self {
        Self {
            client,
            fallback,
            default_slug: default_slug.to_string(),
        }
    }

    pub fn client(&self) -> &CmsClient {
        &self.client
    }

    pub fn fallback(&self) -> &FallbackProvider {
        &self.fallback
    }

    pub fn default_slug(&self) -> &str {
        &self.default_slug
    }

    /// Load a page by slug; a blank slug means the default page
    pub async fn load(&self, slug: &str) -> LoadedPage {
        let slug = match slug.trim() {
            "" => self.default_slug.as_str(),
            s => s,
        };
        let start = Instant::now();

        let (record, origin) = match self.client.fetch_page(slug).await {
            Ok(FetchedPage::Found(record)) => (Some(Arc::new(record)), ContentOrigin::Cms),
            Ok(FetchedPage::NotFound) => {
                tracing::warn!("No landing page with slug '{}'", slug);
                (None, ContentOrigin::NotFound)
            }
            Err(e) => {
                tracing::warn!(
                    "Serving fallback content for '{}' ({}): {}",
                    slug,
                    e.kind(),
                    e
                );
                (Some(self.fallback.page()), ContentOrigin::Fallback)
            }
        };

        tracing::info!(
            "Loaded '{}' from {} in {:.2}s",
            slug,
            origin,
            start.elapsed().as_secs_f64()
        );

        LoadedPage {
            slug: slug.to_string(),
            record,
            origin,
        }
    }

    /// Every slug to publish, never empty
    pub async fn slugs(&self) -> Vec<String> {
        match self.client.fetch_slugs().await {
            Ok(slugs) if slugs.is_empty() => {
                tracing::warn!("CMS lists no landing pages, using '{}'", self.default_slug);
                vec![self.default_slug.clone()]
            }
            Ok(slugs) => slugs,
            Err(e) => {
                tracing::warn!("Using fallback slug list ({}): {}", e.kind(), e);
                let mut slugs = self.fallback.slugs().to_vec();
                if slugs.is_empty() {
                    slugs.push(self.default_slug.clone());
                }
                slugs
            }
        }
    }
}
