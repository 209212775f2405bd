//! HTTP client for the landing page collection

use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use super::error::FetchError;
use super::populate::{self, PopulateVariant};
use super::response;
use crate::cache::ResponseCache;
use crate::config::CmsConfig;
use crate::content::PageRecord;

/// Outcome of a page lookup that reached the CMS
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedPage {
    Found(PageRecord),
    /// The CMS answered but no page carries the slug
    NotFound,
}

/// Validated connection parameters for one call
struct Credentials<'a> {
    base_url: &'a str,
    token: &'a str,
}

pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    variants: Vec<PopulateVariant>,
    cache: ResponseCache,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.url.trim().trim_end_matches('/').to_string(),
            token: config.token.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            variants: populate::variants(&config.populate_variants),
            cache: ResponseCache::from_secs(config.revalidate_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn variants(&self) -> &[PopulateVariant] {
        &self.variants
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Checked on every call so a misconfigured site still serves fallback content
    fn credentials(&self) -> Result<Credentials<'_>, FetchError> {
        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(FetchError::MissingToken)?;

        let valid = reqwest::Url::parse(&self.base_url)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);
        if !valid {
            return Err(FetchError::InvalidBaseUrl(self.base_url.clone()));
        }

        Ok(Credentials {
            base_url: &self.base_url,
            token,
        })
    }

    /// Fetch one page by slug, walking the populate variants in order
    ///
    /// The first 2xx response ends the walk. A body that cannot be decoded
    /// is reported immediately; the remaining variants are not tried.
    pub async fn fetch_page(&self, slug: &str) -> Result<FetchedPage, FetchError> {
        let creds = self.credentials()?;
        let total = self.variants.len();
        let mut last_error = None;

        for variant in &self.variants {
            let url = populate::page_url(creds.base_url, slug, variant);

            if let Some(body) = self.cache.get(&url) {
                tracing::debug!("Cache hit for '{}' (variant {}/{})", slug, variant.attempt, total);
                return self.decode_page(&body);
            }

            tracing::debug!(
                "Fetching '{}' with populate variant {}/{}: {}",
                slug,
                variant.attempt,
                total,
                variant.label()
            );

            match self.get(variant.attempt, &url, creds.token).await {
                Ok(body) => {
                    tracing::debug!("Variant {}/{} succeeded for '{}'", variant.attempt, total, slug);
                    let page = self.decode_page(&body)?;
                    // unknown slugs are not cached, any path can name one
                    if let FetchedPage::Found(_) = page {
                        self.cache.insert(url, body);
                    }
                    return Ok(page);
                }
                Err(e) => {
                    tracing::warn!("Variant {}/{} failed for '{}': {}", variant.attempt, total, slug, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last) => Err(FetchError::Exhausted {
                attempts: total,
                last: Box::new(last),
            }),
            None => Err(FetchError::NoVariants),
        }
    }

    /// List every slug known to the CMS
    pub async fn fetch_slugs(&self) -> Result<Vec<String>, FetchError> {
        let creds = self.credentials()?;
        let url = populate::slugs_url(creds.base_url);

        if let Some(body) = self.cache.get(&url) {
            return response::parse_slugs(&body);
        }

        let body = self.get(1, &url, creds.token).await?;
        let slugs = response::parse_slugs(&body)?;
        self.cache.insert(url, body);
        Ok(slugs)
    }

    fn decode_page(&self, body: &str) -> Result<FetchedPage, FetchError> {
        match response::parse_page(body)? {
            Some(mut record) => {
                record.absolutize_media(&self.base_url);
                Ok(FetchedPage::Found(record))
            }
            None => Ok(FetchedPage::NotFound),
        }
    }

    /// A single authenticated GET bounded by the configured timeout
    async fn get(&self, attempt: usize, url: &str, token: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let classify = |source: reqwest::Error| {
            if source.is_timeout() {
                FetchError::Timeout {
                    attempt,
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                FetchError::Network { attempt, source }
            }
        };

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;
        tracing::debug!("GET {} -> {} in {:?}", url, status, start.elapsed());

        if !status.is_success() {
            return Err(FetchError::Status {
                attempt,
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        Ok(body)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
