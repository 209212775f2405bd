//! Fetch failures
//!
//! Every variant ends in the fallback page at the top level; they exist so
//! the logs say which one happened.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("CMS API token is not configured")]
    MissingToken,

    #[error("CMS base URL is not an absolute http(s) URL: {0:?}")]
    InvalidBaseUrl(String),

    #[error("attempt {attempt} returned HTTP {status}: {body}")]
    Status {
        attempt: usize,
        status: u16,
        body: String,
    },

    #[error("attempt {attempt} timed out after {timeout_ms}ms")]
    Timeout { attempt: usize, timeout_ms: u64 },

    #[error("attempt {attempt} failed: {source}")]
    Network {
        attempt: usize,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected CMS response shape: {0}")]
    Malformed(String),

    #[error("no populate variants configured")]
    NoVariants,

    #[error("all {attempts} populate variants failed; last error: {last}")]
    Exhausted {
        attempts: usize,
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Coarse failure class for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::MissingToken | FetchError::InvalidBaseUrl(_) | FetchError::NoVariants => {
                "configuration"
            }
            FetchError::Status { .. } => "http-status",
            FetchError::Timeout { .. } => "timeout",
            FetchError::Network { .. } => "network",
            FetchError::Decode(_) | FetchError::Malformed(_) => "malformed-response",
            FetchError::Exhausted { last, .. } => last.kind(),
        }
    }

    /// Whether another populate variant may still succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Status { .. } | FetchError::Timeout { .. } | FetchError::Network { .. }
        )
    }
}
