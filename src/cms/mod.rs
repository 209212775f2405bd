//! Headless CMS access
//!
//! Pages come from the CMS's `landing-pages` collection. Requests are
//! authenticated with a bearer token and retried across populate variants;
//! when all of them fail the built-in fallback page is used instead.

mod client;
mod error;
pub mod fallback;
mod loader;
pub mod populate;
pub mod response;

pub use client::{CmsClient, FetchedPage};
pub use error::FetchError;
pub use fallback::FallbackProvider;
pub use loader::{ContentOrigin, LoadedPage, PageLoader};
pub use populate::PopulateVariant;
