//! Search engine metadata: head tags, JSON-LD, sitemap and robots.txt

mod metadata;
pub mod robots;
pub mod schema;
pub mod sitemap;

pub use metadata::PageMetadata;
pub use sitemap::{ChangeFreq, SitemapUrl};
