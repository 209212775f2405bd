//! Helper functions for templates and metadata
//!
//! URL generation relative to the site root and small HTML tag builders.

mod html;
mod url;

pub use html::*;
pub use url::*;
