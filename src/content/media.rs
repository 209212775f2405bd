//! Media references
//!
//! The CMS serves images in two shapes. Older versions nest the fields one
//! level down (`{ data: { id, attributes: { url, ... } } }`), newer ones put
//! them at the top level (`{ url, alternativeText, ... }`). Both are
//! recognized here and normalized into [`Image`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Image used when a reference is present but unusable
pub const PLACEHOLDER_SRC: &str = "/placeholder.svg";
pub const PLACEHOLDER_ALT: &str = "Placeholder image";
pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 400;

/// A normalized image descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

impl Image {
    /// The placeholder descriptor
    pub fn placeholder() -> Self {
        Self {
            src: PLACEHOLDER_SRC.to_string(),
            alt: PLACEHOLDER_ALT.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.src == PLACEHOLDER_SRC
    }

    /// Prefix relative CMS upload paths with the CMS base URL
    pub fn absolutize(&mut self, base_url: &str) {
        if self.is_placeholder() || self.src.starts_with("http") || self.src.starts_with("//") {
            return;
        }
        let base = base_url.trim_end_matches('/');
        if self.src.starts_with('/') {
            self.src = format!("{}{}", base, self.src);
        } else {
            self.src = format!("{}/{}", base, self.src);
        }
    }
}

/// The two recognized media reference shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaShape<'a> {
    /// `{ data: { attributes: { url, ... } } }`
    Legacy(&'a Map<String, Value>),
    /// `{ url, ... }` without a `data` wrapper
    Current(&'a Map<String, Value>),
}

impl<'a> MediaShape<'a> {
    /// Recognize a media reference, or `None` when it matches neither shape
    pub fn recognize(value: &'a Value) -> Option<Self> {
        let object = value.as_object()?;

        if let Some(data) = object.get("data") {
            return data
                .get("attributes")
                .and_then(Value::as_object)
                .map(MediaShape::Legacy);
        }

        if object.contains_key("url") {
            return Some(MediaShape::Current(object));
        }

        None
    }

    fn fields(&self) -> &'a Map<String, Value> {
        match self {
            MediaShape::Legacy(fields) | MediaShape::Current(fields) => fields,
        }
    }

    /// Convert into an image, substituting defaults for missing metadata
    pub fn to_image(&self) -> Image {
        let fields = self.fields();

        let src = match fields.get("url").and_then(Value::as_str) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => return Image::placeholder(),
        };

        let alt = fields
            .get("alternativeText")
            .and_then(Value::as_str)
            .filter(|alt| !alt.is_empty())
            .unwrap_or("Image")
            .to_string();

        Image {
            src,
            alt,
            width: dimension(fields.get("width"), DEFAULT_WIDTH),
            height: dimension(fields.get("height"), DEFAULT_HEIGHT),
        }
    }
}

fn dimension(value: Option<&Value>, default: u32) -> u32 {
    value
        .and_then(Value::as_f64)
        .filter(|v| *v >= 1.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
        .unwrap_or(default)
}

/// Normalize a raw media field
///
/// `null` means absent. Anything else that is not a usable reference
/// degrades to the placeholder.
pub fn normalize(value: &Value) -> Option<Image> {
    if value.is_null() {
        return None;
    }

    Some(
        MediaShape::recognize(value)
            .map(|shape| shape.to_image())
            .unwrap_or_else(|| {
                tracing::debug!("Unrecognized media reference, using placeholder");
                Image::placeholder()
            }),
    )
}

/// Serde adapter for optional media fields
pub fn deserialize_image<'de, D>(deserializer: D) -> Result<Option<Image>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize(&value))
}
