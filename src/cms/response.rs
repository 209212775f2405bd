//! CMS response shapes
//!
//! A page lookup comes back in one of two generations:
//!
//! - legacy: `{ data: { id, attributes: { ...fields } }, meta }`
//! - current: `{ data: [ { id, ...fields } ], meta }`
//!
//! Both are recognized explicitly and reduced to a [`PageEnvelope`] before
//! any field is read.

use serde_json::Value;

use super::error::FetchError;
use crate::content::PageRecord;

/// A page's id together with its field object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageEnvelope<'a> {
    pub id: i64,
    pub attributes: &'a Value,
}

/// The recognized shape of a response body
#[derive(Debug, Clone, PartialEq)]
pub enum CmsPayload<'a> {
    /// Single record wrapped in `{ id, attributes }`
    Legacy(PageEnvelope<'a>),
    /// Non-empty array of records; only the first is used
    Current(&'a [Value]),
    /// The lookup matched nothing
    Empty,
    Unrecognized(&'static str),
}

impl<'a> CmsPayload<'a> {
    pub fn recognize(body: &'a Value) -> Self {
        let data = match body.get("data") {
            Some(data) => data,
            None => return CmsPayload::Unrecognized("missing data field"),
        };

        match data {
            Value::Null => CmsPayload::Empty,
            Value::Array(items) if items.is_empty() => CmsPayload::Empty,
            Value::Array(items) => CmsPayload::Current(items),
            Value::Object(_) => match data.get("attributes") {
                Some(attributes) if attributes.is_object() => CmsPayload::Legacy(PageEnvelope {
                    id: record_id(data),
                    attributes,
                }),
                _ => CmsPayload::Unrecognized("data object without attributes"),
            },
            _ => CmsPayload::Unrecognized("data is neither an object nor an array"),
        }
    }

    /// Reduce to the legacy envelope; `Ok(None)` when nothing matched
    pub fn envelope(&self) -> Result<Option<PageEnvelope<'a>>, FetchError> {
        match self {
            CmsPayload::Legacy(envelope) => Ok(Some(*envelope)),
            CmsPayload::Current(items) => {
                let first = &items[0];
                if !first.is_object() {
                    return Err(FetchError::Malformed(
                        "data array holds a non-object".to_string(),
                    ));
                }
                // a legacy collection nests fields under attributes as well
                let attributes = match first.get("attributes") {
                    Some(attributes) if attributes.is_object() => attributes,
                    _ => first,
                };
                Ok(Some(PageEnvelope {
                    id: record_id(first),
                    attributes,
                }))
            }
            CmsPayload::Empty => Ok(None),
            CmsPayload::Unrecognized(reason) => Err(FetchError::Malformed(reason.to_string())),
        }
    }

    /// One-line summary for diagnostics
    pub fn describe(&self) -> String {
        match self {
            CmsPayload::Legacy(envelope) => format!("legacy object (id {})", envelope.id),
            CmsPayload::Current(items) => format!("current array ({} records)", items.len()),
            CmsPayload::Empty => "empty".to_string(),
            CmsPayload::Unrecognized(reason) => format!("unrecognized ({})", reason),
        }
    }
}

fn record_id(value: &Value) -> i64 {
    value.get("id").and_then(Value::as_i64).unwrap_or_default()
}

/// Parse a page lookup body into a record; `Ok(None)` means no such page
pub fn parse_page(body: &str) -> Result<Option<PageRecord>, FetchError> {
    let json: Value = serde_json::from_str(body)?;
    let payload = CmsPayload::recognize(&json);
    tracing::debug!("CMS payload shape: {}", payload.describe());

    match payload.envelope()? {
        Some(envelope) => Ok(Some(PageRecord::from_attributes(
            envelope.id,
            envelope.attributes,
        )?)),
        None => Ok(None),
    }
}

/// Extract slugs from a `fields[0]=slug` listing
pub fn parse_slugs(body: &str) -> Result<Vec<String>, FetchError> {
    let json: Value = serde_json::from_str(body)?;
    let items = json
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Malformed("slug listing has no data array".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| {
            let top = item.get("slug").and_then(Value::as_str);
            let nested = || {
                item.get("attributes")
                    .and_then(|a| a.get("slug"))
                    .and_then(Value::as_str)
            };
            top.filter(|s| !s.is_empty()).or_else(nested)
        })
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
        .collect())
}
