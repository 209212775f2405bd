//! Rich text reduction
//!
//! Content sections may carry either a plain string or the CMS block
//! editor's node tree. Only paragraph nodes survive the reduction to text.

use serde::Deserialize;
use serde_json::Value;

/// Text shown when a description has an unsupported shape
pub const UNAVAILABLE: &str = "Content unavailable";

/// A description field as delivered by the CMS
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RichText {
    Plain(String),
    Nodes(Vec<RichTextNode>),
    Unsupported,
}

/// A top-level node of a block-editor tree
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextNode {
    /// Text runs of a paragraph; runs without text are `None`
    Paragraph(Vec<Option<String>>),
    Other,
}

impl From<Value> for RichText {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => RichText::Plain(text),
            Value::Array(nodes) => RichText::Nodes(nodes.iter().map(RichTextNode::from).collect()),
            _ => RichText::Unsupported,
        }
    }
}

impl From<&Value> for RichTextNode {
    fn from(node: &Value) -> Self {
        if node.get("type").and_then(Value::as_str) != Some("paragraph") {
            return RichTextNode::Other;
        }

        match node.get("children").and_then(Value::as_array) {
            Some(children) => RichTextNode::Paragraph(
                children
                    .iter()
                    .map(|child| child.get("text").and_then(Value::as_str).map(str::to_string))
                    .collect(),
            ),
            None => RichTextNode::Other,
        }
    }
}

impl RichText {
    /// Whether the value counts as missing (an empty plain string)
    pub fn is_blank(&self) -> bool {
        matches!(self, RichText::Plain(text) if text.is_empty())
    }

    /// Reduce to plain text, paragraphs separated by a blank line
    pub fn to_plain_text(&self) -> String {
        match self {
            RichText::Plain(text) => text.clone(),
            RichText::Nodes(nodes) => nodes
                .iter()
                .filter_map(|node| match node {
                    RichTextNode::Paragraph(runs) => {
                        Some(runs.iter().flatten().map(String::as_str).collect::<String>())
                    }
                    RichTextNode::Other => None,
                })
                .filter(|text| !text.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
            RichText::Unsupported => UNAVAILABLE.to_string(),
        }
    }
}
