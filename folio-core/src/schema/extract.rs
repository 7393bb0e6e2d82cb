//! Content extraction for inbound sections.
//!
//! Stored sections have carried their payload under several field names over
//! time. Each location is a named strategy; they are tried in the order of
//! [`STRATEGIES`] and the first hit wins. The raw value is then coerced into
//! the content shape of the section's kind.

use serde_json::Value;

use super::persisted::PersistedSection;
use crate::models::{ContentItem, ContentShape, SectionContent, SectionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// `items: [...]`
    ItemsField,
    /// A field named after the type (`"skills": [...]`), or the type plus `s`.
    PluralField,
    /// `content: [...]`
    ContentList,
    /// `content: "..."`
    ContentText,
    /// `content` holding any other non-null value.
    ContentObject,
}

pub const STRATEGIES: [ExtractionStrategy; 5] = [
    ExtractionStrategy::ItemsField,
    ExtractionStrategy::PluralField,
    ExtractionStrategy::ContentList,
    ExtractionStrategy::ContentText,
    ExtractionStrategy::ContentObject,
];

impl ExtractionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionStrategy::ItemsField => "items-field",
            ExtractionStrategy::PluralField => "plural-field",
            ExtractionStrategy::ContentList => "content-list",
            ExtractionStrategy::ContentText => "content-text",
            ExtractionStrategy::ContentObject => "content-object",
        }
    }

    fn locate<'a>(&self, section: &'a PersistedSection) -> Option<&'a Value> {
        match self {
            ExtractionStrategy::ItemsField => section.items.as_ref().filter(|v| v.is_array()),
            ExtractionStrategy::PluralField => plural_keys(&section.kind)
                .iter()
                .find_map(|key| section.extra.get(key))
                .filter(|v| !v.is_null()),
            ExtractionStrategy::ContentList => section.content.as_ref().filter(|v| v.is_array()),
            ExtractionStrategy::ContentText => section.content.as_ref().filter(|v| v.is_string()),
            ExtractionStrategy::ContentObject => section.content.as_ref().filter(|v| !v.is_null()),
        }
    }
}

pub(super) fn plural_keys(kind: &str) -> Vec<String> {
    let kind = kind.trim().to_lowercase();
    if kind.is_empty() {
        return Vec::new();
    }
    if kind.ends_with('s') {
        vec![kind]
    } else {
        vec![kind.clone(), format!("{}s", kind)]
    }
}

/// Finds the raw content value of a section and the strategy that found it.
pub fn locate_content(section: &PersistedSection) -> Option<(ExtractionStrategy, &Value)> {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy.locate(section).map(|value| (*strategy, value)))
}

/// Extracts and normalizes a section's content for `kind`. Falls back to the
/// kind's default content when nothing is found.
pub fn extract_content(kind: &SectionKind, section: &PersistedSection) -> SectionContent {
    match locate_content(section) {
        Some((_, value)) => coerce(kind, value),
        None => kind.default_content(),
    }
}

/// Coerces a raw value into the content shape of `kind`.
pub fn coerce(kind: &SectionKind, value: &Value) -> SectionContent {
    match kind.shape() {
        ContentShape::Text => SectionContent::Text(coerce_text(value)),
        ContentShape::List => SectionContent::List(coerce_list(value)),
        ContentShape::Opaque => SectionContent::Opaque(value.clone()),
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(coerce_text)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => match map.get("text").or_else(|| map.get("body")) {
            Some(Value::String(text)) => text.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}

fn coerce_list(value: &Value) -> Vec<ContentItem> {
    match value {
        Value::Array(items) => items.iter().map(ContentItem::from_value).collect(),
        Value::String(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ContentItem::from)
            .collect(),
        Value::Object(map) => match map.get("items") {
            Some(Value::Array(items)) => items.iter().map(ContentItem::from_value).collect(),
            _ => vec![ContentItem::Record(map.clone())],
        },
        Value::Null => Vec::new(),
        other => vec![ContentItem::from_value(other)],
    }
}
