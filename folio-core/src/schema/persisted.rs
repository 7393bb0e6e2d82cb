//! Wire shapes accepted and returned by the remote store.
//!
//! ```text
//! {
//!   "id": "<uuid>",                      // absent until first save
//!   "slug": "string",
//!   "visibility": "public" | "private" | "unlisted",
//!   "layout": "single-page" | "multi-page",
//!   "hero": { "title": "string" | null, ..., "ctaText": ..., "ctaLink": ... },
//!   "sections": [
//!     { "id", "type", "title", "order", "enabled",
//!       "items": [...]  |  "content": "string" | <any> }
//!   ],
//!   "theme": "dark" | { "name", "colors", "fonts", "styles" },
//!   "gallery": [...], "socialLinks": {...}, "sharing": {...},
//!   "analytics": {...}, "customCode": {...},
//!   ...                                  // any other block, kept verbatim
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::theme::ThemeInput;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPortfolio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<PersistedHero>,
    #[serde(default)]
    pub sections: Vec<PersistedSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<PersistedTheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Hero fields distinguish absent (`None`), null (`Some(None)`) and a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedHero {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Any other fields, e.g. legacy content stored under the type name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A stored theme is either a bare preset name or a (possibly partial) object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistedTheme {
    Named(String),
    Detailed(ThemeInput),
}

impl PersistedTheme {
    pub fn into_input(self) -> ThemeInput {
        match self {
            PersistedTheme::Named(name) => ThemeInput::named(name),
            PersistedTheme::Detailed(input) => input,
        }
    }
}

fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
