use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Section type tag.
///
/// The nine known kinds form a closed set; anything else is kept as
/// `Unknown` so newer documents still load and their content passes through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKind {
    About,
    Skills,
    Achievements,
    Projects,
    Certificates,
    Interests,
    Education,
    Custom,
    Hero,
    Unknown(String),
}

/// Shape of the content payload carried by a section kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    Text,
    List,
    Opaque,
}

impl SectionKind {
    pub const ALL: [SectionKind; 9] = [
        SectionKind::About,
        SectionKind::Skills,
        SectionKind::Achievements,
        SectionKind::Projects,
        SectionKind::Certificates,
        SectionKind::Interests,
        SectionKind::Education,
        SectionKind::Custom,
        SectionKind::Hero,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::About => "about",
            SectionKind::Skills => "skills",
            SectionKind::Achievements => "achievements",
            SectionKind::Projects => "projects",
            SectionKind::Certificates => "certificates",
            SectionKind::Interests => "interests",
            SectionKind::Education => "education",
            SectionKind::Custom => "custom",
            SectionKind::Hero => "hero",
            SectionKind::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SectionKind::Unknown(_))
    }

    pub fn shape(&self) -> ContentShape {
        match self {
            SectionKind::About | SectionKind::Custom => ContentShape::Text,
            SectionKind::Skills
            | SectionKind::Achievements
            | SectionKind::Projects
            | SectionKind::Certificates
            | SectionKind::Interests
            | SectionKind::Education => ContentShape::List,
            SectionKind::Hero | SectionKind::Unknown(_) => ContentShape::Opaque,
        }
    }

    /// Title given to a freshly added section of this kind.
    pub fn default_title(&self) -> String {
        match self {
            SectionKind::About => "About Me".to_string(),
            SectionKind::Skills => "Skills".to_string(),
            SectionKind::Achievements => "Achievements".to_string(),
            SectionKind::Projects => "Projects".to_string(),
            SectionKind::Certificates => "Certificates".to_string(),
            SectionKind::Interests => "Interests".to_string(),
            SectionKind::Education => "Education".to_string(),
            SectionKind::Custom => "Custom Section".to_string(),
            SectionKind::Hero => "Hero".to_string(),
            SectionKind::Unknown(tag) => tag.clone(),
        }
    }

    pub fn default_content(&self) -> SectionContent {
        match self.shape() {
            ContentShape::Text => SectionContent::Text(String::new()),
            ContentShape::List => SectionContent::List(Vec::new()),
            ContentShape::Opaque => SectionContent::Opaque(Value::Object(Map::new())),
        }
    }
}

impl From<String> for SectionKind {
    fn from(tag: String) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "about" => SectionKind::About,
            "skills" => SectionKind::Skills,
            "achievements" => SectionKind::Achievements,
            "projects" => SectionKind::Projects,
            "certificates" => SectionKind::Certificates,
            "interests" => SectionKind::Interests,
            "education" => SectionKind::Education,
            "custom" => SectionKind::Custom,
            "hero" => SectionKind::Hero,
            _ => SectionKind::Unknown(tag),
        }
    }
}

impl From<&str> for SectionKind {
    fn from(tag: &str) -> Self {
        SectionKind::from(tag.to_string())
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a list-shaped section: a bare string or a structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    Record(Map<String, Value>),
}

impl ContentItem {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => ContentItem::Text(s.clone()),
            Value::Object(map) => ContentItem::Record(map.clone()),
            other => ContentItem::Text(other.to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ContentItem::Text(s) => Value::String(s.clone()),
            ContentItem::Record(map) => Value::Object(map.clone()),
        }
    }
}

impl From<&str> for ContentItem {
    fn from(text: &str) -> Self {
        ContentItem::Text(text.to_string())
    }
}

/// Section payload, one variant per content shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "value", rename_all = "lowercase")]
pub enum SectionContent {
    Text(String),
    List(Vec<ContentItem>),
    Opaque(Value),
}

impl SectionContent {
    pub fn shape(&self) -> ContentShape {
        match self {
            SectionContent::Text(_) => ContentShape::Text,
            SectionContent::List(_) => ContentShape::List,
            SectionContent::Opaque(_) => ContentShape::Opaque,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(text) => text.is_empty(),
            SectionContent::List(items) => items.is_empty(),
            SectionContent::Opaque(value) => match value {
                Value::Null => true,
                Value::Object(map) => map.is_empty(),
                Value::Array(items) => items.is_empty(),
                _ => false,
            },
        }
    }
}

/// A typed, orderable child block of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
    pub enabled: bool,
    pub order: usize,
    pub title: String,
    pub content: SectionContent,
    /// Stored fields outside the editable model, written back on save.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Section {
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            id: id.into(),
            title: kind.default_title(),
            content: kind.default_content(),
            kind,
            enabled: true,
            order: 0,
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content(mut self, content: SectionContent) -> Self {
        self.content = content;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Merges a patch into this section. Returns true if anything changed.
    pub fn apply(&mut self, patch: SectionPatch) -> bool {
        let before = self.clone();
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        *self != before
    }
}

/// Partial update for a section. Id, kind and order are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub title: Option<String>,
    pub enabled: Option<bool>,
    pub content: Option<SectionContent>,
}

impl SectionPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::default()
        }
    }

    pub fn content(content: SectionContent) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }
}

/// Builds a `{type}-{unix_millis}` id, bumping the millisecond part until
/// `is_taken` accepts it.
pub fn fresh_section_id(kind: &SectionKind, is_taken: impl Fn(&str) -> bool) -> String {
    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let id = format!("{}-{}", kind, stamp);
        if !is_taken(&id) {
            return id;
        }
        stamp += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(SectionKind::from("about"), SectionKind::About);
        assert_eq!(SectionKind::from("Skills"), SectionKind::Skills);
        assert_eq!(
            SectionKind::from("timeline"),
            SectionKind::Unknown("timeline".to_string())
        );
    }

    #[test]
    fn test_kind_json_roundtrip() {
        let json = serde_json::to_string(&SectionKind::Education).unwrap();
        assert_eq!(json, "\"education\"");

        let parsed: SectionKind = serde_json::from_str("\"timeline\"").unwrap();
        assert_eq!(parsed, SectionKind::Unknown("timeline".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"timeline\"");
    }

    #[test]
    fn test_kind_shapes() {
        assert_eq!(SectionKind::About.shape(), ContentShape::Text);
        assert_eq!(SectionKind::Custom.shape(), ContentShape::Text);
        assert_eq!(SectionKind::Projects.shape(), ContentShape::List);
        assert_eq!(SectionKind::Hero.shape(), ContentShape::Opaque);
        assert_eq!(
            SectionKind::Unknown("x".into()).shape(),
            ContentShape::Opaque
        );
    }

    #[test]
    fn test_default_content_matches_shape() {
        for kind in SectionKind::ALL {
            let content = kind.default_content();
            assert_eq!(content.shape(), kind.shape());
            assert!(content.is_empty());
        }
    }

    #[test]
    fn test_content_item_from_value() {
        assert_eq!(
            ContentItem::from_value(&json!("Rust")),
            ContentItem::Text("Rust".into())
        );
        let record = ContentItem::from_value(&json!({"name": "Rust", "level": 5}));
        assert!(matches!(record, ContentItem::Record(ref map) if map.len() == 2));
        assert_eq!(ContentItem::from_value(&json!(42)), ContentItem::Text("42".into()));
    }

    #[test]
    fn test_section_apply_patch() {
        let mut section = Section::new("about-1", SectionKind::About);
        assert!(section.apply(SectionPatch::title("Who I am")));
        assert_eq!(section.title, "Who I am");
        assert!(section.enabled);

        assert!(!section.apply(SectionPatch::title("Who I am")));
        assert!(section.apply(SectionPatch::enabled(false)));
        assert!(!section.enabled);
    }

    #[test]
    fn test_fresh_section_id_skips_taken() {
        let first = fresh_section_id(&SectionKind::Skills, |_| false);
        assert!(first.starts_with("skills-"));

        let second = fresh_section_id(&SectionKind::Skills, |id| id == first);
        assert_ne!(first, second);
        assert!(second.starts_with("skills-"));
    }
}
