use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::hero::{HeroBlock, HeroPatch};
use super::section::{Section, SectionKind};
use super::theme::{ThemeDescriptor, ThemePatch};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Unlisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    SinglePage,
    MultiPage,
}

/// Optional feature blocks. Opaque to the editing engine and carried
/// through translation unchanged, whatever their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureBlocks {
    pub gallery: Value,
    pub social_links: Value,
    pub sharing: Value,
    pub analytics: Value,
    pub custom_code: Value,
    /// Top-level blocks the engine has no name for (`seo`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FeatureBlocks {
    fn default() -> Self {
        Self {
            gallery: Value::Array(Vec::new()),
            social_links: Value::Object(Map::new()),
            sharing: Value::Object(Map::new()),
            analytics: Value::Object(Map::new()),
            custom_code: Value::Object(Map::new()),
            extra: Map::new(),
        }
    }
}

/// The root editable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Assigned by the store on first save.
    pub id: Option<String>,
    pub slug: String,
    pub visibility: Visibility,
    pub layout: Layout,
    pub hero: HeroBlock,
    /// Canonical order: `sections[i].order == i`.
    pub sections: Vec<Section>,
    pub theme: ThemeDescriptor,
    pub features: FeatureBlocks,
}

impl Portfolio {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            visibility: Visibility::default(),
            layout: Layout::default(),
            hero: HeroBlock::default(),
            sections: Vec::new(),
            theme: theme::default_theme(),
            features: FeatureBlocks::default(),
        }
    }

    /// Starting document used when nothing has been persisted for `slug` yet.
    pub fn default_template(slug: impl Into<String>) -> Self {
        let kinds = [
            SectionKind::About,
            SectionKind::Skills,
            SectionKind::Projects,
            SectionKind::Education,
        ];
        let sections = kinds
            .into_iter()
            .enumerate()
            .map(|(order, kind)| Section::new(format!("{}-default", kind), kind).with_order(order))
            .collect();

        Self {
            sections,
            ..Self::new(slug)
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// True when every section's `order` equals its index.
    pub fn is_ordered(&self) -> bool {
        self.sections
            .iter()
            .enumerate()
            .all(|(index, section)| section.order == index)
    }
}

/// Shallow update of top-level portfolio fields. `hero` and `theme` merge
/// one level deep instead of replacing the whole block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioPatch {
    pub slug: Option<String>,
    pub visibility: Option<Visibility>,
    pub layout: Option<Layout>,
    pub hero: Option<HeroPatch>,
    pub theme: Option<ThemePatch>,
    pub features: Option<FeatureBlocks>,
}

/// Slugs are lowercase ASCII letters, digits and single inner hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Unlisted => write!(f, "unlisted"),
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "unlisted" => Ok(Visibility::Unlisted),
            _ => Err(format!(
                "Invalid visibility '{}'. Valid options: public, private, unlisted",
                s
            )),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::SinglePage => write!(f, "single-page"),
            Layout::MultiPage => write!(f, "multi-page"),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "single-page" | "single" => Ok(Layout::SinglePage),
            "multi-page" | "multi" => Ok(Layout::MultiPage),
            _ => Err(format!(
                "Invalid layout '{}'. Valid options: single-page, multi-page",
                s
            )),
        }
    }
}
