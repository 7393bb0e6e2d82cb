use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name stamped on a theme whose values match no preset.
pub const CUSTOM_THEME: &str = "custom";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub family: String,
    pub heading_size: String,
    pub body_size: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    Normal,
    Spacious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerWidth {
    Narrow,
    Normal,
    Wide,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStyles {
    pub spacing: Spacing,
    pub container_width: ContainerWidth,
}

/// A fully resolved theme: every channel is populated.
///
/// `name` is a preset key when the values match that preset exactly, and
/// `"custom"` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDescriptor {
    pub name: String,
    pub colors: ThemeColors,
    pub fonts: Typography,
    pub styles: ThemeStyles,
}

impl ThemeDescriptor {
    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_THEME
    }

    /// True when colors, fonts and styles are equal, ignoring the name.
    pub fn same_values(&self, other: &ThemeDescriptor) -> bool {
        self.colors == other.colors && self.fonts == other.fonts && self.styles == other.styles
    }
}

/// Partial theme update, merged one level deep: a supplied `colors`,
/// `fonts` or `styles` block replaces that block.
///
/// Setting `name` to a preset starts from that preset's values before the
/// other blocks are merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemePatch {
    pub name: Option<String>,
    pub colors: Option<ThemeColors>,
    pub fonts: Option<Typography>,
    pub styles: Option<ThemeStyles>,
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spacing::Compact => write!(f, "compact"),
            Spacing::Normal => write!(f, "normal"),
            Spacing::Spacious => write!(f, "spacious"),
        }
    }
}

impl FromStr for Spacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(Spacing::Compact),
            "normal" => Ok(Spacing::Normal),
            "spacious" => Ok(Spacing::Spacious),
            _ => Err(format!(
                "Invalid spacing '{}'. Valid options: compact, normal, spacious",
                s
            )),
        }
    }
}

impl fmt::Display for ContainerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerWidth::Narrow => write!(f, "narrow"),
            ContainerWidth::Normal => write!(f, "normal"),
            ContainerWidth::Wide => write!(f, "wide"),
            ContainerWidth::Full => write!(f, "full"),
        }
    }
}

impl FromStr for ContainerWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "narrow" => Ok(ContainerWidth::Narrow),
            "normal" => Ok(ContainerWidth::Normal),
            "wide" => Ok(ContainerWidth::Wide),
            "full" => Ok(ContainerWidth::Full),
            _ => Err(format!(
                "Invalid container width '{}'. Valid options: narrow, normal, wide, full",
                s
            )),
        }
    }
}
