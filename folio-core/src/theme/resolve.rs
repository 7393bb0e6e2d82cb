//! Theme resolution: turns a preset name, a partial object, or a custom
//! theme into a fully populated [`ThemeDescriptor`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use super::presets::{default_preset, find_preset, PRESETS};
use crate::models::{ContainerWidth, Spacing, ThemeDescriptor, ThemePatch, CUSTOM_THEME};

/// Partial theme as it appears on the wire. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInput {
    #[serde(default, alias = "preset", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub colors: ColorOverrides,
    #[serde(default)]
    pub fonts: FontOverrides,
    #[serde(default)]
    pub styles: StyleOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontOverrides {
    #[serde(default, alias = "fontFamily", skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_width: Option<String>,
}

impl ThemeInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl From<&ThemeDescriptor> for ThemeInput {
    fn from(theme: &ThemeDescriptor) -> Self {
        Self {
            name: Some(theme.name.clone()),
            colors: ColorOverrides {
                primary: Some(theme.colors.primary.clone()),
                secondary: Some(theme.colors.secondary.clone()),
                background: Some(theme.colors.background.clone()),
                text: Some(theme.colors.text.clone()),
                accent: Some(theme.colors.accent.clone()),
            },
            fonts: FontOverrides {
                family: Some(theme.fonts.family.clone()),
                heading_size: Some(theme.fonts.heading_size.clone()),
                body_size: Some(theme.fonts.body_size.clone()),
            },
            styles: StyleOverrides {
                spacing: Some(theme.styles.spacing.to_string()),
                container_width: Some(theme.styles.container_width.to_string()),
            },
        }
    }
}

/// Resolves a theme input into a fully populated descriptor.
///
/// A name matching a preset key or display name selects that preset as the
/// base; anything else starts from `minimal`. Supplied channels are merged
/// over the base. The result is named after the preset it matches exactly,
/// or `"custom"` if it matches none.
pub fn resolve_theme(input: &ThemeInput) -> ThemeDescriptor {
    let base = input
        .name
        .as_deref()
        .and_then(find_preset)
        .unwrap_or_else(default_preset);

    let mut theme = base.descriptor();
    merge_overrides(&mut theme, input);
    theme.name = canonical_name(&theme);
    theme
}

/// Applies a one-level theme patch and re-stamps the name.
pub fn apply_theme_patch(theme: &mut ThemeDescriptor, patch: ThemePatch) {
    if let Some(name) = patch.name.as_deref() {
        if let Some(preset) = find_preset(name) {
            *theme = preset.descriptor();
        }
    }
    if let Some(colors) = patch.colors {
        theme.colors = colors;
    }
    if let Some(fonts) = patch.fonts {
        theme.fonts = fonts;
    }
    if let Some(styles) = patch.styles {
        theme.styles = styles;
    }
    theme.name = canonical_name(theme);
}

/// Key of the preset whose values equal `theme`, or `"custom"`.
pub fn canonical_name(theme: &ThemeDescriptor) -> String {
    PRESETS
        .iter()
        .find(|preset| preset.matches(theme))
        .map(|preset| preset.key.to_string())
        .unwrap_or_else(|| CUSTOM_THEME.to_string())
}

fn merge_overrides(theme: &mut ThemeDescriptor, input: &ThemeInput) {
    fn set(slot: &mut String, value: &Option<String>) {
        if let Some(value) = value {
            *slot = value.clone();
        }
    }

    set(&mut theme.colors.primary, &input.colors.primary);
    set(&mut theme.colors.secondary, &input.colors.secondary);
    set(&mut theme.colors.background, &input.colors.background);
    set(&mut theme.colors.text, &input.colors.text);
    set(&mut theme.colors.accent, &input.colors.accent);

    set(&mut theme.fonts.family, &input.fonts.family);
    set(&mut theme.fonts.heading_size, &input.fonts.heading_size);
    set(&mut theme.fonts.body_size, &input.fonts.body_size);

    if let Some(spacing) = &input.styles.spacing {
        match Spacing::from_str(spacing) {
            Ok(spacing) => theme.styles.spacing = spacing,
            Err(e) => warn!("Ignoring theme spacing: {}", e),
        }
    }
    if let Some(width) = &input.styles.container_width {
        match ContainerWidth::from_str(width) {
            Ok(width) => theme.styles.container_width = width,
            Err(e) => warn!("Ignoring theme container width: {}", e),
        }
    }
}
