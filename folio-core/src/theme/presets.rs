//! Built-in theme presets.

use crate::models::{
    ContainerWidth, Spacing, ThemeColors, ThemeDescriptor, ThemeStyles, Typography,
};

/// Key of the preset used as the base for unnamed or custom themes.
pub const DEFAULT_PRESET: &str = "minimal";

/// A named, fully specified theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub key: &'static str,
    pub display_name: &'static str,
    pub colors: [&'static str; 5],
    pub family: &'static str,
    pub heading_size: &'static str,
    pub body_size: &'static str,
    pub spacing: Spacing,
    pub container_width: ContainerWidth,
}

/// Colors are ordered primary, secondary, background, text, accent.
pub const PRESETS: &[ThemePreset] = &[
    ThemePreset {
        key: "minimal",
        display_name: "Minimal",
        colors: ["#111827", "#6b7280", "#ffffff", "#111827", "#2563eb"],
        family: "Inter, sans-serif",
        heading_size: "2.25rem",
        body_size: "1rem",
        spacing: Spacing::Normal,
        container_width: ContainerWidth::Normal,
    },
    ThemePreset {
        key: "dark",
        display_name: "Dark Mode",
        colors: ["#f9fafb", "#9ca3af", "#0f172a", "#e5e7eb", "#38bdf8"],
        family: "Inter, sans-serif",
        heading_size: "2.25rem",
        body_size: "1rem",
        spacing: Spacing::Normal,
        container_width: ContainerWidth::Normal,
    },
    ThemePreset {
        key: "ocean",
        display_name: "Ocean Breeze",
        colors: ["#0e7490", "#0891b2", "#f0f9ff", "#0c4a6e", "#06b6d4"],
        family: "Poppins, sans-serif",
        heading_size: "2.5rem",
        body_size: "1.0625rem",
        spacing: Spacing::Spacious,
        container_width: ContainerWidth::Wide,
    },
    ThemePreset {
        key: "sunset",
        display_name: "Sunset Glow",
        colors: ["#c2410c", "#ea580c", "#fff7ed", "#431407", "#f59e0b"],
        family: "Playfair Display, serif",
        heading_size: "2.75rem",
        body_size: "1.125rem",
        spacing: Spacing::Spacious,
        container_width: ContainerWidth::Normal,
    },
    ThemePreset {
        key: "forest",
        display_name: "Forest",
        colors: ["#166534", "#15803d", "#f0fdf4", "#14532d", "#84cc16"],
        family: "Merriweather, serif",
        heading_size: "2.25rem",
        body_size: "1rem",
        spacing: Spacing::Compact,
        container_width: ContainerWidth::Narrow,
    },
];

impl ThemePreset {
    pub fn descriptor(&self) -> ThemeDescriptor {
        let [primary, secondary, background, text, accent] = self.colors;
        ThemeDescriptor {
            name: self.key.to_string(),
            colors: ThemeColors {
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                background: background.to_string(),
                text: text.to_string(),
                accent: accent.to_string(),
            },
            fonts: Typography {
                family: self.family.to_string(),
                heading_size: self.heading_size.to_string(),
                body_size: self.body_size.to_string(),
            },
            styles: ThemeStyles {
                spacing: self.spacing,
                container_width: self.container_width,
            },
        }
    }

    pub fn matches(&self, theme: &ThemeDescriptor) -> bool {
        self.descriptor().same_values(theme)
    }
}

/// Finds a preset by key or display name, ignoring case.
pub fn find_preset(name: &str) -> Option<&'static ThemePreset> {
    let name = name.trim();
    PRESETS.iter().find(|preset| {
        preset.key.eq_ignore_ascii_case(name) || preset.display_name.eq_ignore_ascii_case(name)
    })
}

pub fn default_preset() -> &'static ThemePreset {
    &PRESETS[0]
}

pub fn default_theme() -> ThemeDescriptor {
    default_preset().descriptor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_is_minimal() {
        assert_eq!(default_preset().key, DEFAULT_PRESET);
        assert_eq!(default_theme().name, "minimal");
    }

    #[test]
    fn test_find_preset_by_key_and_display_name() {
        assert_eq!(find_preset("dark").map(|p| p.key), Some("dark"));
        assert_eq!(find_preset("Dark Mode").map(|p| p.key), Some("dark"));
        assert_eq!(find_preset("OCEAN").map(|p| p.key), Some("ocean"));
        assert!(find_preset("custom").is_none());
        assert!(find_preset("neon").is_none());
    }

    #[test]
    fn test_preset_values_are_distinct() {
        for (i, a) in PRESETS.iter().enumerate() {
            for b in &PRESETS[i + 1..] {
                assert!(!a.matches(&b.descriptor()), "{} == {}", a.key, b.key);
            }
        }
    }

    #[test]
    fn test_descriptor_fully_populated() {
        for preset in PRESETS {
            let theme = preset.descriptor();
            assert!(!theme.colors.primary.is_empty());
            assert!(!theme.colors.accent.is_empty());
            assert!(!theme.fonts.family.is_empty());
            assert!(!theme.fonts.heading_size.is_empty());
            assert!(preset.matches(&theme));
        }
    }
}
