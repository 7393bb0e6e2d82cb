use clap::Args;
use folio_core::models::{ContainerWidth, Spacing, ThemeDescriptor, ThemePatch};
use folio_core::theme::{find_preset, PRESETS};
use folio_core::PortfolioPatch;

use super::{finish, open_session};
use crate::config::Config;

#[derive(Args)]
pub struct ThemeCommand {
    /// Portfolio slug
    #[arg(required_unless_present = "list")]
    pub slug: Option<String>,

    /// List the available presets
    #[arg(long)]
    pub list: bool,

    /// Start from a preset (key or display name)
    #[arg(long)]
    pub preset: Option<String>,

    /// Primary color
    #[arg(long)]
    pub primary: Option<String>,

    /// Secondary color
    #[arg(long)]
    pub secondary: Option<String>,

    /// Background color
    #[arg(long)]
    pub background: Option<String>,

    /// Text color
    #[arg(long)]
    pub text: Option<String>,

    /// Accent color
    #[arg(long)]
    pub accent: Option<String>,

    /// Font family
    #[arg(long)]
    pub font: Option<String>,

    /// Heading font size (e.g. 2.5rem)
    #[arg(long)]
    pub heading_size: Option<String>,

    /// Body font size (e.g. 1rem)
    #[arg(long)]
    pub body_size: Option<String>,

    /// Spacing: compact, normal, spacious
    #[arg(long)]
    pub spacing: Option<Spacing>,

    /// Container width: narrow, normal, wide, full
    #[arg(long)]
    pub container_width: Option<ContainerWidth>,
}

impl ThemeCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        if self.list {
            print_presets();
            return Ok(());
        }
        let Some(slug) = &self.slug else {
            return Err("A portfolio slug is required".into());
        };

        let session = open_session(config, slug).await?;
        let patch = self.patch(&session.document().theme)?;
        if patch == ThemePatch::default() {
            return Err("Nothing to update. Pass --preset or at least one override".into());
        }

        session.update_document(PortfolioPatch {
            theme: Some(patch),
            ..PortfolioPatch::default()
        });
        println!("Theme: {}", session.document().theme.name);
        finish(&session).await
    }

    /// Builds a patch against `current`. Override blocks start from the
    /// chosen preset when one is given, otherwise from the current theme.
    fn patch(&self, current: &ThemeDescriptor) -> Result<ThemePatch, Box<dyn std::error::Error>> {
        let base = match &self.preset {
            Some(name) => match find_preset(name) {
                Some(preset) => preset.descriptor(),
                None => {
                    let valid = PRESETS.iter().map(|p| p.key).collect::<Vec<_>>().join(", ");
                    return Err(format!(
                        "Unknown preset '{}'. Valid options: {}",
                        name, valid
                    )
                    .into());
                }
            },
            None => current.clone(),
        };

        let mut patch = ThemePatch {
            name: self.preset.clone(),
            ..ThemePatch::default()
        };

        let color_overrides = [
            &self.primary,
            &self.secondary,
            &self.background,
            &self.text,
            &self.accent,
        ];
        if color_overrides.iter().any(|o| o.is_some()) {
            let mut colors = base.colors.clone();
            override_with(&mut colors.primary, &self.primary);
            override_with(&mut colors.secondary, &self.secondary);
            override_with(&mut colors.background, &self.background);
            override_with(&mut colors.text, &self.text);
            override_with(&mut colors.accent, &self.accent);
            patch.colors = Some(colors);
        }

        if self.font.is_some() || self.heading_size.is_some() || self.body_size.is_some() {
            let mut fonts = base.fonts.clone();
            override_with(&mut fonts.family, &self.font);
            override_with(&mut fonts.heading_size, &self.heading_size);
            override_with(&mut fonts.body_size, &self.body_size);
            patch.fonts = Some(fonts);
        }

        if self.spacing.is_some() || self.container_width.is_some() {
            let mut styles = base.styles.clone();
            if let Some(spacing) = self.spacing {
                styles.spacing = spacing;
            }
            if let Some(width) = self.container_width {
                styles.container_width = width;
            }
            patch.styles = Some(styles);
        }

        Ok(patch)
    }
}

fn override_with(slot: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

fn print_presets() {
    println!("{:<10}  {:<14}  {:<9}  ACCENT", "KEY", "NAME", "SPACING");
    println!("{}", "-".repeat(50));
    for preset in PRESETS {
        let theme = preset.descriptor();
        println!(
            "{:<10}  {:<14}  {:<9}  {}",
            preset.key,
            preset.display_name,
            theme.styles.spacing.to_string(),
            theme.colors.accent
        );
    }
}
