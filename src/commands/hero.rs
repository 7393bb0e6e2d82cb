use clap::Args;
use folio_core::{HeroPatch, PortfolioPatch};

use super::{finish, open_session};
use crate::config::Config;

#[derive(Args)]
pub struct HeroCommand {
    /// Portfolio slug
    pub slug: String,

    /// Headline
    #[arg(long)]
    pub title: Option<String>,

    /// Subtitle
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// Background image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Avatar image URL
    #[arg(long)]
    pub avatar: Option<String>,

    /// Call-to-action button text
    #[arg(long)]
    pub cta_text: Option<String>,

    /// Call-to-action link
    #[arg(long)]
    pub cta_link: Option<String>,

    /// Set a field to null (can be repeated)
    #[arg(long = "clear", value_name = "FIELD")]
    pub clear: Vec<String>,
}

impl HeroCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let patch = self.patch()?;
        if patch.is_empty() {
            return Err("Nothing to update. Pass at least one field or --clear".into());
        }

        let session = open_session(config, &self.slug).await?;
        if session.update_document(PortfolioPatch {
            hero: Some(patch),
            ..PortfolioPatch::default()
        }) {
            println!("Updated hero for {}", self.slug);
        } else {
            println!("Hero unchanged");
        }
        finish(&session).await
    }

    fn patch(&self) -> Result<HeroPatch, Box<dyn std::error::Error>> {
        let mut patch = HeroPatch::default();
        let fields = [
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("description", &self.description),
            ("image", &self.image),
            ("avatar", &self.avatar),
            ("ctaText", &self.cta_text),
            ("ctaLink", &self.cta_link),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                patch.set(name, Some(value.clone()));
            }
        }

        for field in &self.clear {
            if !patch.set(field, None) {
                return Err(format!(
                    "Unknown hero field '{}'. Valid options: title, subtitle, description, \
                     image, avatar, ctaText, ctaLink",
                    field
                )
                .into());
            }
        }
        Ok(patch)
    }
}
