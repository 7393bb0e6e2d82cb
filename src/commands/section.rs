use clap::{Args, Subcommand};
use folio_core::{EditSession, SectionKind, SectionPatch};

use super::{finish, open_session};
use crate::config::Config;

#[derive(Args)]
pub struct SectionCommand {
    #[command(subcommand)]
    pub command: SectionSubcommand,
}

#[derive(Subcommand)]
pub enum SectionSubcommand {
    /// Add a section with default content
    Add {
        /// Portfolio slug
        slug: String,

        /// Section type (about, skills, achievements, projects, certificates,
        /// interests, education, custom, hero)
        #[arg(value_name = "TYPE")]
        kind: String,

        /// Insert at this position instead of appending
        #[arg(long)]
        position: Option<usize>,
    },

    /// Remove a section
    Remove {
        /// Portfolio slug
        slug: String,

        /// Section ID
        id: String,
    },

    /// Duplicate a section directly after the original
    Duplicate {
        /// Portfolio slug
        slug: String,

        /// Section ID
        id: String,
    },

    /// Move a section next to another, as if dragged onto it
    Move {
        /// Portfolio slug
        slug: String,

        /// Section ID to move
        id: String,

        /// Section ID it is dropped on
        over_id: String,
    },

    /// Set the full section order; unlisted sections are removed
    Reorder {
        /// Portfolio slug
        slug: String,

        /// Section IDs in their new order
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Enable or disable a section. Disabled sections are not saved, so
    /// disabling one removes it from the store on the next save
    Toggle {
        /// Portfolio slug
        slug: String,

        /// Section ID
        id: String,
    },

    /// Rename a section
    Title {
        /// Portfolio slug
        slug: String,

        /// Section ID
        id: String,

        /// New title
        title: String,
    },
}

impl SectionSubcommand {
    fn slug(&self) -> &str {
        match self {
            SectionSubcommand::Add { slug, .. }
            | SectionSubcommand::Remove { slug, .. }
            | SectionSubcommand::Duplicate { slug, .. }
            | SectionSubcommand::Move { slug, .. }
            | SectionSubcommand::Reorder { slug, .. }
            | SectionSubcommand::Toggle { slug, .. }
            | SectionSubcommand::Title { slug, .. } => slug,
        }
    }
}

impl SectionCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let session = open_session(config, self.command.slug()).await?;
        self.apply(&session)?;
        finish(&session).await
    }

    fn apply(&self, session: &EditSession) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SectionSubcommand::Add { kind, position, .. } => {
                let kind = parse_kind(kind)?;
                let id = session.add_section(kind, *position);
                println!("Added section: {}", id);
            }

            SectionSubcommand::Remove { id, .. } => {
                if !session.remove_section(id) {
                    return Err(not_found(id));
                }
                println!("Removed section: {}", id);
            }

            SectionSubcommand::Duplicate { id, .. } => {
                let copy = session.duplicate_section(id).ok_or_else(|| not_found(id))?;
                println!("Duplicated section {} as {}", id, copy);
            }

            SectionSubcommand::Move { id, over_id, .. } => {
                let document = session.document();
                for section_id in [id, over_id] {
                    if document.section(section_id).is_none() {
                        return Err(not_found(section_id));
                    }
                }
                if session.move_section(id, over_id) {
                    println!("Moved section {} next to {}", id, over_id);
                } else {
                    println!("Section {} is already in place", id);
                }
            }

            SectionSubcommand::Reorder { ids, .. } => {
                let document = session.document();
                if let Some(unknown) = ids.iter().find(|id| document.section(id).is_none()) {
                    return Err(not_found(unknown));
                }
                let dropped = document
                    .sections
                    .iter()
                    .filter(|s| !ids.contains(&s.id))
                    .count();

                if session.reorder_sections(ids.as_slice()) {
                    println!("Reordered {} section(s)", ids.len());
                    if dropped > 0 {
                        println!("Removed {} unlisted section(s)", dropped);
                    }
                } else {
                    println!("Order unchanged");
                }
            }

            SectionSubcommand::Toggle { id, .. } => {
                let enabled = match session.document().section(id) {
                    Some(section) => !section.enabled,
                    None => return Err(not_found(id)),
                };
                session.update_section(id, SectionPatch::enabled(enabled));
                println!("{}", toggle_message(id, enabled));
            }

            SectionSubcommand::Title { id, title, .. } => {
                if title.trim().is_empty() {
                    return Err("Section title cannot be empty".into());
                }
                if session.document().section(id).is_none() {
                    return Err(not_found(id));
                }
                session.update_section(id, SectionPatch::title(title.trim()));
                println!("Renamed section {} to '{}'", id, title.trim());
            }
        }
        Ok(())
    }
}

fn parse_kind(raw: &str) -> Result<SectionKind, Box<dyn std::error::Error>> {
    let kind = SectionKind::from(raw.trim().to_lowercase().as_str());
    if !kind.is_known() {
        let valid = SectionKind::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(format!("Invalid section type '{}'. Valid options: {}", raw, valid).into());
    }
    Ok(kind)
}

fn toggle_message(id: &str, enabled: bool) -> String {
    if enabled {
        format!("Section {} enabled", id)
    } else {
        format!(
            "Section {} disabled. Disabled sections are not saved; it will be \
             removed from the stored portfolio",
            id
        )
    }
}

fn not_found(id: &str) -> Box<dyn std::error::Error> {
    format!("Section not found: {}", id).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("skills").unwrap(), SectionKind::Skills);
        assert_eq!(parse_kind(" Projects ").unwrap(), SectionKind::Projects);

        let err = parse_kind("blog").unwrap_err();
        assert!(err.to_string().contains("Invalid section type 'blog'"));
        assert!(err.to_string().contains("certificates"));
    }

    #[test]
    fn test_toggle_message_warns_on_disable() {
        assert_eq!(toggle_message("about-1", true), "Section about-1 enabled");

        let message = toggle_message("about-1", false);
        assert!(message.starts_with("Section about-1 disabled."));
        assert!(message.contains("removed from the stored portfolio"));
    }
}
