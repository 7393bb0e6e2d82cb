mod config_cmd;
mod hero;
mod section;
mod show;
mod theme;

pub use config_cmd::ConfigCommand;
pub use hero::HeroCommand;
pub use section::SectionCommand;
pub use show::ShowCommand;
pub use theme::ThemeCommand;

use clap::ValueEnum;
use folio_core::{DocumentStore, EditSession, FileStore, HttpStore, SaveState, SaveStatus};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Picks the remote store when it is fully configured, the file store otherwise.
pub fn store_from_config(config: &Config) -> Arc<dyn DocumentStore> {
    match config.store.remote() {
        Some((url, key)) => {
            debug!("Using remote store at {}", url);
            Arc::new(HttpStore::new(url, Some(key.to_string())))
        }
        None => {
            debug!("Using file store in {}", config.data_dir.value.display());
            Arc::new(FileStore::new(config.data_dir.value.clone()))
        }
    }
}

pub async fn open_session(
    config: &Config,
    slug: &str,
) -> Result<EditSession, Box<dyn std::error::Error>> {
    let session =
        EditSession::open(store_from_config(config), slug, config.scheduler_config()).await?;
    Ok(session)
}

/// Saves pending edits and reports the outcome.
pub async fn finish(session: &EditSession) -> Result<(), Box<dyn std::error::Error>> {
    let saved = session.flush().await?;
    print_status(&session.status());
    if saved.is_none() {
        println!("Nothing to save");
    }
    Ok(())
}

pub fn print_status(status: &SaveStatus) {
    match status.state() {
        SaveState::Error => println!(
            "Status: {} ({})",
            status.state(),
            status.save_error.as_deref().unwrap_or("unknown error")
        ),
        state => match status.last_saved_at {
            Some(at) => println!("Status: {} at {}", state, at.format("%Y-%m-%d %H:%M:%S UTC")),
            None => println!("Status: {}", state),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, ConfigValue, StoreConfig};
    use folio_core::SectionKind;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn config(data_dir: PathBuf, store: StoreConfig) -> Config {
        Config {
            data_dir: ConfigValue::new(data_dir, ConfigSource::File),
            debounce_ms: ConfigValue::new(500, ConfigSource::Default),
            config_file: None,
            store,
        }
    }

    #[tokio::test]
    async fn test_edit_and_reopen_through_file_store() {
        let dir = tempdir().unwrap();
        let config = config(dir.path().to_path_buf(), StoreConfig::default());

        let session = open_session(&config, "ada").await.unwrap();
        let id = session.add_section(SectionKind::Interests, Some(0));
        finish(&session).await.unwrap();
        assert!(dir.path().join("ada.json").exists());

        let reopened = open_session(&config, "ada").await.unwrap();
        assert_eq!(reopened.document().sections[0].id, id);
        assert!(reopened.document().id.is_some());
        assert!(!reopened.status().has_unsaved_changes);
    }

    #[tokio::test]
    async fn test_partial_remote_config_falls_back_to_files() {
        let dir = tempdir().unwrap();
        let store = StoreConfig {
            server_url: Some("http://127.0.0.1:1".into()),
            api_key: None,
        };
        let config = config(dir.path().to_path_buf(), store);

        // Would fail to connect if the remote store were chosen.
        let session = open_session(&config, "ada").await.unwrap();
        assert!(session.document().id.is_none());
    }
}
