//! The UI-facing surface of one editing session.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::editor::Editor;
use crate::models::{Portfolio, PortfolioPatch, SectionKind, SectionPatch};
use crate::persistence::{PersistenceScheduler, SaveStatus, SchedulerConfig};
use crate::schema::to_editable;
use crate::store::{DocumentStore, PersistReceipt, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("A save is already in progress")]
    SaveInFlight,

    #[error("Save task ended unexpectedly: {0}")]
    SaveInterrupted(String),
}

/// One portfolio opened for editing.
///
/// Mutations apply immediately and schedule a debounced save. Sessions are
/// independent: each owns its document, so several can run side by side.
#[derive(Clone)]
pub struct EditSession {
    scheduler: PersistenceScheduler,
}

impl EditSession {
    /// Loads `slug` from the store, or starts from the default template when
    /// the store has nothing for it. A template document counts as unsaved
    /// but is not written until the first edit or save.
    pub async fn open(
        store: Arc<dyn DocumentStore>,
        slug: &str,
        config: SchedulerConfig,
    ) -> Result<Self, SessionError> {
        let (document, saved) = match store.load(slug).await? {
            Some(persisted) => {
                debug!("Loaded portfolio '{}'", slug);
                (to_editable(&persisted), true)
            }
            None => {
                info!("No stored portfolio '{}'; starting from template", slug);
                (Portfolio::default_template(slug), false)
            }
        };

        Ok(Self::new(store, document, saved, config))
    }

    pub fn new(
        store: Arc<dyn DocumentStore>,
        document: Portfolio,
        saved: bool,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            scheduler: PersistenceScheduler::new(store, Editor::new(document), saved, config),
        }
    }

    pub fn document(&self) -> Portfolio {
        self.scheduler.document()
    }

    pub fn status(&self) -> SaveStatus {
        self.scheduler.status()
    }

    pub fn update_document(&self, patch: PortfolioPatch) -> bool {
        self.scheduler.edit(|editor| editor.update_document(patch))
    }

    pub fn update_section(&self, id: &str, patch: SectionPatch) -> bool {
        self.scheduler.edit(|editor| editor.update_section(id, patch))
    }

    pub fn add_section(&self, kind: SectionKind, position: Option<usize>) -> String {
        self.scheduler.edit(|editor| editor.add_section(kind, position))
    }

    pub fn remove_section(&self, id: &str) -> bool {
        self.scheduler.edit(|editor| editor.remove_section(id))
    }

    pub fn duplicate_section(&self, id: &str) -> Option<String> {
        self.scheduler.edit(|editor| editor.duplicate_section(id))
    }

    pub fn reorder_sections<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        self.scheduler.edit(|editor| editor.reorder_sections(ids))
    }

    pub fn move_section(&self, active_id: &str, over_id: &str) -> bool {
        self.scheduler.edit(|editor| editor.move_section(active_id, over_id))
    }

    pub async fn save_now(&self) -> Result<PersistReceipt, SessionError> {
        self.scheduler.save_now().await
    }

    /// Saves pending changes without waiting for the debounce window. Call
    /// before dropping the session; dropping alone discards unsaved edits.
    pub async fn flush(&self) -> Result<Option<PersistReceipt>, SessionError> {
        self.scheduler.flush().await
    }
}
