use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::snapshot::{snapshot_hash, SnapshotHash};
use super::status::SaveStatus;
use crate::editor::Editor;
use crate::models::Portfolio;
use crate::schema::{to_persisted, PersistedPortfolio};
use crate::session::SessionError;
use crate::store::{DocumentStore, PersistReceipt, StoreError};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Delay after the last mutation before a save is attempted.
    pub debounce: Duration,
}

impl SchedulerConfig {
    pub fn with_debounce_ms(ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(ms),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

struct State {
    editor: Editor,
    status: SaveStatus,
    /// Hash of the last payload the store acknowledged.
    saved_hash: Option<SnapshotHash>,
    /// Bumped whenever the timer is cancelled; a firing timer with an older
    /// generation does nothing.
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

struct Inner {
    store: Arc<dyn DocumentStore>,
    config: SchedulerConfig,
    state: Mutex<State>,
}

/// Owns the editor for one document and schedules its saves.
///
/// Cloning shares the same document. The pending timer only holds a weak
/// reference, so dropping every clone discards unsaved edits; call
/// [`flush`](Self::flush) first to keep them.
#[derive(Clone)]
pub struct PersistenceScheduler {
    inner: Arc<Inner>,
}

impl PersistenceScheduler {
    /// `saved` says whether `editor` already matches what the store holds.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        editor: Editor,
        saved: bool,
        config: SchedulerConfig,
    ) -> Self {
        let saved_hash = saved.then(|| snapshot_hash(&to_persisted(editor.document())));
        let status = SaveStatus {
            has_unsaved_changes: !saved,
            ..SaveStatus::default()
        };

        Self {
            inner: Arc::new(Inner {
                store,
                config,
                state: Mutex::new(State {
                    editor,
                    status,
                    saved_hash,
                    generation: 0,
                    timer: None,
                }),
            }),
        }
    }

    pub fn config(&self) -> SchedulerConfig {
        self.inner.config
    }

    pub fn document(&self) -> Portfolio {
        self.lock().editor.document().clone()
    }

    pub fn status(&self) -> SaveStatus {
        self.lock().status.clone()
    }

    /// Applies a mutation synchronously, then recomputes the dirty flag and
    /// re-arms the debounce timer.
    pub fn edit<R>(&self, mutation: impl FnOnce(&mut Editor) -> R) -> R {
        let mut state = self.lock();
        let result = mutation(&mut state.editor);
        self.note_change(&mut state);
        result
    }

    /// Cancels the pending timer and saves the current document immediately.
    ///
    /// Rejected with [`SessionError::SaveInFlight`] while another save runs.
    pub async fn save_now(&self) -> Result<PersistReceipt, SessionError> {
        let payload = {
            let mut state = self.lock();
            if state.status.is_saving {
                debug!("save_now: save already in flight");
                return Err(SessionError::SaveInFlight);
            }
            self.begin_save(&mut state)
        };

        self.run_detached(payload).await
    }

    /// Cancels the pending timer and saves if there are unsaved changes.
    /// Returns `None` when there was nothing to save.
    pub async fn flush(&self) -> Result<Option<PersistReceipt>, SessionError> {
        let payload = {
            let mut state = self.lock();
            if state.status.is_saving {
                return Err(SessionError::SaveInFlight);
            }
            self.cancel_timer(&mut state);
            if !state.status.has_unsaved_changes {
                return Ok(None);
            }
            self.begin_save(&mut state)
        };

        self.run_detached(payload).await.map(Some)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_dirty(state: &State) -> bool {
        let current = snapshot_hash(&to_persisted(state.editor.document()));
        state.saved_hash != Some(current)
    }

    fn note_change(&self, state: &mut State) {
        let dirty = Self::is_dirty(state);
        state.status.has_unsaved_changes = dirty;

        if dirty {
            self.arm(state);
        } else {
            self.cancel_timer(state);
        }
    }

    fn cancel_timer(&self, state: &mut State) {
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation += 1;
    }

    fn arm(&self, state: &mut State) {
        self.cancel_timer(state);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("No async runtime; change stays pending until saved manually");
            return;
        };

        let generation = state.generation;
        let delay = self.inner.config.debounce;
        let weak = Arc::downgrade(&self.inner);

        state.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                PersistenceScheduler { inner }.fire(generation).await;
            }
        }));
        debug!("Save scheduled in {:?}", delay);
    }

    async fn fire(&self, generation: u64) {
        let payload = {
            let mut state = self.lock();
            if state.generation != generation {
                return;
            }
            state.timer = None;

            if state.status.is_saving {
                debug!("Timer fired during a save; deferring");
                return;
            }
            if !state.status.has_unsaved_changes {
                return;
            }
            self.begin_save(&mut state)
        };

        // Failures are recorded in the status.
        let _ = self.run(payload).await;
    }

    /// Runs the save on its own task so it completes and clears `is_saving`
    /// even if the caller stops polling.
    async fn run_detached(
        &self,
        payload: PersistedPortfolio,
    ) -> Result<PersistReceipt, SessionError> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return Ok(self.run(payload).await?);
        };

        let scheduler = self.clone();
        match runtime.spawn(async move { scheduler.run(payload).await }).await {
            Ok(result) => Ok(result?),
            Err(e) => {
                let mut state = self.lock();
                state.status.is_saving = false;
                state.status.save_error = Some(e.to_string());
                warn!("Save task ended before completing: {}", e);
                Err(SessionError::SaveInterrupted(e.to_string()))
            }
        }
    }

    fn begin_save(&self, state: &mut State) -> PersistedPortfolio {
        self.cancel_timer(state);
        state.status.is_saving = true;
        state.status.save_error = None;
        to_persisted(state.editor.document())
    }

    async fn run(&self, payload: PersistedPortfolio) -> Result<PersistReceipt, StoreError> {
        let slug = payload.slug.clone();
        let result = self.inner.store.persist(payload.clone()).await;

        let mut state = self.lock();
        state.status.is_saving = false;

        match &result {
            Ok(receipt) => {
                if state.editor.document().id.is_none() {
                    state.editor.assign_id(receipt.id.clone());
                }

                let mut saved = payload;
                saved.id = Some(receipt.id.clone());
                state.saved_hash = Some(snapshot_hash(&saved));
                state.status.last_saved_at = Some(receipt.saved_at);

                let dirty = Self::is_dirty(&state);
                state.status.has_unsaved_changes = dirty;
                if dirty && state.timer.is_none() {
                    // Edits landed during the save and their timer already fired.
                    self.arm(&mut state);
                }
                info!("Saved portfolio '{}' ({})", slug, receipt.id);
            }
            Err(e) => {
                state.status.save_error = Some(e.to_string());
                warn!("Failed to save portfolio '{}': {}", slug, e);
            }
        }

        result
    }
}
