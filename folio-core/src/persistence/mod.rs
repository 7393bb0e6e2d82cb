//! Debounced persistence scheduling.
//!
//! Mutations mark the document dirty and (re)arm a single debounce timer.
//! When the timer fires, or on a manual save, the current document is
//! translated to its wire shape and handed to the store. At most one
//! `persist` call is in flight per document.

mod scheduler;
mod snapshot;
mod status;

pub use scheduler::{PersistenceScheduler, SchedulerConfig};
pub use snapshot::{snapshot_hash, SnapshotHash};
pub use status::{SaveState, SaveStatus};
