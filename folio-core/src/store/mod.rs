//! Document stores: the load/persist collaborators behind an edit session.
//!
//! Every write is a full snapshot, so retrying a failed `persist` is safe.

mod file;
mod http;
mod memory;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use std::path::PathBuf;
use thiserror::Error;

use crate::schema::PersistedPortfolio;

pub use file::FileStore;
pub use http::HttpStore;
pub use memory::{MemoryStore, PersistCall};

/// Acknowledgement of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistReceipt {
    /// The document's id, assigned by the store if the payload had none.
    pub id: String,
    pub saved_at: DateTime<Utc>,
}

pub trait DocumentStore: Send + Sync {
    /// Loads the stored portfolio for `slug`, or `None` if there is none.
    fn load<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<PersistedPortfolio>, StoreError>>;

    /// Writes a full snapshot.
    fn persist(
        &self,
        portfolio: PersistedPortfolio,
    ) -> BoxFuture<'_, Result<PersistReceipt, StoreError>>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid slug '{0}'")]
    InvalidSlug(String),

    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse document {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Store rejected the write: {0}")]
    Rejected(String),
}
