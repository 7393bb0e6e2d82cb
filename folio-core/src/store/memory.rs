//! In-memory document store, used by tests and dry runs.

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

use super::{DocumentStore, PersistReceipt, StoreError};
use crate::schema::PersistedPortfolio;

/// A recorded `persist` call.
#[derive(Debug, Clone)]
pub struct PersistCall {
    pub payload: PersistedPortfolio,
    pub at: Instant,
}

#[derive(Debug, Default)]
struct Shared {
    documents: HashMap<String, PersistedPortfolio>,
    calls: Vec<PersistCall>,
    fail_with: Option<String>,
    latency: Duration,
}

/// Cloning shares the same underlying documents and call log.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, portfolio: PersistedPortfolio) -> Self {
        self.lock()
            .documents
            .insert(portfolio.slug.clone(), portfolio);
        self
    }

    /// Each `persist` waits this long before completing.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = latency;
        self
    }

    /// Makes every subsequent `persist` fail with `message`; `None` restores success.
    pub fn fail_with(&self, message: Option<&str>) {
        self.lock().fail_with = message.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<PersistCall> {
        self.lock().calls.clone()
    }

    pub fn persist_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn get(&self, slug: &str) -> Option<PersistedPortfolio> {
        self.lock().documents.get(slug).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        // A panicking test thread must not poison the store for others.
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn write(&self, mut portfolio: PersistedPortfolio) -> Result<PersistReceipt, StoreError> {
        let latency = {
            let mut shared = self.lock();
            shared.calls.push(PersistCall {
                payload: portfolio.clone(),
                at: Instant::now(),
            });
            shared.latency
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut shared = self.lock();
        if let Some(message) = &shared.fail_with {
            return Err(StoreError::Rejected(message.clone()));
        }

        let id = portfolio
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        shared.documents.insert(portfolio.slug.clone(), portfolio);

        Ok(PersistReceipt {
            id,
            saved_at: Utc::now(),
        })
    }
}

impl DocumentStore for MemoryStore {
    fn load<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<PersistedPortfolio>, StoreError>> {
        let document = self.get(slug);
        async move { Ok(document) }.boxed()
    }

    fn persist(
        &self,
        portfolio: PersistedPortfolio,
    ) -> BoxFuture<'_, Result<PersistReceipt, StoreError>> {
        self.write(portfolio).boxed()
    }
}
