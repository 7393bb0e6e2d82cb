//! File-backed document store.

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use std::io;
use std::path::PathBuf;
use uuid::Uuid;

use super::{DocumentStore, PersistReceipt, StoreError};
use crate::models::is_valid_slug;
use crate::schema::PersistedPortfolio;

/// Stores each portfolio as `<slug>.json` in a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a portfolio.
    pub fn path(&self, slug: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_slug(slug) {
            return Err(StoreError::InvalidSlug(slug.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", slug)))
    }

    pub fn exists(&self, slug: &str) -> bool {
        self.path(slug).map(|path| path.exists()).unwrap_or(false)
    }

    async fn read(&self, slug: &str) -> Result<Option<PersistedPortfolio>, StoreError> {
        let path = self.path(slug)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let portfolio = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Parse(path, e))?;
                Ok(Some(portfolio))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(path, e)),
        }
    }

    async fn write(&self, mut portfolio: PersistedPortfolio) -> Result<PersistReceipt, StoreError> {
        let path = self.path(&portfolio.slug)?;

        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StoreError::Io(self.data_dir.clone(), e))?;

        let id = portfolio
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        let bytes = serde_json::to_vec_pretty(&portfolio)?;

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::Io(path, e))?;

        Ok(PersistReceipt {
            id,
            saved_at: Utc::now(),
        })
    }
}

impl DocumentStore for FileStore {
    fn load<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<PersistedPortfolio>, StoreError>> {
        self.read(slug).boxed()
    }

    fn persist(
        &self,
        portfolio: PersistedPortfolio,
    ) -> BoxFuture<'_, Result<PersistReceipt, StoreError>> {
        self.write(portfolio).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Portfolio;
    use crate::schema::{to_editable, to_persisted};
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("portfolios"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let (store, _dir) = test_store();
        assert!(store.load("ada").await.unwrap().is_none());
        assert!(!store.exists("ada"));
    }

    #[tokio::test]
    async fn test_persist_assigns_id_and_creates_dir() {
        let (store, _dir) = test_store();
        let payload = to_persisted(&Portfolio::default_template("ada"));
        assert!(payload.id.is_none());

        let receipt = store.persist(payload).await.unwrap();
        assert!(!receipt.id.is_empty());
        assert!(store.exists("ada"));

        let loaded = store.load("ada").await.unwrap().unwrap();
        assert_eq!(loaded.id.as_deref(), Some(receipt.id.as_str()));
    }

    #[tokio::test]
    async fn test_persist_keeps_existing_id() {
        let (store, _dir) = test_store();
        let mut payload = to_persisted(&Portfolio::default_template("ada"));
        payload.id = Some("fixed-id".into());

        let receipt = store.persist(payload).await.unwrap();
        assert_eq!(receipt.id, "fixed-id");
    }

    #[tokio::test]
    async fn test_roundtrip_through_disk() {
        let (store, _dir) = test_store();
        let mut portfolio = Portfolio::default_template("ada");
        portfolio.id = Some("p-1".into());

        store.persist(to_persisted(&portfolio)).await.unwrap();
        let loaded = store.load("ada").await.unwrap().unwrap();
        assert_eq!(to_editable(&loaded), portfolio);
    }

    #[tokio::test]
    async fn test_invalid_slug_rejected() {
        let (store, _dir) = test_store();
        let result = store.load("../secrets").await;
        assert!(matches!(result, Err(StoreError::InvalidSlug(_))));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_parse_error() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.data_dir()).unwrap();
        std::fs::write(store.path("ada").unwrap(), b"not json").unwrap();

        let result = store.load("ada").await;
        assert!(matches!(result, Err(StoreError::Parse(_, _))));
    }
}
