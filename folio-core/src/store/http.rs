//! Remote document store over HTTP.
//!
//! - `GET  {server_url}/portfolios/{slug}` returns the stored portfolio, 404 if none
//! - `PUT  {server_url}/portfolios/{slug}` writes a full snapshot and
//!   responds with `{"id": "..."}`

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{DocumentStore, PersistReceipt, StoreError};
use crate::models::is_valid_slug;
use crate::schema::PersistedPortfolio;

#[derive(Debug, Deserialize)]
struct PersistResponse {
    id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpStore {
    server_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(server_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn portfolio_url(&self, slug: &str) -> Result<String, StoreError> {
        if !is_valid_slug(slug) {
            return Err(StoreError::InvalidSlug(slug.to_string()));
        }
        Ok(format!(
            "{}/portfolios/{}",
            self.server_url.trim_end_matches('/'),
            slug
        ))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn fetch(&self, slug: &str) -> Result<Option<PersistedPortfolio>, StoreError> {
        let response = self
            .authorized(self.client.get(self.portfolio_url(slug)?))
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }

        let portfolio = response
            .json()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        Ok(Some(portfolio))
    }

    async fn put(&self, portfolio: PersistedPortfolio) -> Result<PersistReceipt, StoreError> {
        let response = self
            .authorized(self.client.put(self.portfolio_url(&portfolio.slug)?))
            .json(&portfolio)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }

        // An empty or non-JSON body is fine as long as the document already has an id.
        let assigned = response
            .json::<PersistResponse>()
            .await
            .ok()
            .and_then(|body| body.id);

        let id = assigned
            .or(portfolio.id)
            .ok_or_else(|| StoreError::Http("server did not return a document id".to_string()))?;

        Ok(PersistReceipt {
            id,
            saved_at: Utc::now(),
        })
    }
}

impl DocumentStore for HttpStore {
    fn load<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Result<Option<PersistedPortfolio>, StoreError>> {
        self.fetch(slug).boxed()
    }

    fn persist(
        &self,
        portfolio: PersistedPortfolio,
    ) -> BoxFuture<'_, Result<PersistReceipt, StoreError>> {
        self.put(portfolio).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_url() {
        let store = HttpStore::new("https://api.example.com/", None);
        assert_eq!(
            store.portfolio_url("ada").unwrap(),
            "https://api.example.com/portfolios/ada"
        );

        let store = HttpStore::new("http://localhost:8080", Some("key".into()));
        assert_eq!(store.server_url(), "http://localhost:8080");
        assert_eq!(
            store.portfolio_url("dev-42").unwrap(),
            "http://localhost:8080/portfolios/dev-42"
        );
    }

    #[test]
    fn test_portfolio_url_rejects_bad_slug() {
        let store = HttpStore::new("https://api.example.com", None);
        for slug in ["../admin/users?x=", "", "Ada", "a/b"] {
            assert!(matches!(
                store.portfolio_url(slug),
                Err(StoreError::InvalidSlug(ref s)) if s == slug
            ));
        }
    }

    #[tokio::test]
    async fn test_bad_slug_never_reaches_the_network() {
        let store = HttpStore::new("http://127.0.0.1:1", None);
        let payload = PersistedPortfolio {
            slug: "../admin".into(),
            ..PersistedPortfolio::default()
        };
        assert!(matches!(
            store.persist(payload).await,
            Err(StoreError::InvalidSlug(_))
        ));
        assert!(matches!(
            store.load("x?y").await,
            Err(StoreError::InvalidSlug(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let store = HttpStore::new("http://127.0.0.1:1", None);
        let result = store.load("ada").await;
        assert!(matches!(result, Err(StoreError::Http(_))));
    }
}
