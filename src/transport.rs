//! Network seam.
//!
//! The control only ever issues `GET path?query` and expects a JSON array of
//! `{id, name}` objects back. `HttpTransport` is the reqwest implementation.

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::log;
use crate::model::Item;
use crate::query::QueryParams;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &QueryParams) -> FetchResult<Vec<Item>>;
}

/// A transport that issues real HTTP requests against `base_url`.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Join a resource path onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &QueryParams) -> FetchResult<Vec<Item>> {
        log::log_request(path, query);

        let resp = self
            .http
            .get(self.url_for(path))
            .query(query.pairs())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            log::log_event(&format!("GET {} returned {}", path, status));
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        log::log_response(path, &body);
        parse_items(&body)
    }
}

/// Decode a response body into items.
pub fn parse_items(body: &str) -> FetchResult<Vec<Item>> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}
