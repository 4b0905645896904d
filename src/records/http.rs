//! Records from a REST endpoint.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{OrdertrackError, Result};

use super::{ItemRecord, OrderRecord, RecordSource};

/// Fetches records with `GET {base}/orders/{id}` and `GET {base}/items/{id}`.
///
/// A 404 maps to [`OrdertrackError::RecordNotFound`]; any other failure
/// maps to [`OrdertrackError::RecordFetch`].
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    base_url: String,
    client: Client,
}

impl HttpRecordSource {
    /// Create a source for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OrdertrackError::ConfigValidationError {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, what: &'static str, collection: &str, id: u64) -> Result<T> {
        let url = format!("{}/{}/{}", self.base_url, collection, id);
        debug!("GET {}", url);

        let fetch_error = |message: String| OrdertrackError::RecordFetch { what, id, message };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(OrdertrackError::RecordNotFound { what, id });
        }
        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {} from {}", response.status(), url)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| fetch_error(format!("invalid response body: {}", e)))
    }
}

impl RecordSource for HttpRecordSource {
    async fn order(&self, id: u64) -> Result<OrderRecord> {
        self.get("order", "orders", id).await
    }

    async fn item(&self, id: u64) -> Result<ItemRecord> {
        self.get("item", "items", id).await
    }
}
