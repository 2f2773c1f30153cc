//! HTTP client for the ranking endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use taskrank_core::ScoredTask;

use crate::error::ClientError;

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Suggest endpoint response.
#[derive(Debug, Deserialize)]
struct SuggestBody {
    suggestions: Vec<ScoredTask>,
}

/// HTTP client for the TaskRank API.
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check if the server is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = format!("{}/health", self.base_url);
        debug!(url = %url, "Checking health");

        let response = self.inner.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Rank every task of a batch.
    pub async fn analyze<T: Serialize + ?Sized>(
        &self,
        tasks: &T,
    ) -> Result<Vec<ScoredTask>, ClientError> {
        self.post_json("/api/tasks/analyze/", tasks).await
    }

    /// Fetch the top suggestions for a batch.
    pub async fn suggest<T: Serialize + ?Sized>(
        &self,
        tasks: &T,
    ) -> Result<Vec<ScoredTask>, ClientError> {
        let body: SuggestBody = self.post_json("/api/tasks/suggest/", tasks).await?;
        Ok(body.suggestions)
    }

    /// POST a JSON body and decode the JSON response.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST request");

        let response = self.inner.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Fall back to the raw body when the server did not send {"error"}
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Serialization(e.to_string()))
    }
}
