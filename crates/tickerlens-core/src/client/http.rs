//! reqwest implementation of [`AnalysisBackend`]

use super::backend::{AnalysisBackend, ByteStream};
use super::types::{HealthStatus, SimpleAnalysis, TickerExtraction};
use crate::config::ClientConfig;
use crate::error::{TickerError, TickerResult};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for the analysis backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpBackend {
    /// Build a backend client from configuration
    pub fn new(config: ClientConfig) -> TickerResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| {
                TickerError::config_with_context(
                    format!("Failed to create HTTP client: {}", e),
                    "Building reqwest client",
                )
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> TickerResult<T> {
        let url = self.config.endpoint(path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .timeout(self.config.request_timeout())
            .send()
            .await?;
        let response = check_status(response, &url).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn open_analysis(&self, query: &str) -> TickerResult<ByteStream> {
        let url = self.config.endpoint("analyze");
        tracing::debug!(%url, "Opening analysis stream");

        let response = self
            .client
            .post(&url)
            .header("Accept", "text/event-stream")
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| {
                let mut err = TickerError::from(e);
                if let TickerError::Http { url: u, .. } = &mut err {
                    u.get_or_insert_with(|| url.clone());
                }
                err
            })?;

        let response = check_status(response, &url).await?;
        // Failures after the headers are mid-body reader failures
        let body = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| TickerError::transport(format!("reading analysis stream: {e}")))
        });
        Ok(Box::pin(body))
    }

    async fn health(&self) -> TickerResult<HealthStatus> {
        self.get_json("health", &[]).await
    }

    async fn analyze_simple(&self, query: &str) -> TickerResult<SimpleAnalysis> {
        let url = self.config.endpoint("analyze-simple");
        let response = self
            .client
            .post(&url)
            .json(&json!({ "query": query }))
            .timeout(self.config.request_timeout())
            .send()
            .await?;
        let response = check_status(response, &url).await?;
        Ok(response.json::<SimpleAnalysis>().await?)
    }

    async fn extract_ticker(&self, query: &str) -> TickerResult<TickerExtraction> {
        self.get_json("test-ticker-extraction", &[("query", query)])
            .await
    }

    async fn messages(&self) -> TickerResult<Value> {
        self.get_json("messages", &[]).await
    }

    async fn status(&self) -> TickerResult<Value> {
        self.get_json("status", &[]).await
    }
}

/// Turn a non-success response into [`TickerError::Http`] with the body
async fn check_status(response: Response, url: &str) -> TickerResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(TickerError::Http {
        message: format!("{} returned {}: {}", url, status, error_detail(&body)),
        url: Some(url.to_string()),
        status_code: Some(status.as_u16()),
    })
}

/// FastAPI puts the reason under `detail`; fall back to the truncated body
fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty error response body>".to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            return detail.to_string();
        }
    }

    if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        let truncated: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}... (truncated)", truncated)
    } else {
        trimmed.to_string()
    }
}
