//! Backend abstraction

use super::types::{HealthStatus, SimpleAnalysis, TickerExtraction};
use crate::error::TickerResult;
use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;
use std::pin::Pin;

/// Raw response body of the analysis stream
pub type ByteStream = Pin<Box<dyn Stream<Item = TickerResult<Vec<u8>>> + Send>>;

/// The analysis service as seen by the client
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit a query and return the event-stream body.
    ///
    /// Fails when the request is rejected or answered with a non-success
    /// status; errors while reading the body arrive through the stream.
    async fn open_analysis(&self, query: &str) -> TickerResult<ByteStream>;

    /// Service health
    async fn health(&self) -> TickerResult<HealthStatus>;

    /// Run the whole analysis and return a short summary in one response
    async fn analyze_simple(&self, query: &str) -> TickerResult<SimpleAnalysis>;

    /// Ask the backend which ticker it would extract from `query`
    async fn extract_ticker(&self, query: &str) -> TickerResult<TickerExtraction>;

    /// Stored chat messages
    async fn messages(&self) -> TickerResult<Value>;

    /// Backend status
    async fn status(&self) -> TickerResult<Value>;
}
