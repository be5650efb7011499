//! Core error type for TickerLens

use thiserror::Error;

/// Result type alias for TickerLens operations
pub type TickerResult<T> = Result<T, TickerError>;

/// Main error type for TickerLens
#[derive(Error, Debug, Clone)]
pub enum TickerError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Request rejected or answered with a non-success status
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// The response body could not be read to the end
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// No chunk arrived within the inactivity window
    #[error("Stream inactive for {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The stream was cancelled by a newer query or by the user
    #[error("Analysis was cancelled")]
    Cancelled,

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },
}
