//! Client configuration model

use super::logging_config::LoggingConfig;
use super::timeouts;
use crate::error::{TickerError, TickerResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default address of the analysis backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Settings for talking to the analysis backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend root, without trailing slash
    pub base_url: String,
    pub connect_timeout_secs: u64,
    /// Timeout for the non-streaming endpoints
    pub request_timeout_secs: u64,
    /// Maximum silence between two stream chunks; `None` or 0 waits forever
    pub inactivity_timeout_secs: Option<u64>,
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: timeouts::CONNECT_SECS,
            request_timeout_secs: timeouts::REQUEST_SECS,
            inactivity_timeout_secs: Some(timeouts::STREAM_INACTIVITY_SECS),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a specific backend, everything else default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn inactivity_timeout(&self) -> Option<Duration> {
        match self.inactivity_timeout_secs {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Absolute URL of a backend endpoint
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> TickerResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(TickerError::config("base_url must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TickerError::config_with_context(
                format!("base_url '{}' must start with http:// or https://", url),
                "Validating backend address",
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(TickerError::config("connect_timeout_secs must be positive"));
        }
        if self.request_timeout_secs == 0 {
            return Err(TickerError::config("request_timeout_secs must be positive"));
        }
        Ok(())
    }
}
