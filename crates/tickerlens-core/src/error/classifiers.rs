//! Error classification helpers

use super::types::TickerError;

impl TickerError {
    /// Whether this error ends an analysis stream.
    ///
    /// Request rejection, non-success status, a broken body and an idle
    /// stream all stop the "analyzing" indicator without a report.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Transport { .. } | Self::Timeout { .. }
        )
    }

    /// HTTP status code, if the backend answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Short label used in logs and in the CLI failure banner
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Http { .. } => "http",
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Cancelled => "cancelled",
            Self::Json { .. } => "json",
            Self::Io { .. } => "io",
            Self::InvalidInput { .. } => "invalid_input",
        }
    }
}
