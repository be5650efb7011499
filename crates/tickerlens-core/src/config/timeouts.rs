//! Default timeout values
//!
//! All values can be overridden via configuration.

/// Default timeout for establishing a connection to the backend (10 seconds)
pub const CONNECT_SECS: u64 = 10;

/// Default timeout for the simple request/response endpoints (5 minutes).
///
/// The non-streaming analysis endpoint runs the whole pipeline before
/// answering, so this is generous.
pub const REQUEST_SECS: u64 = 300;

/// Default time allowed between two chunks of the analysis stream (2 minutes).
///
/// Report generation on a local model can be silent for a long while.
pub const STREAM_INACTIVITY_SECS: u64 = 120;
