//! Backend access and the session driver
//!
//! - [`AnalysisBackend`] is the seam to the analysis service;
//!   [`HttpBackend`] implements it over reqwest
//! - [`event_stream`] turns a response body into ordered
//!   [`ClassifiedEvent`](crate::analysis::ClassifiedEvent)s
//! - [`AnalysisSession`] runs one query at a time and publishes
//!   [`SessionState`](crate::analysis::SessionState) to subscribers

mod backend;
mod events;
mod http;
mod session;
mod types;

pub use backend::{AnalysisBackend, ByteStream};
pub use events::{EventStream, event_stream};
pub use http::HttpBackend;
pub use session::AnalysisSession;
pub use types::{HealthStatus, SimpleAnalysis, TickerExtraction};
