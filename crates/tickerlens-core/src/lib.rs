//! TickerLens Core Library
//!
//! Client side of the stock analysis service: decoding the server-sent
//! event stream of `POST /analyze`, classifying its payloads and folding
//! them into session state that a front-end renders.
//!
//! ```text
//! bytes -> stream::SseDecoder -> Frame -> analysis::interpret
//!       -> ClassifiedEvent -> analysis::reduce -> SessionState
//! ```

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod stream;

// Re-export commonly used types
pub use analysis::{
    AnalysisReport, ClassifiedEvent, NewsItem, PriceInfo, RedditSentiment, SessionState,
    StatusUpdate, StepStatus, interpret, reduce,
};
pub use client::{AnalysisBackend, AnalysisSession, HttpBackend, event_stream};
pub use config::{ClientConfig, ConfigOverrides, LoggingConfig, load_config};
pub use error::{TickerError, TickerResult};
pub use stream::{Frame, FrameParser, LineDecoder, SseDecoder};
