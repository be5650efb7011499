//! TickerLens
//!
//! Streaming client for the natural-language stock analysis service.
//! This crate re-exports [`tickerlens_core`]; the `tickerlens` binary lives
//! in `tickerlens-cli`.
//!
//! ```no_run
//! use tickerlens::{AnalysisSession, ClientConfig};
//!
//! # async fn run() -> tickerlens::TickerResult<()> {
//! let session = AnalysisSession::from_config(&ClientConfig::default())?;
//! let state = session.submit("Give me analysis for $AAPL").await?;
//! if let Some(report) = state.report {
//!     println!("{}: {}", report.ticker, report.analysis_body());
//! }
//! # Ok(())
//! # }
//! ```

pub use tickerlens_core::*;
