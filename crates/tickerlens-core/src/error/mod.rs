//! Error types for TickerLens
//!
//! Only transport, configuration and I/O problems become a [`TickerError`].
//! Malformed frames and payloads are absorbed by the interpreter and logged,
//! so they never surface here.

mod classifiers;
mod constructors;
mod conversions;
mod types;

pub use types::{TickerError, TickerResult};
