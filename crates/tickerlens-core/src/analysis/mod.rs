//! Analysis domain: typed events, the terminal report and session state
//!
//! Frames coming out of [`crate::stream`] are classified by
//! [`interpret`] into [`ClassifiedEvent`]s, which [`reduce`] folds into
//! [`SessionState`] in arrival order.

mod event;
mod interpreter;
mod legacy;
mod report;
mod serde_helpers;
mod session;

pub use event::{ClassifiedEvent, StatusUpdate, StepStatus, steps};
pub use interpreter::{interpret, names};
pub use report::{AnalysisReport, NewsItem, PriceInfo, RedditSentiment, split_reasoning};
pub use session::{SessionState, reduce};
