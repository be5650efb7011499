//! Classified application events

use super::report::AnalysisReport;
use super::serde_helpers::{null_as_default, progress_fraction};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Step names emitted by the analysis backend
pub mod steps {
    pub const TICKER_EXTRACTION: &str = "ticker_extraction";
    pub const BROWSER_INITIALIZATION: &str = "browser_initialization";
    pub const FUNDAMENTALS_EXTRACTION: &str = "fundamentals_extraction";
    pub const NEWS_EXTRACTION: &str = "news_extraction";
    pub const REDDIT_SENTIMENT: &str = "reddit_sentiment";
    pub const LLM_ANALYSIS: &str = "llm_analysis";
    pub const REPORT_GENERATION: &str = "report_generation";
    pub const ERROR: &str = "error";
}

/// Status of a pipeline step.
///
/// Unknown strings are kept verbatim in [`StepStatus::Other`] instead of
/// being rejected; the backend reports its own failures as `"error"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepStatus {
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl StepStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Whether the step should be displayed as failed
    pub fn is_failure(&self) -> bool {
        match self {
            Self::Failed => true,
            Self::Other(s) => s.eq_ignore_ascii_case("error"),
            _ => false,
        }
    }
}

impl From<String> for StepStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<StepStatus> for String {
    fn from(value: StepStatus) -> Self {
        match value {
            StepStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress report for one pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub step: String,
    pub status: StepStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Fraction of the whole analysis, in `[0.0, 1.0]`
    #[serde(default, deserialize_with = "progress_fraction")]
    pub progress: f64,
    #[serde(default)]
    pub data: Option<Value>,
}

impl StatusUpdate {
    pub fn new(step: impl Into<String>, status: StepStatus, progress: f64) -> Self {
        Self {
            step: step.into(),
            status,
            message: String::new(),
            progress: progress.clamp(0.0, 1.0),
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Completed `report_generation` step, the one that carries the report
    pub fn is_report_completion(&self) -> bool {
        self.step == steps::REPORT_GENERATION && self.status == StepStatus::Completed
    }

    /// Raw `data.report` object, if present
    pub fn report_payload(&self) -> Option<&Value> {
        self.data
            .as_ref()
            .and_then(|data| data.get("report"))
            .filter(|report| !report.is_null())
    }
}

/// A frame after payload interpretation
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedEvent {
    /// `analysis_start`
    AnalysisStarted {
        query: String,
        timestamp: Option<String>,
    },
    /// `status_update` with both `step` and `status`
    StatusUpdate(StatusUpdate),
    /// `analysis_complete`, the authoritative end of a session
    AnalysisCompleted,
    /// Report delivered outside the status-update protocol.
    ///
    /// Older backends sent the report as a bare `{"report": ...}` payload or
    /// as text the strict parser rejects. This is a compatibility path and
    /// also ends the session.
    LegacyReport(Box<AnalysisReport>),
    /// Payload present but not understood
    UnrecognizedPayload { event_name: String, raw: String },
}

impl ClassifiedEvent {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AnalysisStarted { .. } => "analysis_started",
            Self::StatusUpdate(_) => "status_update",
            Self::AnalysisCompleted => "analysis_completed",
            Self::LegacyReport(_) => "legacy_report",
            Self::UnrecognizedPayload { .. } => "unrecognized_payload",
        }
    }

    /// Parse the `analysis_start` timestamp (ISO-8601, with or without offset)
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        let Self::AnalysisStarted {
            timestamp: Some(ts),
            ..
        } = self
        else {
            return None;
        };
        parse_timestamp(ts)
    }
}

pub(crate) fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f").ok())
}
