//! Session state and the event reducer

use super::event::{ClassifiedEvent, StatusUpdate};
use super::report::AnalysisReport;
use serde::Serialize;
use tracing::{debug, info, warn};

/// UI-visible state for one analysis request.
///
/// A fresh state is created for every query; nothing carries over from a
/// previous session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Query this session was started for
    pub query: Option<String>,
    /// Timestamp reported by `analysis_start`
    pub started_at: Option<String>,
    /// Every status update in arrival order, duplicates included
    pub progress_log: Vec<StatusUpdate>,
    pub report: Option<AnalysisReport>,
    pub is_analyzing: bool,
    /// Why the session stopped without completing, if it did
    pub failure: Option<String>,
}

impl SessionState {
    /// State for a just-submitted query, before the stream opens
    pub fn begin(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            is_analyzing: true,
            ..Self::default()
        }
    }

    /// Fold one event into the state
    pub fn apply(&mut self, event: ClassifiedEvent) {
        match event {
            ClassifiedEvent::AnalysisStarted { query, timestamp } => {
                info!(%query, "Analysis started");
                self.started_at = timestamp;
            }
            ClassifiedEvent::StatusUpdate(update) => {
                debug!(
                    step = %update.step,
                    status = %update.status,
                    progress = update.progress,
                    "Status update"
                );
                if update.is_report_completion() {
                    if let Some(payload) = update.report_payload() {
                        match AnalysisReport::from_value(payload) {
                            Ok(report) => {
                                info!(ticker = %report.ticker, "Report received");
                                self.report = Some(report);
                            }
                            Err(e) => {
                                warn!(error = %e, "Report payload did not match the report schema");
                            }
                        }
                    }
                }
                self.progress_log.push(update);
            }
            ClassifiedEvent::AnalysisCompleted => {
                info!(
                    steps = self.progress_log.len(),
                    has_report = self.report.is_some(),
                    "Analysis complete"
                );
                self.is_analyzing = false;
            }
            ClassifiedEvent::LegacyReport(report) => {
                info!(ticker = %report.ticker, "Report received through legacy path");
                self.report = Some(*report);
                self.is_analyzing = false;
            }
            ClassifiedEvent::UnrecognizedPayload { event_name, raw } => {
                // Already logged by the interpreter with the reason
                debug!(%event_name, payload_len = raw.len(), "Ignoring unrecognized payload");
            }
        }
    }

    /// Stop the session after a transport failure, keeping the progress log
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.is_analyzing = false;
        self.failure = Some(reason.into());
    }

    /// Progress of the most recent status update
    pub fn latest_progress(&self) -> f64 {
        self.progress_log.last().map_or(0.0, |u| u.progress)
    }

    /// Most recent status update
    pub fn latest_update(&self) -> Option<&StatusUpdate> {
        self.progress_log.last()
    }

    /// Status updates reporting a failed step
    pub fn failed_steps(&self) -> impl Iterator<Item = &StatusUpdate> {
        self.progress_log.iter().filter(|u| u.status.is_failure())
    }

    /// A query was submitted and its session has stopped
    pub fn is_finished(&self) -> bool {
        self.query.is_some() && !self.is_analyzing
    }
}

/// Pure fold of one event into the next state
pub fn reduce(mut state: SessionState, event: ClassifiedEvent) -> SessionState {
    state.apply(event);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{StepStatus, steps};
    use serde_json::json;

    fn update(step: &str, status: StepStatus, progress: f64) -> ClassifiedEvent {
        ClassifiedEvent::StatusUpdate(StatusUpdate::new(step, status, progress))
    }

    fn report_update(report: serde_json::Value) -> ClassifiedEvent {
        ClassifiedEvent::StatusUpdate(
            StatusUpdate::new(steps::REPORT_GENERATION, StepStatus::Completed, 1.0)
                .with_data(json!({ "report": report })),
        )
    }

    #[test]
    fn test_begin_resets_everything() {
        let state = SessionState::begin("AAPL");
        assert_eq!(state.query.as_deref(), Some("AAPL"));
        assert!(state.is_analyzing);
        assert!(state.progress_log.is_empty());
        assert!(state.report.is_none());
        assert!(state.failure.is_none());
    }

    #[test]
    fn test_full_sequence() {
        let events = vec![
            ClassifiedEvent::AnalysisStarted {
                query: "AAPL".to_string(),
                timestamp: None,
            },
            update(steps::TICKER_EXTRACTION, StepStatus::Processing, 0.1),
            ClassifiedEvent::StatusUpdate(
                StatusUpdate::new(steps::TICKER_EXTRACTION, StepStatus::Completed, 0.2)
                    .with_data(json!({"ticker": "AAPL"})),
            ),
            report_update(json!({"ticker": "AAPL", "company_name": "Apple Inc."})),
            ClassifiedEvent::AnalysisCompleted,
        ];

        let state = events
            .into_iter()
            .fold(SessionState::begin("AAPL"), reduce);

        assert_eq!(state.progress_log.len(), 3);
        assert_eq!(state.report.as_ref().map(|r| r.ticker.as_str()), Some("AAPL"));
        assert!(!state.is_analyzing);
        assert!(state.is_finished());
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let state = [
            update(steps::TICKER_EXTRACTION, StepStatus::Processing, 0.1),
            update(steps::TICKER_EXTRACTION, StepStatus::Completed, 0.2),
            update(steps::TICKER_EXTRACTION, StepStatus::Completed, 0.2),
        ]
        .into_iter()
        .fold(SessionState::begin("x"), reduce);

        let statuses: Vec<&StepStatus> = state.progress_log.iter().map(|u| &u.status).collect();
        assert_eq!(
            statuses,
            vec![
                &StepStatus::Processing,
                &StepStatus::Completed,
                &StepStatus::Completed
            ]
        );
    }

    #[test]
    fn test_report_does_not_stop_analyzing() {
        let state = reduce(SessionState::begin("x"), report_update(json!({"ticker": "AAPL"})));
        assert!(state.report.is_some());
        assert!(state.is_analyzing);
    }

    #[test]
    fn test_report_requires_completed_report_generation() {
        let processing = ClassifiedEvent::StatusUpdate(
            StatusUpdate::new(steps::REPORT_GENERATION, StepStatus::Processing, 0.95)
                .with_data(json!({"report": {"ticker": "AAPL"}})),
        );
        let state = reduce(SessionState::begin("x"), processing);
        assert!(state.report.is_none());
        assert_eq!(state.progress_log.len(), 1);
    }

    #[test]
    fn test_invalid_report_is_logged_not_set() {
        let state = reduce(SessionState::begin("x"), report_update(json!({"price_info": 3})));
        assert!(state.report.is_none());
        assert_eq!(state.progress_log.len(), 1);
    }

    #[test]
    fn test_legacy_report_stops_analyzing() {
        let report = AnalysisReport::from_value(&json!({"ticker": "TSLA"})).unwrap();
        let state = reduce(
            SessionState::begin("x"),
            ClassifiedEvent::LegacyReport(Box::new(report)),
        );
        assert_eq!(state.report.as_ref().unwrap().ticker, "TSLA");
        assert!(!state.is_analyzing);
    }

    #[test]
    fn test_unrecognized_payload_changes_nothing() {
        let before = reduce(
            SessionState::begin("x"),
            update(steps::TICKER_EXTRACTION, StepStatus::Processing, 0.1),
        );
        let after = reduce(
            before.clone(),
            ClassifiedEvent::UnrecognizedPayload {
                event_name: "status_update".to_string(),
                raw: "{\"step\": \"x\"}".to_string(),
            },
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_fail_keeps_progress() {
        let mut state = reduce(
            SessionState::begin("x"),
            update(steps::NEWS_EXTRACTION, StepStatus::Processing, 0.55),
        );
        state.fail("HTTP error: 502 Bad Gateway");
        assert!(!state.is_analyzing);
        assert_eq!(state.progress_log.len(), 1);
        assert_eq!(state.latest_progress(), 0.55);
        assert!(state.report.is_none());
        assert!(state.failure.is_some());
    }

    #[test]
    fn test_failed_steps() {
        let state = [
            update(steps::TICKER_EXTRACTION, StepStatus::Processing, 0.1),
            update(
                steps::TICKER_EXTRACTION,
                StepStatus::Other("error".to_string()),
                0.0,
            ),
        ]
        .into_iter()
        .fold(SessionState::begin("x"), reduce);
        assert_eq!(state.failed_steps().count(), 1);
    }
}
