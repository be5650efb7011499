//! Payload interpretation: frame text to [`ClassifiedEvent`]

use super::event::{ClassifiedEvent, StatusUpdate};
use super::legacy;
use crate::stream::Frame;
use serde_json::Value;
use tracing::{debug, warn};

/// Event names sent by the analysis backend
pub mod names {
    pub const ANALYSIS_START: &str = "analysis_start";
    pub const STATUS_UPDATE: &str = "status_update";
    pub const ANALYSIS_COMPLETE: &str = "analysis_complete";
}

/// Classify one frame.
///
/// Returns `None` for payloads that are dropped without a trace in the
/// session: empty text, and unparseable `status_update` payloads. Nothing
/// here fails; anything not understood becomes
/// [`ClassifiedEvent::UnrecognizedPayload`].
pub fn interpret(frame: &Frame) -> Option<ClassifiedEvent> {
    let text = frame.payload_text.trim();
    if text.is_empty() {
        debug!(event = %frame.event_name, "Dropping frame with empty payload");
        return None;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value) => Some(classify(frame, value)),
        Err(e) if frame.event_name == names::STATUS_UPDATE => {
            debug!(error = %e, "Dropping unparseable status_update payload");
            None
        }
        Err(e) => {
            if let Some(report) = legacy::recover_report(text) {
                warn!(
                    event = %frame.event_name,
                    ticker = %report.ticker,
                    "Recovered report from malformed payload"
                );
                return Some(ClassifiedEvent::LegacyReport(Box::new(report)));
            }
            Some(unrecognized(frame, &format!("invalid JSON: {}", e)))
        }
    }
}

fn classify(frame: &Frame, value: Value) -> ClassifiedEvent {
    match frame.event_name.as_str() {
        names::ANALYSIS_START => ClassifiedEvent::AnalysisStarted {
            query: value
                .get("query")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            timestamp: value
                .get("timestamp")
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        names::STATUS_UPDATE => match serde_json::from_value::<StatusUpdate>(value) {
            Ok(update) => ClassifiedEvent::StatusUpdate(update),
            Err(e) => unrecognized(frame, &format!("status_update missing fields: {}", e)),
        },
        names::ANALYSIS_COMPLETE => ClassifiedEvent::AnalysisCompleted,
        _ => match legacy::report_from_object(&value) {
            Some(report) => {
                warn!(
                    event = %frame.event_name,
                    ticker = %report.ticker,
                    "Report delivered outside status_update"
                );
                ClassifiedEvent::LegacyReport(Box::new(report))
            }
            None => unrecognized(frame, "unknown event"),
        },
    }
}

fn unrecognized(frame: &Frame, reason: &str) -> ClassifiedEvent {
    warn!(
        event = %frame.event_name,
        reason,
        payload_len = frame.payload_text.len(),
        "Unrecognized payload"
    );
    ClassifiedEvent::UnrecognizedPayload {
        event_name: frame.event_name.clone(),
        raw: frame.payload_text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StepStatus;
    use crate::stream::DEFAULT_EVENT_NAME;

    fn frame(name: &str, payload: &str) -> Frame {
        Frame::new(name, payload)
    }

    #[test]
    fn test_analysis_start() {
        let event = interpret(&frame(
            names::ANALYSIS_START,
            r#"{"query": "AAPL", "timestamp": "2024-05-01T10:00:00"}"#,
        ));
        assert_eq!(
            event,
            Some(ClassifiedEvent::AnalysisStarted {
                query: "AAPL".to_string(),
                timestamp: Some("2024-05-01T10:00:00".to_string()),
            })
        );
    }

    #[test]
    fn test_status_update() {
        let event = interpret(&frame(
            names::STATUS_UPDATE,
            r#"{"step": "ticker_extraction", "status": "completed", "message": "Found ticker: AAPL", "progress": 0.2, "data": {"ticker": "AAPL"}}"#,
        ));
        let Some(ClassifiedEvent::StatusUpdate(update)) = event else {
            panic!("expected status update, got {:?}", event);
        };
        assert_eq!(update.step, "ticker_extraction");
        assert_eq!(update.status, StepStatus::Completed);
        assert_eq!(update.progress, 0.2);
        assert_eq!(update.data, Some(serde_json::json!({"ticker": "AAPL"})));
    }

    #[test]
    fn test_status_update_missing_status_is_unrecognized() {
        let event = interpret(&frame(
            names::STATUS_UPDATE,
            r#"{"step": "ticker_extraction", "progress": 0.1}"#,
        ));
        assert!(matches!(
            event,
            Some(ClassifiedEvent::UnrecognizedPayload { .. })
        ));
    }

    #[test]
    fn test_status_update_missing_step_is_unrecognized() {
        let event = interpret(&frame(names::STATUS_UPDATE, r#"{"status": "processing"}"#));
        assert!(matches!(
            event,
            Some(ClassifiedEvent::UnrecognizedPayload { .. })
        ));
    }

    #[test]
    fn test_unparseable_status_update_is_dropped() {
        assert_eq!(interpret(&frame(names::STATUS_UPDATE, "{\"step\": ")), None);
    }

    #[test]
    fn test_empty_payload_is_dropped() {
        assert_eq!(interpret(&frame(names::ANALYSIS_START, "")), None);
        assert_eq!(interpret(&frame(DEFAULT_EVENT_NAME, "   ")), None);
    }

    #[test]
    fn test_analysis_complete() {
        assert_eq!(
            interpret(&frame(names::ANALYSIS_COMPLETE, "{}")),
            Some(ClassifiedEvent::AnalysisCompleted)
        );
    }

    #[test]
    fn test_bare_report_is_legacy() {
        let event = interpret(&frame(
            DEFAULT_EVENT_NAME,
            r#"{"report": {"ticker": "GOOGL", "company_name": "Alphabet"}}"#,
        ));
        let Some(ClassifiedEvent::LegacyReport(report)) = event else {
            panic!("expected legacy report");
        };
        assert_eq!(report.company_name, "Alphabet");
    }

    #[test]
    fn test_malformed_text_with_embedded_report() {
        let event = interpret(&frame(
            "report",
            "result => {\"report\": {\"ticker\": \"AMZN\"}}",
        ));
        assert!(matches!(event, Some(ClassifiedEvent::LegacyReport(r)) if r.ticker == "AMZN"));
    }

    #[test]
    fn test_malformed_text_without_report() {
        let event = interpret(&frame(DEFAULT_EVENT_NAME, "not json at all"));
        assert_eq!(
            event,
            Some(ClassifiedEvent::UnrecognizedPayload {
                event_name: DEFAULT_EVENT_NAME.to_string(),
                raw: "not json at all".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_event_name() {
        let event = interpret(&frame("heartbeat", r#"{"ts": 1}"#));
        assert!(matches!(
            event,
            Some(ClassifiedEvent::UnrecognizedPayload { event_name, .. }) if event_name == "heartbeat"
        ));
    }
}
