//! Best-effort report recovery for payloads the strict parser rejects
//!
//! Some backend builds wrapped or prefixed the final report so that the
//! payload text was not valid JSON as a whole. If the text mentions a
//! `"report"` key, the outermost `{...}` span is parsed on its own.
//! Everything here is compatibility code; the supported protocol is the
//! completed `report_generation` status update.

use super::report::AnalysisReport;
use serde_json::Value;

const REPORT_MARKER: &str = "\"report\"";

/// Whether the raw text looks like it embeds a report object
pub(crate) fn has_report_marker(text: &str) -> bool {
    text.contains(REPORT_MARKER)
}

/// Try to pull an [`AnalysisReport`] out of text that failed to parse
pub(crate) fn recover_report(text: &str) -> Option<AnalysisReport> {
    if !has_report_marker(text) {
        return None;
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    let value: Value = serde_json::from_str(&text[start..=end]).ok()?;
    report_from_object(&value)
}

/// Report carried directly under a top-level `report` key
pub(crate) fn report_from_object(value: &Value) -> Option<AnalysisReport> {
    let report = value.get("report")?;
    match AnalysisReport::from_value(report) {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::warn!(error = %e, "Embedded report did not match the report schema");
            None
        }
    }
}
