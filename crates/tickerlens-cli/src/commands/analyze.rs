//! `tickerlens analyze`: stream one analysis and show the report

use crate::console::CliConsole;
use crate::progress::ProgressView;
use crate::render::{render_report, report_to_markdown};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tickerlens_core::{
    AnalysisReport, AnalysisSession, ClientConfig, SessionState, TickerError, TickerResult,
};

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub export: Option<PathBuf>,
    pub json: bool,
    pub show_reasoning: bool,
}

pub async fn run(
    config: &ClientConfig,
    console: &CliConsole,
    query: &str,
    options: AnalyzeOptions,
) -> anyhow::Result<()> {
    let session = AnalysisSession::from_config(config)?;
    let mut rx = session.subscribe();
    let mut view = if options.json {
        ProgressView::hidden()
    } else {
        ProgressView::new(query)
    };

    let submit = session.submit(query);
    tokio::pin!(submit);

    let result = loop {
        tokio::select! {
            result = &mut submit => break result,
            Ok(()) = rx.changed() => {
                let state = rx.borrow_and_update().clone();
                view.update(&state);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, cancelling analysis");
                session.cancel();
            }
        }
    };
    let latest = session.state();
    view.update(&latest);
    view.finish();

    conclude(result, &latest, console, &options)
}

/// Show the outcome of `submit`.
///
/// A report that arrived before a transport failure is still shown and
/// exported; the command fails either way.
fn conclude(
    result: TickerResult<SessionState>,
    latest: &SessionState,
    console: &CliConsole,
    options: &AnalyzeOptions,
) -> anyhow::Result<()> {
    match result {
        Ok(state) => present(&state, console, options),
        Err(TickerError::Cancelled) => {
            console.warn("Analysis cancelled");
            Err(TickerError::Cancelled.into())
        }
        Err(err) => {
            console.error(&err.to_string());
            if err.is_transport_failure() && latest.report.is_some() {
                console.warn("Showing the report received before the failure");
                present(latest, console, options)?;
            }
            Err(err.into())
        }
    }
}

fn present(
    state: &SessionState,
    console: &CliConsole,
    options: &AnalyzeOptions,
) -> anyhow::Result<()> {
    for failed in state.failed_steps() {
        console.warn(&format!("{}: {}", failed.step, failed.message));
    }

    let Some(report) = &state.report else {
        anyhow::bail!("analysis finished without a report");
    };

    if options.json {
        console.print_json(&serde_json::to_value(report)?);
    } else {
        print!("{}", render_report(report, options.show_reasoning));
    }

    if let Some(path) = &options.export {
        export(report, path)?;
        console.success(&format!("Report saved to {}", path.display()));
    }
    Ok(())
}

/// Write `report` as markdown to `path`
pub fn export(report: &AnalysisReport, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, report_to_markdown(report))
        .with_context(|| format!("failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_markdown() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("aapl.md");
        let report = AnalysisReport::from_value(&json!({
            "ticker": "AAPL",
            "analysis": "<think>x</think>Hold."
        }))
        .unwrap();

        export(&report, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Stock Analysis Report: AAPL"));
        assert!(written.contains("Hold."));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope").join("aapl.md");
        let report = AnalysisReport::from_value(&json!({"ticker": "AAPL"})).unwrap();

        let err = export(&report, &path).unwrap_err();
        assert!(err.to_string().contains("failed to write report"));
    }

    #[test]
    fn test_report_exported_despite_transport_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("aapl.md");
        let mut latest = SessionState::begin("AAPL");
        latest.report = Some(AnalysisReport::from_value(&json!({"ticker": "AAPL"})).unwrap());
        latest.fail("Stream inactive for 120 seconds");
        let options = AnalyzeOptions {
            export: Some(path.clone()),
            json: true,
            show_reasoning: false,
        };

        let result = conclude(
            Err(TickerError::timeout(120)),
            &latest,
            &CliConsole::new(false),
            &options,
        );

        assert!(result.is_err());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Stock Analysis Report: AAPL"));
    }

    #[test]
    fn test_cancelled_run_shows_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("aapl.md");
        let mut latest = SessionState::begin("AAPL");
        latest.report = Some(AnalysisReport::from_value(&json!({"ticker": "AAPL"})).unwrap());
        let options = AnalyzeOptions {
            export: Some(path.clone()),
            ..AnalyzeOptions::default()
        };

        let console = CliConsole::new(false);
        let result = conclude(Err(TickerError::Cancelled), &latest, &console, &options);

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_present_without_report_fails() {
        let mut state = SessionState::begin("AAPL");
        state.is_analyzing = false;
        let result = present(&state, &CliConsole::new(false), &AnalyzeOptions::default());
        assert!(result.is_err());
    }
}
