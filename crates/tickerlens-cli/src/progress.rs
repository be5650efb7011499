//! Live progress display for a running analysis

use crate::render::format_update;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tickerlens_core::SessionState;

/// Prints each new status update once and keeps a bar at the latest progress.
///
/// Everything goes to stderr so stdout carries only the report.
pub struct ProgressView {
    printed: usize,
    bar: ProgressBar,
}

impl ProgressView {
    pub fn new(query: &str) -> Self {
        let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stderr());
        let template = "{bar:30.cyan/blue} {pos:>3}% {msg}";
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
        }
        bar.set_message(query.to_string());
        Self { printed: 0, bar }
    }

    /// Headless view for output that is not a terminal
    pub fn hidden() -> Self {
        Self {
            printed: 0,
            bar: ProgressBar::hidden(),
        }
    }

    /// Catch up with `state`.
    ///
    /// A reset (fewer updates than already printed) starts over.
    pub fn update(&mut self, state: &SessionState) {
        if state.progress_log.len() < self.printed {
            self.printed = 0;
        }
        for update in &state.progress_log[self.printed..] {
            self.println(&format_update(update));
        }
        self.printed = state.progress_log.len();
        if let Some(latest) = state.latest_update() {
            self.bar.set_message(latest.message.clone());
        }
        self.bar
            .set_position((state.latest_progress() * 100.0).round() as u64);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn println(&self, line: &str) {
        if self.bar.is_hidden() {
            eprintln!("{line}");
        } else {
            self.bar.println(line);
        }
    }
}

impl Drop for ProgressView {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerlens_core::{StatusUpdate, StepStatus};

    #[test]
    fn test_update_tracks_printed_entries() {
        let mut view = ProgressView::hidden();
        let mut state = SessionState::begin("AAPL");
        state
            .progress_log
            .push(StatusUpdate::new("ticker_extraction", StepStatus::Processing, 0.05));
        view.update(&state);
        assert_eq!(view.printed, 1);

        state.progress_log.push(
            StatusUpdate::new("ticker_extraction", StepStatus::Completed, 0.1)
                .with_message("Found ticker: AAPL"),
        );
        view.update(&state);
        assert_eq!(view.printed, 2);
        assert_eq!(view.bar.message(), "Found ticker: AAPL");
        assert_eq!(view.bar.position(), 10);

        view.update(&SessionState::begin("MSFT"));
        assert_eq!(view.printed, 0);
    }
}
