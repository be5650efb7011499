//! One-line rendering of status updates

use super::humanize;
use colored::*;
use tickerlens_core::{StatusUpdate, StepStatus};

/// Status icon for a step
pub fn status_icon(status: &StepStatus) -> ColoredString {
    if status.is_failure() {
        return "✗".red().bold();
    }
    match status {
        StepStatus::Processing => "⋯".yellow().bold(),
        StepStatus::Completed => "✓".green().bold(),
        _ => "•".dimmed(),
    }
}

/// `✓ Ticker extraction     Found ticker: AAPL  [ 10%]`
pub fn format_update(update: &StatusUpdate) -> String {
    let percent = (update.progress * 100.0).round() as u32;
    let message = if update.status.is_failure() {
        update.message.red().to_string()
    } else {
        update.message.clone()
    };
    format!(
        "{} {:<24} {}  {}",
        status_icon(&update.status),
        humanize(&update.step),
        message,
        format!("[{percent:>3}%]").dimmed()
    )
}
