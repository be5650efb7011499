//! Text renderings of session state and reports

pub mod fundamentals;
pub mod markdown;
pub mod progress;
pub mod report;

pub use markdown::report_to_markdown;
pub use progress::format_update;
pub use report::render_report;

/// Backend timestamp (RFC 3339 or naive ISO 8601) as `YYYY-MM-DD HH:MM:SS`.
///
/// Anything unparseable is shown as sent.
pub fn display_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    match chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => ts.to_string(),
    }
}

/// `ticker_extraction` -> `Ticker extraction`
pub fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
