//! Terminal analysis report

use super::serde_helpers::null_as_default;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

static THINK_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>(.*?)</think>").expect("valid think block regex"));

/// Final structured report produced once the backend pipeline finishes.
///
/// Field names follow the backend's snake_case JSON; `analysis` is exposed
/// as [`analysis_text`](Self::analysis_text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_info: PriceInfo,
    /// Markdown, possibly opening with a `<think>` reasoning block
    #[serde(rename = "analysis", default, deserialize_with = "null_as_default")]
    pub analysis_text: String,
    /// Metric name to value; unavailable metrics are `null`
    #[serde(default, deserialize_with = "null_as_default")]
    pub fundamentals: BTreeMap<String, Value>,
    #[serde(default)]
    pub reddit_sentiment: Option<RedditSentiment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub news: Vec<NewsItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub change: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub change_percent: f64,
}

impl PriceInfo {
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditSentiment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

impl AnalysisReport {
    /// Build a report from the raw `report` object of a status update
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Analysis markdown with any `<think>` prelude removed
    pub fn analysis_body(&self) -> String {
        split_reasoning(&self.analysis_text).1
    }

    /// Fundamentals that carry a value
    pub fn available_fundamentals(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fundamentals.iter().filter(|(_, v)| !v.is_null())
    }
}

/// Split model output into its `<think>` reasoning and the visible body.
///
/// All think blocks are removed from the body; their contents are joined
/// as the reasoning. An unclosed `<think>` hides everything after it.
pub fn split_reasoning(text: &str) -> (Option<String>, String) {
    let mut reasoning: Vec<String> = THINK_BLOCK_RE
        .captures_iter(text)
        .map(|c| c[1].trim().to_string())
        .collect();
    let mut body = THINK_BLOCK_RE.replace_all(text, "").into_owned();

    if let Some(open) = body.find("<think>") {
        reasoning.push(body[open + "<think>".len()..].trim().to_string());
        body.truncate(open);
    }

    reasoning.retain(|r| !r.is_empty());
    let reasoning = if reasoning.is_empty() {
        None
    } else {
        Some(reasoning.join("\n\n"))
    };
    (reasoning, body.trim().to_string())
}
