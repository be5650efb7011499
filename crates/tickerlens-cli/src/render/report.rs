//! Terminal rendering of a finished analysis report

use super::{display_timestamp, fundamentals};
use colored::*;
use tickerlens_core::analysis::split_reasoning;
use tickerlens_core::{AnalysisReport, NewsItem, PriceInfo, RedditSentiment};

/// Signed price line, e.g. `$189.84  +2.31 (+1.23%)`
pub fn price_line(price: &PriceInfo) -> String {
    let change = format!("{:+.2} ({:+.2}%)", price.change, price.change_percent);
    let change = if price.is_up() {
        change.green()
    } else {
        change.red()
    };
    format!("${:.2}  {}", price.current_price, change)
}

fn sentiment_line(sentiment: &RedditSentiment) -> String {
    let label = match sentiment.sentiment.to_lowercase().as_str() {
        "bullish" => sentiment.sentiment.green().bold(),
        "bearish" => sentiment.sentiment.red().bold(),
        _ => sentiment.sentiment.yellow().bold(),
    };
    format!("{} ({:.0}% confidence)", label, sentiment.confidence * 100.0)
}

fn news_entry(item: &NewsItem) -> String {
    let meta: Vec<&str> = [item.source.as_str(), item.date.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    let mut entry = format!("  • {}", item.title);
    if !meta.is_empty() {
        entry.push_str(&format!(" {}", format!("({})", meta.join(", ")).dimmed()));
    }
    entry.push('\n');
    if let Some(url) = &item.url {
        entry.push_str(&format!("    {}\n", url.cyan()));
    }
    entry
}

fn section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(&format!("{}\n", title.bold()));
}

/// Render the whole report for the terminal
pub fn render_report(report: &AnalysisReport, show_reasoning: bool) -> String {
    let title = if report.company_name.is_empty() {
        report.ticker.clone()
    } else {
        format!("{} ({})", report.company_name, report.ticker)
    };
    let mut out = format!("{}\n", title.bold().underline());
    if !report.timestamp.is_empty() {
        let generated = format!("Generated {}", display_timestamp(&report.timestamp));
        out.push_str(&format!("{}\n", generated.dimmed()));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", price_line(&report.price_info)));

    if !report.fundamentals.is_empty() {
        section(&mut out, "Fundamentals");
        for (key, value) in &report.fundamentals {
            out.push_str(&format!(
                "  {:<20} {}\n",
                fundamentals::label(key),
                fundamentals::value(key, value)
            ));
        }
    }

    if let Some(sentiment) = &report.reddit_sentiment {
        section(&mut out, "Reddit Sentiment");
        out.push_str(&format!("  {}\n", sentiment_line(sentiment)));
        if let Some(summary) = sentiment.summary.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("  {}\n", summary.dimmed()));
        }
    }

    if !report.news.is_empty() {
        section(&mut out, "Recent News");
        for item in &report.news {
            out.push_str(&news_entry(item));
        }
    }

    let (reasoning, body) = split_reasoning(&report.analysis_text);
    if let Some(reasoning) = reasoning.filter(|_| show_reasoning) {
        section(&mut out, "Model Reasoning");
        for line in reasoning.lines() {
            out.push_str(&format!("  {}\n", line.dimmed()));
        }
    }
    if !body.is_empty() {
        section(&mut out, "Analysis");
        out.push_str(&body);
        out.push('\n');
    }

    out
}
