//! Markdown export of an analysis report

use super::{display_timestamp, fundamentals};
use tickerlens_core::AnalysisReport;

/// Markdown document for `report`; the model's reasoning block is left out
pub fn report_to_markdown(report: &AnalysisReport) -> String {
    let title = if report.company_name.is_empty() {
        report.ticker.clone()
    } else {
        format!("{} - {}", report.ticker, report.company_name)
    };
    let mut md = format!("# Stock Analysis Report: {title}\n\n");
    if !report.timestamp.is_empty() {
        md.push_str(&format!(
            "**Generated:** {}  \n",
            display_timestamp(&report.timestamp)
        ));
    }
    if !report.query.is_empty() {
        md.push_str(&format!("**Query:** {}  \n", report.query));
    }
    md.push('\n');

    let price = &report.price_info;
    md.push_str("## Price Information\n\n");
    md.push_str(&format!("- **Current Price:** ${:.2}\n", price.current_price));
    md.push_str(&format!(
        "- **Change:** {:+.2} ({:+.2}%)\n\n",
        price.change, price.change_percent
    ));

    if !report.fundamentals.is_empty() {
        md.push_str("## Fundamentals\n\n");
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        for (key, value) in &report.fundamentals {
            md.push_str(&format!(
                "| {} | {} |\n",
                fundamentals::label(key),
                fundamentals::value(key, value).replace('|', "\\|")
            ));
        }
        md.push('\n');
    }

    if let Some(sentiment) = &report.reddit_sentiment {
        md.push_str("## Reddit Sentiment\n\n");
        md.push_str(&format!(
            "- **Sentiment:** {} ({:.0}% confidence)\n",
            sentiment.sentiment,
            sentiment.confidence * 100.0
        ));
        if let Some(summary) = sentiment.summary.as_deref().filter(|s| !s.is_empty()) {
            md.push_str(&format!("- **Summary:** {summary}\n"));
        }
        md.push('\n');
    }

    if !report.news.is_empty() {
        md.push_str("## Recent News\n\n");
        for (i, item) in report.news.iter().enumerate() {
            let title = match &item.url {
                Some(url) => format!("[{}]({})", item.title, url),
                None => item.title.clone(),
            };
            md.push_str(&format!("{}. **{}**\n", i + 1, title));
            if !item.source.is_empty() {
                md.push_str(&format!("   - Source: {}\n", item.source));
            }
            if !item.date.is_empty() {
                md.push_str(&format!("   - Date: {}\n", item.date));
            }
        }
        md.push('\n');
    }

    let body = report.analysis_body();
    if !body.is_empty() {
        md.push_str("## Analysis\n\n");
        md.push_str(&body);
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markdown_export() {
        let report = AnalysisReport::from_value(&json!({
            "ticker": "NVDA",
            "company_name": "NVIDIA Corporation",
            "query": "$NVDA outlook",
            "price_info": {"current_price": 903.5, "change": 12.25, "change_percent": 1.37},
            "analysis": "<think>\nlong musing\n</think>\n\n**Buy** on dips.",
            "fundamentals": {"market_cap": 2.26e12, "beta": null},
            "news": [{"title": "Chips rally", "source": "Bloomberg", "url": "https://example.com/a", "date": "2024-05-02"}]
        }))
        .unwrap();

        let md = report_to_markdown(&report);
        assert!(md.starts_with("# Stock Analysis Report: NVDA - NVIDIA Corporation\n"));
        assert!(md.contains("**Query:** $NVDA outlook"));
        assert!(md.contains("- **Change:** +12.25 (+1.37%)"));
        assert!(md.contains("| Market Cap | $2.26T |"));
        assert!(md.contains("| Beta | N/A |"));
        assert!(md.contains("1. **[Chips rally](https://example.com/a)**"));
        assert!(md.ends_with("## Analysis\n\n**Buy** on dips.\n"));
        assert!(!md.contains("musing"));
    }
}
