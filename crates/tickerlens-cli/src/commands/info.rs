//! Thin wrappers over the non-streaming endpoints

use crate::console::CliConsole;
use crate::render::report::price_line;
use colored::*;
use tickerlens_core::analysis::split_reasoning;
use tickerlens_core::{AnalysisBackend, ClientConfig, HttpBackend};

fn backend(config: &ClientConfig) -> anyhow::Result<HttpBackend> {
    Ok(HttpBackend::new(config.clone())?)
}

/// `tickerlens health`
pub async fn health(config: &ClientConfig, console: &CliConsole) -> anyhow::Result<()> {
    let health = backend(config)?.health().await?;

    console.print_header("Backend Health");
    let status = if health.is_healthy() {
        health.status.green().bold()
    } else {
        health.status.red().bold()
    };
    console.print_field("Status", &status.to_string());
    console.print_field("Backend", &config.base_url);
    if let Some(model) = &health.model {
        console.print_field("Model", model);
    }
    if let Some(url) = &health.ollama_url {
        console.print_field("Model server", url);
    }
    if let Some(timestamp) = &health.timestamp {
        console.print_field("Checked at", timestamp);
    }

    if !health.is_healthy() {
        anyhow::bail!("backend reports status '{}'", health.status);
    }
    Ok(())
}

/// `tickerlens ticker`
pub async fn ticker(
    config: &ClientConfig,
    console: &CliConsole,
    query: &str,
) -> anyhow::Result<()> {
    let extraction = backend(config)?.extract_ticker(query).await?;
    match extraction.extracted_ticker.filter(|_| extraction.success) {
        Some(ticker) => console.success(&format!("Ticker: {}", ticker.bold())),
        None => console.warn(&format!("No ticker found in \"{}\"", extraction.query)),
    }
    Ok(())
}

/// `tickerlens simple`
pub async fn simple(
    config: &ClientConfig,
    console: &CliConsole,
    query: &str,
) -> anyhow::Result<()> {
    let analysis = backend(config)?.analyze_simple(query).await?;

    let title = if analysis.company_name.is_empty() {
        analysis.ticker.clone()
    } else {
        format!("{} ({})", analysis.company_name, analysis.ticker)
    };
    console.print_header(&title);
    console.print_field("Price", &price_line(&analysis.price_info));
    console.print_field("News articles", &analysis.news_count.to_string());

    let (_, body) = split_reasoning(&analysis.analysis);
    if !body.is_empty() {
        println!();
        println!("{body}");
    }
    Ok(())
}

/// `tickerlens status`
pub async fn status(config: &ClientConfig, console: &CliConsole) -> anyhow::Result<()> {
    let status = backend(config)?.status().await?;
    console.print_json(&status);
    Ok(())
}

/// `tickerlens messages`
pub async fn messages(config: &ClientConfig, console: &CliConsole) -> anyhow::Result<()> {
    let messages = backend(config)?.messages().await?;
    console.print_json(&messages);
    Ok(())
}
