//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tickerlens")]
#[command(about = "TickerLens - natural-language stock analysis from your terminal")]
#[command(
    long_about = r#"TickerLens - natural-language stock analysis from your terminal

USAGE:
  tickerlens analyze "How is $TSLA doing?"      # Stream an analysis report
  tickerlens analyze "AAPL" --export aapl.md     # Save the report as markdown
  tickerlens simple "MSFT"                       # One-shot summary, no streaming
  tickerlens ticker "Tell me about Nvidia"       # Check ticker extraction
  tickerlens health                              # Backend health"#
)]
#[command(version)]
pub struct Cli {
    /// Backend address (overrides config file and TICKERLENS_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to configuration file (.toml, .yaml or .json)
    #[arg(long, global = true, env = "TICKERLENS_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Seconds without stream data before giving up (0 waits forever)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a stock with live progress
    Analyze {
        /// Natural-language query, e.g. "Give me analysis for $AAPL"
        query: String,

        /// Write the report as markdown to this file
        #[arg(long, short)]
        export: Option<PathBuf>,

        /// Print the report as JSON instead of formatted text
        #[arg(long)]
        json: bool,

        /// Also show the model's reasoning block
        #[arg(long)]
        show_reasoning: bool,
    },

    /// Run the non-streaming analysis endpoint
    Simple {
        query: String,
    },

    /// Show which ticker the backend extracts from a query
    Ticker {
        query: String,
    },

    /// Check backend health
    Health,

    /// Show backend status
    Status,

    /// List stored chat messages
    Messages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "tickerlens",
            "analyze",
            "How is $TSLA doing?",
            "--export",
            "tsla.md",
            "--timeout",
            "30",
        ]);
        assert_eq!(cli.timeout, Some(30));
        match cli.command {
            Commands::Analyze { query, export, json, .. } => {
                assert_eq!(query, "How is $TSLA doing?");
                assert_eq!(export, Some(PathBuf::from("tsla.md")));
                assert!(!json);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tickerlens", "health", "--base-url", "http://box:8000"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://box:8000"));
        assert!(matches!(cli.command, Commands::Health));
    }
}
