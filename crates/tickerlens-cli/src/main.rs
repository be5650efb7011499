//! TickerLens CLI application
//!
//! Terminal front-end for the stock analysis service. A query is sent to
//! the backend, progress is shown live as the event stream arrives, and
//! the final report is rendered (or exported as markdown).
//!
//! ```bash
//! tickerlens analyze "Give me a detailed financial analysis for $AAPL"
//! tickerlens analyze "$NVDA outlook" --export nvda.md
//! tickerlens health
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=tickerlens_core=debug` to watch frames.

mod args;
mod commands;
mod console;
mod logging;
mod progress;
mod render;
mod router;

use clap::Parser;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    router::route(cli).await
}
