//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;
use crate::logging;
use tickerlens_core::{ConfigOverrides, load_config};

/// Load configuration, set up logging and run the selected command
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        inactivity_timeout_secs: cli.timeout,
        log_level: None,
    };
    let config = load_config(cli.config_file.as_deref(), overrides)?;
    logging::init(&config.logging, cli.verbose);

    let console = CliConsole::new(cli.verbose);
    console.info(&format!("Backend: {}", config.base_url));

    match cli.command {
        Commands::Analyze {
            query,
            export,
            json,
            show_reasoning,
        } => {
            let options = commands::analyze::AnalyzeOptions {
                export,
                json,
                show_reasoning,
            };
            commands::analyze::run(&config, &console, &query, options).await
        }
        Commands::Simple { query } => commands::info::simple(&config, &console, &query).await,
        Commands::Ticker { query } => commands::info::ticker(&config, &console, &query).await,
        Commands::Health => commands::info::health(&config, &console).await,
        Commands::Status => commands::info::status(&config, &console).await,
        Commands::Messages => commands::info::messages(&config, &console).await,
    }
}
