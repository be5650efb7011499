//! CLI console utilities

use colored::*;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    /// Print a `key: value` line
    pub fn print_field(&self, key: &str, value: &str) {
        println!("  {:<18} {}", format!("{key}:").dimmed(), value);
    }

    /// Print JSON in a formatted way
    pub fn print_json(&self, json: &serde_json::Value) {
        match serde_json::to_string_pretty(json) {
            Ok(formatted) => println!("{formatted}"),
            Err(_) => println!("{json}"),
        }
    }
}

impl Default for CliConsole {
    fn default() -> Self {
        Self::new(false)
    }
}
