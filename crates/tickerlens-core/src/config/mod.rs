//! Configuration management for TickerLens
//!
//! Sources are layered in this order, later ones winning:
//! defaults, config file, `TICKERLENS_*` environment variables, then
//! explicit overrides (usually CLI flags).

#[allow(clippy::module_inception)]
mod config;
mod env_loader;
mod file_loader;
mod loader;
mod logging_config;

pub mod timeouts;

pub use config::ClientConfig;
pub use env_loader::{apply_env, apply_env_from};
pub use file_loader::load_from_file;
pub use loader::{ConfigOverrides, default_config_path, load_config};
pub use logging_config::{LogFormat, LoggingConfig};
