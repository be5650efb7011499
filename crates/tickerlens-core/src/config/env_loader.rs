//! Environment variable-based configuration overrides

use super::config::ClientConfig;
use crate::error::{TickerError, TickerResult};

pub const ENV_BASE_URL: &str = "TICKERLENS_BASE_URL";
pub const ENV_CONNECT_TIMEOUT: &str = "TICKERLENS_CONNECT_TIMEOUT";
pub const ENV_INACTIVITY_TIMEOUT: &str = "TICKERLENS_INACTIVITY_TIMEOUT";
pub const ENV_LOG_LEVEL: &str = "TICKERLENS_LOG_LEVEL";

/// Apply `TICKERLENS_*` variables from the process environment
pub fn apply_env(config: &mut ClientConfig) -> TickerResult<()> {
    apply_env_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides using `lookup` in place of the process environment
pub fn apply_env_from<F>(config: &mut ClientConfig, lookup: F) -> TickerResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BASE_URL) {
        config.base_url = url;
    }

    if let Some(value) = lookup(ENV_CONNECT_TIMEOUT) {
        config.connect_timeout_secs = parse_secs(ENV_CONNECT_TIMEOUT, &value)?;
    }

    if let Some(value) = lookup(ENV_INACTIVITY_TIMEOUT) {
        config.inactivity_timeout_secs = Some(parse_secs(ENV_INACTIVITY_TIMEOUT, &value)?);
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }

    Ok(())
}

fn parse_secs(key: &str, value: &str) -> TickerResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| TickerError::config(format!("Invalid {} value: '{}'", key, value)))
}
