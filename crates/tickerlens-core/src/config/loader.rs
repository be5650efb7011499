//! Layered configuration loading

use super::config::ClientConfig;
use super::env_loader::apply_env;
use super::file_loader::load_from_file;
use crate::error::TickerResult;
use std::path::{Path, PathBuf};

/// Explicit values that win over file and environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub inactivity_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    fn apply(self, config: &mut ClientConfig) {
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if let Some(secs) = self.inactivity_timeout_secs {
            config.inactivity_timeout_secs = Some(secs);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

/// `<config dir>/tickerlens/config.toml`, if a config directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tickerlens").join("config.toml"))
}

/// Load configuration from defaults, file, environment and overrides.
///
/// Without an explicit `path` the default config path is used when present.
pub fn load_config(path: Option<&Path>, overrides: ConfigOverrides) -> TickerResult<ClientConfig> {
    let file = path.map(Path::to_path_buf).or_else(default_config_path);

    let mut config = match file {
        Some(file) => {
            tracing::debug!(path = %file.display(), "Loading configuration");
            load_from_file(&file)?
        }
        None => ClientConfig::default(),
    };

    apply_env(&mut config)?;
    overrides.apply(&mut config);
    config.validate()?;

    tracing::debug!(
        base_url = %config.base_url,
        inactivity_timeout = ?config.inactivity_timeout(),
        "Configuration loaded"
    );
    Ok(config)
}
