use std::path::Path;
use tracing::{debug, warn};

use super::{config_path, AppConfig, ConfigError};

/// Load the configuration from `explicit` if given, else from
/// `~/.one-list/config.toml`.
///
/// A missing default file yields `AppConfig::default()`; a missing explicit
/// file is an error.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let Some(path) = config_path() else {
        warn!("Could not determine config directory; using defaults");
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(AppConfig::default());
    }
    load_config_from(&path)
}

/// Read and parse a specific config file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
