//! Application configuration, read from `~/.one-list/config.toml`.
//!
//! Every table and key is optional except the login password, which may
//! also come from the command line or `ONE_LIST_PASSWORD`.

mod loader;
pub use loader::{load_config, load_config_from};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::storage::default_db_path;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("No login password configured. Set auth.password in the config file or ONE_LIST_PASSWORD")]
    MissingPassword,
    #[error(
        "Invalid login path '{0}': must be a plain absolute path (letters, digits, '-', '_', '.', '~') that does not shadow an app route"
    )]
    InvalidLoginPath(String),
}

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Paths served by the app itself; the login page cannot take one of these.
pub const RESERVED_PATHS: &[&str] = &[
    "/", "/view", "/edit", "/save", "/create", "/delete", "/health",
];

fn default_addr() -> String {
    DEFAULT_ADDR.to_string()
}

fn default_cookie_name() -> String {
    "one_list_auth".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_login_delay_secs() -> u64 {
    6
}

/// `[server]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

/// `[auth]` table: the static-password cookie gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Mark the cookie `Secure`. Needs HTTPS in front of the server.
    #[serde(default)]
    pub secure_cookie: bool,
    /// Delay applied to every login attempt.
    #[serde(default = "default_login_delay_secs")]
    pub login_delay_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            password: String::new(),
            login_path: default_login_path(),
            secure_cookie: false,
            login_delay_secs: default_login_delay_secs(),
        }
    }
}

/// `[storage]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured database path, or `~/.one-list/main.db`.
    #[must_use]
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(default_db_path)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Check the settings that have no usable default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.password.is_empty() {
            return Err(ConfigError::MissingPassword);
        }
        let login_path = &self.auth.login_path;
        if !is_plain_route(login_path) || RESERVED_PATHS.contains(&login_path.as_str()) {
            return Err(ConfigError::InvalidLoginPath(login_path.clone()));
        }
        Ok(())
    }
}

/// A literal route the router accepts: `/`-separated, non-empty segments of
/// unreserved URL characters. Rules out captures (`{id}`, `*rest`, `:id`),
/// `//` and a trailing slash.
fn is_plain_route(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    rest.split('/').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
    })
}

/// Resolve the canonical path for the config file.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".one-list").join("config.toml"))
}

#[cfg(test)]
#[path = "../config_tests.rs"]
mod config_tests;
