mod init;
pub use init::{init_logging, parse_rotation};

use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Log filename used by the server.
pub const LOG_FILENAME: &str = "one-list.log";

/// Configuration for the logging system.
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Default level when `RUST_LOG` is not set.
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

/// `~/.one-list/logs`, falling back to `./.one-list/logs`.
#[must_use]
pub fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".one-list")
        .join("logs")
}

#[cfg(test)]
#[path = "../logging_tests.rs"]
mod logging_tests;
