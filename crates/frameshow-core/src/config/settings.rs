//! Client configuration loaded from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::slideshow::SlideshowSettings;
use crate::error::{CoreError, CoreResult};
use crate::fs::path::DEFAULT_ROOT_PREFIX;

/// Top-level configuration.
///
/// All fields have defaults so Frameshow works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    /// Settings applied by "reset to default".
    #[serde(default)]
    pub slideshow: SlideshowSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::ConfigNotFound`] if the file does not exist.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    /// - [`CoreError::Io`] for any other read failure.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::ConfigNotFound(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Where album paths live on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Leading segment on every server path, stripped inside the core.
    #[serde(default = "default_root_prefix")]
    pub root_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_prefix: default_root_prefix(),
        }
    }
}

/// Log output settings for hosts that install a subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_root_prefix() -> String {
    DEFAULT_ROOT_PREFIX.to_string()
}

fn default_filter() -> String {
    "frameshow=info".to_string()
}
