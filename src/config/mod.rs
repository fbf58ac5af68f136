//! Configuration management for reelview.
//!
//! Configuration is read from `~/.config/reelview/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! The API credential is never stored here; it comes from the
//! `API_ACCESS_KEY` environment variable (see [`crate::client::ClientConfig`]).

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app::ReelError;
use crate::domain::movie::IMAGE_BASE_URL;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
}

/// Content API settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    pub base_url: String,

    /// Base URL for poster images
    pub image_base_url: String,

    /// Per-request timeout in milliseconds (default: none)
    pub timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: IMAGE_BASE_URL.to_string(),
            timeout_ms: None,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/reelview/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("reelview").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    fn default_config_content() -> String {
        r##"# reelview configuration
#
# The API bearer token is read from the API_ACCESS_KEY environment
# variable and is never stored in this file.

[api]
# Content API root; request paths are appended to it
base_url = "https://api.themoviedb.org/3"

# Poster image root
image_base_url = "https://image.tmdb.org/t/p"

# Abort requests that take longer than this (milliseconds)
# timeout_ms = 10000
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<ConfigError> for ReelError {
    fn from(err: ConfigError) -> Self {
        ReelError::Config(err.to_string())
    }
}
