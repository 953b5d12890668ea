//! Configuration module for pirelay-server.
//!
//! Handles loading configuration from an optional TOML file, CLI
//! arguments, and the environment. The Pi API secret only ever comes from
//! the environment.

pub mod file;

use crate::config::file::FileConfig;
use pirelay_core::config::API_KEY_ENV;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Server section after validation.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

/// Upstream section after validation.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: Url,
    pub timeout: Option<Duration>,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing file falls back to defaults; an unreadable or invalid one
    /// is an error.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut file_config = if self.config_path.exists() {
            let content = std::fs::read_to_string(&self.config_path)?;
            toml::from_str::<FileConfig>(&content)?
        } else {
            tracing::info!(
                path = ?self.config_path,
                "No configuration file found, using defaults"
            );
            FileConfig::default()
        };

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        self.validate(&file_config)?;

        Ok(LoadedConfig {
            server: ServerConfig {
                listen: file_config.server.listen,
            },
            upstream: UpstreamConfig {
                base_url: file_config.upstream.base_url,
                timeout: file_config.upstream.timeout_secs.map(Duration::from_secs),
            },
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let scheme = config.upstream.base_url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(ConfigError::ValidationError(format!(
                "upstream base_url must be http(s), got {scheme}"
            )));
        }
        if config.upstream.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "upstream timeout_secs must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Get the Pi API secret from the environment, if set.
pub fn get_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}
