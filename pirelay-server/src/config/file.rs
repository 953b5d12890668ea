//! TOML file configuration structures.
//!
//! These structs directly map to the `pirelay-config.toml` file format.
//! Every section is optional; a missing file is the same as an empty one.

use pirelay_sdk::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// Pi API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Root of the Pi platform API.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Whole-request timeout. Unset means the transport defaults apply.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default base url")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[upstream]
base_url = "https://sandbox.example.com"
timeout_secs = 20
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.upstream.base_url.as_str(), "https://sandbox.example.com/");
        assert_eq!(config.upstream.timeout_secs, Some(20));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.upstream.base_url.as_str(), "https://api.minepi.com/");
        assert_eq!(config.upstream.timeout_secs, None);
    }

    #[test]
    fn test_partial_section() {
        let config: FileConfig = toml::from_str("[upstream]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.upstream.base_url.as_str(), "https://api.minepi.com/");
        assert_eq!(config.upstream.timeout_secs, Some(5));
    }
}
