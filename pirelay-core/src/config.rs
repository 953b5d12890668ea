//! Configuration injected into the relay pipeline.
//!
//! The pipeline never reads the process environment itself; the server
//! resolves the secret once at startup and hands it over here.

use std::fmt;

/// Name of the environment variable holding the Pi API secret.
pub const API_KEY_ENV: &str = "PI_API_KEY";

/// The server-held Pi API secret. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Box<str>);

impl ApiKey {
    /// Wrap a secret. Empty strings count as no key at all.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            None
        } else {
            Some(Self(secret.into_boxed_str()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Validated runtime configuration for both relay actions.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// The Pi API secret, if one was provisioned.
    pub api_key: Option<ApiKey>,
    /// Name reported to callers when the key is missing.
    pub api_key_name: &'static str,
}

impl RelayConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.and_then(ApiKey::new),
            api_key_name: API_KEY_ENV,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_missing() {
        assert!(RelayConfig::new(Some(String::new())).api_key.is_none());
        assert!(RelayConfig::new(None).api_key.is_none());
        assert!(RelayConfig::new(Some("k".into())).api_key.is_some());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = RelayConfig::new(Some("super-secret".into()));
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
