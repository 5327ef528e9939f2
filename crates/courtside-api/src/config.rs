//! Configuration management for the Courtside interaction service.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use courtside_roster::ClientConfig;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::forward::ForwardConfig;

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The service starts without any configuration, but until `PUBLIC_KEY` is
/// set every interaction request is rejected with 401 (fail closed), and
/// without `FORWARD_URL` command payloads are acknowledged and dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Request verification
    /// Hex-encoded Ed25519 public key of the interaction gateway.
    ///
    /// Environment variable: `PUBLIC_KEY`
    #[serde(default, alias = "PUBLIC_KEY")]
    pub public_key: String,

    // Sports data source
    /// API key for the sports-data source.
    ///
    /// Environment variable: `SPORTS_API_KEY`
    #[serde(default, alias = "SPORTS_API_KEY")]
    pub sports_api_key: String,
    /// Base URL of the sports-data source.
    ///
    /// Environment variable: `SPORTS_API_BASE_URL`
    #[serde(default = "default_sports_api_base_url", alias = "SPORTS_API_BASE_URL")]
    pub sports_api_base_url: String,
    /// Timeout for sports-data requests in seconds.
    ///
    /// Environment variable: `SPORTS_TIMEOUT_SECONDS`
    #[serde(default = "default_sports_timeout", alias = "SPORTS_TIMEOUT_SECONDS")]
    pub sports_timeout_seconds: u64,
    /// Roster cache time-to-live in hours.
    ///
    /// Environment variable: `ROSTER_TTL_HOURS`
    #[serde(default = "default_roster_ttl_hours", alias = "ROSTER_TTL_HOURS")]
    pub roster_ttl_hours: u64,

    // Automation forwarding
    /// Workflow-automation endpoint URL for command payloads.
    ///
    /// Environment variable: `FORWARD_URL`
    #[serde(default, alias = "FORWARD_URL")]
    pub forward_url: String,
    /// Timeout for forward requests in seconds.
    ///
    /// Environment variable: `FORWARD_TIMEOUT_SECONDS`
    #[serde(default = "default_forward_timeout", alias = "FORWARD_TIMEOUT_SECONDS")]
    pub forward_timeout_seconds: u64,
    /// Application identifier sent with forwarded payloads.
    ///
    /// Environment variable: `APPLICATION_ID`
    #[serde(default, alias = "APPLICATION_ID")]
    pub application_id: String,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when extraction or validation fails.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to the roster crate's client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.sports_api_base_url.clone(),
            api_key: self.sports_api_key.clone(),
            timeout: Duration::from_secs(self.sports_timeout_seconds),
            user_agent: format!("Courtside/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Convert to forwarder configuration.
    pub fn to_forward_config(&self) -> ForwardConfig {
        ForwardConfig {
            url: self.forward_url.clone(),
            application_id: self.application_id.clone(),
            timeout: Duration::from_secs(self.forward_timeout_seconds),
        }
    }

    /// Roster cache TTL as a duration.
    pub fn roster_ttl(&self) -> Duration {
        Duration::from_secs(self.roster_ttl_hours * 60 * 60)
    }

    /// Parse server socket address from host and port configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when host and port do not form a valid address.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Sports API key with all but a short prefix masked for logging.
    pub fn sports_api_key_masked(&self) -> String {
        if self.sports_api_key.is_empty() {
            return "(unset)".to_string();
        }
        let prefix: String = self.sports_api_key.chars().take(4).collect();
        format!("{prefix}***")
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.sports_timeout_seconds == 0 {
            anyhow::bail!("sports_timeout_seconds must be greater than 0");
        }

        if self.forward_timeout_seconds == 0 {
            anyhow::bail!("forward_timeout_seconds must be greater than 0");
        }

        if self.roster_ttl_hours == 0 {
            anyhow::bail!("roster_ttl_hours must be greater than 0");
        }

        if !self.public_key.is_empty() && self.public_key.len() != 64 {
            anyhow::bail!("public_key must be 64 hex characters (32 bytes)");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            public_key: String::new(),
            sports_api_key: String::new(),
            sports_api_base_url: default_sports_api_base_url(),
            sports_timeout_seconds: default_sports_timeout(),
            roster_ttl_hours: default_roster_ttl_hours(),
            forward_url: String::new(),
            forward_timeout_seconds: default_forward_timeout(),
            application_id: String::new(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    15
}

fn default_sports_api_base_url() -> String {
    "https://api.balldontlie.io".to_string()
}

fn default_sports_timeout() -> u64 {
    10
}

fn default_roster_ttl_hours() -> u64 {
    24
}

fn default_forward_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.port, 8080);
        assert_eq!(config.roster_ttl_hours, 24);
        assert!(config.public_key.is_empty());
    }

    #[test]
    fn invalid_config_validation_fails() {
        let mut config = Config::default();
        config.port = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.roster_ttl_hours = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.request_timeout = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.public_key = "abcd".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn full_length_public_key_accepted() {
        let mut config = Config::default();
        config.public_key = "ab".repeat(32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn client_config_conversion() {
        let mut config = Config::default();
        config.sports_api_key = "key-123".to_string();
        config.sports_timeout_seconds = 7;

        let client_config = config.to_client_config();
        assert_eq!(client_config.api_key, "key-123");
        assert_eq!(client_config.timeout, Duration::from_secs(7));
        assert_eq!(client_config.base_url, "https://api.balldontlie.io");
    }

    #[test]
    fn forward_config_conversion() {
        let mut config = Config::default();
        config.forward_url = "https://automation.example.com/hook".to_string();
        config.application_id = "app-42".to_string();

        let forward_config = config.to_forward_config();
        assert_eq!(forward_config.url, "https://automation.example.com/hook");
        assert_eq!(forward_config.application_id, "app-42");
        assert_eq!(forward_config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn roster_ttl_in_hours() {
        let mut config = Config::default();
        config.roster_ttl_hours = 2;
        assert_eq!(config.roster_ttl(), Duration::from_secs(7200));
    }

    #[test]
    fn api_key_masking() {
        let mut config = Config::default();
        assert_eq!(config.sports_api_key_masked(), "(unset)");

        config.sports_api_key = "secret-api-key".to_string();
        let masked = config.sports_api_key_masked();
        assert_eq!(masked, "secr***");
        assert!(!masked.contains("api-key"));
    }

    #[test]
    fn socket_address_parsing() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 9000;

        let addr = config.parse_server_addr().expect("Should parse socket address");
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 9000);
    }
}
