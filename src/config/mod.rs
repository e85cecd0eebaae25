//! Configuration management
//!
//! This module handles loading and parsing configuration for Stockroom.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults. The signing
//! secret and credential list are deliberately plain values: they are fixed
//! deployment constants, not secrets management.

use serde::{Deserialize, Serialize};

use crate::models::Credential;
use crate::services::DEFAULT_TOKEN_TTL_SECONDS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (the catalog client)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "http://localhost:3001".to_string()
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret for session tokens
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Session token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,
    /// Static login pairs
    #[serde(default = "default_credentials")]
    pub credentials: Vec<Credential>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_seconds: default_token_ttl(),
            credentials: default_credentials(),
        }
    }
}

fn default_secret() -> String {
    "stockroom-dev-secret".to_string()
}

fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

/// Longest accepted session token lifetime (one year)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

fn default_credentials() -> Vec<Credential> {
    vec![Credential::new("admin", "123")]
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist or is empty, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - STOCKROOM_SERVER_HOST
    /// - STOCKROOM_SERVER_PORT
    /// - STOCKROOM_SERVER_CORS_ORIGIN
    /// - STOCKROOM_AUTH_SECRET
    /// - STOCKROOM_AUTH_TOKEN_TTL_SECONDS
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.credentials.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.credentials must list at least one login".to_string(),
            ));
        }
        if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&self.auth.token_ttl_seconds) {
            return Err(ConfigError::ValidationError(format!(
                "auth.token_ttl_seconds must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECONDS, self.auth.token_ttl_seconds
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("STOCKROOM_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("STOCKROOM_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("STOCKROOM_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(secret) = std::env::var("STOCKROOM_AUTH_SECRET") {
            self.auth.secret = secret;
        }
        if let Ok(ttl) = std::env::var("STOCKROOM_AUTH_TOKEN_TTL_SECONDS") {
            if let Ok(ttl) = ttl.parse::<i64>() {
                self.auth.token_ttl_seconds = ttl;
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared by every test that touches STOCKROOM_* variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ENV_KEYS: [&str; 5] = [
        "STOCKROOM_SERVER_HOST",
        "STOCKROOM_SERVER_PORT",
        "STOCKROOM_SERVER_CORS_ORIGIN",
        "STOCKROOM_AUTH_SECRET",
        "STOCKROOM_AUTH_TOKEN_TTL_SECONDS",
    ];

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_stockroom_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.token_ttl_seconds, 3600);
        assert_eq!(config.auth.credentials, vec![Credential::new("admin", "123")]);
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let file = write_config("");
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.secret, "stockroom-dev-secret");
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let file = write_config("server:\n  port: 8088\n");
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.credentials.len(), 1);
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
server:
  host: "127.0.0.1"
  port: 9000
  cors_origin: "http://catalog.local"
auth:
  secret: "s3cret"
  token_ttl_seconds: 600
  credentials:
    - username: "administrador"
      password: "1234"
    - username: "clerk"
      password: "abc"
"#,
        );
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origin, "http://catalog.local");
        assert_eq!(config.auth.secret, "s3cret");
        assert_eq!(config.auth.token_ttl_seconds, 600);
        assert_eq!(
            config.auth.credentials,
            vec![
                Credential::new("administrador", "1234"),
                Credential::new("clerk", "abc"),
            ]
        );
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let file = write_config("server:\n  port: not_a_number\n");
        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_load_malformed_yaml_returns_error() {
        let file = write_config("server:\n  host: [invalid yaml");
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let file = write_config("auth:\n  credentials: []\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let file = write_config("auth:\n  token_ttl_seconds: 0\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let file = write_config(&format!("auth:\n  token_ttl_seconds: {}\n", i64::MAX));
        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("token_ttl_seconds"));
    }

    #[test]
    fn test_env_oversized_ttl_rejected() {
        let _guard = lock_env();
        clear_env();

        let file = write_config("");
        std::env::set_var(
            "STOCKROOM_AUTH_TOKEN_TTL_SECONDS",
            (MAX_TOKEN_TTL_SECONDS + 1).to_string(),
        );

        let result = Config::load_with_env(file.path());
        clear_env();

        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_env_override_server_config() {
        let _guard = lock_env();
        clear_env();

        let file = write_config("server:\n  host: \"0.0.0.0\"\n  port: 3000\n");
        std::env::set_var("STOCKROOM_SERVER_HOST", "192.168.1.1");
        std::env::set_var("STOCKROOM_SERVER_PORT", "4000");
        std::env::set_var("STOCKROOM_SERVER_CORS_ORIGIN", "http://ui.local");

        let config = Config::load_with_env(file.path()).unwrap();
        clear_env();

        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.cors_origin, "http://ui.local");
    }

    #[test]
    fn test_env_override_auth_config() {
        let _guard = lock_env();
        clear_env();

        let file = write_config("");
        std::env::set_var("STOCKROOM_AUTH_SECRET", "from-env");
        std::env::set_var("STOCKROOM_AUTH_TOKEN_TTL_SECONDS", "120");

        let config = Config::load_with_env(file.path()).unwrap();
        clear_env();

        assert_eq!(config.auth.secret, "from-env");
        assert_eq!(config.auth.token_ttl_seconds, 120);
    }

    #[test]
    fn test_env_override_invalid_numbers_ignored() {
        let _guard = lock_env();
        clear_env();

        let file = write_config("server:\n  port: 5000\n");
        std::env::set_var("STOCKROOM_SERVER_PORT", "not-a-port");
        std::env::set_var("STOCKROOM_AUTH_TOKEN_TTL_SECONDS", "soon");

        let config = Config::load_with_env(file.path()).unwrap();
        clear_env();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.auth.token_ttl_seconds, 3600);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_host_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
                .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d)),
            Just("localhost".to_string()),
            "host[a-z0-9]{0,10}",
        ]
    }

    fn credential_strategy() -> impl Strategy<Value = Credential> {
        ("user[a-z]{0,8}", "pw[a-zA-Z0-9]{1,12}").prop_map(|(u, p)| Credential::new(u, p))
    }

    fn valid_config_strategy() -> impl Strategy<Value = Config> {
        (
            valid_host_strategy(),
            1u16..=65535,
            "key[a-zA-Z0-9]{1,24}",
            1i64..=86_400,
            prop::collection::vec(credential_strategy(), 1..4),
        )
            .prop_map(|(host, port, secret, ttl, credentials)| Config {
                server: ServerConfig {
                    host,
                    port,
                    cors_origin: default_cors_origin(),
                },
                auth: AuthConfig {
                    secret,
                    token_ttl_seconds: ttl,
                    credentials,
                },
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Serializing any valid config to YAML and loading it back is lossless
        #[test]
        fn property_config_roundtrip(config in valid_config_strategy()) {
            let yaml = serde_yaml::to_string(&config).expect("Failed to serialize config");
            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let parsed = Config::load(file.path()).expect("Failed to parse config");

            prop_assert_eq!(config.server.host, parsed.server.host);
            prop_assert_eq!(config.server.port, parsed.server.port);
            prop_assert_eq!(config.auth.secret, parsed.auth.secret);
            prop_assert_eq!(config.auth.token_ttl_seconds, parsed.auth.token_ttl_seconds);
            prop_assert_eq!(config.auth.credentials, parsed.auth.credentials);
        }
    }
}
