//! Configuration loading and typed config structures for the Tally service.
//!
//! Configuration lives in an optional `tally-config.yaml`. Every field has a
//! default, so a missing file or a partial file is fine. The listen address
//! can be overridden with the `HTTP_ADDRESS` environment variable.

use std::path::Path;

use serde::Deserialize;

use crate::registry::DEFAULT_TOKEN_LENGTH;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tally-config.yaml";

/// Environment variable overriding the listen address (`host:port` or `:port`).
pub const HTTP_ADDRESS_VAR: &str = "HTTP_ADDRESS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TallyConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Session token settings.
    #[serde(default)]
    pub sessions: SessionConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TallyConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, and
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML and
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with_address(yaml, http_address_from_env().as_deref())
    }

    /// Defaults with environment overrides applied, for running without a
    /// config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `HTTP_ADDRESS` is malformed or
    /// yields an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().finish(http_address_from_env().as_deref())
    }

    fn parse_with_address(yaml: &str, http_address: Option<&str>) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.finish(http_address)
    }

    /// Apply the address override, then validate. Every loading path ends here.
    fn finish(mut self, http_address: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(address) = http_address {
            self.server.apply_http_address(address)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(String::from(
                "server.port must be in 1..=65535",
            )));
        }
        if self.sessions.token_length == 0 {
            return Err(ConfigError::Invalid(String::from(
                "sessions.token_length must be at least 1",
            )));
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Override host and port from an address like `127.0.0.1:9000` or
    /// `:9000`. An empty host binds all interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the address has no port or the
    /// port is not a number.
    pub fn apply_http_address(&mut self, address: &str) -> Result<(), ConfigError> {
        let (host, port) = address.trim().rsplit_once(':').ok_or_else(|| {
            ConfigError::Invalid(format!("{HTTP_ADDRESS_VAR} must be host:port, got {address}"))
        })?;
        let port: u16 = port.parse().map_err(|e| {
            ConfigError::Invalid(format!("invalid port in {HTTP_ADDRESS_VAR} {address}: {e}"))
        })?;

        self.host = if host.is_empty() {
            default_host()
        } else {
            host.trim_start_matches('[').trim_end_matches(']').to_owned()
        };
        self.port = port;
        Ok(())
    }

    /// The `host:port` string to bind.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Length of generated session tokens.
    #[serde(default = "default_token_length")]
    pub token_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_length: default_token_length(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn http_address_from_env() -> Option<String> {
    std::env::var(HTTP_ADDRESS_VAR)
        .ok()
        .filter(|val| !val.trim().is_empty())
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

const fn default_token_length() -> usize {
    DEFAULT_TOKEN_LENGTH
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TallyConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.sessions.token_length, 8);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_yaml_fills_defaults() {
        let yaml = r"
server:
  port: 9090
logging:
  json: true
";
        let config: TallyConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.sessions.token_length, 8);
        assert!(config.logging.json);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 3000
sessions:
  token_length: 12
logging:
  level: "debug,tower_http=info"
  json: false
"#;
        let config: TallyConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:3000");
        assert_eq!(config.sessions.token_length, 12);
        assert_eq!(config.logging.level, "debug,tower_http=info");
    }

    #[test]
    fn zero_token_length_is_invalid() {
        let config: TallyConfig = serde_yml::from_str("sessions:\n  token_length: 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let err = serde_yml::from_str::<TallyConfig>("server: [1, 2").map_err(ConfigError::from);
        assert!(matches!(err, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn zero_port_from_address_is_rejected_on_every_path() {
        let from_defaults = TallyConfig::default().finish(Some(":0"));
        assert!(matches!(from_defaults, Err(ConfigError::Invalid(_))));

        let from_yaml = TallyConfig::parse_with_address("{}", Some(":0"));
        assert!(matches!(from_yaml, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn address_override_applies_on_top_of_yaml() {
        let yaml = "server:\n  host: \"10.0.0.1\"\n  port: 3000\nsessions:\n  token_length: 4\n";
        let config = TallyConfig::parse_with_address(yaml, Some("127.0.0.1:9000")).unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:9000");
        assert_eq!(config.sessions.token_length, 4);

        let config = TallyConfig::parse_with_address(yaml, None).unwrap();
        assert_eq!(config.server.address(), "10.0.0.1:3000");
    }

    #[test]
    fn finish_rejects_invalid_yaml_values_and_bad_addresses() {
        let err = TallyConfig::parse_with_address("sessions:\n  token_length: 0\n", None);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));

        let err = TallyConfig::default().finish(Some("no-port"));
        assert!(matches!(err, Err(ConfigError::Invalid(_))));

        let err = TallyConfig::parse_with_address("server: [1, 2", None);
        assert!(matches!(err, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let path = std::env::temp_dir().join("tally-config-missing-8f3c1e.yaml");
        let err = TallyConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn from_file_validates_contents() {
        let path = std::env::temp_dir().join(format!(
            "tally-config-invalid-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "sessions:\n  token_length: 0\n").unwrap();

        let result = TallyConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn http_address_with_empty_host_binds_all_interfaces() {
        let mut server = ServerConfig {
            host: String::from("127.0.0.1"),
            port: 1,
        };
        server.apply_http_address(":8081").unwrap();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8081);
    }

    #[test]
    fn http_address_with_host() {
        let mut server = ServerConfig::default();
        server.apply_http_address("localhost:7000").unwrap();
        assert_eq!(server.address(), "localhost:7000");

        server.apply_http_address("[::1]:7001").unwrap();
        assert_eq!(server.host, "::1");
        assert_eq!(server.address(), "[::1]:7001");
    }

    #[test]
    fn malformed_http_address_is_rejected() {
        let mut server = ServerConfig::default();
        assert!(server.apply_http_address("8080").is_err());
        assert!(server.apply_http_address("host:http").is_err());
        assert_eq!(server, ServerConfig::default());
    }
}
