use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, ServerConfig};

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";
/// Environment variable overriding `client.base_url`.
pub const API_URL_ENV: &str = "APIDEMO_API_URL";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/apidemo/config.toml` on Unix/macOS, or the
    /// platform equivalent via `dirs::config_dir()`. Falls back to the
    /// current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("apidemo").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Applies `PORT` and `APIDEMO_API_URL` from the process environment.
    pub fn with_process_env(self) -> Result<Self, ConfigError> {
        self.with_env(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides read through `lookup`, then validates.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::ValidationError {
                message: format!("{} must be a TCP port number, got '{}'", PORT_ENV, port),
            })?;
        }

        if let Some(url) = lookup(API_URL_ENV) {
            self.client.base_url = url;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The server host is an IP address
    /// - The greeting is not empty
    /// - The client base URL is http(s) and timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.ip()?;

        if self.server.greeting.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "server.greeting must not be empty".to_string(),
            });
        }

        let base_url = &self.client.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                message: format!("client.base_url must start with http:// or https://, got '{}'", base_url),
            });
        }

        if self.client.timeout_seconds == 0 || self.client.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "client timeouts must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        Ok(SocketAddr::new(self.ip()?, self.port))
    }

    fn ip(&self) -> Result<IpAddr, ConfigError> {
        self.host.parse().map_err(|_| ConfigError::ValidationError {
            message: format!("server.host must be an IP address, got '{}'", self.host),
        })
    }
}
