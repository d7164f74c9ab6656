//! Configuration module for the preview store.

use serde::Deserialize;
use std::path::Path;

use crate::file::DEFAULT_STORAGE_DIR;
use crate::{PreviewError, Result};

/// Environment variable overriding the storage path.
pub const ENV_STORAGE_PATH: &str = "PREVIEW_STORE_PATH";

/// Environment variable overriding the web port.
pub const ENV_PORT: &str = "PREVIEW_STORE_PORT";

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the Web API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_web_host() -> String {
    "127.0.0.1".to_string()
}

fn default_web_port() -> u16 {
    5000
}

fn default_max_upload_size() -> u64 {
    50
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl WebConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored files, relative to the working directory
    /// unless absolute.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    DEFAULT_STORAGE_DIR.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/preview-store.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// File storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PreviewError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| PreviewError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PREVIEW_STORE_PATH`: storage root directory
    /// - `PREVIEW_STORE_PORT`: web port (ignored if not a valid port)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(ENV_STORAGE_PATH) {
            if !path.is_empty() {
                self.storage.path = path;
            }
        }

        if let Ok(port) = std::env::var(ENV_PORT) {
            match port.parse::<u16>() {
                Ok(port) => self.web.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", ENV_PORT, port),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The storage path is empty
    /// - The maximum upload size is zero
    pub fn validate(&self) -> Result<()> {
        if self.storage.path.trim().is_empty() {
            return Err(PreviewError::Config("storage path is empty".to_string()));
        }
        if self.web.max_upload_size_mb == 0 {
            return Err(PreviewError::Config(
                "max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
