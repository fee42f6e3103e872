//! Configuration management for sekha-cli
//!
//! This module handles loading, saving, and validating the connection
//! settings (controller base URL and API key), merging values from the
//! config file, environment variables, and CLI flags.
//!
//! The file is YAML with a single top-level `sekha` section:
//!
//! ```yaml
//! sekha:
//!   base_url: http://localhost:8080
//!   api_key: sk-...
//! ```
//!
//! The client layer never reads this file itself; resolved values are
//! passed to [`crate::SekhaClient::connect`] explicitly.

use crate::error::{Result, SekhaError};
use crate::service::normalize_base_url;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Controller address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the controller address
pub const ENV_API_URL: &str = "SEKHA_API_URL";

/// Environment variable overriding the API key
pub const ENV_API_KEY: &str = "SEKHA_API_KEY";

/// Environment variable overriding the request timeout
pub const ENV_TIMEOUT_SECONDS: &str = "SEKHA_TIMEOUT_SECONDS";

/// Connection settings for a Sekha memory controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Controller base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer credential
    #[serde(default)]
    pub api_key: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// On-disk layout: everything lives under the `sekha` key
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    sekha: Config,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    crate::service::http::DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Config {
    /// Create a validated configuration
    ///
    /// An empty `base_url` falls back to [`DEFAULT_BASE_URL`]. The API key
    /// may be empty; see [`Config::is_valid`].
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if the URL is not an absolute
    /// http(s) URL with a host
    ///
    /// # Examples
    ///
    /// ```
    /// use sekha_cli::config::Config;
    ///
    /// let config = Config::new("http://localhost:8080", "key").unwrap();
    /// assert!(config.is_valid());
    /// assert!(Config::new("not-a-url", "key").is_err());
    /// ```
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let config = Self {
            base_url: if base_url.is_empty() {
                default_base_url()
            } else {
                base_url.to_string()
            },
            api_key: api_key.to_string(),
            timeout_seconds: default_timeout_seconds(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Default config file location (`<config dir>/sekha/config.yaml`)
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if no home directory can be
    /// determined
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "sekha").ok_or_else(|| {
            SekhaError::Configuration("Could not determine config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Load configuration with environment and CLI overrides
    ///
    /// Precedence, lowest to highest: config file (if present), `SEKHA_*`
    /// environment variables, CLI flags. A missing config file is not an
    /// error here; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read or parsed
    pub fn load(cli: &crate::cli::Cli) -> Result<Self> {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Read a configuration file
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if the file does not exist or
    /// cannot be read, `SekhaError::Yaml` if it cannot be parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SekhaError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            ))
            .into());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SekhaError::Configuration(format!("Failed to read config file: {}", e))
        })?;
        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(SekhaError::Yaml)?;
        Ok(file.sekha)
    }

    /// Write the configuration, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SekhaError::Io)?;
        }

        let file = ConfigFile {
            sekha: self.clone(),
        };
        let yaml = serde_yaml::to_string(&file).map_err(SekhaError::Yaml)?;
        std::fs::write(path, yaml).map_err(SekhaError::Io)?;

        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Write a default configuration file and return it
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn create_default(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var(ENV_API_URL) {
            tracing::debug!(base_url = %base_url, "Env override: {}", ENV_API_URL);
            self.base_url = base_url;
        }

        if let Ok(api_key) = std::env::var(ENV_API_KEY) {
            tracing::debug!("Env override: {}", ENV_API_KEY);
            self.api_key = api_key;
        }

        if let Ok(timeout) = std::env::var(ENV_TIMEOUT_SECONDS) {
            match timeout.parse::<u64>() {
                Ok(value) => self.timeout_seconds = value,
                Err(_) => tracing::warn!("Invalid {}: {}", ENV_TIMEOUT_SECONDS, timeout),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.base_url = api_url.clone();
        }
        if let Some(api_key) = &cli.api_key {
            self.api_key = api_key.clone();
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// Applies the same URL rule enforced when a session is constructed,
    /// regardless of where the values came from.
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if any check fails
    pub fn validate(&self) -> Result<()> {
        normalize_base_url(&self.base_url)?;

        if self.timeout_seconds == 0 {
            return Err(SekhaError::Configuration(
                "timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }

    /// Whether both the base URL and the API key are set
    pub fn is_valid(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }

    /// Return the API key or fail if none is configured
    ///
    /// # Errors
    ///
    /// Returns `SekhaError::Configuration` if the key is empty
    pub fn require_api_key(&self) -> Result<&str> {
        if self.api_key.is_empty() {
            return Err(SekhaError::Configuration(format!(
                "API key required. Set --api-key option or {} environment variable",
                ENV_API_KEY
            ))
            .into());
        }
        Ok(&self.api_key)
    }
}
