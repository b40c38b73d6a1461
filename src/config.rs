//! Client configuration
//!
//! The API base URL, the fallback artwork and the HTTP settings are passed
//! into the client at construction time. Values come from built-in defaults,
//! optionally overridden by a TOML file in the system's standard config
//! directory (or an explicit path).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Base URL of the public TVMaze API
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Artwork used for shows without an image
pub const DEFAULT_IMAGE_URL: &str = "https://store-images.s-microsoft.com/image/apps.65316.13510798887490672.6e1ebb25-96c8-4504-b714-1f7cbca3c5ad.f9514a23-1eb8-4916-a18e-99b1a9817d15?mode=scale&q=90&h=300&w=300";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Name of the configuration file inside the config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the configuration file
    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A configuration value is out of range
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Settings for the TVMaze client
///
/// Every field is optional in the TOML file; missing fields keep their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL, without the endpoint path
    pub base_url: String,
    /// Artwork URL substituted when a show has no image
    pub default_image_url: String,
    /// Timeout applied to each request
    pub timeout_secs: u64,
    /// User agent sent with each request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("tv_lookup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration
    ///
    /// If `explicit_path` is given the file must exist. Otherwise the file in
    /// the standard config directory is used when present, and the defaults
    /// when it is not.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tv_lookup::ClientConfig;
    ///
    /// let config = ClientConfig::load_or_default(None).unwrap();
    /// println!("Using {}", config.base_url);
    /// ```
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reads and validates the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading config from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Location of the configuration file in the system's config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tv-lookup", "tv_lookup")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Checks that the values can be used to build a client
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }

        if self.default_image_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_image_url",
                reason: "must not be empty".to_string(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// The base URL without trailing slashes
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
