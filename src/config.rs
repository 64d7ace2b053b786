//! Configuration management for the `CartPilot` core
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::CartPilotError;
use crate::Result;

/// Root configuration structure for the `CartPilot` core
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CartPilotConfig {
    /// Postcode geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Store and product search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Basket persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Postcode geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the postcode geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
}

/// Store and product search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Store search radius in miles
    #[serde(default = "default_radius_miles")]
    pub radius_miles: f64,
    /// Maximum number of product search results
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Queries shorter than this return no results
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

/// Basket persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the on-disk basket store
    #[serde(default = "default_storage_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://api.postcodes.io".to_string()
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_radius_miles() -> f64 {
    5.0
}

fn default_max_results() -> usize {
    20
}

fn default_min_query_length() -> usize {
    2
}

fn default_storage_location() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("cartpilot").to_string_lossy().into_owned())
        .unwrap_or_else(|| ".cartpilot".to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_geocoding_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_miles: default_radius_miles(),
            max_results: default_max_results(),
            min_query_length: default_min_query_length(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: default_storage_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CartPilotConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with CARTPILOT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("CARTPILOT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| CartPilotError::config(format!("failed to build configuration: {e}")))?;

        let config: CartPilotConfig = settings
            .try_deserialize()
            .map_err(|e| CartPilotError::config(format!("failed to parse configuration: {e}")))?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cartpilot").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.geocoding.base_url.starts_with("http://")
            && !self.geocoding.base_url.starts_with("https://")
        {
            return Err(CartPilotError::config(
                "Geocoding base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        if self.geocoding.timeout_seconds == 0 || self.geocoding.timeout_seconds > 120 {
            return Err(CartPilotError::config(
                "Geocoding timeout must be between 1 and 120 seconds",
            ));
        }

        if !(self.search.radius_miles > 0.0 && self.search.radius_miles <= 100.0) {
            return Err(CartPilotError::config(
                "Search radius must be between 0 and 100 miles",
            ));
        }

        if self.search.max_results == 0 || self.search.max_results > 200 {
            return Err(CartPilotError::config(
                "Maximum search results must be between 1 and 200",
            ));
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CartPilotError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CartPilotConfig::default();
        assert_eq!(config.geocoding.base_url, "https://api.postcodes.io");
        assert_eq!(config.geocoding.timeout_seconds, 10);
        assert_eq!(config.search.radius_miles, 5.0);
        assert_eq!(config.search.min_query_length, 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CartPilotConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let mut config = CartPilotConfig::default();
        config.geocoding.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base URL"));
    }

    #[test]
    fn test_validation_rejects_zero_radius() {
        let mut config = CartPilotConfig::default();
        config.search.radius_miles = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let mut config = CartPilotConfig::default();
        config.logging.level = "chatty".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = CartPilotConfig::config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("cartpilot"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
