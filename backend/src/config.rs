//! Configuration file support.
//!
//! Settings are read from a TOML file (`ndfilter.toml`) and then overridden by
//! environment variables. Every field has a default, so a missing file or a
//! missing section is not an error.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! max_upload_bytes = 20971520
//!
//! [atmosphere]
//! extinction_coefficient = 0.25
//! pressure_hpa = 1013.25
//! temperature_celsius = 15.0
//!
//! [diagnosis]
//! r_corr_threshold = 0.95
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_EXTINCTION_COEFFICIENT;
use crate::ephemeris::AtmosphereModel;
use crate::services::R_CORR_ANOMALY_THRESHOLD;

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "ndfilter.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "NDFILTER_CONFIG";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub atmosphere: AtmosphereSettings,
    #[serde(default)]
    pub diagnosis: DiagnosisSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Atmospheric model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereSettings {
    #[serde(default = "default_extinction_coefficient")]
    pub extinction_coefficient: f64,
    #[serde(default = "default_pressure_hpa")]
    pub pressure_hpa: f64,
    #[serde(default = "default_temperature_celsius")]
    pub temperature_celsius: f64,
}

/// Color diagnosis policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisSettings {
    #[serde(default = "default_r_corr_threshold")]
    pub r_corr_threshold: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_extinction_coefficient() -> f64 {
    DEFAULT_EXTINCTION_COEFFICIENT
}

fn default_pressure_hpa() -> f64 {
    AtmosphereModel::default().pressure_hpa
}

fn default_temperature_celsius() -> f64 {
    AtmosphereModel::default().temperature_celsius
}

fn default_r_corr_threshold() -> f64 {
    R_CORR_ANOMALY_THRESHOLD
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            extinction_coefficient: default_extinction_coefficient(),
            pressure_hpa: default_pressure_hpa(),
            temperature_celsius: default_temperature_celsius(),
        }
    }
}

impl Default for DiagnosisSettings {
    fn default() -> Self {
        Self {
            r_corr_threshold: default_r_corr_threshold(),
        }
    }
}

impl AtmosphereSettings {
    /// Refraction model handed to the ephemeris.
    pub fn model(&self) -> AtmosphereModel {
        AtmosphereModel {
            pressure_hpa: self.pressure_hpa,
            temperature_celsius: self.temperature_celsius,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(ConfigError)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Uses `NDFILTER_CONFIG` if set, otherwise searches for `ndfilter.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to defaults when no file is found.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        if let Ok(explicit) = env::var(CONFIG_PATH_ENV) {
            return Self::from_file(explicit);
        }

        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Apply `HOST` and `PORT` environment overrides.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a valid port number, got '{}'", port)))?;
        }
        Ok(self)
    }

    /// Check values the computations would otherwise reject per request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let k = self.atmosphere.extinction_coefficient;
        if !k.is_finite() || k < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "atmosphere.extinction_coefficient must be finite and non-negative, got {}",
                k
            )));
        }
        self.atmosphere
            .model()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if !self.diagnosis.r_corr_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "diagnosis.r_corr_threshold must be finite".to_string(),
            ));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_upload_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
