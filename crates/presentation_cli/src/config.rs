//! CLI configuration
//!
//! Sources, lowest to highest precedence: built-in defaults, `config.toml`
//! (or the file given with `--config`), `RAC_*` environment variables
//! (`RAC_GEOCODING__TIMEOUT_SECS=5`), and finally `GOOGLE_MAPS_API_KEY`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use integration_geocoding::GeocodingConfig;
use serde::{Deserialize, Serialize};

/// Environment variable holding the Google Maps API key
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding provider settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Log format used when `--log-format` is not given
    #[serde(default)]
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment and an optional file
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, None)
    }

    /// Load configuration, reading environment variables from `env` when given
    fn load_with(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let api_key = env
            .as_ref()
            .map_or_else(
                || std::env::var(API_KEY_VAR).ok(),
                |vars| vars.get(API_KEY_VAR).cloned(),
            )
            .filter(|key| !key.trim().is_empty());

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // e.g. RAC_GEOCODING__BASE_URL, RAC_LOG_FORMAT
            .add_source(
                config::Environment::with_prefix("RAC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("geocoding.api_key", api_key)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the geocoding settings are invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding.validate()
    }
}
