//! Geocoding service configuration

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Country appended to composed queries unless configured otherwise
pub const DEFAULT_COUNTRY: &str = "Brasil";

/// Whether a provider credential is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    /// An API key is configured; provider calls are made
    Configured,
    /// No API key; every resolution fails with `NotConfigured`
    Missing,
}

impl CredentialStatus {
    /// Returns true if a credential is configured
    #[must_use]
    pub const fn is_configured(self) -> bool {
        matches!(self, Self::Configured)
    }
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured => write!(f, "configured"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// Configuration for the Google Maps Geocoding API
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the geocoding API (the `/json` output path is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`, never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response language
    #[serde(default = "default_language")]
    pub language: String,

    /// Region bias (ccTLD code)
    #[serde(default = "default_region")]
    pub region: String,

    /// Country name appended to every composed query
    #[serde(default = "default_country")]
    pub country: String,
}

impl fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("language", &self.language)
            .field("region", &self.region)
            .field("country", &self.country)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "pt-BR".to_string()
}

fn default_region() -> String {
    "br".to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            region: default_region(),
            country: default_country(),
        }
    }
}

impl GeocodingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Report whether a usable API key is present
    ///
    /// A blank key counts as missing.
    #[must_use]
    pub fn credential_status(&self) -> CredentialStatus {
        match self.api_key() {
            Some(_) => CredentialStatus::Configured,
            None => CredentialStatus::Missing,
        }
    }

    /// The API key, if present and not blank
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().trim())
            .filter(|key| !key.is_empty())
    }

    /// Validate the configuration
    ///
    /// A missing API key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.language.is_empty() {
            return Err("language must not be empty".to_string());
        }

        Ok(())
    }
}
