//! Geocoding data models
//!
//! Provider-level responses (status plus candidate matches) and the
//! resolved results handed back to callers.

use std::fmt;

use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};

use crate::strategy::Strategy;

/// Status reported by the geocoding provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderStatus {
    /// At least one result was returned
    Ok,
    /// The query was valid but matched nothing
    ZeroResults,
    /// Any other status (`OVER_QUERY_LIMIT`, `REQUEST_DENIED`, `INVALID_REQUEST`, ...)
    Other(String),
}

impl ProviderStatus {
    /// Raw status string as sent by the provider
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::Other(status) => status.as_str(),
        }
    }
}

impl From<String> for ProviderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            _ => Self::Other(status),
        }
    }
}

impl From<&str> for ProviderStatus {
    fn from(status: &str) -> Self {
        Self::from(status.to_string())
    }
}

impl From<ProviderStatus> for String {
    fn from(status: ProviderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single candidate returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMatch {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Normalized address as formatted by the provider
    pub formatted_address: String,
    /// Provider place identifier
    pub place_id: String,
}

/// One provider round trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Response status
    pub status: ProviderStatus,
    /// Candidates, best match first
    #[serde(default)]
    pub results: Vec<ProviderMatch>,
    /// Error detail sent alongside non-OK statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProviderResponse {
    /// Successful response with the given candidates
    #[must_use]
    pub const fn ok(results: Vec<ProviderMatch>) -> Self {
        Self {
            status: ProviderStatus::Ok,
            results,
            error_message: None,
        }
    }

    /// Response that matched nothing
    #[must_use]
    pub const fn zero_results() -> Self {
        Self {
            status: ProviderStatus::ZeroResults,
            results: Vec::new(),
            error_message: None,
        }
    }

    /// Error response with an arbitrary status
    #[must_use]
    pub fn error(status: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status: ProviderStatus::from(status.into()),
            results: Vec::new(),
            error_message: message,
        }
    }

    /// Best match of an `OK` response
    #[must_use]
    pub fn best_match(&self) -> Option<&ProviderMatch> {
        match self.status {
            ProviderStatus::Ok => self.results.first(),
            _ => None,
        }
    }
}

/// Successful forward resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Normalized address as formatted by the provider
    pub formatted_address: String,
    /// Provider place identifier
    pub place_id: String,
    /// Cascade step that produced this match
    pub strategy: Strategy,
}

impl GeocodeMatch {
    pub(crate) fn from_provider(matched: &ProviderMatch, strategy: Strategy) -> Self {
        Self {
            latitude: matched.latitude,
            longitude: matched.longitude,
            formatted_address: matched.formatted_address.clone(),
            place_id: matched.place_id.clone(),
            strategy,
        }
    }

    /// Coordinates as a domain value (not range-checked)
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        GeoLocation::new_unchecked(self.latitude, self.longitude)
    }
}

/// Successful reverse resolution
///
/// The coordinates are the ones the caller asked about, not the provider's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseMatch {
    /// Requested latitude
    pub latitude: f64,
    /// Requested longitude
    pub longitude: f64,
    /// Normalized address as formatted by the provider
    pub formatted_address: String,
    /// Provider place identifier
    pub place_id: String,
}
