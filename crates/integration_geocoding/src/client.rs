//! Google Maps Geocoding client
//!
//! Thin HTTP client for the [Geocoding API](https://developers.google.com/maps/documentation/geocoding).
//! One call is one round trip; fallback logic lives in [`crate::AddressResolver`].

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::{CredentialStatus, GeocodingConfig};
use crate::error::GeocodingError;
use crate::models::{ProviderMatch, ProviderResponse};

/// A geocoding backend
///
/// `Err` is reserved for failures to obtain a response at all (transport,
/// HTTP status, undecodable body). Provider statuses, including errors
/// such as `REQUEST_DENIED`, come back inside [`ProviderResponse`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Whether the provider holds a credential
    fn credential_status(&self) -> CredentialStatus;

    /// Look up a free-text address
    async fn geocode(&self, address: &str) -> Result<ProviderResponse, GeocodingError>;

    /// Look up the address at a coordinate pair
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ProviderResponse, GeocodingError>;
}

/// Google Maps Geocoding API client
#[derive(Debug)]
pub struct GoogleGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl GoogleGeocodingClient {
    /// Create a new Google geocoding client
    ///
    /// A missing API key is accepted; the client then reports
    /// [`CredentialStatus::Missing`] and refuses to make requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sistema-rac/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/json", self.config.base_url.trim_end_matches('/'))
    }

    fn api_key(&self) -> Result<&str, GeocodingError> {
        self.config.api_key().ok_or(GeocodingError::NotConfigured)
    }

    /// Issue one GET request and decode the provider envelope
    async fn fetch(&self, params: &[(&str, String)]) -> Result<ProviderResponse, GeocodingError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Transport(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        let parsed = Self::parse_response(&body)?;
        debug!(
            status = %parsed.status,
            results = parsed.results.len(),
            "Geocoding response received"
        );
        Ok(parsed)
    }

    /// Map a reqwest error without leaking the request URL (it carries the key)
    fn transport_error(&self, error: reqwest::Error) -> GeocodingError {
        if error.is_timeout() {
            GeocodingError::Transport(format!(
                "Geocoding request timed out after {} seconds",
                self.config.timeout_secs
            ))
        } else {
            GeocodingError::Transport(error.without_url().to_string())
        }
    }

    /// Parse the raw Geocoding API JSON into a provider response
    fn parse_response(body: &str) -> Result<ProviderResponse, GeocodingError> {
        let raw: RawGeocodeResponse = serde_json::from_str(body)
            .map_err(|e| GeocodingError::InvalidResponse(e.to_string()))?;

        Ok(ProviderResponse {
            status: raw.status.into(),
            results: raw.results.into_iter().map(Self::convert_result).collect(),
            error_message: raw.error_message,
        })
    }

    fn convert_result(raw: RawResult) -> ProviderMatch {
        ProviderMatch {
            latitude: raw.geometry.location.lat,
            longitude: raw.geometry.location.lng,
            formatted_address: raw.formatted_address.unwrap_or_default(),
            place_id: raw.place_id.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl GeocodingProvider for GoogleGeocodingClient {
    fn credential_status(&self) -> CredentialStatus {
        self.config.credential_status()
    }

    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<ProviderResponse, GeocodingError> {
        let key = self.api_key()?;
        let params = [
            ("address", address.to_string()),
            ("key", key.to_string()),
            ("language", self.config.language.clone()),
            ("region", self.config.region.clone()),
        ];

        debug!("Geocoding address");
        self.fetch(&params).await
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ProviderResponse, GeocodingError> {
        let key = self.api_key()?;
        let params = [
            ("latlng", format!("{latitude},{longitude}")),
            ("key", key.to_string()),
            ("language", self.config.language.clone()),
        ];

        debug!("Reverse geocoding");
        self.fetch(&params).await
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawGeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    formatted_address: Option<String>,
    geometry: RawGeometry,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: RawLatLng,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}
