//! Address resolver
//!
//! Forward resolution walks [`Strategy::CASCADE`] and stops at the first
//! strategy that yields a match. Only a "no results" answer moves the
//! cascade forward; provider error statuses and transport failures end it
//! immediately. Reverse resolution is a single lookup.

use std::fmt;
use std::sync::Arc;

use domain::value_objects::AddressQuery;
use tracing::{debug, info, instrument, warn};

use crate::client::{GeocodingProvider, GoogleGeocodingClient};
use crate::config::{CredentialStatus, DEFAULT_COUNTRY, GeocodingConfig};
use crate::error::GeocodingError;
use crate::models::{GeocodeMatch, ProviderStatus, ReverseMatch};
use crate::strategy::Strategy;

/// Outcome of a forward resolution
pub type GeocodeResult = Result<GeocodeMatch, GeocodingError>;

/// Resolves addresses to coordinates and back
///
/// Stateless apart from the provider handle; safe to share across tasks.
pub struct AddressResolver {
    provider: Arc<dyn GeocodingProvider>,
    country: String,
}

impl fmt::Debug for AddressResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressResolver")
            .field("country", &self.country)
            .field("credential_status", &self.status())
            .finish_non_exhaustive()
    }
}

impl AddressResolver {
    /// Create a resolver over any provider, appending [`DEFAULT_COUNTRY`] to queries
    pub fn new(provider: Arc<dyn GeocodingProvider>) -> Self {
        Self {
            provider,
            country: DEFAULT_COUNTRY.to_string(),
        }
    }

    /// Create a resolver backed by the Google Geocoding API
    ///
    /// A configuration without an API key still yields a resolver; its
    /// [`status`](Self::status) is [`CredentialStatus::Missing`] and every
    /// lookup fails with [`GeocodingError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = GoogleGeocodingClient::new(config)?;
        let resolver = Self::new(Arc::new(client)).with_country(config.country.clone());

        if resolver.status().is_configured() {
            debug!("Address resolver ready");
        } else {
            warn!("Geocoding API key not configured; address resolution is disabled");
        }

        Ok(resolver)
    }

    /// Override the country appended to composed queries
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Whether the underlying provider holds a credential
    pub fn status(&self) -> CredentialStatus {
        self.provider.credential_status()
    }

    fn ensure_configured(&self) -> Result<(), GeocodingError> {
        if self.status().is_configured() {
            Ok(())
        } else {
            Err(GeocodingError::NotConfigured)
        }
    }

    /// Resolve an address to coordinates
    ///
    /// Makes at most one provider call per applicable strategy, in order,
    /// never concurrently. A strategy whose query text was already sent is
    /// skipped.
    #[instrument(skip(self, query), fields(address = ?query.address()))]
    pub async fn geocode(&self, query: &AddressQuery) -> GeocodeResult {
        self.ensure_configured()?;

        let mut attempted: Vec<String> = Vec::with_capacity(Strategy::CASCADE.len());

        for strategy in Strategy::CASCADE {
            let Some(text) = strategy.compose(query, &self.country) else {
                debug!(%strategy, "Strategy not applicable, skipping");
                continue;
            };
            if attempted.contains(&text) {
                debug!(%strategy, query = %text, "Query already attempted, skipping");
                continue;
            }

            debug!(%strategy, query = %text, "Trying geocoding strategy");

            let response = self.provider.geocode(&text).await.inspect_err(|e| {
                warn!(%strategy, error = %e, "Geocoding request failed");
            })?;

            match &response.status {
                ProviderStatus::Ok => {
                    if let Some(best) = response.best_match() {
                        info!(
                            %strategy,
                            lat = best.latitude,
                            lon = best.longitude,
                            "Address resolved"
                        );
                        return Ok(GeocodeMatch::from_provider(best, strategy));
                    }
                    debug!(%strategy, "OK status without results");
                },
                ProviderStatus::ZeroResults => {
                    debug!(%strategy, "No results");
                },
                ProviderStatus::Other(status) => {
                    warn!(%strategy, %status, "Geocoding provider returned an error");
                    return Err(GeocodingError::provider(
                        status.clone(),
                        response.error_message,
                    ));
                },
            }

            attempted.push(text);
        }

        let last_query = attempted.pop().unwrap_or_default();
        warn!(query = %last_query, "No match after all applicable strategies");
        Err(GeocodingError::NoMatch { query: last_query })
    }

    /// Resolve coordinates to an address
    ///
    /// The returned match echoes the requested coordinates.
    #[instrument(skip(self))]
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseMatch, GeocodingError> {
        self.ensure_configured()?;

        let response = self
            .provider
            .reverse_geocode(latitude, longitude)
            .await
            .inspect_err(|e| warn!(error = %e, "Reverse geocoding request failed"))?;

        if response.status != ProviderStatus::Ok {
            warn!(status = %response.status, "Reverse geocoding failed");
            return Err(GeocodingError::provider(
                response.status.as_str(),
                response.error_message,
            ));
        }

        let best = response
            .best_match()
            .ok_or_else(|| GeocodingError::NoMatch {
                query: format!("{latitude},{longitude}"),
            })?;

        Ok(ReverseMatch {
            latitude,
            longitude,
            formatted_address: best.formatted_address.clone(),
            place_id: best.place_id.clone(),
        })
    }

    /// Whether an address resolves at all
    pub async fn validate_address(&self, query: &AddressQuery) -> bool {
        self.geocode(query).await.is_ok()
    }
}
