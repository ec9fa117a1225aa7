//! Address resolution for Sistema RAC
//!
//! Turns free-text Brazilian addresses into coordinates via the
//! [Google Maps Geocoding API](https://developers.google.com/maps/documentation/geocoding),
//! resolves coordinates back to addresses, and computes great-circle distances.
//!
//! # Architecture
//!
//! [`GeocodingProvider`] is a single provider round trip, implemented by
//! [`GoogleGeocodingClient`]. [`AddressResolver`] layers the cascading
//! query [`Strategy`] on top: full address first, then establishment name
//! plus address, then city/state only. Only a "no results" answer advances
//! the cascade.
//!
//! Every failure is returned as a [`GeocodingError`] value; a missing API key
//! is a valid configuration that makes every lookup fail with
//! [`GeocodingError::NotConfigured`] without touching the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::value_objects::AddressQuery;
//! use integration_geocoding::{AddressResolver, GeocodingConfig};
//!
//! let config = GeocodingConfig::default().with_api_key(api_key);
//! let resolver = AddressResolver::from_config(&config)?;
//!
//! let query = AddressQuery::new("Av. Paulista, 1578")
//!     .with_city("São Paulo")
//!     .with_state("SP");
//! let found = resolver.geocode(&query).await?;
//! ```

mod client;
mod config;
mod distance;
mod error;
mod models;
mod resolver;
mod strategy;

pub use client::{GeocodingProvider, GoogleGeocodingClient};
pub use config::{CredentialStatus, DEFAULT_COUNTRY, GeocodingConfig};
pub use distance::calculate_distance;
pub use error::{FailureKind, GeocodingError};
pub use models::{GeocodeMatch, ProviderMatch, ProviderResponse, ProviderStatus, ReverseMatch};
pub use resolver::{AddressResolver, GeocodeResult};
pub use strategy::Strategy;
