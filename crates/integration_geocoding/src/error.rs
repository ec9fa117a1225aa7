//! Geocoding error types

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during address resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodingError {
    /// No provider credential is configured; no request was made
    #[error("Geocoding service not configured: missing API key")]
    NotConfigured,

    /// The provider matched no location after every applicable query
    #[error("No location found for: {query}")]
    NoMatch {
        /// The last query that was attempted
        query: String,
    },

    /// The provider answered with an error status
    #[error("{message}")]
    ProviderError {
        /// Raw provider status (e.g. `REQUEST_DENIED`)
        status: String,
        /// Provider error message, or the status when none was given
        message: String,
    },

    /// Network, HTTP, or timeout failure
    #[error("{0}")]
    Transport(String),

    /// The provider response could not be decoded
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

/// Coarse classification of a [`GeocodingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// See [`GeocodingError::NotConfigured`]
    NotConfigured,
    /// See [`GeocodingError::NoMatch`]
    NoMatch,
    /// See [`GeocodingError::ProviderError`]
    ProviderError,
    /// See [`GeocodingError::Transport`]
    Transport,
    /// See [`GeocodingError::InvalidResponse`]
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotConfigured => "not_configured",
            Self::NoMatch => "no_match",
            Self::ProviderError => "provider_error",
            Self::Transport => "transport",
            Self::InvalidResponse => "invalid_response",
        };
        f.write_str(name)
    }
}

impl GeocodingError {
    /// Build a provider error, falling back to the status as message
    pub fn provider(status: impl Into<String>, message: Option<String>) -> Self {
        let status = status.into();
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| status.clone());
        Self::ProviderError { status, message }
    }

    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotConfigured => FailureKind::NotConfigured,
            Self::NoMatch { .. } => FailureKind::NoMatch,
            Self::ProviderError { .. } => FailureKind::ProviderError,
            Self::Transport(_) => FailureKind::Transport,
            Self::InvalidResponse(_) => FailureKind::InvalidResponse,
        }
    }

    /// Returns true if a later identical call could succeed
    ///
    /// The resolver itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
