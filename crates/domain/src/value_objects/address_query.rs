//! Address query value object
//!
//! A free-text postal address plus the optional hints (city, state and
//! establishment name) used to build geocoding queries.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Address to be resolved to coordinates
///
/// Optional fields that are empty or contain only whitespace are treated as
/// absent by every accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressQuery {
    /// Street address (free text)
    address: String,
    /// City / municipality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    /// State / region (e.g. "SP")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    /// Name of the establishment at the address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    establishment_name: Option<String>,
}

impl AddressQuery {
    /// Create a query for a street address
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Create a query, rejecting an address without any text
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyAddress` if the address is blank.
    pub fn try_new(address: impl Into<String>) -> Result<Self, DomainError> {
        let query = Self::new(address);
        if query.address().is_none() {
            return Err(DomainError::EmptyAddress);
        }
        Ok(query)
    }

    /// Set the city
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state / region
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the establishment name
    #[must_use]
    pub fn with_establishment_name(mut self, name: impl Into<String>) -> Self {
        self.establishment_name = Some(name.into());
        self
    }

    /// Street address, trimmed; `None` when blank
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        non_blank(Some(&self.address))
    }

    /// City, trimmed; `None` when absent or blank
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        non_blank(self.city.as_ref())
    }

    /// State / region, trimmed; `None` when absent or blank
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        non_blank(self.state.as_ref())
    }

    /// Establishment name, trimmed; `None` when absent or blank
    #[must_use]
    pub fn establishment_name(&self) -> Option<&str> {
        non_blank(self.establishment_name.as_ref())
    }

    /// Whether a city or a state is present
    #[must_use]
    pub fn has_locality(&self) -> bool {
        self.city().is_some() || self.state().is_some()
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_only_address() {
        let query = AddressQuery::new("Av. Paulista, 1000");
        assert_eq!(query.address(), Some("Av. Paulista, 1000"));
        assert!(query.city().is_none());
        assert!(query.state().is_none());
        assert!(query.establishment_name().is_none());
        assert!(!query.has_locality());
    }

    #[test]
    fn builder_sets_optional_fields() {
        let query = AddressQuery::new("Rua Augusta, 500")
            .with_city("São Paulo")
            .with_state("SP")
            .with_establishment_name("Padaria Bella");

        assert_eq!(query.city(), Some("São Paulo"));
        assert_eq!(query.state(), Some("SP"));
        assert_eq!(query.establishment_name(), Some("Padaria Bella"));
        assert!(query.has_locality());
    }

    #[test]
    fn blank_fields_are_absent() {
        let query = AddressQuery::new("  ")
            .with_city("")
            .with_state("   ")
            .with_establishment_name("\t");

        assert!(query.address().is_none());
        assert!(query.city().is_none());
        assert!(query.state().is_none());
        assert!(query.establishment_name().is_none());
        assert!(!query.has_locality());
    }

    #[test]
    fn fields_are_trimmed() {
        let query = AddressQuery::new(" Rua XV de Novembro ").with_city(" Curitiba ");
        assert_eq!(query.address(), Some("Rua XV de Novembro"));
        assert_eq!(query.city(), Some("Curitiba"));
    }

    #[test]
    fn state_alone_counts_as_locality() {
        let query = AddressQuery::new("Rua A").with_state("MG");
        assert!(query.has_locality());
    }

    #[test]
    fn try_new_rejects_blank_address() {
        assert_eq!(AddressQuery::try_new(" "), Err(DomainError::EmptyAddress));
        assert!(AddressQuery::try_new("Rua B, 10").is_ok());
    }

    #[test]
    fn deserializes_with_missing_optionals() {
        let query: AddressQuery =
            serde_json::from_str(r#"{"address": "Rua C", "state": "RJ"}"#).expect("deserialize");
        assert_eq!(query.address(), Some("Rua C"));
        assert_eq!(query.state(), Some("RJ"));
        assert!(query.city().is_none());
    }
}
