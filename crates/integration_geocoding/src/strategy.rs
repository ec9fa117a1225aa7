//! Query strategies for forward resolution
//!
//! Forward resolution tries progressively more permissive queries, in
//! [`Strategy::CASCADE`] order, until one of them matches. A strategy that
//! cannot be built from the query (missing establishment name, no city or
//! state) is skipped.

use std::fmt;

use domain::value_objects::AddressQuery;
use serde::{Deserialize, Serialize};

/// One step of the forward-resolution cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `"<address>, <city>, <state>, <country>"`
    FullAddress,
    /// `"<establishment>, <address>, <city>, <state>, <country>"`
    WithEstablishment,
    /// `"<city>, <state>, <country>"`
    CityRegion,
}

impl Strategy {
    /// Order in which strategies are attempted
    pub const CASCADE: [Self; 3] = [Self::FullAddress, Self::WithEstablishment, Self::CityRegion];

    /// Build the provider query for this strategy
    ///
    /// Missing optional fields are left out. Returns `None` when the query
    /// lacks what this strategy needs.
    #[must_use]
    pub fn compose(self, query: &AddressQuery, country: &str) -> Option<String> {
        match self {
            Self::FullAddress => Some(join(&[
                query.address(),
                query.city(),
                query.state(),
                Some(country),
            ])),
            Self::WithEstablishment => query.establishment_name().map(|name| {
                let full = Self::FullAddress.compose(query, country).unwrap_or_default();
                format!("{name}, {full}")
            }),
            Self::CityRegion => query
                .has_locality()
                .then(|| join(&[query.city(), query.state(), Some(country)])),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullAddress => write!(f, "full_address"),
            Self::WithEstablishment => write!(f, "with_establishment"),
            Self::CityRegion => write!(f, "city_region"),
        }
    }
}

fn join(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_query() -> AddressQuery {
        AddressQuery::new("Rua Oscar Freire, 379")
            .with_city("São Paulo")
            .with_state("SP")
            .with_establishment_name("Café Floresta")
    }

    #[test]
    fn full_address_with_all_fields() {
        let query = Strategy::FullAddress.compose(&full_query(), "Brasil");
        assert_eq!(
            query.as_deref(),
            Some("Rua Oscar Freire, 379, São Paulo, SP, Brasil")
        );
    }

    #[test]
    fn full_address_omits_missing_fields() {
        let query = AddressQuery::new("Rua das Flores, 12").with_state("PR");
        assert_eq!(
            Strategy::FullAddress.compose(&query, "Brasil").as_deref(),
            Some("Rua das Flores, 12, PR, Brasil")
        );

        let query = AddressQuery::new("Rua das Flores, 12");
        assert_eq!(
            Strategy::FullAddress.compose(&query, "Brasil").as_deref(),
            Some("Rua das Flores, 12, Brasil")
        );
    }

    #[test]
    fn with_establishment_prefixes_name() {
        let query = Strategy::WithEstablishment.compose(&full_query(), "Brasil");
        assert_eq!(
            query.as_deref(),
            Some("Café Floresta, Rua Oscar Freire, 379, São Paulo, SP, Brasil")
        );
    }

    #[test]
    fn with_establishment_requires_name() {
        let query = AddressQuery::new("Rua A").with_city("Recife");
        assert!(Strategy::WithEstablishment.compose(&query, "Brasil").is_none());
    }

    #[test]
    fn city_region_drops_street() {
        let query = Strategy::CityRegion.compose(&full_query(), "Brasil");
        assert_eq!(query.as_deref(), Some("São Paulo, SP, Brasil"));
    }

    #[test]
    fn city_region_with_only_city() {
        let query = AddressQuery::new("Rua A").with_city("Salvador");
        assert_eq!(
            Strategy::CityRegion.compose(&query, "Brasil").as_deref(),
            Some("Salvador, Brasil")
        );
    }

    #[test]
    fn city_region_requires_locality() {
        let query = AddressQuery::new("Rua A").with_establishment_name("Loja");
        assert!(Strategy::CityRegion.compose(&query, "Brasil").is_none());
    }

    #[test]
    fn cascade_order() {
        assert_eq!(
            Strategy::CASCADE,
            [
                Strategy::FullAddress,
                Strategy::WithEstablishment,
                Strategy::CityRegion
            ]
        );
    }

    #[test]
    fn display_matches_serde() {
        for strategy in Strategy::CASCADE {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{strategy}\""));
        }
    }
}
