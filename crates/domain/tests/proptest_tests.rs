//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{AddressQuery, GeoLocation};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn distance_to_self_is_zero(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new_unchecked(lat, lon);
            prop_assert!(loc.distance_km(&loc).abs() < 0.001);
        }

        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let a = GeoLocation::new_unchecked(lat1, lon1);
            let b = GeoLocation::new_unchecked(lat2, lon2);
            prop_assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-6);
        }
    }
}

// ============================================================================
// AddressQuery Property Tests
// ============================================================================

mod address_query_tests {
    use super::*;

    proptest! {
        #[test]
        fn whitespace_only_fields_are_absent(
            pad in "[ \t]{0,5}"
        ) {
            let query = AddressQuery::new(pad.clone())
                .with_city(pad.clone())
                .with_state(pad.clone())
                .with_establishment_name(pad);
            prop_assert!(query.address().is_none());
            prop_assert!(query.city().is_none());
            prop_assert!(query.state().is_none());
            prop_assert!(query.establishment_name().is_none());
        }

        #[test]
        fn present_fields_are_trimmed(
            city in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
            pad in "[ ]{0,3}"
        ) {
            let query = AddressQuery::new("Rua A").with_city(format!("{pad}{city}{pad}"));
            prop_assert_eq!(query.city(), Some(city.as_str()));
            prop_assert!(query.has_locality());
        }
    }
}
