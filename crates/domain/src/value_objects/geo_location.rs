//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]. NaN is rejected as well.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_coordinates(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation
    ///
    /// Used for coordinates that come from the geocoding provider and for
    /// distance calculations, which are not range-checked.
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another location in kilometers
    ///
    /// Uses the Haversine formula with a fixed Earth radius of 6371 km.
    /// The result is not rounded.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Reference locations
impl GeoLocation {
    /// São Paulo, Brazil (Praça da Sé)
    #[must_use]
    pub const fn sao_paulo() -> Self {
        Self::new_unchecked(-23.5505, -46.6333)
    }

    /// Rio de Janeiro, Brazil
    #[must_use]
    pub const fn rio_de_janeiro() -> Self {
        Self::new_unchecked(-22.9068, -43.1729)
    }

    /// Brasília, Brazil
    #[must_use]
    pub const fn brasilia() -> Self {
        Self::new_unchecked(-15.7939, -47.8828)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = GeoLocation::new(-23.5505, -46.6333).expect("valid coordinates");
        assert!((loc.latitude() - -23.5505).abs() < f64::EPSILON);
        assert!((loc.longitude() - -46.6333).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(GeoLocation::new(0.0, 181.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        let loc = GeoLocation::sao_paulo();
        let display = format!("{loc}");
        assert_eq!(display, "-23.550500, -46.633300");
    }

    #[test]
    fn test_distance_same_location() {
        let loc = GeoLocation::sao_paulo();
        assert!(loc.distance_km(&loc).abs() < 0.001);
    }

    #[test]
    fn test_distance_sao_paulo_rio() {
        let distance = GeoLocation::sao_paulo().distance_km(&GeoLocation::rio_de_janeiro());
        assert!((357.0..=361.0).contains(&distance), "got {distance}");
        assert!((distance - 360.75).abs() < 0.01);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoLocation::brasilia();
        let b = GeoLocation::rio_de_janeiro();
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_with_nan_is_nan() {
        let a = GeoLocation::new_unchecked(f64::NAN, 0.0);
        assert!(a.distance_km(&GeoLocation::sao_paulo()).is_nan());
    }

    #[test]
    fn test_serialization() {
        let loc = GeoLocation::new(-22.9068, -43.1729).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        assert!(json.contains("-22.9068"));
        assert!(json.contains("-43.1729"));

        let deserialized: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, deserialized);
    }
}
