//! Great-circle distance between coordinate pairs

use domain::value_objects::GeoLocation;

/// Haversine distance in kilometers, rounded to two decimals
///
/// Inputs are not range-checked; NaN inputs yield NaN.
#[must_use]
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = GeoLocation::new_unchecked(lat1, lon1);
    let to = GeoLocation::new_unchecked(lat2, lon2);
    round_to_cents(from.distance_km(&to))
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
