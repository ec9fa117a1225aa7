//! Value Objects - Immutable, identity-less domain primitives

mod address_query;
mod geo_location;

pub use address_query::AddressQuery;
pub use geo_location::GeoLocation;
