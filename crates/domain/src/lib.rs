//! Domain layer for the Sistema RAC address resolver
//!
//! Contains the geographic value objects shared by the geocoding integration
//! and its callers. This layer performs no I/O.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
