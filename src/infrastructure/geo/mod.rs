//! IP geolocation seam.

mod null_geo;
mod service;

pub use null_geo::NullGeoLocator;
pub use service::{GeoLocation, GeoLocator};

#[cfg(test)]
pub use service::MockGeoLocator;
