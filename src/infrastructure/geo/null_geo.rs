//! No-op geolocation used when no provider is configured.

use async_trait::async_trait;

use super::service::{GeoLocation, GeoLocator};

/// Geolocator that knows nothing.
///
/// Click events recorded through it carry no country or city, which the data
/// model treats as perfectly valid.
#[derive(Debug, Default, Clone)]
pub struct NullGeoLocator;

impl NullGeoLocator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GeoLocator for NullGeoLocator {
    async fn locate(&self, _ip: &str) -> Option<GeoLocation> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_geo_returns_none() {
        let geo = NullGeoLocator::new();
        assert_eq!(geo.locate("8.8.8.8").await, None);
    }
}
