//! Geolocation capability consumed by the click worker.

use async_trait::async_trait;

/// Approximate geography for a client IP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Best-effort IP geolocation.
///
/// An external collaborator: lookups may return nothing and must never block
/// or fail the redirect path. Only the background click worker calls this.
///
/// # Implementations
///
/// - [`crate::infrastructure::geo::NullGeoLocator`] - always returns `None`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Resolves an IP address to an approximate location, if known.
    async fn locate(&self, ip: &str) -> Option<GeoLocation>;
}
