//! Geocode Resolver - place name / postal code to coordinates
//!
//! Fronts the external geocoder with a time-bounded cache so repeated
//! searches for the same text do not hit the network.

use crate::domain::error::SearchError;
use crate::domain::ports::{GeocodeCache, Geocoder};
use crate::domain::value_objects::{Coordinates, PlaceQuery};
use std::sync::Arc;
use std::time::Duration;

/// Default lifetime of a cached resolution.
pub const DEFAULT_GEOCODE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolves user-supplied location text to coordinates.
///
/// The cache is keyed by the exact query text. Concurrent resolutions of
/// the same text may both reach the geocoder; the last one to finish
/// wins the cache slot.
pub struct GeocodeResolver {
    geocoder: Arc<dyn Geocoder>,
    cache: Arc<dyn GeocodeCache>,
    ttl: Duration,
}

impl GeocodeResolver {
    /// Create a resolver over an injected geocoder and cache.
    pub fn new(geocoder: Arc<dyn Geocoder>, cache: Arc<dyn GeocodeCache>, ttl: Duration) -> Self {
        Self {
            geocoder,
            cache,
            ttl,
        }
    }

    /// Resolve `query` to coordinates.
    ///
    /// Empty input fails with `InvalidInput` before touching the cache or
    /// the network. A live cache entry is returned as-is; otherwise the
    /// geocoder is called once and a successful result is cached for the
    /// configured TTL. Failures are never cached.
    pub async fn resolve(&self, query: &str) -> Result<Coordinates, SearchError> {
        let query = PlaceQuery::parse(query)?;

        if let Some(coords) = self.cache.get(query.as_str()) {
            tracing::debug!("geocode cache hit for {:?} -> {}", query.as_str(), coords);
            return Ok(coords);
        }

        tracing::debug!(
            "geocode cache miss for {:?} ({:?})",
            query.as_str(),
            query.kind()
        );

        let coords = self.geocoder.lookup(&query).await.map_err(|e| {
            tracing::warn!("geocoding {:?} failed: {}", query.as_str(), e);
            e
        })?;

        self.cache.set(query.as_str(), coords, self.ttl);
        tracing::debug!("resolved {:?} -> {}", query.as_str(), coords);

        Ok(coords)
    }
}
