//! Geocode Cache Port
//!
//! Defines the interface for caching geocoding results with a time-to-live.

use crate::domain::value_objects::Coordinates;
use std::time::Duration;

/// Time-bounded cache of resolved coordinates, keyed by the exact query text.
///
/// Implementations must be safe for concurrent reads and inserts.
pub trait GeocodeCache: Send + Sync {
    /// Get live coordinates for `key`. Expired entries are never returned.
    fn get(&self, key: &str) -> Option<Coordinates>;

    /// Insert or replace the entry for `key` (last write wins).
    fn set(&self, key: &str, coordinates: Coordinates, ttl: Duration);

    /// Number of entries currently held, expired or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
