//! DashMap Geocode Cache
//!
//! Implements GeocodeCache using DashMap for lock-free concurrent access.

use crate::domain::entities::GeocodeCacheEntry;
use crate::domain::ports::GeocodeCache;
use crate::domain::value_objects::Coordinates;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// DashMap-backed geocode cache.
///
/// Staleness is checked lazily on lookup: expired entries are dropped when
/// they are read. Long-running processes also start the sweep with
/// [`DashMapGeocodeCache::start_gc`] so keys that are never read again do
/// not accumulate.
pub struct DashMapGeocodeCache {
    entries: Arc<DashMap<String, GeocodeCacheEntry>>,
}

impl DashMapGeocodeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        purge(&self.entries)
    }

    /// Start the background sweep, running every `interval`.
    pub fn start_gc(&self, interval: Duration) {
        let entries = self.entries.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let removed = purge(&entries);
                if removed > 0 {
                    tracing::debug!("geocode cache GC removed {} expired entries", removed);
                }
            }
        });
    }
}

fn purge(entries: &DashMap<String, GeocodeCacheEntry>) -> usize {
    let now = Instant::now();
    let mut removed = 0;

    entries.retain(|_, entry| {
        let keep = !entry.is_expired(now);
        if !keep {
            removed += 1;
        }
        keep
    });

    removed
}

impl Default for DashMapGeocodeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeCache for DashMapGeocodeCache {
    fn get(&self, key: &str) -> Option<Coordinates> {
        let now = Instant::now();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.coordinates),
            Some(_) => {}
            None => return None,
        }

        // Only drop the entry if it is still the expired one; a concurrent
        // writer may already have refreshed it.
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    fn set(&self, key: &str, coordinates: Coordinates, ttl: Duration) {
        let entry = GeocodeCacheEntry::new(coordinates, Instant::now() + ttl);
        self.entries.insert(key.to_string(), entry);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
