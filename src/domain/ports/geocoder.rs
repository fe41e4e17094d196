//! Geocoder Port
//!
//! Defines the interface for resolving place names and postal codes to coordinates.

use crate::domain::error::SearchError;
use crate::domain::value_objects::{Coordinates, PlaceQuery};
use async_trait::async_trait;

/// External geocoding service.
///
/// Each call performs exactly one lookup against the service; caching is
/// the resolver's job, not the geocoder's.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup(&self, query: &PlaceQuery) -> Result<Coordinates, SearchError>;
}
