//! Dinner Repository Port
//!
//! Defines the interface for reading dinners from the backing store.
//! Implementations may use SQLite, an ORM-backed database, or in-memory storage.

use crate::domain::entities::DinnerEvent;
use crate::domain::error::SearchError;
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;

/// Read-only access to dinner events.
///
/// This is an outbound port. Failures are reported as
/// `SearchError::StoreUnavailable` and are never retried by callers.
#[async_trait]
pub trait DinnerRepository: Send + Sync {
    /// Dinners at or near the given coordinates.
    ///
    /// The matching policy (e.g. search radius) belongs to the store.
    async fn find_by_location(&self, coords: Coordinates) -> Result<Vec<DinnerEvent>, SearchError>;

    /// All upcoming dinners, in the store's native order.
    async fn find_upcoming_dinners(&self) -> Result<Vec<DinnerEvent>, SearchError>;
}
