//! Dinner Finder - Main application use case
//!
//! Orchestrates the search operations: location lookups, place/zip
//! lookups through the geocode resolver, and the popular dinners list.

use crate::application::geocode_resolver::GeocodeResolver;
use crate::domain::entities::{DinnerEvent, JsonDinner, Page};
use crate::domain::error::SearchError;
use crate::domain::ports::DinnerRepository;
use crate::domain::services::DinnerRanking;
use crate::domain::value_objects::Coordinates;
use std::sync::Arc;

/// Tunables for the finder.
#[derive(Debug, Clone)]
pub struct FinderOptions {
    /// Page size of place/zip search results
    pub page_size: usize,
    /// Limit used by the popular list when the caller gives none
    pub default_popular_limit: usize,
    /// When set, transport urls are `<base>/<id>` instead of the bare id
    pub details_url_base: Option<String>,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            default_popular_limit: 40,
            details_url_base: None,
        }
    }
}

/// Dinner finder - main application use case.
///
/// Store failures are propagated unchanged and never retried.
pub struct DinnerFinder {
    repository: Arc<dyn DinnerRepository>,
    resolver: Arc<GeocodeResolver>,
    options: FinderOptions,
}

impl DinnerFinder {
    /// Create a finder over an injected repository and resolver.
    pub fn new(
        repository: Arc<dyn DinnerRepository>,
        resolver: Arc<GeocodeResolver>,
        options: FinderOptions,
    ) -> Self {
        Self {
            repository,
            resolver,
            options,
        }
    }

    /// Dinners at or near `coords`, in store order.
    pub async fn find_by_location(&self, coords: Coordinates) -> Result<Vec<DinnerEvent>, SearchError> {
        self.repository.find_by_location(coords).await
    }

    /// Location search from raw latitude/longitude, projected to transport records.
    pub async fn search_by_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<JsonDinner>, SearchError> {
        let coords = Coordinates::new(latitude, longitude)?;
        let dinners = self.find_by_location(coords).await?;

        tracing::debug!("location search {} -> {} dinners", coords, dinners.len());
        Ok(self.project(&dinners))
    }

    /// Search by place name or postal code.
    ///
    /// Missing or empty input yields `Ok(None)` without touching the
    /// resolver. Otherwise the text is geocoded, dinners near it are
    /// ordered by event date (latest first) and the first page is returned.
    pub async fn search_by_place_or_zip(
        &self,
        place_or_zip: Option<&str>,
    ) -> Result<Option<Page<DinnerEvent>>, SearchError> {
        let place_or_zip = match place_or_zip {
            Some(s) if !s.is_empty() => s,
            _ => {
                tracing::debug!("place/zip search without input, returning nothing");
                return Ok(None);
            }
        };

        let coords = self.resolver.resolve(place_or_zip).await?;
        let dinners = self.find_by_location(coords).await?;
        let sorted = DinnerRanking::by_event_date_desc(dinners);

        tracing::debug!(
            "place/zip search {:?} at {} -> {} dinners",
            place_or_zip,
            coords,
            sorted.len()
        );
        Ok(Some(Page::new(sorted, 0, self.options.page_size)))
    }

    /// Upcoming dinners truncated to `limit` (default 40) in store order,
    /// then sorted ascending by RSVP count.
    pub async fn find_upcoming_popular(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<JsonDinner>, SearchError> {
        let limit = limit.unwrap_or(self.options.default_popular_limit);
        let upcoming = self.repository.find_upcoming_dinners().await?;
        let popular = DinnerRanking::most_popular(upcoming, limit);

        tracing::debug!("popular dinners limit={} -> {}", limit, popular.len());
        Ok(self.project(&popular))
    }

    /// Project dinners into transport records.
    pub fn project(&self, dinners: &[DinnerEvent]) -> Vec<JsonDinner> {
        let base = self.options.details_url_base.as_deref();
        dinners
            .iter()
            .map(|d| JsonDinner::from_event(d, base))
            .collect()
    }
}
