//! Dinner Ranking Service
//!
//! Pure domain logic for ordering dinner search results.
//! This service has NO external dependencies - it's pure Rust.

use crate::domain::entities::DinnerEvent;

/// Ordering rules applied to dinner result lists.
pub struct DinnerRanking;

impl DinnerRanking {
    /// Order dinners by event date, latest first.
    ///
    /// The sort is stable: dinners on the same date keep their store order.
    pub fn by_event_date_desc(mut dinners: Vec<DinnerEvent>) -> Vec<DinnerEvent> {
        dinners.sort_by(|a, b| b.event_date.cmp(&a.event_date));
        dinners
    }

    /// Select the "most popular" upcoming dinners.
    ///
    /// Keeps the first `limit` dinners in the order given, THEN sorts that
    /// subset ascending by RSVP count. The result is not the `limit` most
    /// popular dinners overall. Callers rely on this exact order.
    ///
    /// # Example
    /// ```ignore
    /// let upcoming = repo.find_upcoming_dinners().await?;
    /// let popular = DinnerRanking::most_popular(upcoming, 40);
    /// ```
    pub fn most_popular(dinners: Vec<DinnerEvent>, limit: usize) -> Vec<DinnerEvent> {
        let mut subset: Vec<DinnerEvent> = dinners.into_iter().take(limit).collect();
        subset.sort_by_key(|d| d.rsvp_count);
        subset
    }
}
