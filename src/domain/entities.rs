//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the dinner search domain.
//! They have no external dependencies beyond serialization and time types.

use crate::domain::value_objects::Coordinates;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// A dinner event as read from the backing store.
///
/// Dinners are owned by the store; this crate only reads them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DinnerEvent {
    /// Unique, immutable identifier
    pub id: i64,
    /// When the dinner takes place (UTC)
    pub event_date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Number of RSVP records attached to this dinner
    pub rsvp_count: u32,
}

impl DinnerEvent {
    /// Location of the dinner, or None when the stored values are out of range.
    pub fn location(&self) -> Option<Coordinates> {
        Coordinates::new(self.latitude, self.longitude).ok()
    }
}

/// Transport record returned by the search operations.
///
/// Field names on the wire are
/// `id, eventDate, title, latitude, longitude, description, rsvpCount, url`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDinner {
    pub id: i64,
    pub event_date: DateTime<Utc>,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub rsvp_count: u32,
    pub url: String,
}

impl JsonDinner {
    /// Project a dinner into its transport record.
    ///
    /// Without a details URL base the url is the identifier itself.
    pub fn from_event(dinner: &DinnerEvent, details_url_base: Option<&str>) -> Self {
        let url = match details_url_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), dinner.id),
            None => dinner.id.to_string(),
        };

        Self {
            id: dinner.id,
            event_date: dinner.event_date,
            title: dinner.title.clone(),
            latitude: dinner.latitude,
            longitude: dinner.longitude,
            description: dinner.description.clone(),
            rsvp_count: dinner.rsvp_count,
            url,
        }
    }
}

/// A cached geocoding result.
#[derive(Debug, Clone)]
pub struct GeocodeCacheEntry {
    pub coordinates: Coordinates,
    /// The entry must not be served at or after this instant
    pub expires_at: Instant,
}

impl GeocodeCacheEntry {
    pub fn new(coordinates: Coordinates, expires_at: Instant) -> Self {
        Self {
            coordinates,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// One page of a larger ordered result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cut page `page_index` (zero-based) out of the full result list.
    ///
    /// A page size of zero is treated as one.
    pub fn new(all: Vec<T>, page_index: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_count = all.len();
        let total_pages = total_count.div_ceil(page_size);

        let items = all
            .into_iter()
            .skip(page_index.saturating_mul(page_size))
            .take(page_size)
            .collect();

        Self {
            items,
            page_index,
            page_size,
            total_count,
            total_pages,
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn dinner(id: i64) -> DinnerEvent {
        DinnerEvent {
            id,
            event_date: Utc.with_ymd_and_hms(2030, 5, 1, 19, 0, 0).unwrap(),
            title: "Pasta night".to_string(),
            description: "Bring a bottle".to_string(),
            latitude: 47.64,
            longitude: -122.13,
            rsvp_count: 3,
        }
    }

    // ===== DinnerEvent Tests =====

    #[test]
    fn test_dinner_location() {
        let d = dinner(1);
        let loc = d.location().unwrap();
        assert_eq!(loc.latitude(), 47.64);
        assert_eq!(loc.longitude(), -122.13);
    }

    #[test]
    fn test_dinner_location_out_of_range() {
        let mut d = dinner(1);
        d.latitude = 123.0;
        assert!(d.location().is_none());
    }

    // ===== JsonDinner Tests =====

    #[test]
    fn test_json_dinner_url_defaults_to_id() {
        let json = JsonDinner::from_event(&dinner(42), None);
        assert_eq!(json.url, "42");
        assert_eq!(json.rsvp_count, 3);
        assert_eq!(json.title, "Pasta night");
    }

    #[test]
    fn test_json_dinner_url_with_base() {
        let json = JsonDinner::from_event(&dinner(42), Some("https://dinners.example/dinners/"));
        assert_eq!(json.url, "https://dinners.example/dinners/42");
    }

    #[test]
    fn test_json_dinner_wire_names() {
        let value = serde_json::to_value(JsonDinner::from_event(&dinner(7), None)).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "description",
                "eventDate",
                "id",
                "latitude",
                "longitude",
                "rsvpCount",
                "title",
                "url"
            ]
        );
        assert_eq!(obj["eventDate"], "2030-05-01T19:00:00Z");
    }

    // ===== GeocodeCacheEntry Tests =====

    #[test]
    fn test_cache_entry_expiry_boundary() {
        let now = Instant::now();
        let entry = GeocodeCacheEntry::new(
            Coordinates::new(1.0, 2.0).unwrap(),
            now + Duration::from_secs(10),
        );

        assert!(!entry.is_expired(now));
        assert!(entry.is_expired(now + Duration::from_secs(10)));
    }

    // ===== Page Tests =====

    #[test]
    fn test_page_first_page() {
        let page = Page::new((0..45).collect::<Vec<_>>(), 0, 20);

        assert_eq!(page.items, (0..20).collect::<Vec<_>>());
        assert_eq!(page.total_count, 45);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_previous_page());
        assert!(page.has_next_page());
    }

    #[test]
    fn test_page_last_page_partial() {
        let page = Page::new((0..45).collect::<Vec<_>>(), 2, 20);

        assert_eq!(page.items, (40..45).collect::<Vec<_>>());
        assert!(page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_page_empty() {
        let page: Page<i32> = Page::new(Vec::new(), 0, 20);

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_page_zero_size_treated_as_one() {
        let page = Page::new(vec![1, 2, 3], 0, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, vec![1]);
    }
}
