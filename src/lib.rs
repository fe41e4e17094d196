//! dinner-search Library
//!
//! Location-based dinner search: place/postal-code geocoding with a
//! time-bounded cache, location lookups against a dinner store, and the
//! popular dinners ranking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{DinnerFinder, FinderOptions, GeocodeResolver};
pub use config::load_config;
pub use domain::entities::{DinnerEvent, JsonDinner, Page};
pub use domain::error::SearchError;
pub use domain::ports::{DinnerRepository, GeocodeCache, Geocoder};
pub use domain::services::DinnerRanking;
pub use domain::value_objects::{Coordinates, LookupKind, PlaceQuery};
