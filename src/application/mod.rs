//! Application Layer
//!
//! Use cases wiring the domain ports together.

pub mod dinner_finder;
pub mod geocode_resolver;

pub use dinner_finder::{DinnerFinder, FinderOptions};
pub use geocode_resolver::{GeocodeResolver, DEFAULT_GEOCODE_TTL};
