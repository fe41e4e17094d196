mod dashmap_geocode_cache;
mod geonames_geocoder;
mod sqlite_dinner_repo;

pub use dashmap_geocode_cache::DashMapGeocodeCache;
pub use geonames_geocoder::{GeoNamesConfig, GeoNamesGeocoder};
pub use sqlite_dinner_repo::SqliteDinnerRepository;
