mod dinner_repository;
mod geocode_cache;
mod geocoder;

pub use dinner_repository::DinnerRepository;
pub use geocode_cache::GeocodeCache;
pub use geocoder::Geocoder;
