use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Dinner store
    pub db_path: String,
    pub search_radius_miles: f64,

    // Geocoding service
    pub geocoder_url: String,
    pub geocode_ttl_secs: u64,
    pub geocoder_timeout_secs: u64,
    pub geocode_gc_interval_secs: u64,

    // Result shaping
    pub page_size: usize,
    pub popular_limit: usize,
    pub details_url_base: Option<String>,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "dinners.db".to_string(),
            search_radius_miles: 100.0,
            geocoder_url: "http://ws.geonames.org".to_string(),
            geocode_ttl_secs: 86_400,
            geocoder_timeout_secs: 10,
            geocode_gc_interval_secs: 600,
            page_size: 20,
            popular_limit: 40,
            details_url_base: None,
            debug: false,
        }
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// Unparseable numeric values fall back to their defaults.
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let db_path = var("DINNER_DB_PATH").unwrap_or(defaults.db_path);

    let search_radius_miles = var("DINNER_SEARCH_RADIUS_MILES")
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r >= 0.0)
        .unwrap_or(defaults.search_radius_miles);

    let geocoder_url = var("DINNER_GEOCODER_URL").unwrap_or(defaults.geocoder_url);

    let geocode_ttl_secs = var("DINNER_GEOCODE_TTL_SECS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.geocode_ttl_secs);

    let geocoder_timeout_secs = var("DINNER_GEOCODER_TIMEOUT_SECS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.geocoder_timeout_secs);

    let geocode_gc_interval_secs = var("DINNER_GEOCODE_GC_INTERVAL_SECS")
        .and_then(|v| v.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(defaults.geocode_gc_interval_secs);

    let page_size = var("DINNER_PAGE_SIZE")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.page_size);

    let popular_limit = var("DINNER_POPULAR_LIMIT")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.popular_limit);

    let details_url_base = var("DINNER_DETAILS_URL_BASE").filter(|v| !v.is_empty());

    let debug = var("DEBUG").is_some();

    if geocoder_url.is_empty() {
        anyhow::bail!("DINNER_GEOCODER_URL must not be empty");
    }

    Ok(Config {
        db_path,
        search_radius_miles,
        geocoder_url,
        geocode_ttl_secs,
        geocoder_timeout_secs,
        geocode_gc_interval_secs,
        page_size,
        popular_limit,
        details_url_base,
        debug,
    })
}
