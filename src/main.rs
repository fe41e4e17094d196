//! dinner-search - Location-based dinner search
//!
//! This is the composition root that wires together all the components.

use clap::Parser;
use dinner_search::adapters::inbound::{run_session, Cli, Command};
use dinner_search::adapters::outbound::{
    DashMapGeocodeCache, GeoNamesConfig, GeoNamesGeocoder, SqliteDinnerRepository,
};
use dinner_search::application::{DinnerFinder, FinderOptions, GeocodeResolver};
use dinner_search::config::load_config;
use dinner_search::SearchError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging (stderr, stdout carries the JSON payload)
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "starting dinner-search db={} geocoder={}",
        cfg.db_path,
        cfg.geocoder_url
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapters

    // Dinner repository (SQLite)
    if !Path::new(&cfg.db_path).exists() {
        tracing::info!("no dinner database at {}, creating an empty one", cfg.db_path);
        SqliteDinnerRepository::initialize(&cfg.db_path)?;
    }
    let repository = Arc::new(SqliteDinnerRepository::new(
        cfg.db_path.clone(),
        cfg.search_radius_miles,
    ));

    // Geocoder (GeoNames) behind a DashMap cache
    let geocoder = Arc::new(GeoNamesGeocoder::new(GeoNamesConfig {
        base_url: cfg.geocoder_url.clone(),
        timeout: Duration::from_secs(cfg.geocoder_timeout_secs),
    })?);
    let cache = Arc::new(DashMapGeocodeCache::new());

    // 2. Application services
    let resolver = Arc::new(GeocodeResolver::new(
        geocoder,
        cache.clone(),
        Duration::from_secs(cfg.geocode_ttl_secs),
    ));

    let finder = DinnerFinder::new(
        repository,
        resolver,
        FinderOptions {
            page_size: cfg.page_size,
            default_popular_limit: cfg.popular_limit,
            details_url_base: cfg.details_url_base.clone(),
        },
    );

    // 3. Inbound adapter
    let result = match cli.command {
        Command::Batch => {
            cache.start_gc(Duration::from_secs(cfg.geocode_gc_interval_secs));
            let stdin = BufReader::new(tokio::io::stdin());
            run_session(&finder, stdin, tokio::io::stdout())
                .await
                .map(|_| ())
        }
        command => command
            .execute(&finder)
            .await
            .map(|output| println!("{}", output)),
    };

    if let Err(e) = &result {
        match e.downcast_ref::<SearchError>() {
            Some(err) => tracing::error!(kind = err.kind(), "{}", err),
            None => tracing::error!("{:#}", e),
        }
    }
    result
}
