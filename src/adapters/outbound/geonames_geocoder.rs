//! GeoNames Geocoder
//!
//! Implements Geocoder using the GeoNames postal code search web service.
//! Responses are XML documents of the form
//! `<geonames><code><lat>..</lat><lng>..</lng></code></geonames>`.
//!
//! See: http://www.geonames.org/export/web-services.html

use crate::domain::error::SearchError;
use crate::domain::ports::Geocoder;
use crate::domain::value_objects::{Coordinates, PlaceQuery};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Response from the postal code search endpoint.
///
/// `<code>` elements need not be adjacent; other siblings may sit between them.
#[derive(Debug, Deserialize)]
struct PostalCodeSearchResponse {
    #[serde(rename = "code", default)]
    codes: Vec<PostalCodeResult>,
}

/// One `<code>` element. Only the coordinates are read.
#[derive(Debug, Deserialize)]
struct PostalCodeResult {
    lat: Option<String>,
    lng: Option<String>,
}

/// Configuration for the GeoNames service.
#[derive(Debug, Clone)]
pub struct GeoNamesConfig {
    /// Service root (e.g., "http://ws.geonames.org")
    pub base_url: String,
    /// Upper bound on a single request, connect through body
    pub timeout: Duration,
}

impl Default for GeoNamesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://ws.geonames.org".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// GeoNames-backed geocoder.
///
/// Issues `GET {base}/postalCodeSearch?{postalcode|placename}={query}&maxRows=1&style=SHORT`
/// and reads the first result.
pub struct GeoNamesGeocoder {
    config: GeoNamesConfig,
    client: reqwest::Client,
}

impl GeoNamesGeocoder {
    /// Create a geocoder with its own HTTP client.
    pub fn new(config: GeoNamesConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Full URL of the postal code search endpoint.
    fn search_url(&self) -> String {
        format!(
            "{}/postalCodeSearch",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Parse a postal code search document into coordinates.
    fn parse_response(body: &str) -> Result<Coordinates, SearchError> {
        let response: PostalCodeSearchResponse = quick_xml::de::from_str(body)
            .map_err(|e| SearchError::ResolutionFailed(format!("unreadable response: {}", e)))?;

        let first = response
            .codes
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::ResolutionFailed("no matching location".to_string()))?;

        let lat = Self::parse_field("lat", first.lat)?;
        let lng = Self::parse_field("lng", first.lng)?;

        Coordinates::new(lat, lng).map_err(|e| SearchError::MalformedResponse(e.to_string()))
    }

    fn parse_field(name: &str, value: Option<String>) -> Result<f64, SearchError> {
        let raw = value.ok_or_else(|| {
            SearchError::MalformedResponse(format!("result has no <{}> element", name))
        })?;

        raw.trim().parse::<f64>().map_err(|_| {
            SearchError::MalformedResponse(format!("<{}> is not a number: {:?}", name, raw))
        })
    }
}

#[async_trait]
impl Geocoder for GeoNamesGeocoder {
    async fn lookup(&self, query: &PlaceQuery) -> Result<Coordinates, SearchError> {
        let url = self.search_url();
        tracing::debug!(
            "geonames lookup {}={:?}",
            query.kind().query_param(),
            query.as_str()
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                (query.kind().query_param(), query.as_str()),
                ("maxRows", "1"),
                ("style", "SHORT"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::ResolutionFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(SearchError::ResolutionFailed(format!(
                "geocoding service returned {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::ResolutionFailed(format!("reading body failed: {}", e)))?;

        Self::parse_response(&body)
    }
}
