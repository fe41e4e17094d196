//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use crate::domain::error::SearchError;
use serde::Serialize;

/// Mean Earth radius in miles, used for great-circle distances.
const EARTH_RADIUS_MILES: f64 = 3956.0;

/// A validated (latitude, longitude) pair.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SearchError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SearchError::InvalidInput(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SearchError::InvalidInput(format!(
                "longitude {} out of range [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in miles (haversine).
    pub fn distance_miles(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Which kind of search the geocoding service should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Numeric input, searched as a postal code.
    PostalCode,
    /// Anything else, searched as a place name.
    PlaceName,
}

impl LookupKind {
    /// Classify a query string.
    pub fn classify(query: &str) -> Self {
        if is_numeric(query) {
            Self::PostalCode
        } else {
            Self::PlaceName
        }
    }

    /// Query parameter name understood by the geocoding service.
    pub fn query_param(&self) -> &'static str {
        match self {
            Self::PostalCode => "postalcode",
            Self::PlaceName => "placename",
        }
    }
}

/// A non-empty place name or postal code, as typed by the user.
///
/// The raw text is kept verbatim: it is both the cache key and the
/// value sent to the geocoding service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceQuery {
    raw: String,
    kind: LookupKind,
}

impl PlaceQuery {
    pub fn parse(query: &str) -> Result<Self, SearchError> {
        if query.is_empty() {
            return Err(SearchError::InvalidInput(
                "place name or postal code is required".to_string(),
            ));
        }
        Ok(Self {
            raw: query.to_string(),
            kind: LookupKind::classify(query),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }
}

/// Culture-invariant numeric check.
///
/// Accepts surrounding whitespace, one leading or trailing sign or
/// accounting parentheses in place of a sign, `,` group separators in the
/// integer part, a decimal point and an exponent. `Infinity`, `-Infinity`
/// and `NaN` match only in exactly that spelling.
pub fn is_numeric(s: &str) -> bool {
    let trimmed = s.trim();
    if matches!(trimmed, "Infinity" | "-Infinity" | "NaN") {
        return true;
    }

    // Whitespace is allowed before a closing parenthesis, not after an opening one
    let (inner, parenthesized) = match trimmed.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (inner.trim_end(), true),
        None => (trimmed, false),
    };

    let unsigned = match (inner.strip_prefix(['+', '-']), inner.strip_suffix(['+', '-'])) {
        (None, None) => inner,
        // Parentheses already carry the sign
        _ if parenthesized => return false,
        (Some(_), Some(_)) => return false,
        (Some(rest), None) => rest,
        (None, Some(rest)) => rest.trim_end(),
    };

    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return false;
    }

    let integer_end = unsigned.find(['.', 'e', 'E']).unwrap_or(unsigned.len());
    if unsigned[integer_end..].contains(',') {
        return false;
    }

    let digits: String = unsigned.chars().filter(|c| *c != ',').collect();
    digits.parse::<f64>().is_ok()
}
