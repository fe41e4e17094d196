//! Domain Errors
//!
//! Failure taxonomy shared by the ports, services and adapters.

/// Errors surfaced by dinner search operations.
///
/// None of these are retried internally; callers receive the failure
/// as-is and no partial results are returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Missing, empty or out-of-range caller input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The geocoding service was unreachable or returned no usable result.
    #[error("geocode resolution failed: {0}")]
    ResolutionFailed(String),

    /// The geocoding service returned a result without usable coordinates.
    #[error("malformed geocoding response: {0}")]
    MalformedResponse(String),

    /// The backing dinner store failed.
    #[error("dinner store unavailable: {0}")]
    StoreUnavailable(String),
}

impl SearchError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::ResolutionFailed(_) => "resolution_failed",
            Self::MalformedResponse(_) => "malformed_response",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = SearchError::StoreUnavailable("disk I/O error".to_string());
        assert_eq!(err.to_string(), "dinner store unavailable: disk I/O error");
    }

    #[test]
    fn test_kind() {
        assert_eq!(SearchError::InvalidInput(String::new()).kind(), "invalid_input");
        assert_eq!(
            SearchError::ResolutionFailed(String::new()).kind(),
            "resolution_failed"
        );
        assert_eq!(
            SearchError::MalformedResponse(String::new()).kind(),
            "malformed_response"
        );
        assert_eq!(
            SearchError::StoreUnavailable(String::new()).kind(),
            "store_unavailable"
        );
    }
}
