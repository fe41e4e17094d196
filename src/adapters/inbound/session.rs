//! Batch Session Adapter
//!
//! Reads newline-delimited requests and answers each with one line of
//! JSON. Every request in a session runs against the same finder, so
//! place and postal code resolutions are served from the geocode cache
//! until they expire.

use super::cli::{Cli, Command};
use crate::application::DinnerFinder;
use crate::domain::error::SearchError;
use clap::Parser;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Counters for a finished session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub requests: usize,
    pub failures: usize,
}

/// Parse one request line. Blank lines yield `None`.
///
/// Lines use the command-line syntax without the program name, e.g.
/// `location --latitude 47.6 --longitude -122.3` or `popular --limit 5`.
/// For `place`/`zip` the rest of the line is the query, so place names
/// containing spaces need no quoting.
pub fn parse_request(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    let command = match verb {
        "place" | "zip" => Command::Place {
            place_or_zip: Some(rest.to_string()).filter(|q| !q.is_empty()),
        },
        _ => {
            let args = std::iter::once("dinner-search").chain(line.split_whitespace());
            Cli::try_parse_from(args)?.command
        }
    };

    Ok(Some(command))
}

/// Answer every request from `reader` on `writer` until end of input.
///
/// A failed request is answered with an `{"error": {"kind", "message"}}`
/// line and the session continues.
pub async fn run_session<R, W>(
    finder: &DinnerFinder,
    reader: R,
    mut writer: W,
) -> anyhow::Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = SessionSummary::default();

    while let Some(line) = lines.next_line().await? {
        let response = match handle_line(finder, &line).await {
            Ok(Some(payload)) => payload,
            Ok(None) => continue,
            Err(e) => {
                summary.failures += 1;
                error_payload(&e)
            }
        };
        summary.requests += 1;

        writer.write_all(serde_json::to_string(&response)?.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    tracing::info!(
        "batch session finished: {} requests, {} failed",
        summary.requests,
        summary.failures
    );
    Ok(summary)
}

async fn handle_line(
    finder: &DinnerFinder,
    line: &str,
) -> anyhow::Result<Option<serde_json::Value>> {
    match parse_request(line)? {
        Some(command) => Ok(Some(command.respond(finder).await?)),
        None => Ok(None),
    }
}

fn error_payload(err: &anyhow::Error) -> serde_json::Value {
    let kind = err
        .downcast_ref::<SearchError>()
        .map(SearchError::kind)
        .unwrap_or("bad_request");
    tracing::warn!("batch request failed ({}): {:#}", kind, err);

    json!({ "error": { "kind": kind, "message": format!("{:#}", err) } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::DashMapGeocodeCache;
    use crate::application::{FinderOptions, GeocodeResolver, DEFAULT_GEOCODE_TTL};
    use crate::domain::entities::DinnerEvent;
    use crate::domain::ports::{DinnerRepository, GeocodeCache, Geocoder};
    use crate::domain::value_objects::{Coordinates, PlaceQuery};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // ===== Mock Implementations =====

    struct StaticRepo(Vec<DinnerEvent>);

    #[async_trait]
    impl DinnerRepository for StaticRepo {
        async fn find_by_location(&self, _coords: Coordinates) -> Result<Vec<DinnerEvent>, SearchError> {
            Ok(self.0.clone())
        }

        async fn find_upcoming_dinners(&self) -> Result<Vec<DinnerEvent>, SearchError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn lookup(&self, query: &PlaceQuery) -> Result<Coordinates, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query.as_str() == "Atlantis" {
                return Err(SearchError::ResolutionFailed("no matching location".to_string()));
            }
            Coordinates::new(41.39, 2.17)
        }
    }

    struct Session {
        finder: DinnerFinder,
        geocoder: Arc<CountingGeocoder>,
        cache: Arc<DashMapGeocodeCache>,
    }

    fn session() -> Session {
        let dinners = vec![DinnerEvent {
            id: 7,
            event_date: Utc.with_ymd_and_hms(2031, 9, 12, 20, 0, 0).unwrap(),
            title: "Calcotada".to_string(),
            description: "Grilled onions".to_string(),
            latitude: 41.4,
            longitude: 2.2,
            rsvp_count: 3,
        }];
        let geocoder = Arc::new(CountingGeocoder::default());
        let cache = Arc::new(DashMapGeocodeCache::new());
        let resolver = Arc::new(GeocodeResolver::new(
            geocoder.clone(),
            cache.clone(),
            DEFAULT_GEOCODE_TTL,
        ));
        let finder =
            DinnerFinder::new(Arc::new(StaticRepo(dinners)), resolver, FinderOptions::default());

        Session {
            finder,
            geocoder,
            cache,
        }
    }

    async fn run(session: &Session, input: &str) -> (SessionSummary, Vec<serde_json::Value>) {
        let mut output = Vec::new();
        let summary = run_session(&session.finder, input.as_bytes(), &mut output)
            .await
            .unwrap();

        let responses = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, responses)
    }

    // ===== parse_request Tests =====

    #[test]
    fn test_parse_request_place_keeps_spaces() {
        let command = parse_request("place  Sant Cugat del Valles").unwrap();
        assert_eq!(
            command,
            Some(Command::Place {
                place_or_zip: Some("Sant Cugat del Valles".to_string())
            })
        );
    }

    #[test]
    fn test_parse_request_place_without_query() {
        assert_eq!(
            parse_request("zip").unwrap(),
            Some(Command::Place { place_or_zip: None })
        );
    }

    #[test]
    fn test_parse_request_uses_cli_syntax() {
        assert_eq!(
            parse_request("location --latitude -33.9 --longitude 18.4").unwrap(),
            Some(Command::Location {
                latitude: -33.9,
                longitude: 18.4
            })
        );
        assert_eq!(
            parse_request("popular --limit 3").unwrap(),
            Some(Command::Popular { limit: Some(3) })
        );
    }

    #[test]
    fn test_parse_request_blank_and_unknown() {
        assert_eq!(parse_request("   ").unwrap(), None);
        assert!(parse_request("dance --all-night").is_err());
    }

    // ===== run_session Tests =====

    #[tokio::test]
    async fn test_repeated_place_resolves_once() {
        let session = session();

        let (summary, responses) = run(&session, "place Barcelona\nplace Barcelona\n").await;

        assert_eq!(summary, SessionSummary { requests: 2, failures: 0 });
        assert_eq!(session.geocoder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.cache.len(), 1);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1]["dinners"][0]["id"], 7);
    }

    #[tokio::test]
    async fn test_failures_do_not_end_session() {
        let session = session();

        let input = "place Atlantis\n\nwhatever\nbatch\npopular\n";
        let (summary, responses) = run(&session, input).await;

        assert_eq!(summary, SessionSummary { requests: 4, failures: 3 });
        assert_eq!(responses[0]["error"]["kind"], "resolution_failed");
        assert_eq!(responses[1]["error"]["kind"], "bad_request");
        assert_eq!(responses[2]["error"]["kind"], "bad_request");
        assert_eq!(responses[3][0]["rsvpCount"], 3);
        assert!(session.cache.is_empty());
    }

    #[tokio::test]
    async fn test_empty_place_answers_null() {
        let session = session();

        let (_, responses) = run(&session, "place\n").await;

        assert_eq!(responses, vec![serde_json::Value::Null]);
        assert_eq!(session.geocoder.calls.load(Ordering::SeqCst), 0);
    }
}
