//! SQLite Dinner Repository
//!
//! Implements DinnerRepository using SQLite for storage.
//! Each call opens the database read-only on a blocking worker thread.

use crate::domain::entities::DinnerEvent;
use crate::domain::error::SearchError;
use crate::domain::ports::DinnerRepository;
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, Row};
use std::time::Duration;

/// Schema expected by the repository.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS dinners (
    id          INTEGER PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    event_date  TEXT NOT NULL,
    latitude    REAL NOT NULL,
    longitude   REAL NOT NULL
);
CREATE TABLE IF NOT EXISTS rsvps (
    id            INTEGER PRIMARY KEY,
    dinner_id     INTEGER NOT NULL REFERENCES dinners(id) ON DELETE CASCADE,
    attendee_name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_rsvps_dinner ON rsvps(dinner_id);
";

const UPCOMING_QUERY: &str = "
SELECT d.id, d.event_date, d.title, d.description, d.latitude, d.longitude,
       (SELECT COUNT(*) FROM rsvps r WHERE r.dinner_id = d.id) AS rsvp_count
FROM dinners d
WHERE julianday(d.event_date) >= julianday(?1)
ORDER BY julianday(d.event_date) ASC, d.id ASC
";

/// SQLite-backed dinner repository.
///
/// Upcoming dinners are those dated at or after the current time, in
/// ascending date order. Location searches keep the upcoming dinners
/// closer than `radius_miles` to the requested point.
pub struct SqliteDinnerRepository {
    db_path: String,
    radius_miles: f64,
}

impl SqliteDinnerRepository {
    /// Create a repository over an existing database file.
    pub fn new(db_path: impl Into<String>, radius_miles: f64) -> Self {
        Self {
            db_path: db_path.into(),
            radius_miles,
        }
    }

    /// Create the database file and tables if they do not exist yet.
    pub fn initialize(db_path: &str) -> anyhow::Result<()> {
        let conn = Connection::open(db_path)?;
        Self::create_schema(&conn)?;
        tracing::info!("dinner schema ready at {}", db_path);
        Ok(())
    }

    /// Create the dinner tables on an open connection.
    pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(SCHEMA)
    }

    /// Load upcoming dinners from the SQLite database file.
    fn load_upcoming(db_path: &str, now: DateTime<Utc>) -> rusqlite::Result<Vec<DinnerEvent>> {
        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        let mut stmt = conn.prepare(UPCOMING_QUERY)?;
        let dinners = stmt
            .query_map([now], |row| Self::row_to_dinner(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(dinners)
    }

    /// Convert a SQLite row to a DinnerEvent entity.
    fn row_to_dinner(row: &Row) -> rusqlite::Result<DinnerEvent> {
        Ok(DinnerEvent {
            id: row.get(0)?,
            event_date: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
            rsvp_count: row.get::<_, i64>(6)?.clamp(0, u32::MAX as i64) as u32,
        })
    }

    async fn upcoming(&self) -> Result<Vec<DinnerEvent>, SearchError> {
        let db_path = self.db_path.clone();
        let now = Utc::now();

        let dinners = tokio::task::spawn_blocking(move || Self::load_upcoming(&db_path, now))
            .await
            .map_err(|e| SearchError::StoreUnavailable(format!("spawn_blocking error: {}", e)))?
            .map_err(|e| {
                tracing::error!("error reading dinners from {}: {:?}", self.db_path, e);
                SearchError::StoreUnavailable(e.to_string())
            })?;

        tracing::debug!("loaded {} upcoming dinners", dinners.len());
        Ok(dinners)
    }
}

#[async_trait]
impl DinnerRepository for SqliteDinnerRepository {
    async fn find_by_location(&self, coords: Coordinates) -> Result<Vec<DinnerEvent>, SearchError> {
        let nearby: Vec<DinnerEvent> = self
            .upcoming()
            .await?
            .into_iter()
            .filter(|d| {
                d.location()
                    .map(|loc| loc.distance_miles(&coords) < self.radius_miles)
                    .unwrap_or(false)
            })
            .collect();

        tracing::debug!(
            "{} dinners within {} miles of {}",
            nearby.len(),
            self.radius_miles,
            coords
        );
        Ok(nearby)
    }

    async fn find_upcoming_dinners(&self) -> Result<Vec<DinnerEvent>, SearchError> {
        self.upcoming().await
    }
}
