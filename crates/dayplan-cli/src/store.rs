//! SQLite storage for committed events, one row per event.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use dayplan_core::{EventId, EventRecord, Interval, PlacementClass, Schedule};
use rusqlite::{params, Connection};
use uuid::Uuid;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Loads and commits day schedules.
pub struct ScheduleStore {
    conn: Connection,
}

impl ScheduleStore {
    /// Open (and migrate) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS events (
                id          TEXT PRIMARY KEY,
                day         TEXT NOT NULL,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                start_at    TEXT NOT NULL,
                end_at      TEXT NOT NULL,
                class       TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_events_day ON events(day);",
        )
    }

    /// All committed events for `date`.
    ///
    /// # Errors
    /// Returns an error on query failure or if a stored row is malformed.
    pub fn load_day(&self, date: NaiveDate) -> Result<Schedule, Box<dyn std::error::Error>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, start_at, end_at, class
             FROM events WHERE day = ?1 ORDER BY start_at",
        )?;
        let rows = stmt.query_map(params![date.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, title, description, start_at, end_at, class) = row?;
            let interval = Interval::new(
                NaiveDateTime::parse_from_str(&start_at, DATETIME_FORMAT)?,
                NaiveDateTime::parse_from_str(&end_at, DATETIME_FORMAT)?,
            )?;
            let class: PlacementClass = class.parse()?;
            events.push(
                EventRecord::new(title, interval, class)
                    .with_id(EventId::new(id))
                    .with_description(description),
            );
        }

        tracing::debug!(%date, events = events.len(), "loaded schedule");
        Ok(Schedule::from_events(date, events))
    }

    /// Run `f` inside an immediate write transaction so no other process can
    /// commit between loading a day and persisting the placement decided on it.
    ///
    /// The transaction is rolled back if `f` fails.
    pub fn in_write_transaction<T>(
        &self,
        f: impl FnOnce(&Self) -> Result<T, Box<dyn std::error::Error>>,
    ) -> Result<T, Box<dyn std::error::Error>> {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Persist a newly placed event on `date`, assigning it an id.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn commit(&self, date: NaiveDate, event: &EventRecord) -> Result<EventRecord, rusqlite::Error> {
        let id = match event.id() {
            Some(id) => id.clone(),
            None => EventId::new(Uuid::new_v4().to_string()),
        };
        self.conn.execute(
            "INSERT INTO events (id, day, title, description, start_at, end_at, class)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id.as_str(),
                date.to_string(),
                event.title(),
                event.description(),
                event.interval().start().format(DATETIME_FORMAT).to_string(),
                event.interval().end().format(DATETIME_FORMAT).to_string(),
                event.class().as_str(),
            ],
        )?;
        tracing::debug!(%id, %date, "committed event");
        Ok(event.clone().with_id(id))
    }
}
