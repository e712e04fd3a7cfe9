//! Offline mirror of recently fetched planks.
//!
//! Each successful `history` fetch replaces the cache, so the offline view
//! always shows the last page the platform returned.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::core::today_local;
use crate::error::PlankrError;
use crate::platform::PlankRecord;
use crate::storage::Database;

/// A plank row as last seen from the platform.
#[derive(Debug, Clone)]
pub struct CachedPlank {
    /// Platform row ID
    pub id: i64,
    /// Day the plank was held
    pub plank_date: chrono::NaiveDate,
    /// Duration in seconds
    pub duration_s: i64,
    /// Platform insertion timestamp, when known
    pub inserted_at: Option<DateTime<Utc>>,
}

/// Local cache over the `plank_cache` table.
pub struct PlankCache {
    db: Database,
}

impl PlankCache {
    /// Open the cache on the default database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, PlankrError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create a cache over an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Replace the cache with a freshly fetched page of planks.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be written.
    pub fn replace(&self, records: &[PlankRecord]) -> Result<(), PlankrError> {
        let conn = self.db.connection();
        let fetched_at = Utc::now().to_rfc3339();

        conn.execute("DELETE FROM plank_cache", [])
            .map_err(|e| PlankrError::Database(format!("Failed to clear plank cache: {e}")))?;

        for record in records {
            conn.execute(
                r"INSERT INTO plank_cache (id, plank_date, duration_s, inserted_at, fetched_at)
                  VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.plank_date.to_string(),
                    record.duration_s,
                    record.inserted_at.map(|t| t.to_rfc3339()),
                    fetched_at,
                ],
            )
            .map_err(|e| PlankrError::Database(format!("Failed to cache plank: {e}")))?;
        }
        Ok(())
    }

    /// Read the most recent cached planks, newest day first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: u32) -> Result<Vec<CachedPlank>, PlankrError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, plank_date, duration_s, inserted_at
                  FROM plank_cache
                  ORDER BY plank_date DESC, inserted_at DESC
                  LIMIT ?1",
            )
            .map_err(|e| PlankrError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([limit], row_to_cached)
            .map_err(|e| PlankrError::Database(format!("Failed to query cache: {e}")))?;

        let mut planks = Vec::new();
        for row in rows {
            planks
                .push(row.map_err(|e| PlankrError::Database(format!("Failed to read row: {e}")))?);
        }
        Ok(planks)
    }

    /// When the cache was last refreshed, if ever.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn last_refreshed(&self) -> Result<Option<DateTime<Utc>>, PlankrError> {
        let conn = self.db.connection();

        let fetched: Option<String> = conn
            .query_row("SELECT MAX(fetched_at) FROM plank_cache", [], |row| {
                row.get(0)
            })
            .map_err(|e| PlankrError::Database(format!("Failed to read cache age: {e}")))?;

        Ok(fetched.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .ok()
        }))
    }
}

fn row_to_cached(row: &Row<'_>) -> Result<CachedPlank, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let plank_date_str: String = row.get(1)?;
    let duration_s: i64 = row.get(2)?;
    let inserted_at_str: Option<String> = row.get(3)?;

    let plank_date = plank_date_str.parse().unwrap_or_else(|_| today_local());
    let inserted_at = inserted_at_str.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .ok()
    });

    Ok(CachedPlank {
        id,
        plank_date,
        duration_s,
        inserted_at,
    })
}
