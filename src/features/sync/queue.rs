//! Upload queue storage and flushing.
//!
//! Persists pending records in the local database and drives upload
//! attempts against the platform.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use serde::Serialize;

use super::record::{PendingRecord, RecordStatus};
use crate::core::today_local;
use crate::error::PlankrError;
use crate::storage::Database;

/// Outcome of one flush pass over the queue.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SyncReport {
    /// Records uploaded this pass
    pub synced: usize,
    /// Records that ran out of attempts this pass
    pub failed: usize,
    /// Records still waiting after this pass
    pub remaining: usize,
}

impl SyncReport {
    /// Whether the queue drained without losses.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0 && self.remaining == 0
    }
}

/// Per-status row counts, for `sync --status`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct QueueStatus {
    pub pending: usize,
    pub synced: usize,
    pub failed: usize,
}

impl QueueStatus {
    /// Whether nothing is waiting or stuck.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pending == 0 && self.failed == 0
    }
}

/// Upload queue over the local database.
pub struct PendingQueue {
    db: Database,
}

impl PendingQueue {
    /// Open the queue on the default database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, PlankrError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create a queue with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Add a record to the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be saved.
    pub fn enqueue(&self, record: &mut PendingRecord) -> Result<(), PlankrError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO pending_records (duration_s, plank_date, created_at, attempts, status)
              VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.duration_s,
                record.plank_date.to_string(),
                record.created_at.to_rfc3339(),
                record.attempts,
                record.status.to_string(),
            ],
        )
        .map_err(|e| PlankrError::Database(format!("Failed to enqueue record: {e}")))?;

        record.id = Some(conn.last_insert_rowid());
        Ok(())
    }

    /// Get pending records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn pending(&self) -> Result<Vec<PendingRecord>, PlankrError> {
        self.by_status(RecordStatus::Pending)
    }

    /// Get records with a given status, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn by_status(&self, status: RecordStatus) -> Result<Vec<PendingRecord>, PlankrError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, duration_s, plank_date, created_at, attempts,
                         last_attempt, last_error, status
                  FROM pending_records
                  WHERE status = ?1
                  ORDER BY created_at ASC",
            )
            .map_err(|e| PlankrError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([status.to_string()], row_to_record)
            .map_err(|e| PlankrError::Database(format!("Failed to query records: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            records
                .push(row.map_err(|e| PlankrError::Database(format!("Failed to read row: {e}")))?);
        }
        Ok(records)
    }

    /// Count rows per status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn status_counts(&self) -> Result<QueueStatus, PlankrError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT status, COUNT(*) FROM pending_records GROUP BY status")
            .map_err(|e| PlankrError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                let status: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((status, count))
            })
            .map_err(|e| PlankrError::Database(format!("Failed to count records: {e}")))?;

        let mut counts = QueueStatus::default();
        for row in rows {
            let (status, count) =
                row.map_err(|e| PlankrError::Database(format!("Failed to read row: {e}")))?;
            let count = usize::try_from(count).unwrap_or(0);
            match RecordStatus::parse(&status) {
                RecordStatus::Pending => counts.pending = count,
                RecordStatus::Synced => counts.synced = count,
                RecordStatus::Failed => counts.failed = count,
            }
        }
        Ok(counts)
    }

    /// Mark a record as uploaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_synced(&self, id: i64) -> Result<(), PlankrError> {
        let conn = self.db.connection();

        conn.execute(
            r"UPDATE pending_records
              SET status = 'synced', last_attempt = ?2, last_error = NULL
              WHERE id = ?1",
            params![id, Utc::now().to_rfc3339()],
        )
        .map_err(|e| PlankrError::Database(format!("Failed to mark record synced: {e}")))?;
        Ok(())
    }

    /// Record a failed attempt, keeping the record pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn record_attempt(&self, id: i64, error: &str) -> Result<(), PlankrError> {
        let conn = self.db.connection();

        conn.execute(
            r"UPDATE pending_records
              SET attempts = attempts + 1, last_attempt = ?2, last_error = ?3
              WHERE id = ?1",
            params![id, Utc::now().to_rfc3339(), error],
        )
        .map_err(|e| PlankrError::Database(format!("Failed to record attempt: {e}")))?;
        Ok(())
    }

    /// Park a record as failed after its final attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_failed(&self, id: i64, error: &str) -> Result<(), PlankrError> {
        let conn = self.db.connection();

        conn.execute(
            r"UPDATE pending_records
              SET status = 'failed', attempts = attempts + 1, last_attempt = ?2, last_error = ?3
              WHERE id = ?1",
            params![id, Utc::now().to_rfc3339(), error],
        )
        .map_err(|e| PlankrError::Database(format!("Failed to mark record failed: {e}")))?;
        Ok(())
    }

    /// Put failed records back in line with a fresh attempt budget.
    ///
    /// Returns how many records were re-armed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn retry_failed(&self) -> Result<usize, PlankrError> {
        let conn = self.db.connection();

        let changed = conn
            .execute(
                r"UPDATE pending_records
                  SET status = 'pending', attempts = 0, last_error = NULL
                  WHERE status = 'failed'",
                [],
            )
            .map_err(|e| PlankrError::Database(format!("Failed to retry records: {e}")))?;
        Ok(changed)
    }

    /// Delete synced rows.
    ///
    /// Returns how many rows were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear_synced(&self) -> Result<usize, PlankrError> {
        let conn = self.db.connection();

        let deleted = conn
            .execute("DELETE FROM pending_records WHERE status = 'synced'", [])
            .map_err(|e| PlankrError::Database(format!("Failed to clear synced records: {e}")))?;
        Ok(deleted)
    }

    /// Try to upload every pending record through `upload`.
    ///
    /// A retryable upload error burns one attempt; the record stays pending
    /// until its budget runs out. A non-retryable error parks the record as
    /// failed right away.
    ///
    /// # Errors
    ///
    /// Returns an error only when the queue itself cannot be read or
    /// updated. Upload errors are absorbed into the report.
    pub fn flush_with<F>(&self, mut upload: F) -> Result<SyncReport, PlankrError>
    where
        F: FnMut(&PendingRecord) -> Result<(), PlankrError>,
    {
        let mut report = SyncReport::default();

        for record in self.pending()? {
            let Some(id) = record.id else { continue };

            match upload(&record) {
                Ok(()) => {
                    self.mark_synced(id)?;
                    report.synced += 1;
                }
                Err(e) if e.is_retryable() && !record.on_last_attempt() => {
                    self.record_attempt(id, &e.to_string())?;
                    report.remaining += 1;
                }
                Err(e) => {
                    self.mark_failed(id, &e.to_string())?;
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }
}

fn row_to_record(row: &Row<'_>) -> Result<PendingRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let duration_s: i64 = row.get(1)?;
    let plank_date_str: String = row.get(2)?;
    let created_at_str: String = row.get(3)?;
    let attempts: i32 = row.get(4)?;
    let last_attempt_str: Option<String> = row.get(5)?;
    let last_error: Option<String> = row.get(6)?;
    let status_str: String = row.get(7)?;

    let plank_date = plank_date_str
        .parse()
        .unwrap_or_else(|_| today_local());

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_or_else(|_| Utc::now(), |t| t.with_timezone(&Utc));

    let last_attempt = last_attempt_str.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .ok()
    });

    Ok(PendingRecord {
        id: Some(id),
        duration_s,
        plank_date,
        created_at,
        attempts,
        last_attempt,
        last_error,
        status: RecordStatus::parse(&status_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlankrError;
    use crate::features::sync::record::MAX_ATTEMPTS;
    use chrono::NaiveDate;

    fn test_queue() -> PendingQueue {
        let db = Database::open_in_memory().unwrap();
        PendingQueue::with_database(db)
    }

    fn sample_record() -> PendingRecord {
        let date = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        PendingRecord::new(120, date)
    }

    #[test]
    fn enqueue_assigns_id() {
        let queue = test_queue();
        let mut record = sample_record();

        queue.enqueue(&mut record).unwrap();

        assert!(record.id.is_some());
        let pending = queue.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].duration_s, 120);
        assert_eq!(pending[0].plank_date, record.plank_date);
    }

    #[test]
    fn flush_uploads_and_marks_synced() {
        let queue = test_queue();
        let mut record = sample_record();
        queue.enqueue(&mut record).unwrap();

        let report = queue.flush_with(|_| Ok(())).unwrap();

        assert_eq!(report.synced, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.remaining, 0);
        assert!(report.is_clean());
        assert!(queue.pending().unwrap().is_empty());
        assert_eq!(queue.by_status(RecordStatus::Synced).unwrap().len(), 1);
    }

    #[test]
    fn retryable_failure_burns_one_attempt() {
        let queue = test_queue();
        let mut record = sample_record();
        queue.enqueue(&mut record).unwrap();

        let report = queue
            .flush_with(|_| Err(PlankrError::Platform("503: unavailable".to_string())))
            .unwrap();

        assert_eq!(report.remaining, 1);
        let pending = queue.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].attempts, 1);
        assert_eq!(
            pending[0].last_error.as_deref(),
            Some("platform error: 503: unavailable")
        );
    }

    #[test]
    fn record_fails_after_attempt_budget() {
        let queue = test_queue();
        let mut record = sample_record();
        queue.enqueue(&mut record).unwrap();

        for _ in 0..MAX_ATTEMPTS {
            queue
                .flush_with(|_| Err(PlankrError::Platform("down".to_string())))
                .unwrap();
        }

        assert!(queue.pending().unwrap().is_empty());
        let failed = queue.by_status(RecordStatus::Failed).unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].attempts, MAX_ATTEMPTS);

        // A drained queue flushes to an empty report.
        let report = queue.flush_with(|_| Ok(())).unwrap();
        assert_eq!(report.synced, 0);
    }

    #[test]
    fn non_retryable_error_parks_immediately() {
        let queue = test_queue();
        let mut record = sample_record();
        queue.enqueue(&mut record).unwrap();

        let report = queue
            .flush_with(|_| Err(PlankrError::Validation("duration rejected".to_string())))
            .unwrap();

        assert_eq!(report.failed, 1);
        let failed = queue.by_status(RecordStatus::Failed).unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].attempts, 1);
    }

    #[test]
    fn retry_failed_rearms_records() {
        let queue = test_queue();
        let mut record = sample_record();
        queue.enqueue(&mut record).unwrap();
        queue
            .flush_with(|_| Err(PlankrError::Validation("rejected".to_string())))
            .unwrap();

        let rearmed = queue.retry_failed().unwrap();

        assert_eq!(rearmed, 1);
        let pending = queue.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].attempts, 0);
        assert!(pending[0].last_error.is_none());
    }

    #[test]
    fn status_counts_cover_all_states() {
        let queue = test_queue();
        for _ in 0..3 {
            let mut record = sample_record();
            queue.enqueue(&mut record).unwrap();
        }
        let ids: Vec<i64> = queue
            .pending()
            .unwrap()
            .iter()
            .filter_map(|r| r.id)
            .collect();
        queue.mark_synced(ids[0]).unwrap();
        queue.mark_failed(ids[1], "gave up").unwrap();

        let counts = queue.status_counts().unwrap();

        assert_eq!(counts.pending, 1);
        assert_eq!(counts.synced, 1);
        assert_eq!(counts.failed, 1);
        assert!(!counts.is_empty());
    }

    #[test]
    fn clear_synced_removes_only_synced_rows() {
        let queue = test_queue();
        let mut first = sample_record();
        let mut second = sample_record();
        queue.enqueue(&mut first).unwrap();
        queue.enqueue(&mut second).unwrap();
        queue.mark_synced(first.id.unwrap()).unwrap();

        let deleted = queue.clear_synced().unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(queue.pending().unwrap().len(), 1);
        assert!(queue.by_status(RecordStatus::Synced).unwrap().is_empty());
    }

    #[test]
    fn flush_keeps_queue_order() {
        let queue = test_queue();
        let date = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        for seconds in [10_u32, 20, 30] {
            let mut record = PendingRecord::new(seconds, date);
            queue.enqueue(&mut record).unwrap();
        }

        let mut seen = Vec::new();
        queue
            .flush_with(|record| {
                seen.push(record.duration_s);
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec![10, 20, 30]);
    }
}
