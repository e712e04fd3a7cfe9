//! Upload queue for finished planks.
//!
//! When a completed session cannot reach the platform, its record is parked
//! here and uploaded later by `plankr sync`. Records keep their original
//! plank date, retry a bounded number of times, and park as failed once the
//! budget is spent.

pub mod queue;
pub mod record;

pub use queue::{PendingQueue, QueueStatus, SyncReport};
pub use record::{PendingRecord, RecordStatus, MAX_ATTEMPTS};

use chrono::NaiveDate;

use crate::error::PlankrError;

/// Park a finished plank for a later `plankr sync`.
///
/// # Errors
///
/// Returns a database error if the record cannot be stored.
pub fn park_record(
    queue: &PendingQueue,
    duration_seconds: u32,
    plank_date: NaiveDate,
) -> Result<PendingRecord, PlankrError> {
    let mut record = PendingRecord::new(duration_seconds, plank_date);
    queue.enqueue(&mut record)?;
    Ok(record)
}
