//! Pending-record model for the upload queue.
//!
//! A pending record is a finished plank whose upload to the platform has
//! not succeeded yet. It keeps the original plank date so a later flush
//! books the plank on the day it actually happened.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Upload attempts before a record is parked as failed.
pub const MAX_ATTEMPTS: i32 = 5;

/// Status of a queued record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Waiting for the next flush
    Pending,
    /// Uploaded to the platform
    Synced,
    /// Gave up after too many attempts
    Failed,
}

impl RecordStatus {
    /// Parse a status stored as text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "synced" => Self::Synced,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Synced => "synced",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// A plank waiting to be uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRecord {
    /// Queue row ID
    pub id: Option<i64>,
    /// Plank duration in seconds
    pub duration_s: i64,
    /// Day the plank was held
    pub plank_date: NaiveDate,
    /// When the record was queued
    pub created_at: DateTime<Utc>,
    /// Number of upload attempts so far
    pub attempts: i32,
    /// Last attempt timestamp
    pub last_attempt: Option<DateTime<Utc>>,
    /// Last upload error
    pub last_error: Option<String>,
    /// Current status
    pub status: RecordStatus,
}

impl PendingRecord {
    /// Create a fresh pending record.
    #[must_use]
    pub fn new(duration_seconds: u32, plank_date: NaiveDate) -> Self {
        Self {
            id: None,
            duration_s: i64::from(duration_seconds),
            plank_date,
            created_at: Utc::now(),
            attempts: 0,
            last_attempt: None,
            last_error: None,
            status: RecordStatus::Pending,
        }
    }

    /// Whether one more failed attempt would exhaust the retry budget.
    #[must_use]
    pub const fn on_last_attempt(&self) -> bool {
        self.attempts + 1 >= MAX_ATTEMPTS
    }

    /// Duration as the platform expects it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn duration_seconds(&self) -> u32 {
        if self.duration_s < 0 {
            0
        } else {
            self.duration_s as u32
        }
    }
}
