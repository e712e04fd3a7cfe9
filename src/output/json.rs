//! JSON output formatting for plankr.
//!
//! Stable envelopes for scripting: lists are `{"count": n, "items": [...]}`,
//! single values are bare objects.

use serde::Serialize;
use serde_json::json;

use crate::error::PlankrError;
use crate::features::challenges::ChallengeView;
use crate::features::history::HistoryPage;
use crate::features::stats::{LeaderboardRow, StatsView};
use crate::features::sync::{QueueStatus, SyncReport};

/// Format a history page as JSON
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_history_json(page: &HistoryPage) -> Result<String, PlankrError> {
    let output = json!({
        "count": page.entries.len(),
        "source": page.source,
        "items": page.entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format user stats as JSON
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_stats_json(view: &StatsView) -> Result<String, PlankrError> {
    Ok(serde_json::to_string_pretty(view)?)
}

/// Format leaderboard rows as JSON
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_leaderboard_json(rows: &[LeaderboardRow]) -> Result<String, PlankrError> {
    let output = json!({
        "count": rows.len(),
        "items": rows
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format challenges as JSON
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_challenges_json(views: &[ChallengeView]) -> Result<String, PlankrError> {
    let output = json!({
        "count": views.len(),
        "items": views
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a sync flush report as JSON
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_sync_report_json(report: &SyncReport) -> Result<String, PlankrError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Format queue status counts as JSON
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_queue_status_json(status: &QueueStatus) -> Result<String, PlankrError> {
    Ok(serde_json::to_string_pretty(status)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PlankrError> {
    Ok(serde_json::to_string_pretty(value)?)
}
