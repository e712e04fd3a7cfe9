//! Output formatting for plankr.
//!
//! This module provides formatters for displaying planks, stats, and
//! challenges in pretty or JSON form.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PlankrError;
use crate::features::challenges::ChallengeView;
use crate::features::history::HistoryPage;
use crate::features::stats::{LeaderboardRow, StatsView};
use crate::features::sync::{QueueStatus, SyncReport};

pub use json::*;
pub use pretty::*;

/// Format a history page based on output format
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_history(page: &HistoryPage, format: OutputFormat) -> Result<String, PlankrError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(page)),
        OutputFormat::Json => format_history_json(page),
    }
}

/// Format user stats based on output format
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_stats(view: &StatsView, format: OutputFormat) -> Result<String, PlankrError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(view)),
        OutputFormat::Json => format_stats_json(view),
    }
}

/// Format the monthly leaderboard based on output format
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_leaderboard(
    rows: &[LeaderboardRow],
    format: OutputFormat,
) -> Result<String, PlankrError> {
    match format {
        OutputFormat::Pretty => Ok(format_leaderboard_pretty(rows)),
        OutputFormat::Json => format_leaderboard_json(rows),
    }
}

/// Format challenges based on output format
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_challenges(
    views: &[ChallengeView],
    format: OutputFormat,
) -> Result<String, PlankrError> {
    match format {
        OutputFormat::Pretty => Ok(format_challenges_pretty(views)),
        OutputFormat::Json => format_challenges_json(views),
    }
}

/// Format a sync flush report based on output format
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_sync_report(
    report: &SyncReport,
    format: OutputFormat,
) -> Result<String, PlankrError> {
    match format {
        OutputFormat::Pretty => Ok(format_sync_report_pretty(report)),
        OutputFormat::Json => format_sync_report_json(report),
    }
}

/// Format queue status counts based on output format
///
/// # Errors
///
/// Returns `PlankrError::Parse` if JSON serialization fails.
pub fn format_queue_status(
    status: &QueueStatus,
    format: OutputFormat,
) -> Result<String, PlankrError> {
    match format {
        OutputFormat::Pretty => Ok(format_queue_status_pretty(status)),
        OutputFormat::Json => format_queue_status_json(status),
    }
}
