//! Stats and leaderboard view models.
//!
//! The aggregates themselves (streak, best time, monthly rank) are computed
//! by the platform; this module only shapes them for display.

use serde::Serialize;

use crate::core::format_clock;
use crate::platform::{LeaderboardEntry, UserStats};

/// A user's aggregate stats, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub display_name: String,
    pub streak_days: i64,
    pub best_seconds: i64,
    /// Best time as an MM:SS readout
    pub best_clock: String,
    pub total_planks: i64,
    /// Rank within the current month, absent outside the top list
    pub monthly_rank: Option<i64>,
}

impl StatsView {
    /// Shape platform aggregates for display under the given name.
    #[must_use]
    pub fn build(display_name: &str, stats: &UserStats) -> Self {
        Self {
            display_name: display_name.to_string(),
            streak_days: stats.streak_days,
            best_seconds: stats.best_seconds,
            best_clock: format_clock(clamp_seconds(stats.best_seconds)),
            total_planks: stats.total_planks,
            monthly_rank: stats.monthly_rank,
        }
    }

    /// Monthly rank as shown to the user (`#12`, or a dash when unranked).
    #[must_use]
    pub fn rank_label(&self) -> String {
        self.monthly_rank
            .map_or_else(|| "-".to_string(), |rank| format!("#{rank}"))
    }
}

/// One leaderboard line, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub rank: i64,
    pub display_name: String,
    pub best_seconds: i64,
    /// Best time as an MM:SS readout
    pub clock: String,
    /// Whether this row belongs to the current user
    pub is_me: bool,
}

/// Shape leaderboard entries, flagging the current user's own row.
#[must_use]
pub fn leaderboard_rows(entries: &[LeaderboardEntry], my_name: &str) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .map(|entry| LeaderboardRow {
            rank: entry.rank,
            display_name: entry.display_name.clone(),
            best_seconds: entry.best_seconds,
            clock: format_clock(clamp_seconds(entry.best_seconds)),
            is_me: entry.display_name == my_name,
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_seconds(seconds: i64) -> u32 {
    seconds.max(0) as u32
}
