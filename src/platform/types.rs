//! Wire types for the hosted platform's row-level REST interface.
//!
//! Column names follow the remote tables exactly, so these derive
//! straight (de)serialization without renames except where a column name
//! collides with a Rust keyword.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The identity context resolved once from config and injected wherever
/// remote calls need it. Never re-queried per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Platform user id (uuid)
    pub id: String,
    /// Name shown on leaderboards
    pub display_name: String,
}

/// One recorded plank as stored in the `planks` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlankRecord {
    pub id: i64,
    pub user_id: String,
    pub plank_date: NaiveDate,
    pub duration_s: i64,
    #[serde(default)]
    pub inserted_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new plank; the platform assigns `id` and
/// `inserted_at`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlank {
    pub user_id: String,
    pub plank_date: NaiveDate,
    pub duration_s: i64,
}

/// A row in the `profiles` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Aggregates computed by the platform's `user_stats` procedure.
///
/// Contract: `user_stats(uid) -> {streak_days, best_seconds,
/// total_planks, monthly_rank}`. The computation is server-side and
/// opaque; nothing here is re-derived locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub streak_days: i64,
    pub best_seconds: i64,
    pub total_planks: i64,
    #[serde(default)]
    pub monthly_rank: Option<i64>,
}

/// One row of the `monthly_leaderboard` procedure.
///
/// Contract: `monthly_leaderboard(entry_limit) -> [{rank, display_name,
/// best_seconds}]`, ranked by best duration this calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub display_name: String,
    pub best_seconds: i64,
}

/// Challenge categories offered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeKind {
    Streak,
    Progression,
    #[serde(rename = "Plank Time")]
    PlankTime,
    Team,
    /// Kinds added remotely that this client does not know yet.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Streak => write!(f, "Streak"),
            Self::Progression => write!(f, "Progression"),
            Self::PlankTime => write!(f, "Plank Time"),
            Self::Team => write!(f, "Team"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A row in the `challenges` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<String>,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub participants: i64,
    pub is_active: bool,
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    #[serde(default)]
    pub meeting_url: Option<String>,
}

/// Membership row from `challenge_participants`, selected down to the
/// challenge id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeMembership {
    pub challenge_id: i64,
}

/// Insert payload for joining a challenge.
#[derive(Debug, Clone, Serialize)]
pub struct NewMembership {
    pub user_id: String,
    pub challenge_id: i64,
}
