//! Challenge browsing and membership.
//!
//! Challenges live on the platform; this module joins the active list with
//! the user's memberships and backs the interactive picker for
//! `plankr challenge join`.

pub mod picker;

use chrono::NaiveDate;
use serde::Serialize;

use crate::platform::{Challenge, ChallengeKind};

pub use picker::pick_challenge;

/// A challenge annotated with the user's membership.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub participants: i64,
    pub joined: bool,
    pub meeting_url: Option<String>,
}

impl ChallengeView {
    fn new(challenge: &Challenge, joined: bool) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title.clone(),
            description: challenge.description.clone(),
            kind: challenge.kind,
            start_date: challenge.start_date,
            end_date: challenge.end_date,
            participants: challenge.participants,
            joined,
            meeting_url: challenge.meeting_url.clone(),
        }
    }

    /// Compact date range for list output.
    #[must_use]
    pub fn date_range(&self) -> String {
        if self.start_date.format("%Y").to_string() == self.end_date.format("%Y").to_string() {
            format!(
                "{} to {}",
                self.start_date.format("%-d %b"),
                self.end_date.format("%-d %b")
            )
        } else {
            format!(
                "{} to {}",
                self.start_date.format("%-d %b %Y"),
                self.end_date.format("%-d %b %Y")
            )
        }
    }
}

/// Annotate active challenges with the user's memberships, keeping the
/// platform's ordering.
#[must_use]
pub fn overview(challenges: &[Challenge], joined_ids: &[i64]) -> Vec<ChallengeView> {
    challenges
        .iter()
        .map(|challenge| ChallengeView::new(challenge, joined_ids.contains(&challenge.id)))
        .collect()
}

/// The challenges the user has not joined yet; candidates for the picker.
#[must_use]
pub fn joinable(views: &[ChallengeView]) -> Vec<ChallengeView> {
    views.iter().filter(|v| !v.joined).cloned().collect()
}
