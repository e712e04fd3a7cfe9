//! Hosted platform integration.
//!
//! The platform is a database-as-a-service with row-level REST endpoints
//! and stored procedures. This module owns the wire types and the
//! blocking client; everything else in the crate talks to the platform
//! through it.

pub mod client;
pub mod types;

pub use client::PlatformClient;
pub use types::{
    Challenge, ChallengeKind, ChallengeMembership, CurrentUser, LeaderboardEntry, NewMembership,
    NewPlank, PlankRecord, Profile, UserStats,
};
