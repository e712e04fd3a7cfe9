//! Feature implementations for plankr.
//!
//! This module contains the implementation of the main features:
//! - Timing session controller
//! - Plank history with offline cache
//! - Stats and leaderboard views
//! - Challenge membership and picker
//! - Upload queue for offline records

pub mod challenges;
pub mod history;
pub mod stats;
pub mod sync;
pub mod timer;
