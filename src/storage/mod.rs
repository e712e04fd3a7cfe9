//! Storage layer for plankr.
//!
//! This module provides SQLite-based persistence for:
//! - The local plank history cache (offline display)
//! - The pending-record queue (completed sessions awaiting upload)

mod database;
mod migrations;

pub use database::Database;
