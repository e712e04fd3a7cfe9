//! plankr - A plank timer and tracker with a hosted leaderboard
//!
//! This crate times plank holds, records them to a hosted platform, and
//! shows history, stats, and community challenges from the terminal.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod platform;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PlankrError;
pub use platform::PlatformClient;
