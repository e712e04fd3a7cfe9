//! Configuration management for plankr.
//!
//! This module handles loading and saving configuration from `~/.plankr/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, HistoryConfig, PlatformConfig, TimerConfig};
