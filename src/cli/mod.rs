//! Command-line interface for plankr.

pub mod args;
pub mod commands;
