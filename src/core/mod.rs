//! Core abstractions for plankr.
//!
//! This module provides shared utilities and the seam traits used across
//! features: duration parsing/formatting, day labelling, and the
//! persistence boundary consumed by the timer controller.

mod datetime;
mod duration;
mod traits;

pub use datetime::{day_label, day_label_on, today_local};
pub use duration::{format_clock, format_duration_short, parse_duration};
pub use traits::SessionSink;

#[cfg(test)]
pub use traits::MockSessionSink;
