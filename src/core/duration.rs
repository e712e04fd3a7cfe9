//! Duration parsing and clock formatting.
//!
//! Plank durations are short, so bare numbers are seconds and the
//! canonical display form is a `MM:SS` clock. Accepted input forms:
//! `90`, `1:30`, `1:02:03`, `45s`, `2m30s`, `1h2m`.

use once_cell::sync::Lazy;
use regex::Regex;

static CLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d{1,3}):)?([0-5]?\d):([0-5]\d)$")
        .unwrap_or_else(|e| panic!("Invalid clock regex: {e}"))
});

static UNITS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)h)?\s*(?:(\d+)m)?\s*(?:(\d+)s)?$")
        .unwrap_or_else(|e| panic!("Invalid units regex: {e}"))
});

/// Parse a duration string into whole seconds.
///
/// Supports clock forms (`1:30`, `1:02:03`), unit forms (`90s`, `2m30s`,
/// `1h`), and bare numbers interpreted as seconds. Returns `None` for
/// anything unparseable or non-positive.
#[must_use]
pub fn parse_duration(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    // Bare number: seconds
    if let Ok(seconds) = s.parse::<u32>() {
        return if seconds > 0 { Some(seconds) } else { None };
    }

    if let Some(caps) = CLOCK_PATTERN.captures(&s) {
        let hours: u32 = caps.get(1).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        let minutes: u32 = caps.get(2)?.as_str().parse().ok()?;
        let seconds: u32 = caps.get(3)?.as_str().parse().ok()?;
        let total = hours * 3600 + minutes * 60 + seconds;
        return if total > 0 { Some(total) } else { None };
    }

    if let Some(caps) = UNITS_PATTERN.captures(&s) {
        let hours: u32 = caps.get(1).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        let minutes: u32 = caps.get(2).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        let seconds: u32 = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        if caps.get(1).is_none() && caps.get(2).is_none() && caps.get(3).is_none() {
            return None;
        }
        let total = hours * 3600 + minutes * 60 + seconds;
        return if total > 0 { Some(total) } else { None };
    }

    None
}

/// Format whole seconds as a clock string: `MM:SS`, or `H:MM:SS` past an
/// hour.
#[must_use]
pub fn format_clock(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Format whole seconds as a short human string (e.g. "45s", "2m 30s",
/// "1h 5m").
#[must_use]
pub fn format_duration_short(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 && seconds > 0 {
        format!("{minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{seconds}s")
    }
}
