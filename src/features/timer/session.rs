//! Session data model: modes, lifecycle states, and the read-only
//! snapshot handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::core::format_clock;

/// Timing direction for a session. Fixed for the lifetime of one session;
/// selectable only while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Open-ended stopwatch; the user decides when to save.
    CountUp,
    /// Counts down from a target; completes automatically at zero.
    CountDown,
}

impl Mode {
    /// Parse a mode from user input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "count-up" | "countup" | "stopwatch" => Some(Self::CountUp),
            "down" | "count-down" | "countdown" | "target" => Some(Self::CountDown),
            _ => None,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::CountUp => "Count-Up",
            Self::CountDown => "Count-Down",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Awaiting configuration and attestation
    Idle,
    /// Ticks are being applied
    Running,
    /// Suspended; counters hold their values
    Paused,
    /// Final duration fixed; no further ticks
    Completed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Read-only view of a session, emitted after every transition.
///
/// The presentation layer renders from this and never mutates counters
/// directly; all mutation goes through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Current lifecycle state
    pub state: SessionState,
    /// Timing direction
    pub mode: Mode,
    /// Seconds accumulated (count-up)
    pub elapsed_seconds: u32,
    /// Seconds left to the target (count-down)
    pub remaining_seconds: u32,
    /// Configured target (count-down)
    pub target_seconds: u32,
    /// Whether the user has attested this attempt
    pub attestation: bool,
}

impl Snapshot {
    /// The counter a display should show for the current mode.
    #[must_use]
    pub const fn display_seconds(&self) -> u32 {
        match self.mode {
            Mode::CountUp => self.elapsed_seconds,
            Mode::CountDown => self.remaining_seconds,
        }
    }

    /// The display counter formatted as a clock.
    #[must_use]
    pub fn clock(&self) -> String {
        format_clock(self.display_seconds())
    }

    /// Progress toward the target (count-down only), 0.0 - 1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.mode == Mode::CountUp || self.target_seconds == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_seconds as f64 / self.target_seconds as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("up"), Some(Mode::CountUp));
        assert_eq!(Mode::parse("stopwatch"), Some(Mode::CountUp));
        assert_eq!(Mode::parse("DOWN"), Some(Mode::CountDown));
        assert_eq!(Mode::parse("countdown"), Some(Mode::CountDown));
        assert_eq!(Mode::parse("sideways"), None);
    }

    #[test]
    fn test_display_seconds_follows_mode() {
        let up = Snapshot {
            state: SessionState::Running,
            mode: Mode::CountUp,
            elapsed_seconds: 42,
            remaining_seconds: 0,
            target_seconds: 0,
            attestation: true,
        };
        assert_eq!(up.display_seconds(), 42);
        assert_eq!(up.clock(), "00:42");

        let down = Snapshot {
            mode: Mode::CountDown,
            remaining_seconds: 75,
            target_seconds: 90,
            ..up
        };
        assert_eq!(down.display_seconds(), 75);
        assert_eq!(down.clock(), "01:15");
    }

    #[test]
    fn test_progress() {
        let snapshot = Snapshot {
            state: SessionState::Running,
            mode: Mode::CountDown,
            elapsed_seconds: 0,
            remaining_seconds: 30,
            target_seconds: 120,
            attestation: true,
        };
        assert!((snapshot.progress() - 0.75).abs() < f64::EPSILON);

        let up = Snapshot {
            mode: Mode::CountUp,
            ..snapshot
        };
        assert!(up.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "Idle");
        assert_eq!(SessionState::Completed.to_string(), "Completed");
    }
}
