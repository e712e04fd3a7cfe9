//! Plank timing sessions.
//!
//! One parameterized state machine drives every timed plank:
//! - Count-up (stopwatch) and count-down (target) modes
//! - An attestation gate before starting
//! - Pause/resume/reset, with race-free tick cancellation
//! - Exactly one recorded duration per completed session

pub mod controller;
pub mod session;

pub use controller::{Completion, TickToken, TimerController};
pub use session::{Mode, SessionState, Snapshot};
