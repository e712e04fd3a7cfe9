//! Application state for the timer screen.

use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::core::today_local;
use crate::features::sync::{park_record, PendingQueue};
use crate::features::timer::{Completion, SessionState, Snapshot, TickToken, TimerController};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// What happened to a finished session's record.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Uploaded to the platform
    Saved { seconds: u32 },
    /// Upload failed; parked for `plankr sync`
    Queued { seconds: u32, error: String },
    /// Upload failed and the record could not be queued either
    Lost { seconds: u32, error: String },
}

/// Timer screen state.
///
/// Owns the controller and the live tick token. The 1-second cadence
/// lives here: the event loop polls with [`App::timeout`] and calls
/// [`App::advance`] so ticks land on second boundaries.
pub struct App {
    controller: TimerController,
    queue: PendingQueue,
    token: Option<TickToken>,
    next_tick: Instant,
    /// Result of the completed session's write, if any.
    pub outcome: Option<SessionOutcome>,
    /// Transient message for the status bar.
    pub status: Option<String>,
}

impl App {
    /// Create the timer screen around a prepared controller.
    #[must_use]
    pub fn new(controller: TimerController, queue: PendingQueue) -> Self {
        Self {
            controller,
            queue,
            token: None,
            next_tick: Instant::now(),
            outcome: None,
            status: None,
        }
    }

    /// Current session snapshot for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.controller.snapshot()
    }

    /// How long the event loop may sleep before the next due tick.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        if self.controller.state() == SessionState::Running {
            self.next_tick.saturating_duration_since(Instant::now())
        } else {
            IDLE_POLL
        }
    }

    /// Deliver any ticks whose second boundary has passed.
    pub fn advance(&mut self) {
        while self.controller.state() == SessionState::Running && Instant::now() >= self.next_tick {
            self.next_tick += Duration::from_secs(1);

            let completion = match self.token.as_ref() {
                Some(token) => self.controller.tick(token),
                None => None,
            };
            if let Some(completion) = completion {
                self.finish(completion);
            }
        }
    }

    /// Toggle the attestation gate.
    pub fn toggle_attestation(&mut self) {
        let attested = self.snapshot().attestation;
        match self.controller.set_attestation(!attested) {
            Ok(()) => self.status = None,
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Start a fresh session or resume a paused one.
    pub fn start_or_resume(&mut self) {
        // A second 's' while running is a no-op, not a second tick source.
        if self.controller.state() == SessionState::Running {
            return;
        }

        match self.controller.start() {
            Ok(token) => {
                self.token = Some(token);
                self.next_tick = Instant::now() + Duration::from_secs(1);
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Pause the running session.
    pub fn pause(&mut self) {
        match self.controller.pause() {
            Ok(()) => {
                self.token = None;
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Complete a count-up session at its current elapsed time.
    pub fn complete(&mut self) {
        match self.controller.complete() {
            Ok(completion) => self.finish(completion),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Reset back to idle for another attempt.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.token = None;
        self.outcome = None;
        self.status = None;
    }

    fn finish(&mut self, completion: Completion) {
        self.token = None;
        let seconds = completion.duration_seconds;

        self.outcome = Some(match completion.record_outcome {
            Ok(()) => SessionOutcome::Saved { seconds },
            Err(e) => self.park(seconds, today_local(), &e.to_string()),
        });
    }

    fn park(&self, seconds: u32, date: NaiveDate, error: &str) -> SessionOutcome {
        match park_record(&self.queue, seconds, date) {
            Ok(_) => SessionOutcome::Queued {
                seconds,
                error: error.to_string(),
            },
            Err(queue_error) => SessionOutcome::Lost {
                seconds,
                error: format!("{error}; {queue_error}"),
            },
        }
    }
}
