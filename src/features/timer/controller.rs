//! Timing session controller.
//!
//! Owns the session state machine: idle until attested and started,
//! advanced one second per tick by the presentation loop, paused, resumed,
//! or reset on demand, and completed either automatically (count-down
//! reaching zero) or explicitly (count-up save). On completion the
//! controller records the duration through its [`SessionSink`] exactly
//! once; it never retries and never rolls a completed session back.
//!
//! Tick delivery is guarded by an epoch token. `start`/`resume` issue a
//! [`TickToken`] for the current running span; leaving the running state
//! revokes every outstanding token, so a tick that was already scheduled
//! when the user paused or reset arrives stale and is ignored. Issuing a
//! second token while one is live is a caller bug and panics.

use crate::core::SessionSink;
use crate::error::PlankrError;

use super::session::{Mode, SessionState, Snapshot};

/// Grants the holder the right to deliver ticks for one running span.
///
/// Obtained from [`TimerController::start`] or
/// [`TimerController::resume`]; invalidated wholesale when the session
/// leaves the running state. There is no public constructor, so every
/// tick traces back to a transition that legitimately started the span.
#[derive(Debug)]
pub struct TickToken {
    epoch: u64,
}

/// Outcome of completing a session: the fixed duration plus the result of
/// the single persistence write.
#[derive(Debug)]
pub struct Completion {
    /// Final duration in seconds (elapsed or target, depending on mode).
    pub duration_seconds: u32,
    /// Result of the one `record_session` call. A failure here leaves the
    /// session completed; the caller decides whether to park the duration
    /// for a later retry.
    pub record_outcome: Result<(), PlankrError>,
}

impl Completion {
    /// Whether the duration reached durable storage.
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        self.record_outcome.is_ok()
    }
}

/// The session state machine. One instance owns one session at a time; a
/// new session begins only via [`reset`](Self::reset).
pub struct TimerController {
    mode: Mode,
    state: SessionState,
    elapsed_seconds: u32,
    remaining_seconds: u32,
    target_seconds: u32,
    attestation: bool,
    epoch: u64,
    token_live: bool,
    sink: Box<dyn SessionSink>,
}

impl TimerController {
    /// Create an idle controller. Identity travels inside the sink, which
    /// is resolved once at construction and never re-queried per
    /// operation.
    #[must_use]
    pub fn new(sink: Box<dyn SessionSink>) -> Self {
        Self {
            mode: Mode::CountUp,
            state: SessionState::Idle,
            elapsed_seconds: 0,
            remaining_seconds: 0,
            target_seconds: 0,
            attestation: false,
            epoch: 0,
            token_live: false,
            sink,
        }
    }

    /// Set the timing direction.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the session is idle.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), PlankrError> {
        self.require_idle("change the mode")?;
        self.mode = mode;
        Ok(())
    }

    /// Set the count-down target.
    ///
    /// Zero is accepted here (it is the unconfigured default); the
    /// positive-target requirement is enforced by [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the session is idle.
    pub fn set_target_seconds(&mut self, seconds: u32) -> Result<(), PlankrError> {
        self.require_idle("change the target")?;
        self.target_seconds = seconds;
        Ok(())
    }

    /// Set the attestation flag for this attempt.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the session is idle.
    pub fn set_attestation(&mut self, attested: bool) -> Result<(), PlankrError> {
        self.require_idle("change the attestation")?;
        self.attestation = attested;
        Ok(())
    }

    /// Start an idle session, or resume a paused one.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the session is idle and not attested,
    /// if a count-down session has no positive target, or if the session
    /// is already completed.
    ///
    /// # Panics
    ///
    /// Panics if called while a tick token for the current span is still
    /// live: two tick sources for one session is a programming error.
    pub fn start(&mut self) -> Result<TickToken, PlankrError> {
        match self.state {
            SessionState::Idle => {
                if !self.attestation {
                    return Err(PlankrError::validation(
                        "attestation required: confirm the attempt before starting",
                    ));
                }
                if self.mode == Mode::CountDown && self.target_seconds == 0 {
                    return Err(PlankrError::validation(
                        "count-down needs a positive target; set one first",
                    ));
                }
                self.elapsed_seconds = 0;
                self.remaining_seconds = match self.mode {
                    Mode::CountUp => 0,
                    Mode::CountDown => self.target_seconds,
                };
                self.state = SessionState::Running;
                Ok(self.issue_token())
            },
            SessionState::Paused => self.resume(),
            SessionState::Running => {
                // Reaching this state implies a live token exists;
                // issue_token turns it into the mandated panic.
                Ok(self.issue_token())
            },
            SessionState::Completed => Err(PlankrError::validation(
                "session already completed; reset before starting a new one",
            )),
        }
    }

    /// Resume a paused session.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the session is paused.
    pub fn resume(&mut self) -> Result<TickToken, PlankrError> {
        if self.state != SessionState::Paused {
            return Err(PlankrError::validation("no paused session to resume"));
        }
        self.state = SessionState::Running;
        Ok(self.issue_token())
    }

    /// Apply one second of progress.
    ///
    /// A tick presented with a revoked token, or outside the running
    /// state, is ignored: cancellation is decided by the transition that
    /// revoked the token, and a tick already in flight at that moment
    /// must not land. Returns the completion when a count-down session
    /// reaches its zero boundary on this tick.
    pub fn tick(&mut self, token: &TickToken) -> Option<Completion> {
        if token.epoch != self.epoch || self.state != SessionState::Running {
            return None;
        }

        match self.mode {
            Mode::CountUp => {
                self.elapsed_seconds += 1;
                None
            },
            Mode::CountDown => {
                if self.remaining_seconds > 1 {
                    self.remaining_seconds -= 1;
                    None
                } else {
                    // Zero boundary: the tick source stops in the same
                    // transition that completes, so it cannot double-fire.
                    self.remaining_seconds = 0;
                    Some(self.finish(self.target_seconds))
                }
            },
        }
    }

    /// Pause a running session.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the session is running.
    pub fn pause(&mut self) -> Result<(), PlankrError> {
        if self.state != SessionState::Running {
            return Err(PlankrError::validation("no running session to pause"));
        }
        self.revoke_tokens();
        self.state = SessionState::Paused;
        Ok(())
    }

    /// Save a count-up session as completed.
    ///
    /// # Errors
    ///
    /// Returns a validation error in count-down mode (completion there is
    /// automatic), outside the running/paused states, or with nothing
    /// accumulated yet. The session state is unchanged on error.
    pub fn complete(&mut self) -> Result<Completion, PlankrError> {
        if self.mode != Mode::CountUp {
            return Err(PlankrError::validation(
                "count-down sessions complete automatically at zero",
            ));
        }
        if !matches!(self.state, SessionState::Running | SessionState::Paused) {
            return Err(PlankrError::validation("no active session to save"));
        }
        if self.elapsed_seconds == 0 {
            return Err(PlankrError::validation("nothing to save yet"));
        }
        Ok(self.finish(self.elapsed_seconds))
    }

    /// Discard the current session and return to idle.
    ///
    /// Counters are zeroed and the attestation flag is cleared; each new
    /// session requires re-attestation. Mode and target are configuration
    /// and survive the reset.
    pub fn reset(&mut self) {
        self.revoke_tokens();
        self.state = SessionState::Idle;
        self.elapsed_seconds = 0;
        self.remaining_seconds = 0;
        self.attestation = false;
    }

    /// Current read-only view for rendering.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            mode: self.mode,
            elapsed_seconds: self.elapsed_seconds,
            remaining_seconds: self.remaining_seconds,
            target_seconds: self.target_seconds,
            attestation: self.attestation,
        }
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    fn require_idle(&self, what: &str) -> Result<(), PlankrError> {
        if self.state == SessionState::Idle {
            Ok(())
        } else {
            Err(PlankrError::validation(format!(
                "cannot {what} while the session is {}",
                self.state
            )))
        }
    }

    fn issue_token(&mut self) -> TickToken {
        assert!(
            !self.token_live,
            "tick source already active for this session"
        );
        self.token_live = true;
        TickToken { epoch: self.epoch }
    }

    fn revoke_tokens(&mut self) {
        self.epoch += 1;
        self.token_live = false;
    }

    /// Fix the final duration, stop ticks, and perform the single
    /// persistence write.
    fn finish(&mut self, duration_seconds: u32) -> Completion {
        self.revoke_tokens();
        self.state = SessionState::Completed;
        let record_outcome = self.sink.record_session(duration_seconds);
        Completion {
            duration_seconds,
            record_outcome,
        }
    }
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("elapsed_seconds", &self.elapsed_seconds)
            .field("remaining_seconds", &self.remaining_seconds)
            .field("target_seconds", &self.target_seconds)
            .field("attestation", &self.attestation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::core::MockSessionSink;

    fn controller_with(mock: MockSessionSink) -> TimerController {
        TimerController::new(Box::new(mock))
    }

    fn silent_controller() -> TimerController {
        // No expectations: any record_session call fails the test.
        controller_with(MockSessionSink::new())
    }

    #[test]
    fn test_initial_state() {
        let controller = silent_controller();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, SessionState::Idle);
        assert_eq!(snapshot.mode, Mode::CountUp);
        assert_eq!(snapshot.elapsed_seconds, 0);
        assert_eq!(snapshot.remaining_seconds, 0);
        assert!(!snapshot.attestation);
    }

    #[test]
    fn test_start_requires_attestation() {
        let mut controller = silent_controller();
        let err = controller.start().unwrap_err();
        assert!(err.to_string().contains("attestation"));
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[test]
    fn test_count_down_start_requires_positive_target() {
        let mut controller = silent_controller();
        controller.set_mode(Mode::CountDown).unwrap();
        controller.set_attestation(true).unwrap();

        let err = controller.start().unwrap_err();
        assert!(err.to_string().contains("target"));
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[test]
    fn test_setters_rejected_outside_idle() {
        let mut controller = silent_controller();
        controller.set_attestation(true).unwrap();
        let _token = controller.start().unwrap();

        assert!(controller.set_mode(Mode::CountDown).is_err());
        assert!(controller.set_target_seconds(60).is_err());
        assert!(controller.set_attestation(false).is_err());
        assert_eq!(controller.state(), SessionState::Running);
    }

    #[test]
    fn test_count_up_session_records_elapsed_once() {
        let mut mock = MockSessionSink::new();
        mock.expect_record_session()
            .with(eq(185))
            .times(1)
            .returning(|_| Ok(()));
        let mut controller = controller_with(mock);

        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();

        for _ in 0..185 {
            assert!(controller.tick(&token).is_none());
        }
        assert_eq!(controller.state(), SessionState::Running);
        assert_eq!(controller.snapshot().elapsed_seconds, 185);

        let completion = controller.complete().unwrap();
        assert_eq!(completion.duration_seconds, 185);
        assert!(completion.is_recorded());
        assert_eq!(controller.state(), SessionState::Completed);
    }

    #[test]
    fn test_count_down_completes_on_final_tick() {
        let mut mock = MockSessionSink::new();
        mock.expect_record_session()
            .with(eq(30))
            .times(1)
            .returning(|_| Ok(()));
        let mut controller = controller_with(mock);

        controller.set_mode(Mode::CountDown).unwrap();
        controller.set_target_seconds(30).unwrap();
        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();

        for _ in 0..29 {
            assert!(controller.tick(&token).is_none());
        }
        assert_eq!(controller.state(), SessionState::Running);
        assert_eq!(controller.snapshot().remaining_seconds, 1);

        let completion = controller.tick(&token).unwrap();
        assert_eq!(completion.duration_seconds, 30);
        assert_eq!(controller.state(), SessionState::Completed);
        assert_eq!(controller.snapshot().remaining_seconds, 0);
    }

    #[test]
    fn test_count_down_does_not_double_fire() {
        let mut mock = MockSessionSink::new();
        mock.expect_record_session()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(()));
        let mut controller = controller_with(mock);

        controller.set_mode(Mode::CountDown).unwrap();
        controller.set_target_seconds(2).unwrap();
        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();

        assert!(controller.tick(&token).is_none());
        assert!(controller.tick(&token).is_some());

        // The completing transition revoked the token; a straggler tick
        // must not restart or re-record anything.
        assert!(controller.tick(&token).is_none());
        assert_eq!(controller.state(), SessionState::Completed);
        assert_eq!(controller.snapshot().remaining_seconds, 0);
    }

    #[test]
    fn test_late_tick_after_pause_is_ignored() {
        let mut controller = silent_controller();
        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();

        for _ in 0..10 {
            controller.tick(&token);
        }
        controller.pause().unwrap();

        assert!(controller.tick(&token).is_none());
        assert_eq!(controller.snapshot().elapsed_seconds, 10);
        assert_eq!(controller.state(), SessionState::Paused);
    }

    #[test]
    fn test_late_tick_after_reset_is_ignored() {
        let mut controller = silent_controller();
        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();
        controller.tick(&token);

        controller.reset();

        assert!(controller.tick(&token).is_none());
        assert_eq!(controller.snapshot().elapsed_seconds, 0);
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[test]
    fn test_stale_token_from_before_resume_is_dead() {
        let mut controller = silent_controller();
        controller.set_attestation(true).unwrap();
        let first = controller.start().unwrap();
        for _ in 0..5 {
            controller.tick(&first);
        }
        controller.pause().unwrap();
        let second = controller.resume().unwrap();

        assert!(controller.tick(&first).is_none());
        assert_eq!(controller.snapshot().elapsed_seconds, 5);

        for _ in 0..5 {
            controller.tick(&second);
        }
        assert_eq!(controller.snapshot().elapsed_seconds, 10);
    }

    #[test]
    fn test_start_from_paused_resumes() {
        let mut controller = silent_controller();
        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();
        for _ in 0..3 {
            controller.tick(&token);
        }
        controller.pause().unwrap();

        let resumed = controller.start().unwrap();
        controller.tick(&resumed);
        assert_eq!(controller.snapshot().elapsed_seconds, 4);
        assert_eq!(controller.state(), SessionState::Running);
    }

    #[test]
    #[should_panic(expected = "tick source already active")]
    fn test_double_start_panics() {
        let mut controller = silent_controller();
        controller.set_attestation(true).unwrap();
        let _first = controller.start().unwrap();
        let _second = controller.start();
    }

    #[test]
    fn test_reset_clears_counters_and_attestation() {
        let mut controller = silent_controller();
        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();
        for _ in 0..7 {
            controller.tick(&token);
        }
        controller.pause().unwrap();

        controller.reset();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, SessionState::Idle);
        assert_eq!(snapshot.elapsed_seconds, 0);
        assert_eq!(snapshot.remaining_seconds, 0);
        assert!(!snapshot.attestation);
    }

    #[test]
    fn test_reset_from_completed_allows_new_session() {
        let mut mock = MockSessionSink::new();
        mock.expect_record_session()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_record_session()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));
        let mut controller = controller_with(mock);

        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();
        for _ in 0..3 {
            controller.tick(&token);
        }
        controller.complete().unwrap();

        // Completed is terminal until an explicit reset.
        assert!(controller.start().is_err());

        controller.reset();
        assert!(!controller.snapshot().attestation);

        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();
        for _ in 0..5 {
            controller.tick(&token);
        }
        let completion = controller.complete().unwrap();
        assert_eq!(completion.duration_seconds, 5);
    }

    #[test]
    fn test_complete_needs_elapsed_time() {
        let mut controller = silent_controller();
        controller.set_attestation(true).unwrap();
        let _token = controller.start().unwrap();

        let err = controller.complete().unwrap_err();
        assert!(err.to_string().contains("nothing to save"));
        assert_eq!(controller.state(), SessionState::Running);
    }

    #[test]
    fn test_complete_rejected_in_count_down() {
        let mut controller = silent_controller();
        controller.set_mode(Mode::CountDown).unwrap();
        controller.set_target_seconds(60).unwrap();
        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();
        controller.tick(&token);

        assert!(controller.complete().is_err());
        assert_eq!(controller.state(), SessionState::Running);
    }

    #[test]
    fn test_complete_from_paused() {
        let mut mock = MockSessionSink::new();
        mock.expect_record_session()
            .with(eq(12))
            .times(1)
            .returning(|_| Ok(()));
        let mut controller = controller_with(mock);

        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();
        for _ in 0..12 {
            controller.tick(&token);
        }
        controller.pause().unwrap();

        let completion = controller.complete().unwrap();
        assert_eq!(completion.duration_seconds, 12);
        assert_eq!(controller.state(), SessionState::Completed);
    }

    #[test]
    fn test_failed_record_keeps_session_completed() {
        let mut mock = MockSessionSink::new();
        mock.expect_record_session()
            .with(eq(9))
            .times(1)
            .returning(|_| Err(PlankrError::Platform("write refused".to_string())));
        let mut controller = controller_with(mock);

        controller.set_attestation(true).unwrap();
        let token = controller.start().unwrap();
        for _ in 0..9 {
            controller.tick(&token);
        }

        let completion = controller.complete().unwrap();
        assert_eq!(completion.duration_seconds, 9);
        assert!(!completion.is_recorded());
        // The duration is not lost and the session is not resurrected.
        assert_eq!(controller.state(), SessionState::Completed);
    }

    #[test]
    fn test_pause_rejected_outside_running() {
        let mut controller = silent_controller();
        assert!(controller.pause().is_err());

        controller.set_attestation(true).unwrap();
        let _token = controller.start().unwrap();
        controller.pause().unwrap();
        assert!(controller.pause().is_err());
    }
}
