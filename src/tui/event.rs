//! Event handling for the timer screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::error::PlankrError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the timer.
    Quit,
    /// Toggle the ready-to-plank attestation.
    ToggleAttestation,
    /// Start an idle session or resume a paused one.
    StartResume,
    /// Pause the running session.
    Pause,
    /// Complete a count-up session.
    Complete,
    /// Reset back to idle.
    Reset,
}

/// Poll for the next key press and translate it into an [`Action`].
///
/// Returns None if the timeout elapses without relevant input, which
/// is how the timer gets its once-a-second redraw.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_action(timeout: Duration) -> Result<Option<Action>, PlankrError> {
    if !event::poll(timeout).map_err(|e| PlankrError::Config(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    if let Event::Key(key) =
        event::read().map_err(|e| PlankrError::Config(format!("Event read failed: {e}")))?
    {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('a') => Some(Action::ToggleAttestation),
            KeyCode::Char('s') => Some(Action::StartResume),
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::Pause),
            KeyCode::Char('c') => Some(Action::Complete),
            KeyCode::Char('r') => Some(Action::Reset),
            _ => None,
        };
        return Ok(action);
    }

    Ok(None)
}
