//! Terminal User Interface (TUI) for the plank timer.
//!
//! Full-screen timer with the attestation gate, pause/resume, and the
//! post-session outcome. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, SessionOutcome};
pub use event::{poll_action, Action};

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::PlankrError;

/// Run the full-screen timer until the user quits.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(app: &mut App) -> Result<(), PlankrError> {
    // Setup terminal
    enable_raw_mode().map_err(|e| PlankrError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| PlankrError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PlankrError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main timer loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), PlankrError> {
    loop {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PlankrError::Config(format!("Failed to draw: {e}")))?;

        // Handle events, sleeping no longer than the next due tick
        if let Some(action) = event::poll_action(app.timeout())? {
            match action {
                Action::Quit => break,
                Action::ToggleAttestation => app.toggle_attestation(),
                Action::StartResume => app.start_or_resume(),
                Action::Pause => app.pause(),
                Action::Complete => app.complete(),
                Action::Reset => app.reset(),
            }
        }

        // Deliver ticks that came due while waiting
        app.advance();
    }

    Ok(())
}
