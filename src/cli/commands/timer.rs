//! Timer command implementation.
//!
//! Runs the interactive plank timer, either as the full-screen TUI or as
//! a plain single-line loop for terminals that can't take over the
//! screen. Both share the same [`App`] state and key bindings.

use std::io::{self, Write};

use colored::Colorize;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serde::Serialize;

use crate::cli::args::{OutputFormat, TimerArgs};
use crate::config::Config;
use crate::core::{format_clock, parse_duration};
use crate::error::PlankrError;
use crate::features::sync::PendingQueue;
use crate::features::timer::{Mode, SessionState, Snapshot, TimerController};
use crate::output::to_json;
use crate::platform::PlatformClient;
use crate::tui::{self, poll_action, Action, App, SessionOutcome};

/// Receipt for a plank timed interactively.
#[derive(Serialize)]
struct TimerReceipt {
    duration_s: u32,
    status: &'static str,
}

/// Execute timer command
///
/// # Errors
///
/// Returns an error if the mode or target is invalid, the platform is
/// not configured, or the terminal cannot be set up.
pub fn timer(
    config: &Config,
    args: &TimerArgs,
    format: OutputFormat,
) -> Result<String, PlankrError> {
    let mode = match args.mode.as_deref() {
        Some(s) => Mode::parse(s).ok_or_else(|| {
            PlankrError::Validation(format!("unknown timer mode '{s}'; use 'up' or 'down'"))
        })?,
        None => config.timer.default_mode,
    };
    let target = match args.target.as_deref() {
        Some(s) => parse_duration(s).ok_or_else(|| {
            PlankrError::Validation(format!(
                "could not parse target '{s}'; try 90, 1:30, or 2m30s"
            ))
        })?,
        None => config.timer.default_target_seconds,
    };

    let client = PlatformClient::from_config(config)?;
    let mut controller = TimerController::new(Box::new(client));
    controller.set_mode(mode)?;
    controller.set_target_seconds(target)?;

    let queue = PendingQueue::new()?;
    let mut app = App::new(controller, queue);

    if args.no_tui {
        run_plain(&mut app)?;
    } else {
        tui::run(&mut app)?;
    }

    outcome_summary(app.outcome.as_ref(), format)
}

/// Single-line timer loop for `--no-tui`.
fn run_plain(app: &mut App) -> Result<(), PlankrError> {
    enable_raw_mode()
        .map_err(|e| PlankrError::Config(format!("Failed to enable raw mode: {e}")))?;
    let result = plain_loop(app);
    disable_raw_mode().ok();
    println!();
    result
}

fn plain_loop(app: &mut App) -> Result<(), PlankrError> {
    loop {
        let snapshot = app.snapshot();
        let line = format!(
            "{} [{}] {}",
            snapshot.clock(),
            snapshot.state,
            plain_hint(app, &snapshot)
        );
        print!("\r{line:<70}");
        io::stdout().flush()?;

        if let Some(action) = poll_action(app.timeout())? {
            match action {
                Action::Quit => break,
                Action::ToggleAttestation => app.toggle_attestation(),
                Action::StartResume => app.start_or_resume(),
                Action::Pause => app.pause(),
                Action::Complete => app.complete(),
                Action::Reset => app.reset(),
            }
        }
        app.advance();

        // The plain loop runs one session; the summary is printed after.
        if app.outcome.is_some() {
            break;
        }
    }

    Ok(())
}

fn plain_hint(app: &App, snapshot: &Snapshot) -> String {
    if let Some(status) = &app.status {
        return status.clone();
    }

    match snapshot.state {
        SessionState::Idle if !snapshot.attestation => {
            "a:attest, then s:start, q:quit".to_string()
        }
        SessionState::Idle => "s:start, q:quit".to_string(),
        SessionState::Paused => "s:resume, r:reset, q:quit".to_string(),
        SessionState::Running if snapshot.mode == Mode::CountUp => {
            "c:finish, space:pause".to_string()
        }
        _ => "space:pause".to_string(),
    }
}

/// Render the post-session outcome for the terminal.
fn outcome_summary(
    outcome: Option<&SessionOutcome>,
    format: OutputFormat,
) -> Result<String, PlankrError> {
    match outcome {
        None => match format {
            OutputFormat::Json => Ok("null".to_string()),
            OutputFormat::Pretty => Ok(String::new()),
        },
        Some(SessionOutcome::Saved { seconds }) => match format {
            OutputFormat::Json => to_json(&TimerReceipt {
                duration_s: *seconds,
                status: "recorded",
            }),
            OutputFormat::Pretty => Ok(format!("Recorded a {} plank", format_clock(*seconds))),
        },
        Some(SessionOutcome::Queued { seconds, error }) => match format {
            OutputFormat::Json => to_json(&TimerReceipt {
                duration_s: *seconds,
                status: "queued",
            }),
            OutputFormat::Pretty => Ok(format!(
                "Platform unreachable ({error}); saved a {} plank locally.\nRun 'plankr sync' to upload it.",
                format_clock(*seconds)
            )),
        },
        Some(SessionOutcome::Lost { seconds, error }) => match format {
            OutputFormat::Json => to_json(&TimerReceipt {
                duration_s: *seconds,
                status: "lost",
            }),
            OutputFormat::Pretty => Ok(format!(
                "A {} plank was NOT saved: {error}",
                format_clock(*seconds)
            )
            .red()
            .to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MockSessionSink;
    use crate::storage::Database;

    fn test_app() -> App {
        let controller = TimerController::new(Box::new(MockSessionSink::new()));
        let queue = PendingQueue::with_database(Database::open_in_memory().unwrap());
        App::new(controller, queue)
    }

    #[test]
    fn test_outcome_summary_empty_when_abandoned() {
        let text = outcome_summary(None, OutputFormat::Pretty).unwrap();
        assert!(text.is_empty());

        let json = outcome_summary(None, OutputFormat::Json).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn test_outcome_summary_saved() {
        let outcome = SessionOutcome::Saved { seconds: 95 };
        let text = outcome_summary(Some(&outcome), OutputFormat::Pretty).unwrap();
        assert!(text.contains("01:35"));

        let json = outcome_summary(Some(&outcome), OutputFormat::Json).unwrap();
        assert!(json.contains("\"recorded\""));
        assert!(json.contains("95"));
    }

    #[test]
    fn test_outcome_summary_queued_mentions_sync() {
        let outcome = SessionOutcome::Queued {
            seconds: 30,
            error: "network error: timeout".to_string(),
        };
        let text = outcome_summary(Some(&outcome), OutputFormat::Pretty).unwrap();
        assert!(text.contains("plankr sync"));
    }

    #[test]
    fn test_plain_hint_asks_for_attestation_first() {
        let app = test_app();
        let hint = plain_hint(&app, &app.snapshot());
        assert!(hint.contains("a:attest"));
    }

    #[test]
    fn test_plain_hint_prefers_status_message() {
        let mut app = test_app();
        app.status = Some("attestation required".to_string());
        let hint = plain_hint(&app, &app.snapshot());
        assert_eq!(hint, "attestation required");
    }
}
