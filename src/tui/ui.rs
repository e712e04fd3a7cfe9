//! UI rendering for the timer screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::core::format_clock;
use crate::features::timer::{Mode, SessionState, Snapshot};
use crate::tui::app::{App, SessionOutcome};

/// Render the timer screen.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, timer body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Timer
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let snapshot = app.snapshot();
    render_header(frame, &snapshot, chunks[0]);
    render_timer(frame, app, &snapshot, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, snapshot: &Snapshot, area: Rect) {
    let title = match snapshot.mode {
        Mode::CountUp => " plankr timer (count-up) ".to_string(),
        Mode::CountDown => format!(
            " plankr timer (count-down from {}) ",
            format_clock(snapshot.target_seconds)
        ),
    };

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the clock, the session state, and the count-down gauge.
fn render_timer(frame: &mut Frame<'_>, app: &App, snapshot: &Snapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(1), // Clock
            Constraint::Length(1),
            Constraint::Length(1), // State
            Constraint::Length(1), // Hint or outcome
            Constraint::Length(1),
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(area);

    let clock_color = match snapshot.state {
        SessionState::Idle => Color::White,
        SessionState::Running => Color::Green,
        SessionState::Paused => Color::Yellow,
        SessionState::Completed => Color::Cyan,
    };
    let clock = Paragraph::new(snapshot.clock())
        .alignment(Alignment::Center)
        .style(Style::default().fg(clock_color).add_modifier(Modifier::BOLD));
    frame.render_widget(clock, chunks[1]);

    let state = Paragraph::new(snapshot.state.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    frame.render_widget(state, chunks[3]);

    let (hint, hint_color) = hint_line(app, snapshot);
    let hint = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .style(Style::default().fg(hint_color));
    frame.render_widget(hint, chunks[4]);

    // The gauge only means something when counting toward a target.
    if snapshot.mode == Mode::CountDown && snapshot.target_seconds > 0 {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
            .ratio(snapshot.progress())
            .use_unicode(true);
        frame.render_widget(gauge, centered(chunks[6], 60));
    }
}

/// One line of guidance under the state, or the outcome after completion.
fn hint_line(app: &App, snapshot: &Snapshot) -> (String, Color) {
    if let Some(outcome) = &app.outcome {
        return match outcome {
            SessionOutcome::Saved { seconds } => (
                format!("{} recorded on the platform", format_clock(*seconds)),
                Color::Green,
            ),
            SessionOutcome::Queued { seconds, .. } => (
                format!(
                    "{} saved locally; run 'plankr sync' to upload",
                    format_clock(*seconds)
                ),
                Color::Yellow,
            ),
            SessionOutcome::Lost { error, .. } => (format!("not saved: {error}"), Color::Red),
        };
    }

    match snapshot.state {
        SessionState::Idle if !snapshot.attestation => {
            ("press a to confirm you are in position".to_string(), Color::Yellow)
        }
        SessionState::Idle => ("ready, press s to start".to_string(), Color::Green),
        SessionState::Paused => ("press s to resume".to_string(), Color::DarkGray),
        SessionState::Running if snapshot.mode == Mode::CountUp => {
            ("press c when you drop".to_string(), Color::DarkGray)
        }
        _ => (String::new(), Color::DarkGray),
    }
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("a:attest | s:start/resume | space:pause | c:complete | r:reset | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Center a bar of `percent` width inside `area`.
fn centered(area: Rect, percent: u16) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(area);
    chunks[1]
}
