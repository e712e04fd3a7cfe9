use colored::Colorize;

use crate::features::challenges::ChallengeView;
use crate::features::history::{HistoryPage, HistorySource};
use crate::features::stats::{LeaderboardRow, StatsView};
use crate::features::sync::{QueueStatus, SyncReport};

/// Format a history page as a pretty list
pub fn format_history_pretty(page: &HistoryPage) -> String {
    if page.entries.is_empty() {
        return "History (0 planks)\n  No planks yet".to_string();
    }

    let mut output = format!("History ({} planks)\n", page.entries.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for entry in &page.entries {
        output.push_str(&format!(
            "  {:<12} {}\n",
            entry.day_label,
            entry.clock.bold()
        ));
    }

    if page.source == HistorySource::Cache {
        output.push_str(&format!("{}\n", "(from local cache)".dimmed()));
    }

    output
}

/// Format user stats as pretty output
pub fn format_stats_pretty(view: &StatsView) -> String {
    let mut output = format!("Stats for {}\n", view.display_name.bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    let streak = if view.streak_days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", view.streak_days)
    };

    output.push_str(&format!("  {} {}\n", pad_label("Streak:"), streak));
    output.push_str(&format!(
        "  {} {}\n",
        pad_label("Best:"),
        view.best_clock.bold()
    ));
    output.push_str(&format!(
        "  {} {}\n",
        pad_label("Total planks:"),
        view.total_planks
    ));
    output.push_str(&format!(
        "  {} {}\n",
        pad_label("Monthly rank:"),
        view.rank_label().yellow()
    ));

    output
}

/// Format the monthly leaderboard as a pretty table
pub fn format_leaderboard_pretty(rows: &[LeaderboardRow]) -> String {
    if rows.is_empty() {
        return "Monthly leaderboard (0)\n  No entries this month".to_string();
    }

    let mut output = format!("Monthly leaderboard ({})\n", rows.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for row in rows {
        let line = format!("  {:>3}  {:<24} {}", row.rank, row.display_name, row.clock);
        if row.is_me {
            output.push_str(&line.cyan().bold().to_string());
        } else {
            output.push_str(&line);
        }
        output.push('\n');
    }

    output
}

/// Format challenges as a pretty list
pub fn format_challenges_pretty(views: &[ChallengeView]) -> String {
    if views.is_empty() {
        return "Challenges (0)\n  No active challenges".to_string();
    }

    let mut output = format!("Challenges ({})\n", views.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for view in views {
        let joined_icon = if view.joined {
            "[✓]".green()
        } else {
            "[ ]".white()
        };

        let mut line = format!("{joined_icon} {}", view.title.bold());
        line.push_str(&format!("  {}", view.kind.to_string().cyan()));
        line.push_str(&format!("  {}", view.date_range().yellow()));
        line.push_str(&format!(
            "  {}",
            format!("{} participants", view.participants).dimmed()
        ));

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a sync flush report as pretty output
pub fn format_sync_report_pretty(report: &SyncReport) -> String {
    let synced = format!("{} synced", report.synced);
    let mut output = format!("  {}", synced.green());

    if report.failed > 0 {
        let failed = format!("{} failed", report.failed);
        output.push_str(&format!(", {}", failed.red()));
    }
    if report.remaining > 0 {
        let remaining = format!("{} still pending", report.remaining);
        output.push_str(&format!(", {}", remaining.yellow()));
    }

    output
}

/// Format queue status counts as pretty output
pub fn format_queue_status_pretty(status: &QueueStatus) -> String {
    if status.is_empty() {
        return "Sync queue is empty".to_string();
    }

    let mut output = String::from("Sync queue\n");
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!("  {} {}\n", pad_label("Pending:"), status.pending));
    output.push_str(&format!("  {} {}\n", pad_label("Synced:"), status.synced));
    output.push_str(&format!("  {} {}\n", pad_label("Failed:"), status.failed));

    output
}

// Pad before coloring so ANSI codes do not break the column width.
fn pad_label(label: &str) -> String {
    format!("{label:<14}").dimmed().to_string()
}
