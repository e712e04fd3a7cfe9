//! Command implementations for plankr.
//!
//! This module contains the implementation of all CLI commands.

mod challenge;
mod timer;

pub use challenge::challenge;
pub use timer::timer;

use chrono::NaiveDate;
use clap::CommandFactory;
use clap_complete::Shell;
use serde::Serialize;

use crate::cli::args::{
    Cli, ConfigCommands, HistoryArgs, LeaderboardArgs, LogArgs, OutputFormat, SyncArgs,
};
use crate::config::{Config, Paths};
use crate::core::{day_label, format_clock, parse_duration, today_local};
use crate::error::PlankrError;
use crate::features::history::{self, PlankCache};
use crate::features::stats::{leaderboard_rows, StatsView};
use crate::features::sync::{park_record, PendingQueue, SyncReport};
use crate::output::{
    format_history, format_leaderboard, format_queue_status, format_stats, format_sync_report,
    to_json,
};
use crate::platform::PlatformClient;

/// Receipt for a plank recorded via `plankr log`.
#[derive(Serialize)]
struct LogReceipt {
    duration_s: u32,
    plank_date: NaiveDate,
    status: &'static str,
}

/// Execute log command
///
/// # Errors
///
/// Returns an error if the duration or date is invalid, the platform is
/// not configured, or recording fails for a non-retryable reason.
pub fn log(config: &Config, args: &LogArgs, format: OutputFormat) -> Result<String, PlankrError> {
    let duration = parse_duration(&args.duration).ok_or_else(|| {
        PlankrError::Validation(format!(
            "could not parse duration '{}'; try 90, 1:30, or 2m30s",
            args.duration
        ))
    })?;
    if duration == 0 {
        return Err(PlankrError::validation("cannot log a zero-second plank"));
    }
    let date = parse_plank_date(args.date.as_deref())?;

    let client = PlatformClient::from_config(config)?;
    match client.record_plank(duration, date) {
        Ok(()) => match format {
            OutputFormat::Json => to_json(&LogReceipt {
                duration_s: duration,
                plank_date: date,
                status: "recorded",
            }),
            OutputFormat::Pretty => Ok(format!(
                "Recorded a {} plank for {}",
                format_clock(duration),
                day_label(date)
            )),
        },
        Err(e) if e.is_retryable() => {
            let queue = PendingQueue::new()?;
            park_record(&queue, duration, date)?;
            match format {
                OutputFormat::Json => to_json(&LogReceipt {
                    duration_s: duration,
                    plank_date: date,
                    status: "queued",
                }),
                OutputFormat::Pretty => Ok(format!(
                    "Platform unreachable ({e}); queued a {} plank for {}.\nRun 'plankr sync' to upload it.",
                    format_clock(duration),
                    day_label(date)
                )),
            }
        }
        Err(e) => Err(e),
    }
}

/// Parse a `--date` value, defaulting to today.
fn parse_plank_date(input: Option<&str>) -> Result<NaiveDate, PlankrError> {
    let today = today_local();
    let date = match input {
        None => today,
        Some(s) => match s.to_lowercase().as_str() {
            "today" => today,
            "yesterday" => today.pred_opt().unwrap_or(today),
            _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                PlankrError::Validation(format!(
                    "could not parse date '{s}'; use YYYY-MM-DD, 'today', or 'yesterday'"
                ))
            })?,
        },
    };

    if date > today {
        return Err(PlankrError::validation("cannot log a plank in the future"));
    }

    Ok(date)
}

/// Execute history command
///
/// # Errors
///
/// Returns an error if the local cache cannot be opened, or the platform
/// fetch fails for a reason the cache cannot paper over.
pub fn history(
    config: &Config,
    args: &HistoryArgs,
    format: OutputFormat,
) -> Result<String, PlankrError> {
    let limit = args.limit.unwrap_or(config.history.limit);
    let cache = PlankCache::new()?;

    let page = history::load(&cache, limit, args.offline, || {
        let client = PlatformClient::from_config(config)?;
        client.recent_planks(limit)
    })?;

    format_history(&page, format)
}

/// Execute stats command
///
/// # Errors
///
/// Returns an error if the platform is not configured or the stats call
/// fails.
pub fn stats(config: &Config, format: OutputFormat) -> Result<String, PlankrError> {
    let client = PlatformClient::from_config(config)?;
    let stats = client.user_stats()?;

    // The platform profile's display name wins over the configured one.
    let name = client
        .profile()
        .ok()
        .flatten()
        .and_then(|p| p.display_name)
        .unwrap_or_else(|| client.user().display_name.clone());

    let view = StatsView::build(&name, &stats);
    format_stats(&view, format)
}

/// Execute leaderboard command
///
/// # Errors
///
/// Returns an error if the platform is not configured or the leaderboard
/// call fails.
pub fn leaderboard(
    config: &Config,
    args: &LeaderboardArgs,
    format: OutputFormat,
) -> Result<String, PlankrError> {
    let client = PlatformClient::from_config(config)?;
    let entries = client.monthly_leaderboard(args.limit)?;
    let rows = leaderboard_rows(&entries, &client.user().display_name);
    format_leaderboard(&rows, format)
}

/// Execute sync command
///
/// # Errors
///
/// Returns an error if the queue cannot be opened or, when flushing, the
/// platform is not configured.
pub fn sync(config: &Config, args: &SyncArgs, format: OutputFormat) -> Result<String, PlankrError> {
    let queue = PendingQueue::new()?;

    if args.status {
        return format_queue_status(&queue.status_counts()?, format);
    }

    if args.retry_failed {
        queue.retry_failed()?;
    }

    if queue.pending()?.is_empty() {
        return match format {
            OutputFormat::Json => format_sync_report(&SyncReport::default(), format),
            OutputFormat::Pretty => Ok("Nothing to sync".to_string()),
        };
    }

    let client = PlatformClient::from_config(config)?;
    let report = queue.flush_with(|record| {
        client.record_plank(record.duration_seconds(), record.plank_date)
    })?;
    queue.clear_synced()?;

    format_sync_report(&report, format)
}

/// Execute config subcommands
///
/// # Errors
///
/// Returns an error if the config file cannot be read, written, or
/// serialized.
pub fn config(cmd: ConfigCommands, format: OutputFormat) -> Result<String, PlankrError> {
    let paths = Paths::new()?;

    match cmd {
        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
        ConfigCommands::Show => {
            let mut config = Config::load()?;
            if config.platform.access_token.is_some() {
                config.platform.access_token = Some("(redacted)".to_string());
            }
            match format {
                OutputFormat::Json => to_json(&config),
                OutputFormat::Pretty => serde_yaml::to_string(&config)
                    .map_err(|e| PlankrError::Config(format!("Failed to serialize config: {e}"))),
            }
        }
        ConfigCommands::Init => {
            if paths.config_file.exists() {
                return Err(PlankrError::Config(format!(
                    "config already exists at {}",
                    paths.config_file.display()
                )));
            }
            Config::default().save()?;
            Ok(format!("Wrote {}", paths.config_file.display()))
        }
    }
}

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the shell name is not recognized.
pub fn completions(shell: &str) -> Result<String, PlankrError> {
    let sh = shell_from_str(shell).ok_or_else(|| {
        PlankrError::Validation(format!(
            "unknown shell '{shell}'; supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(sh, &mut cmd, "plankr", &mut buf);
    String::from_utf8(buf).map_err(|e| PlankrError::Config(format!("UTF-8 error: {e}")))
}

/// Get shell from string name.
fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}
