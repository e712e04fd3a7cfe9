use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "plankr")]
#[command(about = "A plank timer and tracker with a hosted leaderboard")]
#[command(long_about = "plankr - plank workouts from the terminal

Time plank sessions, keep your history, and climb the monthly
leaderboard. Finished sessions are recorded to the hosted platform;
anything that cannot be uploaded right away is queued locally and
flushed with 'plankr sync'.

QUICK START:
  plankr timer              Start an interactive timer
  plankr log 1:30           Record a plank measured elsewhere
  plankr history            Show your recent planks
  plankr stats              Streak, best time, monthly rank

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  plankr <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an interactive plank timer
    ///
    /// Opens a full-screen timer. Count-up mode is a stopwatch you stop
    /// yourself; count-down mode runs to a target and records
    /// automatically when it reaches zero. Every session starts behind an
    /// attestation gate: confirm you are actually in position before the
    /// clock will start.
    ///
    /// # Keys
    ///
    ///   a          Confirm the attempt (attestation)
    ///   s          Start / resume
    ///   space, p   Pause
    ///   c          Complete (count-up only)
    ///   r          Reset
    ///   q          Quit
    ///
    /// # Examples
    ///
    ///   plankr timer                     Count-up timer (default)
    ///   plankr timer --mode down         Count down to the configured target
    ///   plankr timer -m down -t 1:30     Count down from 90 seconds
    ///   plankr timer --no-tui            Plain terminal loop, same keys
    #[command(alias = "t")]
    Timer(TimerArgs),

    /// Record a plank measured off-app
    ///
    /// Validates the duration and records it to the platform. If the
    /// platform cannot be reached the plank is queued locally; run
    /// 'plankr sync' to flush it later.
    ///
    /// # Examples
    ///
    ///   plankr log 90                    90 seconds, today
    ///   plankr log 1:30                  Same, clock form
    ///   plankr log 2m30s --date 2025-06-14
    #[command(alias = "l")]
    Log(LogArgs),

    /// Show your recent planks
    ///
    /// Lists recent planks with day labels (Today, Yesterday, weekday
    /// names) and MM:SS durations. Each successful fetch refreshes the
    /// local cache; --offline reads the cache without touching the
    /// network.
    ///
    /// # Examples
    ///
    ///   plankr history                   Recent planks
    ///   plankr history -n 30             More of them
    ///   plankr history --offline         Last cached page
    ///   plankr history -o json           JSON for scripting
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Show your streak, best time, and monthly rank
    ///
    /// Aggregates are computed by the platform: current streak in days,
    /// all-time best duration, total planks, and your rank in the current
    /// month.
    ///
    /// # Examples
    ///
    ///   plankr stats
    ///   plankr stats -o json
    #[command(alias = "st")]
    Stats,

    /// Show the monthly leaderboard
    ///
    /// Top planks this calendar month across all users. Your own row is
    /// highlighted.
    ///
    /// # Examples
    ///
    ///   plankr leaderboard
    ///   plankr leaderboard -n 25
    #[command(alias = "top")]
    Leaderboard(LeaderboardArgs),

    /// Browse and join challenges
    ///
    /// Challenges are time-boxed community goals (streaks, progressions,
    /// team events) hosted on the platform.
    ///
    /// # Subcommands
    ///
    ///   list    List active challenges and your memberships
    ///   join    Join by ID, or pick interactively when no ID is given
    ///   leave   Leave a challenge
    ///
    /// # Examples
    ///
    ///   plankr challenge list
    ///   plankr challenge join            Opens a fuzzy picker
    ///   plankr challenge join 42
    ///   plankr challenge leave 42
    #[command(alias = "ch")]
    Challenge(ChallengeArgs),

    /// Flush queued planks to the platform
    ///
    /// Uploads records that could not be sent when they were completed.
    /// Records that keep failing are parked after a few attempts;
    /// --retry-failed puts them back in line.
    ///
    /// # Examples
    ///
    ///   plankr sync                      Flush pending records
    ///   plankr sync --status             Show queue counts only
    ///   plankr sync --retry-failed       Re-arm parked records and flush
    Sync(SyncArgs),

    /// Inspect or create the config file
    ///
    /// plankr reads ~/.plankr/config.yaml. Platform credentials can also
    /// be supplied via PLANKR_URL, PLANKR_API_KEY, PLANKR_TOKEN, and
    /// PLANKR_USER environment variables, which take precedence.
    ///
    /// # Subcommands
    ///
    ///   path    Print the config file location
    ///   show    Print the current (merged) configuration
    ///   init    Write a starter config file
    ///
    /// # Examples
    ///
    ///   plankr config path
    ///   plankr config init
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs a completion script for the specified shell. Redirect to a
    /// file or source directly.
    ///
    /// # Examples
    ///
    ///   plankr completions bash > /usr/local/etc/bash_completion.d/plankr
    ///   plankr completions zsh > ~/.zsh/completions/_plankr
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

/// Arguments for the timer command.
#[derive(Args)]
pub struct TimerArgs {
    /// Timer mode: 'up' for a stopwatch, 'down' to count down to a target
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    /// Count-down target (e.g. 90, 1:30, 2m30s)
    #[arg(long, short = 't')]
    pub target: Option<String>,

    /// Run a plain terminal loop instead of the full-screen TUI
    #[arg(long)]
    pub no_tui: bool,
}

/// Arguments for the log command.
#[derive(Args)]
pub struct LogArgs {
    /// Plank duration (e.g. 90, 1:30, 2m30s)
    pub duration: String,

    /// Day the plank was held (YYYY-MM-DD, 'today', or 'yesterday')
    #[arg(long, short = 'd')]
    pub date: Option<String>,
}

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Number of planks to show
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,

    /// Read the local cache instead of fetching
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the leaderboard command.
#[derive(Args)]
pub struct LeaderboardArgs {
    /// Number of entries to show
    #[arg(long, short = 'n', default_value = "10")]
    pub limit: u32,
}

/// Arguments for challenge membership.
#[derive(Args)]
pub struct ChallengeArgs {
    #[command(subcommand)]
    pub command: ChallengeCommands,
}

/// Challenge subcommands.
#[derive(Subcommand)]
pub enum ChallengeCommands {
    /// List active challenges and your memberships
    ///
    /// Shows every active challenge with its type, dates, participant
    /// count, and whether you have joined.
    List,

    /// Join a challenge
    ///
    /// With an ID, joins directly. Without one, opens a fuzzy picker over
    /// the challenges you have not joined yet.
    ///
    /// # Examples
    ///
    ///   plankr challenge join
    ///   plankr challenge join 42
    Join {
        /// Challenge ID (from 'challenge list' JSON output)
        id: Option<i64>,
    },

    /// Leave a challenge
    ///
    /// # Examples
    ///
    ///   plankr challenge leave 42
    Leave {
        /// Challenge ID to leave
        id: i64,
    },
}

/// Arguments for the sync command.
#[derive(Args)]
pub struct SyncArgs {
    /// Show queue counts without flushing
    #[arg(long, conflicts_with = "retry_failed")]
    pub status: bool,

    /// Re-arm parked records before flushing
    #[arg(long)]
    pub retry_failed: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the current configuration
    ///
    /// Shows the merged result of the config file and any PLANKR_*
    /// environment overrides. The access token is redacted.
    Show,

    /// Write a starter config file
    ///
    /// Creates ~/.plankr/config.yaml with defaults and empty platform
    /// credentials. Refuses to overwrite an existing file.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== CLI Parsing Tests ====================

    #[test]
    fn test_cli_timer_defaults() {
        let cli = Cli::try_parse_from(["plankr", "timer"]).unwrap();
        if let Commands::Timer(args) = cli.command {
            assert!(args.mode.is_none());
            assert!(args.target.is_none());
            assert!(!args.no_tui);
        } else {
            panic!("Expected Timer command");
        }
    }

    #[test]
    fn test_cli_timer_alias() {
        let cli = Cli::try_parse_from(["plankr", "t", "--no-tui"]).unwrap();
        if let Commands::Timer(args) = cli.command {
            assert!(args.no_tui);
        } else {
            panic!("Expected Timer command");
        }
    }

    #[test]
    fn test_cli_timer_mode_and_target() {
        let cli = Cli::try_parse_from(["plankr", "timer", "-m", "down", "-t", "1:30"]).unwrap();
        if let Commands::Timer(args) = cli.command {
            assert_eq!(args.mode.as_deref(), Some("down"));
            assert_eq!(args.target.as_deref(), Some("1:30"));
        } else {
            panic!("Expected Timer command");
        }
    }

    #[test]
    fn test_cli_log_duration() {
        let cli = Cli::try_parse_from(["plankr", "log", "1:30"]).unwrap();
        if let Commands::Log(args) = cli.command {
            assert_eq!(args.duration, "1:30");
            assert!(args.date.is_none());
        } else {
            panic!("Expected Log command");
        }
    }

    #[test]
    fn test_cli_log_with_date() {
        let cli =
            Cli::try_parse_from(["plankr", "log", "90", "--date", "2025-06-14"]).unwrap();
        if let Commands::Log(args) = cli.command {
            assert_eq!(args.date.as_deref(), Some("2025-06-14"));
        } else {
            panic!("Expected Log command");
        }
    }

    #[test]
    fn test_cli_log_requires_duration() {
        assert!(Cli::try_parse_from(["plankr", "log"]).is_err());
    }

    #[test]
    fn test_cli_history_flags() {
        let cli = Cli::try_parse_from(["plankr", "history", "-n", "30", "--offline"]).unwrap();
        if let Commands::History(args) = cli.command {
            assert_eq!(args.limit, Some(30));
            assert!(args.offline);
        } else {
            panic!("Expected History command");
        }
    }

    #[test]
    fn test_cli_stats_alias() {
        let cli = Cli::try_parse_from(["plankr", "st"]).unwrap();
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_cli_leaderboard_default_limit() {
        let cli = Cli::try_parse_from(["plankr", "leaderboard"]).unwrap();
        if let Commands::Leaderboard(args) = cli.command {
            assert_eq!(args.limit, 10);
        } else {
            panic!("Expected Leaderboard command");
        }
    }

    #[test]
    fn test_cli_challenge_join_without_id() {
        let cli = Cli::try_parse_from(["plankr", "challenge", "join"]).unwrap();
        if let Commands::Challenge(args) = cli.command {
            assert!(matches!(args.command, ChallengeCommands::Join { id: None }));
        } else {
            panic!("Expected Challenge command");
        }
    }

    #[test]
    fn test_cli_challenge_join_with_id() {
        let cli = Cli::try_parse_from(["plankr", "challenge", "join", "42"]).unwrap();
        if let Commands::Challenge(args) = cli.command {
            assert!(matches!(
                args.command,
                ChallengeCommands::Join { id: Some(42) }
            ));
        } else {
            panic!("Expected Challenge command");
        }
    }

    #[test]
    fn test_cli_challenge_leave_requires_id() {
        assert!(Cli::try_parse_from(["plankr", "challenge", "leave"]).is_err());
    }

    #[test]
    fn test_cli_sync_flags_conflict() {
        assert!(Cli::try_parse_from(["plankr", "sync", "--status", "--retry-failed"]).is_err());
    }

    #[test]
    fn test_cli_sync_retry_failed() {
        let cli = Cli::try_parse_from(["plankr", "sync", "--retry-failed"]).unwrap();
        if let Commands::Sync(args) = cli.command {
            assert!(args.retry_failed);
            assert!(!args.status);
        } else {
            panic!("Expected Sync command");
        }
    }

    #[test]
    fn test_cli_config_subcommands() {
        let cli = Cli::try_parse_from(["plankr", "config", "path"]).unwrap();
        if let Commands::Config(args) = cli.command {
            assert!(matches!(args.command, ConfigCommands::Path));
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["plankr", "completions", "zsh"]).unwrap();
        if let Commands::Completions { shell } = cli.command {
            assert_eq!(shell, "zsh");
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::try_parse_from(["plankr", "stats"]).unwrap();
        assert!(matches!(cli.output, OutputFormat::Pretty));
    }

    #[test]
    fn test_cli_output_format_json() {
        let cli = Cli::try_parse_from(["plankr", "--output", "json", "stats"]).unwrap();
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_cli_output_format_global() {
        let cli = Cli::try_parse_from(["plankr", "history", "-o", "json"]).unwrap();
        assert!(matches!(cli.output, OutputFormat::Json));
    }
}
