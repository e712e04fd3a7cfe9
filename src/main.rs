use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use plankr::cli::args::{Cli, Commands};
use plankr::cli::commands;
use plankr::config::Config;
use plankr::error::PlankrError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PlankrError> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli.output;

    let output = match cli.command {
        Commands::Timer(args) => commands::timer(&config, &args, format)?,
        Commands::Log(args) => commands::log(&config, &args, format)?,
        Commands::History(args) => commands::history(&config, &args, format)?,
        Commands::Stats => commands::stats(&config, format)?,
        Commands::Leaderboard(args) => commands::leaderboard(&config, &args, format)?,
        Commands::Challenge(args) => commands::challenge(&config, args.command, format)?,
        Commands::Sync(args) => commands::sync(&config, &args, format)?,
        Commands::Config(args) => commands::config(args.command, format)?,
        Commands::Completions { shell } => commands::completions(&shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
