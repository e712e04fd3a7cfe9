//! Challenge command implementation.
//!
//! Lists, joins, and leaves platform challenges. Joining without an ID
//! opens a fuzzy picker over the challenges not yet joined.

use crate::cli::args::{ChallengeCommands, OutputFormat};
use crate::config::Config;
use crate::error::PlankrError;
use crate::features::challenges::{joinable, overview, pick_challenge, ChallengeView};
use crate::output::format_challenges;
use crate::platform::PlatformClient;

/// Execute challenge subcommands
///
/// # Errors
///
/// Returns an error if the platform is not configured or a challenge
/// call fails.
pub fn challenge(
    config: &Config,
    cmd: ChallengeCommands,
    format: OutputFormat,
) -> Result<String, PlankrError> {
    let client = PlatformClient::from_config(config)?;

    match cmd {
        ChallengeCommands::List => {
            let views = load_views(&client)?;
            format_challenges(&views, format)
        }
        ChallengeCommands::Join { id: Some(id) } => {
            client.join_challenge(id)?;
            Ok(format!("Joined challenge {id}"))
        }
        ChallengeCommands::Join { id: None } => {
            let open = joinable(&load_views(&client)?);
            if open.is_empty() {
                return Ok("No open challenges to join".to_string());
            }

            match pick_challenge(open) {
                Some(id) => {
                    client.join_challenge(id)?;
                    Ok(format!("Joined challenge {id}"))
                }
                None => Ok("Nothing selected".to_string()),
            }
        }
        ChallengeCommands::Leave { id } => {
            client.leave_challenge(id)?;
            Ok(format!("Left challenge {id}"))
        }
    }
}

/// Fetch active challenges annotated with membership.
fn load_views(client: &PlatformClient) -> Result<Vec<ChallengeView>, PlankrError> {
    let challenges = client.challenges(true)?;
    let joined = client.joined_challenge_ids()?;
    Ok(overview(&challenges, &joined))
}
