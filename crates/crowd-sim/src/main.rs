//! Console chat room populated by virtual players.
//!
//! Type a line to talk to the room. Commands:
//!   /agents       - list the virtual players
//!   /spontaneous  - ask a random player to start a conversation
//!   /quit         - leave
//!
//! Environment:
//!   CHAT_API_KEY           - enables live generation (otherwise every line
//!                            goes through the fallback policy)
//!   CROWD_SPONTANEOUS_SECS - seconds between unprompted lines (default: 45, 0 disables)
//!   CROWD_*                - orchestrator settings, see `OrchestratorConfig::from_env`

mod console;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use brain_core::{Brain, ChatTurn};
use chat_brain::ChatBrain;
use crowd::{IncomingMessage, Orchestrator, OrchestratorConfig, OrchestratorError, ResponseSink};
use mock_brain::FailingBrain;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use console::{ConsoleSink, Transcript};

/// Name the human player appears under in the transcript.
const PLAYER_NAME: &str = "Vous";

/// Default seconds between unprompted lines.
const DEFAULT_SPONTANEOUS_SECS: u64 = 45;

fn spontaneous_period() -> Option<Duration> {
    let secs = env::var("CROWD_SPONTANEOUS_SECS")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_SPONTANEOUS_SECS);
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn build_brain() -> Arc<dyn Brain> {
    match ChatBrain::from_env() {
        Ok(brain) => {
            info!(
                "Using {} with model {}",
                brain.name(),
                brain.config().model
            );
            Arc::new(brain)
        }
        Err(e) => {
            warn!("Chat brain unavailable ({}), using canned lines only", e);
            Arc::new(FailingBrain::with_reason(e.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,crowd=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = OrchestratorConfig::from_env()?;
    let context_turns = config.context_turns;

    let transcript = Transcript::default();
    let sink = ConsoleSink::new(transcript.clone());
    let orchestrator = Arc::new(Orchestrator::from_config(build_brain(), sink, config)?);

    println!("Salon ouvert avec {} joueurs :", orchestrator.roster().len());
    for profile in orchestrator.roster() {
        println!("  {} {}", profile.avatar, profile.display_name);
    }
    println!("Tapez un message, /agents, /spontaneous ou /quit.\n");

    if let Some(period) = spontaneous_period() {
        tokio::spawn(orchestrator.clone().run_spontaneous(period));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();

        match text {
            "" => continue,
            "/quit" => break,
            "/agents" => {
                for profile in orchestrator.roster() {
                    println!(
                        "  {} {} [{}] - {}",
                        profile.avatar,
                        profile.display_name,
                        profile.id,
                        profile.interests.join(", ")
                    );
                }
            }
            "/spontaneous" => {
                let message = orchestrator.spontaneous().await;
                orchestrator.sink().deliver_spontaneous(&message).await?;
            }
            _ => {
                let history = transcript.snapshot();
                let skip = history.len().saturating_sub(context_turns);
                let message =
                    IncomingMessage::new(text).with_context(history[skip..].to_vec());
                transcript.push(ChatTurn::new(PLAYER_NAME, text));

                match orchestrator.respond(message).await {
                    Ok(batch) if batch.responses.is_empty() => {
                        info!("Nobody felt like answering");
                    }
                    Ok(batch) => {
                        info!(
                            "{} reply(ies), priority {:?}",
                            batch.response_count, batch.classification.priority
                        );
                    }
                    Err(OrchestratorError::EmptyMessage) => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    println!("À bientôt !");
    Ok(())
}
