//! Stagehand terminal driver entry point.
//!
//! Loads an authored scene graph, creates one character and plays it from
//! standard input: each line is the id of an action on the current stage.

use std::sync::Mutex;

use stagehand_character::{Character, CharacterRepository};
use stagehand_content::ingest;
use stagehand_core::clock::SystemClock;
use stagehand_core::rng::SeededRng;
use stagehand_narrative::{GameLoop, NewDayRule};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod config;
mod error;
mod play;
mod session;

use config::CliConfig;
use error::AppError;
use session::SessionCharacters;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = CliConfig::from_env()?;

    // Logs go to stderr so stdout carries only the game.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }

    tracing::info!(content = %config.content_path.display(), "Starting Stagehand");

    let source = tokio::fs::read_to_string(&config.content_path).await?;
    let content = ingest(&source)?;
    tracing::info!(version = %content.version_hash, "content loaded");

    let rng = Mutex::new(match config.seed {
        Some(seed) => SeededRng::from_seed(seed),
        None => SeededRng::from_entropy(),
    });
    let clock = SystemClock;
    let repo = SessionCharacters::new();

    let character = Character::new(Uuid::now_v7(), config.character_name.clone());
    repo.save(&character).await?;

    let mut game = GameLoop::new(&content.graph, &repo, &clock, &rng);
    if let Some(interval) = config.new_day_interval {
        game = game.with_new_day(NewDayRule::new(interval));
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    play::play(&game, &repo, character.id, stdin, &mut stdout).await?;

    Ok(())
}
