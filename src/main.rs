//! Arcade Engine - terminal front-end
//!
//! Board games against the computer plus the solo arcade puzzles.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::Result;
use arcade_engine::EngineConfig;
use clap::Parser;
use cli::{Cli, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = EngineConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    info!(seed = config.seed(), "Configuration ready");

    match cli.command {
        Command::Play {
            game,
            side,
            hot_seat,
        } => {
            let side = side.map(Into::into).unwrap_or(*config.human_side());
            let hot_seat = hot_seat || *config.hot_seat();
            let config = config.with_hot_seat(hot_seat);
            terminal::play(config, game, side).await
        }
        Command::Selfplay {
            game,
            games,
            max_plies,
        } => terminal::selfplay(&config, game, games, max_plies),
        Command::Memory => terminal::memory(&config).await,
        Command::Sudoku => terminal::sudoku().await,
    }
}
