//! Zen Gomoku - terminal host
//!
//! Two-player five-in-a-row with undo and optional LLM commentary.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use zen_gomoku::{AdvisorConfig, GameSession, LlmProvider, build_advisor, console};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            provider,
            offline,
        } => run_play(config, provider, offline).await,
        Command::Replay { moves, json } => run_replay(&moves, json),
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,zen_gomoku=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run an interactive game
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    provider: Option<LlmProvider>,
    offline: bool,
) -> Result<()> {
    let mut config =
        AdvisorConfig::load_or_default(&config_path).context("Failed to load advisor config")?;

    if let Some(provider) = provider {
        info!(%provider, "Overriding LLM provider");
        config = config.override_provider(provider);
    }
    if offline {
        config = config.disabled();
    }

    let advisor = build_advisor(&config);
    let (advisory_tx, advisory_rx) = mpsc::unbounded_channel();
    let session = GameSession::new(advisor, config.timeout(), advisory_tx);

    console::run(session, advisory_rx).await
}

/// Replay moves and print the final position
#[instrument(skip(moves), fields(count = moves.len()))]
fn run_replay(moves: &[String], json: bool) -> Result<()> {
    let engine = console::replay(moves)?;

    if json {
        println!("{}", serde_json::to_string_pretty(engine.state())?);
    } else {
        println!("{}", console::render(engine.state()));
    }

    Ok(())
}
