//! Strictly Cards - objection drill bot CLI

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use strictly_cards::{CardPoolSource, DeckKind, UserId};
use strictly_cards_bot::cli::{Cli, Command};
use strictly_cards_bot::{Bot, BotConfig, FsCardPool, StatsRecorder, console};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = BotConfig::from_env(&cli.config)?;
    info!(config = ?config, "Configuration loaded");

    match cli.command {
        Command::Console { user_id } => run_console(&config, UserId::new(user_id)).await,
        Command::Decks => show_decks(&config).await,
        Command::Stats => show_stats(&config).await,
    }
}

/// Play the drill in the terminal
#[instrument(skip(config))]
async fn run_console(config: &BotConfig, user_id: UserId) -> Result<()> {
    let bot = Bot::from_config(config).await?;
    info!("Console ready - type /start");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    console::run(&bot, user_id, stdin, tokio::io::stdout()).await?;

    bot.stats().flush().await?;
    Ok(())
}

/// Print deck sizes
#[instrument(skip(config))]
async fn show_decks(config: &BotConfig) -> Result<()> {
    let pool = FsCardPool::new(config.clients_dir(), config.managers_dir());
    for deck in DeckKind::iter() {
        let cards = pool.list_members(deck).await?;
        println!(
            "{deck}: {} cards in {}",
            cards.len(),
            pool.deck_dir(deck).display()
        );
    }
    Ok(())
}

/// Print the usage report
#[instrument(skip(config))]
async fn show_stats(config: &BotConfig) -> Result<()> {
    let stats = StatsRecorder::load(config.stats_file()).await;
    print!("{}", stats.snapshot().report());
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_cards=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
