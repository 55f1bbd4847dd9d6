//! Command-line interface for the drill bot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Cards - objection drill bot
#[derive(Parser, Debug)]
#[command(name = "strictly_cards_bot")]
#[command(about = "Two-deck objection drill bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it doesn't exist)
    #[arg(short, long, default_value = "strictly_cards.toml", global = true)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the drill in the terminal (stdin/stdout transport)
    Console {
        /// User id to play as; switch later with `/as <id>`
        #[arg(short, long, default_value = "1")]
        user_id: i64,
    },

    /// Show how many cards each deck currently holds
    Decks,

    /// Print the persisted usage statistics report
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn console_defaults() {
        let cli = Cli::parse_from(["strictly_cards_bot", "console"]);
        assert!(matches!(cli.command, Command::Console { user_id: 1 }));
        assert_eq!(cli.config, PathBuf::from("strictly_cards.toml"));
    }
}
