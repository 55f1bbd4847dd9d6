//! Incoming user commands.

use crate::messages::buttons;
use tracing::{debug, instrument};

/// A user action the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    /// `/start`: greet and show the main menu.
    Start,
    /// `/help`: explain the game and point at `/start`.
    #[strum(serialize = "welcome")]
    Help,
    /// `/stats`: admin usage report.
    Stats,
    /// Show a client card.
    Client,
    /// Deal a starting manager hand.
    Manager,
    /// Draw one more manager card.
    Draw,
    /// Show the current hand.
    ShowHand,
    /// Use the card in a slot. `None` when the number did not parse.
    Discard(Option<usize>),
    /// Start over.
    Reset,
    /// Show the rules.
    About,
}

impl Command {
    /// Parses a message. Unknown text yields `None` and gets no reply.
    #[instrument]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let command = match text {
            "/start" => Self::Start,
            "/help" => Self::Help,
            "/stats" => Self::Stats,
            buttons::CLIENT | buttons::NEW_CLIENT => Self::Client,
            buttons::MANAGER => Self::Manager,
            buttons::DRAW => Self::Draw,
            buttons::SHOW_HAND => Self::ShowHand,
            buttons::NEW_GAME | buttons::RESET_ALL => Self::Reset,
            buttons::ABOUT => Self::About,
            _ if text.starts_with(buttons::DISCARD_PREFIX) => Self::Discard(
                text.split_whitespace()
                    .last()
                    .and_then(|n| n.parse().ok()),
            ),
            _ => {
                debug!("Ignoring unrecognised text");
                return None;
            }
        };
        Some(command)
    }

    /// Stable name used as the usage counter key. `/help` keeps the
    /// `welcome` key of existing stats files.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slash_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse(" /help "), Some(Command::Help));
        assert_eq!(Command::parse("/stats"), Some(Command::Stats));
    }

    #[test]
    fn parses_buttons() {
        assert_eq!(Command::parse(buttons::CLIENT), Some(Command::Client));
        assert_eq!(Command::parse(buttons::NEW_CLIENT), Some(Command::Client));
        assert_eq!(Command::parse(buttons::RESET_ALL), Some(Command::Reset));
        assert_eq!(Command::parse(buttons::DRAW), Some(Command::Draw));
    }

    #[test]
    fn parses_discard_slot_from_last_token() {
        assert_eq!(
            Command::parse(&buttons::discard(3)),
            Some(Command::Discard(Some(3)))
        );
        assert_eq!(
            Command::parse(&format!("{} x", buttons::DISCARD_PREFIX)),
            Some(Command::Discard(None))
        );
    }

    #[test]
    fn ignores_chatter() {
        assert_eq!(Command::parse("hello there"), None);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Command::ShowHand.name(), "show_hand");
        assert_eq!(Command::Discard(Some(1)).name(), "discard");
    }

    #[test]
    fn help_counts_under_welcome_key() {
        assert_eq!(Command::Help.name(), "welcome");
        assert_eq!(Command::Start.name(), "start");
    }

    #[test]
    fn parses_deployed_russian_labels() {
        assert_eq!(Command::parse("😊 Менеджер"), Some(Command::Manager));
        assert_eq!(Command::parse("➕ Добрать карту"), Some(Command::Draw));
        assert_eq!(Command::parse("🔄 Сбросить все"), Some(Command::Reset));
        assert_eq!(
            Command::parse("⬆️ Карта 4"),
            Some(Command::Discard(Some(4)))
        );
    }
}
