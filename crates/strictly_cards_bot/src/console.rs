//! Console transport: plays the drill over stdin/stdout.

use crate::bot::Bot;
use crate::reply::{Keyboard, Reply};
use std::fmt::Write as _;
use strictly_cards::UserId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, instrument};

/// Input line that switches the acting user, e.g. `/as 7`.
const SWITCH_USER: &str = "/as";

/// Renders replies as terminal text.
pub fn render(replies: &[Reply]) -> String {
    let mut out = String::new();
    for reply in replies {
        match reply {
            Reply::Text { text, keyboard } => {
                let _ = writeln!(out, "{text}");
                if let Some(keyboard) = keyboard {
                    out.push_str(&render_keyboard(keyboard));
                }
            }
            Reply::Photo { content, caption } => {
                let _ = writeln!(out, "🖼  {}", content.location);
                if let Some(caption) = caption {
                    let _ = writeln!(out, "   {caption}");
                }
            }
            Reply::Album { items } => {
                for (content, caption) in items {
                    let _ = writeln!(out, "🖼  {}  ({caption})", content.location);
                }
            }
        }
    }
    out
}

/// Argument of a `/as <id>` line, `None` for any other input.
fn switch_target(line: &str) -> Option<&str> {
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    (head == SWITCH_USER).then(|| rest.trim())
}

fn render_keyboard(keyboard: &Keyboard) -> String {
    let mut out = String::new();
    for row in keyboard.rows() {
        let buttons: Vec<_> = row.iter().map(|b| format!("[{b}]")).collect();
        let _ = writeln!(out, "  {}", buttons.join(" "));
    }
    out
}

/// Reads commands line by line until EOF, writing replies to `output`.
#[instrument(skip(bot, input, output))]
pub async fn run<R, W>(bot: &Bot, mut user_id: UserId, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Console session started");
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if let Some(target) = switch_target(line) {
            match target.parse::<i64>() {
                Ok(id) => {
                    user_id = UserId::new(id);
                    info!(%user_id, "Switched console user");
                    output
                        .write_all(format!("Now playing as user {user_id}\n").as_bytes())
                        .await?;
                }
                Err(_) => output.write_all(b"Usage: /as <user id>\n").await?,
            }
            continue;
        }

        let replies = bot.handle_text(user_id, line).await;
        output.write_all(render(&replies).as_bytes()).await?;
        output.flush().await?;
    }
    info!("Console input closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotConfig;
    use crate::messages;
    use strictly_cards::{CardContent, CardId, DeckKind};

    #[test]
    fn switch_needs_the_exact_token() {
        assert_eq!(switch_target("/as 7"), Some("7"));
        assert_eq!(switch_target("/as"), Some(""));
        assert_eq!(switch_target("/assist 7"), None);
        assert_eq!(switch_target("/ask"), None);
    }

    #[tokio::test]
    async fn run_switches_user_and_passes_other_lines_through() {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let config = BotConfig::with_cards_root(root.path(), root.path().join("stats.json"));
        let bot = Bot::from_config(&config).await.expect("Failed to build bot");

        let mut output = Vec::new();
        run(&bot, UserId::new(1), &b"/as 7\n/as x\n/ask 9\n"[..], &mut output)
            .await
            .expect("Console run");

        assert_eq!(
            String::from_utf8(output).expect("UTF-8 output"),
            "Now playing as user 7\nUsage: /as <user id>\n"
        );
        assert_eq!(bot.stats().snapshot().commands_used.len(), 0);
    }

    #[test]
    fn renders_text_keyboard_and_photos() {
        let content = CardContent {
            deck: DeckKind::Clients,
            card: CardId::from("c.png"),
            location: "cards/clients/c.png".into(),
        };
        let out = render(&[
            Reply::with_keyboard("hi", messages::start_keyboard()),
            Reply::Photo {
                content: content.clone(),
                caption: Some("Card 1 used!".into()),
            },
            Reply::Album {
                items: vec![(content, "Card 1".into())],
            },
        ]);
        assert_eq!(
            out,
            "hi\n  [/start]\n🖼  cards/clients/c.png\n   Card 1 used!\n🖼  cards/clients/c.png  (Card 1)\n"
        );
    }
}
