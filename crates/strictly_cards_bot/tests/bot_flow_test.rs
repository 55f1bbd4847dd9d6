//! End-to-end tests for the bot over a temporary card directory.

use std::path::Path;
use strictly_cards::UserId;
use strictly_cards_bot::messages::{self, buttons};
use strictly_cards_bot::{Bot, BotConfig, Reply};
use tempfile::TempDir;

const ADMIN: i64 = 1000;

/// Creates `clients` client images and `managers` manager images, returns the
/// directory handle (must stay in scope) and a ready bot.
async fn setup_bot(clients: usize, managers: usize) -> (TempDir, Bot) {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let config = BotConfig::with_cards_root(root.path(), root.path().join("stats.json"))
        .with_admin(ADMIN)
        .with_seed(17);

    let bot = Bot::from_config(&config).await.expect("Failed to build bot");
    write_cards(&root.path().join("clients"), "client", clients);
    write_cards(&root.path().join("managers"), "manager", managers);
    (root, bot)
}

fn write_cards(dir: &Path, prefix: &str, count: usize) {
    for n in 1..=count {
        std::fs::write(dir.join(format!("{prefix}_{n:02}.png")), b"img").expect("Write card");
    }
}

fn album_len(replies: &[Reply]) -> Option<usize> {
    replies.iter().find_map(|r| match r {
        Reply::Album { items } => Some(items.len()),
        _ => None,
    })
}

fn texts(replies: &[Reply]) -> Vec<&str> {
    replies.iter().filter_map(Reply::as_text).collect()
}

#[tokio::test]
async fn test_start_shows_rules_and_main_menu() {
    let (_dir, bot) = setup_bot(1, 6).await;
    let replies = bot.handle_text(UserId::new(1), "/start").await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].as_text(), Some(messages::ABOUT_TEXT));
    match &replies[1] {
        Reply::Text { keyboard: Some(keyboard), .. } => {
            assert_eq!(keyboard, &messages::main_keyboard());
        }
        other => panic!("Expected menu, got {other:?}"),
    }
    assert_eq!(bot.stats().snapshot().total_users, 1);
}

#[tokio::test]
async fn test_deal_discard_draw_cycle() {
    let (_dir, bot) = setup_bot(1, 8).await;
    let user = UserId::new(7);

    let replies = bot.handle_text(user, buttons::MANAGER).await;
    assert_eq!(album_len(&replies), Some(6));
    assert!(texts(&replies).contains(&messages::hand_header(6).as_str()));

    let replies = bot.handle_text(user, &buttons::discard(2)).await;
    match &replies[0] {
        Reply::Photo { caption, .. } => assert_eq!(caption.as_deref(), Some("Карта 2 использована!")),
        other => panic!("Expected used card photo, got {other:?}"),
    }
    assert_eq!(album_len(&replies), Some(5));

    for expected in [6, 7] {
        let replies = bot.handle_text(user, buttons::DRAW).await;
        assert_eq!(album_len(&replies), Some(expected));
    }

    // 8 cards: 7 held, 1 used.
    let replies = bot.handle_text(user, buttons::DRAW).await;
    assert_eq!(
        texts(&replies),
        vec![messages::error_message(&strictly_cards::DeckError::DeckExhausted)]
    );

    let session = bot.dealer().session(user);
    assert_eq!(session.current_hand().len(), 7);
    assert_eq!(session.used_manager_cards().len(), 1);
    assert!(session.is_consistent());
}

#[tokio::test]
async fn test_small_deck_is_reported() {
    let (_dir, bot) = setup_bot(1, 5).await;
    let replies = bot.handle_text(UserId::new(1), buttons::MANAGER).await;
    assert_eq!(
        texts(&replies),
        vec!["❌ Менеджеры все в отпуске! Нужно минимум 6 карточек."]
    );
}

#[tokio::test]
async fn test_invalid_slot_leaves_hand_alone() {
    let (_dir, bot) = setup_bot(1, 6).await;
    let user = UserId::new(3);
    bot.handle_text(user, buttons::MANAGER).await;
    let before = bot.dealer().session(user);

    for text in [buttons::discard(0), buttons::discard(9), format!("{} x", buttons::DISCARD_PREFIX)] {
        let replies = bot.handle_text(user, &text).await;
        assert_eq!(texts(&replies), vec![messages::INVALID_SLOT]);
    }
    assert_eq!(bot.dealer().session(user), before);
}

#[tokio::test]
async fn test_client_card_and_empty_client_deck() {
    let (dir, bot) = setup_bot(2, 6).await;
    let user = UserId::new(4);

    let replies = bot.handle_text(user, buttons::CLIENT).await;
    assert_eq!(replies[0].as_text(), Some(messages::CLIENT_CARD_HEADER));
    assert!(matches!(replies[1], Reply::Photo { caption: None, .. }));
    assert!(bot.dealer().session(user).last_client_card().is_some());

    for entry in std::fs::read_dir(dir.path().join("clients")).unwrap() {
        std::fs::remove_file(entry.unwrap().path()).unwrap();
    }
    let replies = bot.handle_text(user, buttons::NEW_CLIENT).await;
    assert_eq!(
        texts(&replies),
        vec!["❌ В папке клиентов пусто! Добавьте карточек."]
    );
}

#[tokio::test]
async fn test_reset_clears_session() {
    let (_dir, bot) = setup_bot(1, 6).await;
    let user = UserId::new(5);
    bot.handle_text(user, buttons::CLIENT).await;
    bot.handle_text(user, buttons::MANAGER).await;

    let replies = bot.handle_text(user, buttons::NEW_GAME).await;
    assert_eq!(replies[0].as_text(), Some(messages::GAME_RESET));
    assert!(bot.dealer().session(user).is_fresh());

    let replies = bot.handle_text(user, buttons::SHOW_HAND).await;
    assert_eq!(texts(&replies), vec![messages::NO_MANAGER_CARDS]);
}

#[tokio::test]
async fn test_stats_are_admin_only_and_persisted() {
    let (dir, bot) = setup_bot(1, 6).await;

    let replies = bot.handle_text(UserId::new(1), "/stats").await;
    assert_eq!(texts(&replies), vec![messages::ADMIN_ONLY]);

    bot.handle_text(UserId::new(1), buttons::MANAGER).await;
    let replies = bot.handle_text(UserId::new(ADMIN), "/stats").await;
    let report = replies[0].as_text().expect("Report text");
    assert!(report.contains("Карточек менеджеров показано: 6"));
    assert!(report.contains("stats: 2"));

    let saved = std::fs::read_to_string(dir.path().join("stats.json")).expect("Stats on disk");
    assert!(saved.contains("\"managers\": 6"));
}

#[tokio::test]
async fn test_unknown_text_is_ignored() {
    let (_dir, bot) = setup_bot(1, 6).await;
    assert!(bot.handle_text(UserId::new(1), "what is this").await.is_empty());
    assert!(bot.stats().snapshot().commands_used.is_empty());
}

#[tokio::test]
async fn test_help_is_counted_as_welcome() {
    let (_dir, bot) = setup_bot(1, 6).await;
    let replies = bot.handle_text(UserId::new(2), "/help").await;
    assert_eq!(replies.last().and_then(Reply::as_text), Some(messages::PRESS_START));

    let stats = bot.stats().snapshot();
    assert_eq!(stats.commands_used.get("welcome"), Some(&1));
    assert!(!stats.commands_used.contains_key("help"));
}
