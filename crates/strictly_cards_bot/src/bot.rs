//! Command router: turns user commands into dealer calls and replies.

use crate::command::Command;
use crate::config::BotConfig;
use crate::fs_pool::FsCardPool;
use crate::messages;
use crate::reply::Reply;
use crate::stats::StatsRecorder;
use std::sync::Arc;
use strictly_cards::{Dealer, DeckEngine, DeckError, DeckKind, PoolError, UserId};
use tracing::{debug, info, instrument, warn};

/// The drill bot, independent of any chat transport.
#[derive(Debug, Clone)]
pub struct Bot {
    dealer: Dealer,
    stats: Arc<StatsRecorder>,
    admin: Option<UserId>,
}

impl Bot {
    /// Assembles a bot from its parts.
    pub fn new(dealer: Dealer, stats: Arc<StatsRecorder>, admin: Option<UserId>) -> Self {
        Self {
            dealer,
            stats,
            admin,
        }
    }

    /// Builds the filesystem-backed bot described by `config`.
    #[instrument(skip(config))]
    pub async fn from_config(config: &BotConfig) -> Result<Self, PoolError> {
        let pool = FsCardPool::new(config.clients_dir(), config.managers_dir());
        pool.ensure_dirs().await?;

        let stats = Arc::new(StatsRecorder::load(config.stats_file()).await);
        let engine = match config.rng_seed() {
            Some(seed) => DeckEngine::with_seed(*seed),
            None => DeckEngine::new(),
        }
        .with_observer(stats.clone());

        info!(admin = ?config.admin_id(), "Bot ready");
        Ok(Self::new(
            Dealer::new(engine, Arc::new(pool)),
            stats,
            config.admin_user(),
        ))
    }

    /// The dealer behind the bot.
    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Usage statistics.
    pub fn stats(&self) -> &StatsRecorder {
        &self.stats
    }

    /// Handles one incoming text message.
    ///
    /// Unknown text gets no reply. Statistics are flushed afterwards; a
    /// failed flush is logged and does not affect the replies.
    #[instrument(skip(self))]
    pub async fn handle_text(&self, user_id: UserId, text: &str) -> Vec<Reply> {
        let Some(command) = Command::parse(text) else {
            return Vec::new();
        };
        self.stats.update(|s| s.record_command(command.name()));

        let replies = self.handle(user_id, command).await;

        if let Err(e) = self.stats.flush().await {
            warn!(error = %e, "Failed to persist usage statistics");
        }
        replies
    }

    /// Handles one parsed command.
    #[instrument(skip(self))]
    pub async fn handle(&self, user_id: UserId, command: Command) -> Vec<Reply> {
        debug!(command = command.name(), "Handling command");
        match command {
            Command::Start => {
                self.stats.update(|s| s.record_user(user_id));
                vec![
                    Reply::text(messages::ABOUT_TEXT),
                    Reply::with_keyboard(messages::greeting(), messages::main_keyboard()),
                ]
            }
            Command::Help => {
                self.stats.update(|s| s.record_user(user_id));
                vec![
                    Reply::text(messages::ABOUT_TEXT),
                    Reply::with_keyboard(messages::PRESS_START, messages::start_keyboard()),
                ]
            }
            Command::Stats => self.stats_report(user_id),
            Command::Client => self.client_card(user_id).await,
            Command::Manager => match self.dealer.deal_initial_hand(user_id).await {
                Ok(_) => self.show_hand(user_id),
                Err(e) => error_reply(&e),
            },
            Command::Draw => match self.dealer.draw_one(user_id).await {
                Ok(_) => self.show_hand(user_id),
                Err(e) => error_reply(&e),
            },
            Command::ShowHand => self.show_hand(user_id),
            Command::Discard(None) => vec![Reply::text(messages::INVALID_SLOT)],
            Command::Discard(Some(slot)) => self.discard(user_id, slot),
            Command::Reset => {
                self.dealer.reset(user_id);
                vec![
                    Reply::text(messages::GAME_RESET),
                    Reply::with_keyboard(messages::greeting(), messages::main_keyboard()),
                ]
            }
            Command::About => vec![Reply::text(messages::ABOUT_TEXT)],
        }
    }

    fn stats_report(&self, user_id: UserId) -> Vec<Reply> {
        if self.admin != Some(user_id) {
            warn!(%user_id, "Non-admin requested statistics");
            return vec![Reply::text(messages::ADMIN_ONLY)];
        }
        vec![Reply::text(self.stats.snapshot().report())]
    }

    async fn client_card(&self, user_id: UserId) -> Vec<Reply> {
        match self.dealer.draw_client_card(user_id).await {
            Ok(card) => vec![
                Reply::text(messages::CLIENT_CARD_HEADER),
                Reply::Photo {
                    content: self.dealer.render_card(DeckKind::Clients, &card),
                    caption: None,
                },
                Reply::with_keyboard(messages::CHOOSE_ACTION, messages::client_keyboard()),
            ],
            Err(e) => error_reply(&e),
        }
    }

    fn discard(&self, user_id: UserId, slot: usize) -> Vec<Reply> {
        match self.dealer.discard(user_id, slot) {
            Ok(discarded) => {
                let mut replies = vec![Reply::Photo {
                    content: self
                        .dealer
                        .render_card(DeckKind::Managers, &discarded.card),
                    caption: Some(messages::used_caption(discarded.slot)),
                }];
                replies.extend(self.show_hand(user_id));
                replies
            }
            Err(e) => error_reply(&e),
        }
    }

    fn show_hand(&self, user_id: UserId) -> Vec<Reply> {
        let session = self.dealer.session(user_id);
        let hand = session.current_hand();
        if hand.is_empty() {
            return vec![Reply::text(messages::NO_MANAGER_CARDS)];
        }

        let items = hand
            .iter()
            .enumerate()
            .map(|(i, card)| {
                (
                    self.dealer.render_card(DeckKind::Managers, card),
                    messages::slot_caption(i + 1),
                )
            })
            .collect();
        vec![
            Reply::Album { items },
            Reply::with_keyboard(
                messages::hand_header(hand.len()),
                messages::hand_keyboard(hand.len()),
            ),
        ]
    }
}

fn error_reply(err: &DeckError) -> Vec<Reply> {
    debug!(error = %err, "Replying with error text");
    vec![Reply::text(messages::error_message(err))]
}
