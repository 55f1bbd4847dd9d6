//! Deck engine: dealing, drawing, discarding and resetting sessions.
//!
//! Every operation takes the session it mutates plus, when it needs one, a
//! fresh snapshot of the deck's pool. Operations validate first and mutate
//! last, so a returned error always means the session is untouched.

use crate::card::{CardId, CardPool};
use crate::error::DeckError;
use crate::observer::{DeckEvent, DeckObserver};
use crate::session::{Session, SessionStatus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Number of manager cards in a starting hand.
pub const STARTING_HAND_SIZE: usize = 6;

/// Result of a successful discard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discarded {
    /// The retired card.
    pub card: CardId,
    /// 1-based slot the card occupied.
    pub slot: usize,
    /// Hand after removal.
    pub hand: Vec<CardId>,
}

/// The drill's rules engine.
pub struct DeckEngine {
    rng: Mutex<StdRng>,
    observers: Vec<Arc<dyn DeckObserver>>,
}

impl fmt::Debug for DeckEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckEngine")
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for DeckEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckEngine {
    /// Creates an engine seeded from OS entropy.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating deck engine with entropy seed");
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates an engine with a fixed seed for reproducible draws.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        info!(seed, "Creating deck engine with fixed seed");
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            observers: Vec::new(),
        }
    }

    /// Registers an observer notified after every successful mutation.
    pub fn with_observer(mut self, observer: Arc<dyn DeckObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    fn notify(&self, event: DeckEvent) {
        for observer in &self.observers {
            observer.observe(&event);
        }
    }

    /// Replaces the hand with a fresh starting hand.
    ///
    /// Cards come from the pool minus retired cards. Cards held before the
    /// deal go back to the available pool, they are not retired.
    #[instrument(skip(self, session, pool), fields(user_id = %session.user_id(), pool_size = pool.len()))]
    pub fn deal_initial_hand(
        &self,
        session: &mut Session,
        pool: &CardPool,
    ) -> Result<Vec<CardId>, DeckError> {
        if pool.len() < STARTING_HAND_SIZE {
            warn!("Manager deck smaller than a starting hand");
            return Err(DeckError::InsufficientDeck {
                required: STARTING_HAND_SIZE,
                found: pool.len(),
            });
        }

        let mut candidates: Vec<CardId> = pool
            .iter()
            .filter(|card| !session.used_manager_cards().contains(*card))
            .cloned()
            .collect();
        if candidates.len() < STARTING_HAND_SIZE {
            warn!(available = candidates.len(), "Not enough unused cards to deal");
            return Err(DeckError::DeckExhausted);
        }

        let hand = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let (picked, _) = candidates.partial_shuffle(&mut *rng, STARTING_HAND_SIZE);
            picked.to_vec()
        };

        session.set_hand(hand.clone());
        info!(hand = ?hand, "Dealt starting hand");
        self.notify(DeckEvent::HandDealt {
            user_id: session.user_id(),
            cards: hand.clone(),
        });
        Ok(hand)
    }

    /// Appends one card that is neither retired nor already held.
    #[instrument(skip(self, session, pool), fields(user_id = %session.user_id(), pool_size = pool.len()))]
    pub fn draw_one(
        &self,
        session: &mut Session,
        pool: &CardPool,
    ) -> Result<Vec<CardId>, DeckError> {
        let candidates: Vec<&CardId> = pool
            .iter()
            .filter(|card| !session.holds_or_used(card))
            .collect();

        let card = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            candidates.choose(&mut *rng).map(|card| (*card).clone())
        };
        let Some(card) = card else {
            warn!("No cards left to draw");
            return Err(DeckError::DeckExhausted);
        };

        session.push_to_hand(card.clone());
        info!(%card, slot = session.current_hand().len(), "Drew manager card");
        self.notify(DeckEvent::CardDrawn {
            user_id: session.user_id(),
            card,
        });
        Ok(session.current_hand().to_vec())
    }

    /// Retires the card at a 1-based slot. Later slots shift down by one.
    #[instrument(skip(self, session), fields(user_id = %session.user_id()))]
    pub fn discard(&self, session: &mut Session, slot: usize) -> Result<Discarded, DeckError> {
        let hand_len = session.current_hand().len();
        if slot == 0 || slot > hand_len {
            warn!(hand_len, "Discard of a nonexistent slot");
            return Err(DeckError::InvalidSlot { slot, hand_len });
        }

        let card = session.retire_at(slot - 1);
        info!(%card, "Discarded manager card");
        self.notify(DeckEvent::CardDiscarded {
            user_id: session.user_id(),
            card: card.clone(),
            slot,
        });
        Ok(Discarded {
            card,
            slot,
            hand: session.current_hand().to_vec(),
        })
    }

    /// Shows a client card. Clients are drawn with replacement.
    #[instrument(skip(self, session, pool), fields(user_id = %session.user_id(), pool_size = pool.len()))]
    pub fn draw_client_card(
        &self,
        session: &mut Session,
        pool: &CardPool,
    ) -> Result<CardId, DeckError> {
        let candidates: Vec<&CardId> = pool.iter().collect();
        let card = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            candidates.choose(&mut *rng).map(|card| (*card).clone())
        };
        let Some(card) = card else {
            warn!("Client deck is empty");
            return Err(DeckError::EmptyDeck);
        };

        session.set_last_client_card(card.clone());
        info!(%card, "Drew client card");
        self.notify(DeckEvent::ClientCardDrawn {
            user_id: session.user_id(),
            card: card.clone(),
        });
        Ok(card)
    }

    /// Clears the session back to its freshly created state.
    #[instrument(skip(self, session), fields(user_id = %session.user_id()))]
    pub fn reset(&self, session: &mut Session) {
        session.clear();
        info!("Session reset");
        self.notify(DeckEvent::SessionReset {
            user_id: session.user_id(),
        });
    }

    /// Computes the session's state bits against a manager pool snapshot.
    #[instrument(skip(self, session, manager_pool), fields(user_id = %session.user_id()))]
    pub fn status(&self, session: &Session, manager_pool: &CardPool) -> SessionStatus {
        let can_draw = manager_pool.iter().any(|card| !session.holds_or_used(card));
        let unused = manager_pool
            .iter()
            .filter(|card| !session.used_manager_cards().contains(*card))
            .count();
        let can_deal = manager_pool.len() >= STARTING_HAND_SIZE && unused >= STARTING_HAND_SIZE;

        let status = SessionStatus {
            client_shown: session.last_client_card().is_some(),
            hand_dealt: !session.current_hand().is_empty(),
            exhausted: !can_draw && !can_deal,
        };
        debug!(?status, "Computed session status");
        status
    }
}
