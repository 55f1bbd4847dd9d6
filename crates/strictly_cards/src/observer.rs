//! Events emitted by the deck engine after successful mutations.

use crate::card::{CardId, UserId};
use serde::{Deserialize, Serialize};

/// Something that changed in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckEvent {
    /// A starting hand replaced the current hand.
    HandDealt {
        /// Session owner.
        user_id: UserId,
        /// The new hand.
        cards: Vec<CardId>,
    },
    /// One manager card was appended to the hand.
    CardDrawn {
        /// Session owner.
        user_id: UserId,
        /// The drawn card.
        card: CardId,
    },
    /// A hand card was retired.
    CardDiscarded {
        /// Session owner.
        user_id: UserId,
        /// The retired card.
        card: CardId,
        /// 1-based slot it occupied.
        slot: usize,
    },
    /// A client card was shown.
    ClientCardDrawn {
        /// Session owner.
        user_id: UserId,
        /// The client card.
        card: CardId,
    },
    /// The session was cleared.
    SessionReset {
        /// Session owner.
        user_id: UserId,
    },
}

impl DeckEvent {
    /// The user whose session changed.
    pub fn user_id(&self) -> UserId {
        match self {
            DeckEvent::HandDealt { user_id, .. }
            | DeckEvent::CardDrawn { user_id, .. }
            | DeckEvent::CardDiscarded { user_id, .. }
            | DeckEvent::ClientCardDrawn { user_id, .. }
            | DeckEvent::SessionReset { user_id } => *user_id,
        }
    }
}

/// Receives engine events. Called synchronously while the session lock is
/// held, so implementations must not block.
pub trait DeckObserver: Send + Sync {
    /// Handles one event.
    fn observe(&self, event: &DeckEvent);
}
