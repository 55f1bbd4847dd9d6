//! Per-user drill state.

use crate::card::{CardId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// One user's in-memory drill state.
///
/// Fields are private: every mutation goes through
/// [`DeckEngine`](crate::DeckEngine) so the hand/used invariants hold after
/// each operation. Serializing is allowed for inspection; there is no way
/// back in:
///
/// ```compile_fail
/// fn restorable<T: serde::de::DeserializeOwned>() {}
/// restorable::<strictly_cards::Session>();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    user_id: UserId,
    used_manager_cards: BTreeSet<CardId>,
    current_hand: Vec<CardId>,
    last_client_card: Option<CardId>,
}

impl Session {
    /// Creates an empty session for a user.
    #[instrument]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            used_manager_cards: BTreeSet::new(),
            current_hand: Vec::new(),
            last_client_card: None,
        }
    }

    /// Returns the owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Manager cards retired until the next reset.
    pub fn used_manager_cards(&self) -> &BTreeSet<CardId> {
        &self.used_manager_cards
    }

    /// Manager cards in hand; index `i` is slot `i + 1`.
    pub fn current_hand(&self) -> &[CardId] {
        &self.current_hand
    }

    /// Most recently shown client card.
    pub fn last_client_card(&self) -> Option<&CardId> {
        self.last_client_card.as_ref()
    }

    /// True when nothing has happened since creation or the last reset.
    pub fn is_fresh(&self) -> bool {
        self.used_manager_cards.is_empty()
            && self.current_hand.is_empty()
            && self.last_client_card.is_none()
    }

    /// True when a card is in hand or retired.
    pub fn holds_or_used(&self, card: &CardId) -> bool {
        self.used_manager_cards.contains(card) || self.current_hand.contains(card)
    }

    /// Checks the hand/used invariants.
    pub fn is_consistent(&self) -> bool {
        let unique: BTreeSet<_> = self.current_hand.iter().collect();
        unique.len() == self.current_hand.len()
            && self
                .current_hand
                .iter()
                .all(|card| !self.used_manager_cards.contains(card))
    }

    pub(crate) fn set_hand(&mut self, hand: Vec<CardId>) {
        self.current_hand = hand;
    }

    pub(crate) fn push_to_hand(&mut self, card: CardId) {
        self.current_hand.push(card);
    }

    /// Moves the card at `index` from the hand into the used set.
    pub(crate) fn retire_at(&mut self, index: usize) -> CardId {
        let card = self.current_hand.remove(index);
        self.used_manager_cards.insert(card.clone());
        card
    }

    pub(crate) fn set_last_client_card(&mut self, card: CardId) {
        self.last_client_card = Some(card);
    }

    pub(crate) fn clear(&mut self) {
        self.used_manager_cards.clear();
        self.current_hand.clear();
        self.last_client_card = None;
    }
}

/// Orthogonal state bits of a session against a manager pool snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// A client card has been shown.
    pub client_shown: bool,
    /// The hand holds at least one manager card.
    pub hand_dealt: bool,
    /// Neither a draw nor an initial deal is possible.
    pub exhausted: bool,
}

impl SessionStatus {
    /// All bits clear.
    pub fn is_fresh(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_fresh_and_consistent() {
        let session = Session::new(UserId::new(7));
        assert!(session.is_fresh());
        assert!(session.is_consistent());
        assert_eq!(session.user_id(), UserId::new(7));
    }

    #[test]
    fn retire_moves_card_out_of_hand() {
        let mut session = Session::new(UserId::new(1));
        session.set_hand(vec!["a".into(), "b".into(), "c".into()]);
        let card = session.retire_at(1);
        assert_eq!(card, CardId::from("b"));
        assert_eq!(session.current_hand(), &[CardId::from("a"), CardId::from("c")]);
        assert!(session.used_manager_cards().contains(&card));
        assert!(session.is_consistent());
    }

    #[test]
    fn duplicate_in_hand_is_inconsistent() {
        let mut session = Session::new(UserId::new(1));
        session.set_hand(vec!["a".into(), "a".into()]);
        assert!(!session.is_consistent());
    }

    #[test]
    fn clear_keeps_user() {
        let mut session = Session::new(UserId::new(3));
        session.set_hand(vec!["a".into()]);
        session.set_last_client_card("x".into());
        session.clear();
        assert_eq!(session, Session::new(UserId::new(3)));
    }
}
