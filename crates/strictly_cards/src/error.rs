//! Error types for the deck engine and its card pool collaborator.

use crate::card::DeckKind;
use derive_more::{Display, Error};
use tracing::instrument;

/// Card pool query failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Card pool error: {} at {}:{}", message, file, line)]
pub struct PoolError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PoolError {
    /// Creates a new pool error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Every way a deck operation can fail.
///
/// All variants are recoverable; a failed operation leaves the session
/// exactly as it was.
#[derive(Debug, Clone, Display, Error)]
pub enum DeckError {
    /// The card pool source could not be queried.
    #[display("{deck} pool unavailable: {source}")]
    PoolUnavailable {
        /// Deck that was being listed.
        deck: DeckKind,
        /// Underlying pool failure.
        source: PoolError,
    },

    /// Fewer manager cards exist than a starting hand needs.
    #[display("deck too small: need {required} cards, found {found}")]
    InsufficientDeck {
        /// Starting hand size.
        required: usize,
        /// Cards currently in the pool.
        found: usize,
    },

    /// No undrawn, unused manager cards remain.
    #[display("all cards dealt, reset to continue")]
    DeckExhausted,

    /// The client deck has no members.
    #[display("no client cards available")]
    EmptyDeck,

    /// Discard referenced a hand position that does not exist.
    #[display("invalid slot {slot} for a hand of {hand_len}")]
    InvalidSlot {
        /// Requested 1-based slot.
        slot: usize,
        /// Hand length at the time of the request.
        hand_len: usize,
    },
}

impl DeckError {
    /// Wraps a pool failure for the given deck.
    pub fn pool_unavailable(deck: DeckKind, source: PoolError) -> Self {
        Self::PoolUnavailable { deck, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_error_records_caller_location() {
        let err = PoolError::new("directory missing");
        assert_eq!(err.file, file!());
        assert!(err.to_string().contains("directory missing"));
    }

    #[test]
    fn deck_error_messages_name_the_problem() {
        let err = DeckError::InvalidSlot { slot: 9, hand_len: 6 };
        assert_eq!(err.to_string(), "invalid slot 9 for a hand of 6");

        let err = DeckError::pool_unavailable(DeckKind::Clients, PoolError::new("gone"));
        assert!(err.to_string().starts_with("clients pool unavailable"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
