//! Core identifier types shared by every layer of the drill.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque identifier of one card within a deck.
///
/// For the filesystem pool this is the image file name. Ordering is only
/// used to materialize candidate lists deterministically.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates a card identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The two fixed decks of the drill.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeckKind {
    /// Client objection cards, drawn with replacement.
    Clients,
    /// Manager response cards, drawn without replacement.
    Managers,
}

/// Chat platform user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Snapshot of a deck's membership at the time of a pool query.
pub type CardPool = BTreeSet<CardId>;

/// Displayable content reference for a card, produced by a pool source.
///
/// The engine never looks inside; only the delivery shell does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    /// Deck the card belongs to.
    pub deck: DeckKind,
    /// The card.
    pub card: CardId,
    /// Where the content lives (file path, URL).
    pub location: String,
}
