//! Card pool sources: where deck membership comes from.

use crate::card::{CardContent, CardId, CardPool, DeckKind};
use crate::error::PoolError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, instrument};

/// Supplies deck membership on demand.
///
/// Membership may change between calls, so callers query before every deal
/// or draw and never cache the result.
#[async_trait]
pub trait CardPoolSource: Send + Sync {
    /// Lists the cards currently in a deck.
    async fn list_members(&self, deck: DeckKind) -> Result<CardPool, PoolError>;

    /// Resolves a card to displayable content.
    fn render_card(&self, deck: DeckKind, card: &CardId) -> CardContent;
}

/// Pool held in memory; decks can be edited while sessions are live.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPool {
    decks: Arc<RwLock<HashMap<DeckKind, CardPool>>>,
    unavailable: Arc<RwLock<Option<String>>>,
}

impl InMemoryPool {
    /// Creates a pool from two card lists.
    #[instrument(skip(clients, managers))]
    pub fn new<C, M>(clients: C, managers: M) -> Self
    where
        C: IntoIterator,
        C::Item: Into<CardId>,
        M: IntoIterator,
        M::Item: Into<CardId>,
    {
        let pool = Self::default();
        pool.set_deck(DeckKind::Clients, clients);
        pool.set_deck(DeckKind::Managers, managers);
        pool
    }

    /// Replaces a deck's membership.
    pub fn set_deck<I>(&self, deck: DeckKind, cards: I)
    where
        I: IntoIterator,
        I::Item: Into<CardId>,
    {
        let cards: CardPool = cards.into_iter().map(Into::into).collect();
        debug!(%deck, size = cards.len(), "Setting deck membership");
        self.decks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(deck, cards);
    }

    /// Makes every query fail with `reason` until cleared with `None`.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.unavailable.write().unwrap_or_else(PoisonError::into_inner) =
            reason.map(str::to_string);
    }
}

#[async_trait]
impl CardPoolSource for InMemoryPool {
    #[instrument(skip(self))]
    async fn list_members(&self, deck: DeckKind) -> Result<CardPool, PoolError> {
        if let Some(reason) = self
            .unavailable
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(PoolError::new(reason));
        }
        Ok(self
            .decks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&deck)
            .cloned()
            .unwrap_or_default())
    }

    fn render_card(&self, deck: DeckKind, card: &CardId) -> CardContent {
        CardContent {
            deck,
            card: card.clone(),
            location: format!("memory://{deck}/{card}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_current_membership() {
        let pool = InMemoryPool::new(["c1"], ["m1", "m2"]);
        assert_eq!(pool.list_members(DeckKind::Managers).await.unwrap().len(), 2);

        pool.set_deck(DeckKind::Managers, ["m3"]);
        let managers = pool.list_members(DeckKind::Managers).await.unwrap();
        assert_eq!(managers.into_iter().collect::<Vec<_>>(), vec![CardId::from("m3")]);
    }

    #[tokio::test]
    async fn unavailable_pool_fails_until_cleared() {
        let pool = InMemoryPool::new(["c1"], ["m1"]);
        pool.set_unavailable(Some("disk on fire"));
        assert!(pool.list_members(DeckKind::Clients).await.is_err());
        pool.set_unavailable(None);
        assert!(pool.list_members(DeckKind::Clients).await.is_ok());
    }

    #[test]
    fn renders_to_a_memory_location() {
        let pool = InMemoryPool::default();
        let content = pool.render_card(DeckKind::Clients, &CardId::from("c1"));
        assert_eq!(content.location, "memory://clients/c1");
    }
}
