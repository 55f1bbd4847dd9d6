//! Facade the delivery shell talks to.

use crate::card::{CardContent, CardId, CardPool, DeckKind, UserId};
use crate::engine::{DeckEngine, Discarded};
use crate::error::DeckError;
use crate::pool::CardPoolSource;
use crate::registry::SessionRegistry;
use crate::session::{Session, SessionStatus};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Ties the registry, the engine and a card pool source together.
///
/// Each operation lists the pool first, then runs the engine under the
/// user's session lock. No lock is held while the pool is queried.
#[derive(Clone)]
pub struct Dealer {
    registry: SessionRegistry,
    engine: Arc<DeckEngine>,
    pool: Arc<dyn CardPoolSource>,
}

impl std::fmt::Debug for Dealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dealer")
            .field("sessions", &self.registry.len())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl Dealer {
    /// Creates a dealer with a fresh registry.
    pub fn new(engine: DeckEngine, pool: Arc<dyn CardPoolSource>) -> Self {
        Self::with_registry(SessionRegistry::new(), engine, pool)
    }

    /// Creates a dealer sharing an existing registry.
    pub fn with_registry(
        registry: SessionRegistry,
        engine: DeckEngine,
        pool: Arc<dyn CardPoolSource>,
    ) -> Self {
        Self {
            registry,
            engine: Arc::new(engine),
            pool,
        }
    }

    /// The session registry.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    async fn members(&self, deck: DeckKind) -> Result<CardPool, DeckError> {
        self.pool.list_members(deck).await.map_err(|source| {
            warn!(%deck, error = %source, "Card pool query failed");
            DeckError::pool_unavailable(deck, source)
        })
    }

    /// Returns a snapshot of the user's session, creating it if needed.
    #[instrument(skip(self))]
    pub fn session(&self, user_id: UserId) -> Session {
        self.registry.with_session(user_id, |session| session.clone())
    }

    /// Deals a starting hand of manager cards.
    #[instrument(skip(self))]
    pub async fn deal_initial_hand(&self, user_id: UserId) -> Result<Vec<CardId>, DeckError> {
        let pool = self.members(DeckKind::Managers).await?;
        self.registry.with_session(user_id, |session| {
            self.engine.deal_initial_hand(session, &pool)
        })
    }

    /// Draws one more manager card into the hand.
    #[instrument(skip(self))]
    pub async fn draw_one(&self, user_id: UserId) -> Result<Vec<CardId>, DeckError> {
        let pool = self.members(DeckKind::Managers).await?;
        self.registry
            .with_session(user_id, |session| self.engine.draw_one(session, &pool))
    }

    /// Retires the manager card at a 1-based slot.
    #[instrument(skip(self))]
    pub fn discard(&self, user_id: UserId, slot: usize) -> Result<Discarded, DeckError> {
        self.registry
            .with_session(user_id, |session| self.engine.discard(session, slot))
    }

    /// Shows a random client card.
    #[instrument(skip(self))]
    pub async fn draw_client_card(&self, user_id: UserId) -> Result<CardId, DeckError> {
        let pool = self.members(DeckKind::Clients).await?;
        self.registry.with_session(user_id, |session| {
            self.engine.draw_client_card(session, &pool)
        })
    }

    /// Clears the user's session.
    #[instrument(skip(self))]
    pub fn reset(&self, user_id: UserId) {
        self.registry
            .with_session(user_id, |session| self.engine.reset(session));
    }

    /// Computes the user's state bits against the current manager deck.
    #[instrument(skip(self))]
    pub async fn status(&self, user_id: UserId) -> Result<SessionStatus, DeckError> {
        let pool = self.members(DeckKind::Managers).await?;
        Ok(self
            .registry
            .with_session(user_id, |session| self.engine.status(session, &pool)))
    }

    /// Resolves a card to displayable content.
    #[instrument(skip(self))]
    pub fn render_card(&self, deck: DeckKind, card: &CardId) -> CardContent {
        let content = self.pool.render_card(deck, card);
        debug!(location = %content.location, "Rendered card");
        content
    }
}
