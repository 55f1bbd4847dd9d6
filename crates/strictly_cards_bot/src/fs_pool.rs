//! Card pool backed by two image directories.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use strictly_cards::{CardContent, CardId, CardPool, CardPoolSource, DeckKind, PoolError};
use tracing::{debug, info, instrument, warn};

/// File extensions recognised as card images.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Lists card images straight from disk on every query.
#[derive(Debug, Clone)]
pub struct FsCardPool {
    clients_dir: PathBuf,
    managers_dir: PathBuf,
}

impl FsCardPool {
    /// Creates a pool over the two deck directories.
    pub fn new(clients_dir: impl Into<PathBuf>, managers_dir: impl Into<PathBuf>) -> Self {
        Self {
            clients_dir: clients_dir.into(),
            managers_dir: managers_dir.into(),
        }
    }

    /// Directory holding a deck's images.
    pub fn deck_dir(&self, deck: DeckKind) -> &Path {
        match deck {
            DeckKind::Clients => &self.clients_dir,
            DeckKind::Managers => &self.managers_dir,
        }
    }

    /// Creates both deck directories if missing.
    #[instrument(skip(self))]
    pub async fn ensure_dirs(&self) -> Result<(), PoolError> {
        for dir in [&self.clients_dir, &self.managers_dir] {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                PoolError::new(format!("Failed to create {}: {}", dir.display(), e))
            })?;
            debug!(dir = %dir.display(), "Deck directory ready");
        }
        info!("Deck directories ready");
        Ok(())
    }
}

/// True for file names ending in a card image extension, any case.
pub fn is_card_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[async_trait]
impl CardPoolSource for FsCardPool {
    #[instrument(skip(self))]
    async fn list_members(&self, deck: DeckKind) -> Result<CardPool, PoolError> {
        let dir = self.deck_dir(deck);
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            PoolError::new(format!("Failed to list {}: {}", dir.display(), e))
        })?;

        let mut cards = CardPool::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PoolError::new(format!("Failed to read {}: {}", dir.display(), e)))?
        {
            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            if !is_card_image(&name) {
                continue;
            }
            // Files can vanish between listing and stat; skip them.
            match entry.file_type().await {
                Ok(kind) if kind.is_file() => {
                    cards.insert(CardId::new(name));
                }
                Ok(_) => {}
                Err(e) => warn!(file = %name, error = %e, "Skipping unreadable entry"),
            }
        }

        debug!(count = cards.len(), "Listed deck");
        Ok(cards)
    }

    fn render_card(&self, deck: DeckKind, card: &CardId) -> CardContent {
        CardContent {
            deck,
            card: card.clone(),
            location: self.deck_dir(deck).join(card.as_str()).display().to_string(),
        }
    }
}
