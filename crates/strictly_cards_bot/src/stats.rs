//! Usage statistics, fed by deck events and persisted as JSON.

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use strictly_cards::{DeckEvent, DeckObserver, UserId};
use tracing::{debug, info, instrument, warn};

/// Failure to persist statistics.
#[derive(Debug, Display, Error, From)]
pub enum StatsError {
    /// Reading or writing the stats file failed.
    #[display("Stats file I/O failed: {_0}")]
    Io(std::io::Error),
    /// The stats could not be encoded.
    #[display("Stats encoding failed: {_0}")]
    Json(serde_json::Error),
}

/// Cards shown per deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardsShown {
    /// Client cards shown.
    #[serde(default)]
    pub clients: u64,
    /// Manager cards dealt or drawn.
    #[serde(default)]
    pub managers: u64,
}

/// Counters across all users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Distinct users that ran `/start` or `/help`.
    #[serde(default)]
    pub total_users: u64,
    /// Those users' ids.
    #[serde(default)]
    pub active_users: BTreeSet<i64>,
    /// Handled commands by name.
    #[serde(default)]
    pub commands_used: BTreeMap<String, u64>,
    /// Cards shown per deck.
    #[serde(default)]
    pub cards_shown: CardsShown,
}

impl UsageStats {
    /// Marks a user as active.
    pub fn record_user(&mut self, user_id: UserId) {
        self.active_users.insert(user_id.get());
        self.total_users = self.active_users.len() as u64;
    }

    /// Counts one use of a command.
    pub fn record_command(&mut self, name: &str) {
        *self.commands_used.entry(name.to_string()).or_default() += 1;
    }

    /// Folds a deck event into the card counters.
    pub fn apply(&mut self, event: &DeckEvent) {
        match event {
            DeckEvent::HandDealt { cards, .. } => self.cards_shown.managers += cards.len() as u64,
            DeckEvent::CardDrawn { .. } => self.cards_shown.managers += 1,
            DeckEvent::ClientCardDrawn { .. } => self.cards_shown.clients += 1,
            DeckEvent::CardDiscarded { .. } | DeckEvent::SessionReset { .. } => {}
        }
    }

    /// Admin report text.
    pub fn report(&self) -> String {
        let mut text = format!(
            "📊 Статистика бота:\n\
             👥 Всего пользователей: {}\n\
             🟢 Активных пользователей: {}\n\
             🃏 Карточек клиентов показано: {}\n\
             👔 Карточек менеджеров показано: {}\n\
             \n📌 Использование команд:\n",
            self.total_users,
            self.active_users.len(),
            self.cards_shown.clients,
            self.cards_shown.managers,
        );
        for (command, count) in &self.commands_used {
            let _ = writeln!(text, "{command}: {count}");
        }
        text
    }
}

/// Shared statistics store.
///
/// Observes engine events in memory; the shell calls [`flush`](Self::flush)
/// after each handled command so no file I/O happens inside the engine.
#[derive(Debug)]
pub struct StatsRecorder {
    path: PathBuf,
    stats: Mutex<UsageStats>,
    flushing: tokio::sync::Mutex<()>,
}

impl StatsRecorder {
    /// Loads stats from `path`. A missing or corrupt file starts empty.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let stats = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(stats) => {
                    info!("Loaded usage statistics");
                    stats
                }
                Err(e) => {
                    warn!(error = %e, "Corrupt stats file, starting empty");
                    UsageStats::default()
                }
            },
            Err(e) => {
                debug!(error = %e, "No stats file, starting empty");
                UsageStats::default()
            }
        };
        Self {
            path,
            stats: Mutex::new(stats),
            flushing: tokio::sync::Mutex::new(()),
        }
    }

    /// Copy of the current counters.
    pub fn snapshot(&self) -> UsageStats {
        self.lock().clone()
    }

    /// Mutates the counters in place.
    pub fn update(&self, f: impl FnOnce(&mut UsageStats)) {
        f(&mut self.lock());
    }

    /// Writes the counters to disk via a temporary file and rename.
    ///
    /// Concurrent flushes queue up; each one snapshots the counters after
    /// the previous rename, so the file on disk only moves forward.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn flush(&self) -> Result<(), StatsError> {
        let _turn = self.flushing.lock().await;
        let json = serde_json::to_string_pretty(&*self.lock())?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Stats flushed");
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, UsageStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeckObserver for StatsRecorder {
    fn observe(&self, event: &DeckEvent) {
        self.lock().apply(event);
    }
}
