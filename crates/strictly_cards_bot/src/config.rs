//! Bot configuration: TOML file plus environment overrides.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_cards::UserId;
use tracing::{debug, info, instrument};

/// Runtime configuration for the drill bot.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// Directory holding client card images.
    #[serde(default = "default_clients_dir")]
    clients_dir: PathBuf,

    /// Directory holding manager card images.
    #[serde(default = "default_managers_dir")]
    managers_dir: PathBuf,

    /// JSON file usage statistics are persisted to.
    #[serde(default = "default_stats_file")]
    stats_file: PathBuf,

    /// User allowed to read usage statistics.
    #[serde(default)]
    admin_id: Option<i64>,

    /// Fixed RNG seed for reproducible draws.
    #[serde(default)]
    rng_seed: Option<u64>,
}

fn default_clients_dir() -> PathBuf {
    PathBuf::from("cards/clients")
}

fn default_managers_dir() -> PathBuf {
    PathBuf::from("cards/managers")
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("bot_stats.json")
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            clients_dir: default_clients_dir(),
            managers_dir: default_managers_dir(),
            stats_file: default_stats_file(),
            admin_id: None,
            rng_seed: None,
        }
    }
}

impl BotConfig {
    /// Builds a configuration rooted in `cards_root` (`clients/`, `managers/`).
    pub fn with_cards_root(cards_root: impl AsRef<Path>, stats_file: impl Into<PathBuf>) -> Self {
        let root = cards_root.as_ref();
        Self {
            clients_dir: root.join("clients"),
            managers_dir: root.join("managers"),
            stats_file: stats_file.into(),
            ..Self::default()
        }
    }

    /// Sets the admin user.
    pub fn with_admin(mut self, admin: i64) -> Self {
        self.admin_id = Some(admin);
        self
    }

    /// Sets a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// The admin as a user id, if configured.
    pub fn admin_user(&self) -> Option<UserId> {
        self.admin_id.map(UserId::new)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!("Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise starts from defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads the file, then applies process environment overrides.
    pub fn from_env(path: &Path) -> Result<Self, ConfigError> {
        Self::load(path)?.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `CLIENTS_DIR`, `MANAGERS_DIR`, `STATS_FILE`, `ADMIN_ID` and
    /// `RNG_SEED` from `lookup`.
    #[instrument(skip(self, lookup))]
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = lookup("CLIENTS_DIR") {
            self.clients_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("MANAGERS_DIR") {
            self.managers_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("STATS_FILE") {
            self.stats_file = PathBuf::from(file);
        }
        if let Some(admin) = lookup("ADMIN_ID") {
            let admin = admin
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("ADMIN_ID must be a number: {}", e)))?;
            self.admin_id = Some(admin);
        }
        if let Some(seed) = lookup("RNG_SEED") {
            let seed = seed
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("RNG_SEED must be a number: {}", e)))?;
            self.rng_seed = Some(seed);
        }
        debug!(config = ?self, "Applied environment overrides");
        Ok(self)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
