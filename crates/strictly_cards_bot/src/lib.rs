//! Strictly Cards bot - delivery shell for the objection drill
//!
//! Wraps the [`strictly_cards`] engine with everything a chat front end
//! needs, without tying it to one chat platform.
//!
//! # Architecture
//!
//! - **Config**: TOML file plus environment overrides
//! - **Pool**: card images listed from two directories on every query
//! - **Bot**: parses commands, calls the dealer, builds replies
//! - **Stats**: usage counters fed by deck events, persisted as JSON
//! - **Console**: stdin/stdout transport for local play

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bot;
pub mod cli;
mod command;
mod config;
pub mod console;
mod fs_pool;
pub mod messages;
mod reply;
mod stats;

pub use bot::Bot;
pub use command::Command;
pub use config::{BotConfig, ConfigError};
pub use fs_pool::{FsCardPool, IMAGE_EXTENSIONS, is_card_image};
pub use reply::{Keyboard, Reply};
pub use stats::{CardsShown, StatsError, StatsRecorder, UsageStats};
