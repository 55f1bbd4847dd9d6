//! Strictly Cards - deck engine for the two-deck objection drill
//!
//! A user draws "client objection" cards and answers them from a hand of
//! "manager response" cards. Manager cards are dealt without replacement and
//! retire when discarded, until the deck is exhausted and the user resets.
//!
//! # Architecture
//!
//! - **Session**: one user's hand, retired cards and last client card
//! - **Registry**: user id → session, one lock per session
//! - **Engine**: deal, draw, discard, client draw, reset
//! - **Pool**: where deck membership comes from, queried fresh every time
//! - **Dealer**: the facade a delivery shell calls
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strictly_cards::{Dealer, DeckEngine, InMemoryPool, UserId};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), strictly_cards::DeckError> {
//! let pool = InMemoryPool::new(["client.png"], (1..=8).map(|n| format!("m{n}.png")));
//! let dealer = Dealer::new(DeckEngine::with_seed(7), Arc::new(pool));
//!
//! let user = UserId::new(42);
//! dealer.draw_client_card(user).await?;
//! let hand = dealer.deal_initial_hand(user).await?;
//! assert_eq!(hand.len(), 6);
//!
//! let used = dealer.discard(user, 1)?;
//! assert_eq!(used.hand.len(), 5);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod card;
mod dealer;
mod engine;
mod error;
mod observer;
mod pool;
mod registry;
mod session;

pub use card::{CardContent, CardId, CardPool, DeckKind, UserId};
pub use dealer::Dealer;
pub use engine::{DeckEngine, Discarded, STARTING_HAND_SIZE};
pub use error::{DeckError, PoolError};
pub use observer::{DeckEvent, DeckObserver};
pub use pool::{CardPoolSource, InMemoryPool};
pub use registry::{SessionHandle, SessionRegistry};
pub use session::{Session, SessionStatus};
