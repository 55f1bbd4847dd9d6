//! User id → session mapping.

use crate::card::UserId;
use crate::session::Session;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Shared handle to one user's session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Manages all drill sessions.
///
/// Cloning is cheap and every clone sees the same sessions. Each session sits
/// behind its own mutex so operations for one user are serialized while
/// different users proceed independently.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<UserId, SessionHandle>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session registry");
        Self::default()
    }

    /// Returns the user's session, creating an empty one on first touch.
    ///
    /// Lookup and insertion happen under one lock, so racing first requests
    /// from the same user share a single session.
    #[instrument(skip(self))]
    pub fn get_or_create(&self, user_id: UserId) -> SessionHandle {
        let mut sessions = lock(&self.sessions);
        sessions
            .entry(user_id)
            .or_insert_with(|| {
                info!(%user_id, "Creating new session");
                Arc::new(Mutex::new(Session::new(user_id)))
            })
            .clone()
    }

    /// Runs `f` with exclusive access to the user's session.
    #[instrument(skip(self, f))]
    pub fn with_session<T>(&self, user_id: UserId, f: impl FnOnce(&mut Session) -> T) -> T {
        let handle = self.get_or_create(user_id);
        let mut session = lock(&handle);
        f(&mut session)
    }

    /// Clones the user's current state without creating a session.
    #[instrument(skip(self))]
    pub fn snapshot(&self, user_id: UserId) -> Option<Session> {
        let handle = lock(&self.sessions).get(&user_id).cloned();
        if handle.is_none() {
            debug!(%user_id, "Session not found");
        }
        handle.map(|handle| lock(&handle).clone())
    }

    /// Number of users seen so far.
    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// True when no user has interacted yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lists all known user ids, sorted.
    #[instrument(skip(self))]
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<_> = lock(&self.sessions).keys().copied().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}
