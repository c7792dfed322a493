//! In-memory session registry.
//!
//! Two levels of locking:
//! - an `RwLock` around the key → session map, held only to look up or
//!   insert an entry
//! - a `Mutex` per session, held for the whole of one transition
//!
//! Different users never contend on the session lock; events for the same
//! user are applied one at a time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::types::Session;

/// Concurrency-safe registry of per-user sessions.
///
/// Sessions are created lazily on first contact and live until the process
/// exits. There is no way to take a session out of the store: callers get
/// a `&mut Session` scoped to a closure.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the session for `key`, creating it first if needed.
    ///
    /// The session lock is held until `f` returns, so `f` must not block on
    /// I/O or call back into the store for the same key.
    pub fn with_session<R>(&self, key: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let entry = self.entry(key);
        let mut session = entry.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *session)
    }

    /// Snapshot of the session for `key`, creating it first if needed.
    pub fn get(&self, key: &str) -> Session {
        self.with_session(key, |session| session.clone())
    }

    /// Whether a session exists for `key`. Never creates one.
    pub fn contains(&self, key: &str) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Number of sessions created so far.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no user has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All session keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Shared handle to the session slot for `key`.
    fn entry(&self, key: &str) -> Arc<Mutex<Session>> {
        {
            let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = sessions.get(key) {
                return entry.clone();
            }
        }

        // Another caller may have inserted between the read and write lock.
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(key.to_string())
            .or_insert_with(|| {
                debug!(session_key = %key, "created session");
                Arc::new(Mutex::new(Session::new(key)))
            })
            .clone()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
