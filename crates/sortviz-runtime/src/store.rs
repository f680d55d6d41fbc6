#![forbid(unsafe_code)]

//! Session storage.
//!
//! Sessions are keyed by (browsing session, algorithm page). The store hands
//! out owned copies; writers put the whole session back, so a restart always
//! replaces rather than merges.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sortviz_core::Algorithm;

use crate::session::ReplaySession;

/// Identifies one algorithm page within one browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub session: String,
    pub algorithm: Algorithm,
}

impl SessionKey {
    #[must_use]
    pub fn new(session: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            session: session.into(),
            algorithm,
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.session, self.algorithm)
    }
}

/// Key-value storage for replay sessions.
pub trait SessionStore {
    /// Stored session for `key`, or `None` on first visit.
    fn get(&self, key: &SessionKey) -> Option<ReplaySession>;

    /// Store `session` under `key`, replacing any previous value.
    fn set(&mut self, key: SessionKey, session: ReplaySession);

    /// Forget `key` (end of the browsing session).
    fn remove(&mut self, key: &SessionKey) -> Option<ReplaySession>;
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: HashMap<SessionKey, ReplaySession>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session belonging to browsing session `session`.
    pub fn end_session(&mut self, session: &str) {
        self.sessions.retain(|key, _| key.session != session);
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &SessionKey) -> Option<ReplaySession> {
        self.sessions.get(key).cloned()
    }

    fn set(&mut self, key: SessionKey, session: ReplaySession) {
        self.sessions.insert(key, session);
    }

    fn remove(&mut self, key: &SessionKey) -> Option<ReplaySession> {
        self.sessions.remove(key)
    }
}
