//! Per-session conversation history.
//!
//! Each session is an append-only log bounded to the most recent turns. The
//! store is owned by whoever builds the [`crate::Assistant`] and passed in,
//! so separate stores never share history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use kb_core::Error;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

/// Sessions kept by default before the least recently used one is dropped.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug)]
pub struct SessionStore {
    inner: Mutex<Sessions>,
    capacity: usize,
    max_sessions: usize,
}

#[derive(Debug, Default)]
struct Sessions {
    logs: HashMap<String, Log>,
    /// Bumped on every append; orders sessions by recency.
    clock: u64,
}

#[derive(Debug, Default)]
struct Log {
    turns: VecDeque<Turn>,
    last_used: u64,
}

impl SessionStore {
    /// `capacity` is the number of turns kept per session, at least one.
    pub fn new(capacity: usize) -> Self {
        Self { inner: Mutex::new(Sessions::default()), capacity: capacity.max(1), max_sessions: DEFAULT_MAX_SESSIONS }
    }

    /// Bound the number of sessions, at least one. Starting a session past
    /// the bound drops the least recently appended one.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Append a turn, dropping the oldest ones past capacity. Returns the
    /// number of turns now held for the session.
    pub fn append(&self, session: &str, role: Role, content: impl Into<String>) -> Result<usize> {
        let mut inner = self.lock()?;
        if !inner.logs.contains_key(session) && inner.logs.len() >= self.max_sessions {
            let idle = inner.logs.iter().min_by_key(|(_, log)| log.last_used).map(|(id, _)| id.clone());
            if let Some(id) = idle {
                inner.logs.remove(&id);
                tracing::debug!(session = %id, "evicted least recently used session");
            }
        }
        inner.clock += 1;
        let now = inner.clock;
        let log = inner.logs.entry(session.to_string()).or_default();
        log.last_used = now;
        log.turns.push_back(Turn { role, content: content.into(), at: Utc::now() });
        while log.turns.len() > self.capacity {
            log.turns.pop_front();
        }
        Ok(log.turns.len())
    }

    /// Oldest first.
    pub fn history(&self, session: &str) -> Result<Vec<Turn>> {
        Ok(self.lock()?.logs.get(session).map(|log| log.turns.iter().cloned().collect()).unwrap_or_default())
    }

    pub fn last_assistant_turn(&self, session: &str) -> Result<Option<String>> {
        Ok(self
            .lock()?
            .logs
            .get(session)
            .and_then(|log| log.turns.iter().rev().find(|t| t.role == Role::Assistant))
            .map(|t| t.content.clone()))
    }

    pub fn turns(&self, session: &str) -> Result<usize> {
        Ok(self.lock()?.logs.get(session).map_or(0, |log| log.turns.len()))
    }

    /// Forget a session. Returns whether it existed.
    pub fn clear(&self, session: &str) -> Result<bool> {
        Ok(self.lock()?.logs.remove(session).is_some())
    }

    pub fn session_count(&self) -> Result<usize> {
        Ok(self.lock()?.logs.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Sessions>> {
        self.inner.lock().map_err(|e| Error::SessionUnavailable(e.to_string()).into())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        let settings = crate::settings::ChatSettings::default();
        Self::new(settings.history_turns).with_max_sessions(settings.max_sessions)
    }
}
