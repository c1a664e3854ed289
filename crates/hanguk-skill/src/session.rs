//! Session attribute persistence.
//!
//! The transport owns where attributes live between turns. The pipeline
//! only needs `get` and `set` keyed by session id.

use std::collections::HashMap;
use std::sync::Mutex;

use hanguk_core::types::SessionAttributes;

use crate::error::SessionError;

/// Storage for per-session attributes.
pub trait SessionStore: Send + Sync {
    /// Attributes of `session_id`; empty if the session is unknown.
    fn get(&self, session_id: &str) -> Result<SessionAttributes, SessionError>;

    /// Replace the attributes of `session_id`.
    fn set(&self, session_id: &str, attributes: SessionAttributes) -> Result<(), SessionError>;
}

/// Process-local session store.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionAttributes>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Result<SessionAttributes, SessionError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| SessionError::Poisoned(e.to_string()))?;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }

    fn set(&self, session_id: &str, attributes: SessionAttributes) -> Result<(), SessionError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| SessionError::Poisoned(e.to_string()))?;
        sessions.insert(session_id.to_string(), attributes);
        Ok(())
    }
}
