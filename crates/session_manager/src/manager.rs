//! Session Manager service
//!
//! A thin, cache-free front over [`SessionStorage`]: every dispatched event
//! loads a session, works on a local copy, and writes the whole record back.
//! Nothing is shared between chats and nothing session-shaped lives in
//! process-wide state.

use crate::error::{Result, SessionError};
use crate::storage::SessionStorage;
use crate::structs::UserSession;
use std::sync::Arc;

/// Session Manager - load-or-create and save, keyed by user id.
pub struct SessionManager<S: SessionStorage> {
    storage: Arc<S>,
}

impl<S: SessionStorage> SessionManager<S> {
    /// Create a new SessionManager
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Load a user's session, or hand out a fresh one on first contact.
    ///
    /// A fresh session is not persisted here; it reaches storage with the
    /// write-back at the end of the event that created it.
    pub async fn load_or_create(&self, user_id: &str) -> Result<UserSession> {
        match self.storage.load_session(user_id).await {
            Ok(mut session) => {
                if session.user_id.as_deref().unwrap_or("").is_empty() {
                    session.user_id = Some(user_id.to_string());
                }
                Ok(session)
            }
            Err(SessionError::NotFound) => {
                log::info!("[{}] creating a new session", user_id);
                Ok(UserSession::new(user_id))
            }
            Err(e) => Err(e),
        }
    }

    /// Persist the complete session record atomically.
    pub async fn save(&self, user_id: &str, session: &UserSession) -> Result<()> {
        self.storage.save_session(user_id, session).await
    }
}
