//! Session storage trait and implementations

use crate::error::{Result, SessionError};
use crate::structs::UserSession;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Session storage trait
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load a session
    async fn load_session(&self, user_id: &str) -> Result<UserSession>;

    /// Save a session
    async fn save_session(&self, user_id: &str, session: &UserSession) -> Result<()>;

    /// Check if a session exists
    async fn session_exists(&self, user_id: &str) -> bool;

    /// Delete a session
    async fn delete_session(&self, user_id: &str) -> Result<()>;
}

/// File-based session storage: one JSON file per user id.
///
/// Saves go through a temp file and a rename, so a crash mid-write never
/// leaves a session file straddling two states.
#[derive(Clone)]
pub struct FileSessionStorage {
    base_path: PathBuf,
}

impl FileSessionStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_path(&self, user_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", user_id))
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load_session(&self, user_id: &str) -> Result<UserSession> {
        let path = self.session_path(user_id);

        if !path.exists() {
            return Err(SessionError::NotFound);
        }

        let contents = fs::read_to_string(&path).await?;
        let session: UserSession = serde_json::from_str(&contents)?;

        Ok(session)
    }

    async fn save_session(&self, user_id: &str, session: &UserSession) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;

        let path = self.session_path(user_id);
        let tmp_path = self.base_path.join(format!("{}.json.tmp", user_id));
        let contents = serde_json::to_string_pretty(session)?;

        fs::write(&tmp_path, contents).await?;
        fs::rename(&tmp_path, &path).await?;

        Ok(())
    }

    async fn session_exists(&self, user_id: &str) -> bool {
        self.session_path(user_id).exists()
    }

    async fn delete_session(&self, user_id: &str) -> Result<()> {
        let path = self.session_path(user_id);

        if path.exists() {
            fs::remove_file(&path).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_state::SessionState;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_storage_save_and_load() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());

        let mut session = UserSession::new("42");
        session.enter(SessionState::AwaitingWorkoutFile);
        session.record_screen(9);
        storage.save_session("42", &session).await.unwrap();

        let loaded = storage.load_session("42").await.unwrap();
        assert_eq!(loaded.user_id, session.user_id);
        assert_eq!(loaded.state, SessionState::AwaitingWorkoutFile);
        assert_eq!(loaded.screen_message_id, Some(9));
    }

    #[tokio::test]
    async fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());

        let result = storage.load_session("nonexistent").await;
        assert!(matches!(result, Err(SessionError::NotFound)));
    }

    #[tokio::test]
    async fn test_file_storage_overwrite() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());

        let mut session = UserSession::new("42");
        storage.save_session("42", &session).await.unwrap();

        session.progress = session.progress.advance();
        storage.save_session("42", &session).await.unwrap();

        let loaded = storage.load_session("42").await.unwrap();
        assert_eq!(loaded.progress.current_step, 2);
    }

    #[tokio::test]
    async fn test_file_storage_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());

        storage
            .save_session("42", &UserSession::new("42"))
            .await
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["42.json".to_string()]);
    }

    #[tokio::test]
    async fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());

        storage
            .save_session("42", &UserSession::new("42"))
            .await
            .unwrap();
        assert!(storage.session_exists("42").await);

        storage.delete_session("42").await.unwrap();
        assert!(!storage.session_exists("42").await);
    }
}
