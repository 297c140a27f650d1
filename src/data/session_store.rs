use crate::domain::error::DomainError;
use crate::domain::repository::SessionStore;
use crate::domain::session::{SESSION_KEY, Session};
use anyhow::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Keeps the session as `<dir>/account.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", SESSION_KEY))
    }
}

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> anyhow::Error {
    DomainError::Storage(format!("Failed to {} {}: {}", action, path.display(), err)).into()
}

#[async_trait]
impl SessionStore for FileSessionStore {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Option<Session>> {
        let path = self.path();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No session record");
                return Ok(None);
            }
            Err(e) => return Err(storage_error("read", &path, e)),
        };

        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // An unreadable record is treated as logged out.
                warn!(path = %path.display(), error = %e, "Ignoring corrupt session record");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, session))]
    async fn save(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error("create", &self.dir, e))?;

        let path = self.path();
        let content = serde_json::to_string_pretty(session)
            .map_err(|e| DomainError::Internal(format!("Failed to encode session: {}", e)))?;
        fs::write(&path, content)
            .await
            .map_err(|e| storage_error("write", &path, e))?;

        info!(path = %path.display(), "Session record saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Session record removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_save_then_load_returns_same_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested"));
        let session = Session::new(json!({ "id": 1, "username": "emilys" }), "tok".to_string());

        store.save(&session).await.unwrap();

        assert!(store.path().ends_with("account.json"));
        assert_eq!(store.load().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_load_without_record_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_record_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let session = Session::new(json!({ "id": 2 }), "tok".to_string());

        store.save(&session).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(!store.path().exists());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().await.unwrap().is_none());
    }
}
