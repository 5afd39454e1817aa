//! File-backed session storage.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use worklane_types::User;

use crate::{SessionStore, StoreError, StoredSession};

/// The on-disk document: both logical keys live in one file so a write
/// is all-or-nothing. Field names match what the backend-facing clients
/// have always called these values.
#[derive(Debug, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(rename = "authToken")]
    auth_token: String,
    #[serde(rename = "userData")]
    user_data: User,
}

/// A [`SessionStore`] backed by a JSON file.
///
/// The session lives at `<dir>/session.json`. Writes go to a temp file in
/// the same directory followed by a rename, so a crash mid-write leaves
/// either the old session or the new one — never a torn file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given directory. The directory is
    /// created on first save, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The platform-conventional storage directory, e.g.
    /// `~/.local/share/worklane` on Linux. `None` on platforms where no
    /// data directory is defined.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("worklane"))
    }

    /// Path of the session document.
    pub fn session_path(&self) -> PathBuf {
        self.dir.join("session.json")
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join("session.json.tmp")
    }
}

impl SessionStore for FileStore {
    async fn save(&self, user: &User, token: &str) -> Result<(), StoreError> {
        let doc = SessionDocument {
            auth_token: token.to_string(),
            user_data: user.clone(),
        };
        let content = serde_json::to_string_pretty(&doc)?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io("creating session directory", e))?;

        // Temp file + rename keeps the write atomic on the same filesystem.
        let tmp = self.temp_path();
        fs::write(&tmp, content)
            .await
            .map_err(|e| StoreError::io(format!("writing {}", tmp.display()), e))?;
        fs::rename(&tmp, self.session_path())
            .await
            .map_err(|e| StoreError::io("replacing session file", e))?;

        tracing::debug!(path = %self.session_path().display(), "session persisted");
        Ok(())
    }

    async fn load(&self) -> Option<StoredSession> {
        let path = self.session_path();
        let content = match fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "session file unreadable, treating as no session");
                return None;
            }
        };

        match serde_json::from_str::<SessionDocument>(&content) {
            Ok(doc) => Some(StoredSession {
                user: doc.user_data,
                token: doc.auth_token,
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "session file corrupt, treating as no session");
                None
            }
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        for path in [self.session_path(), self.temp_path()] {
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(StoreError::io(
                        format!("removing {}", path.display()),
                        e,
                    ));
                }
            }
        }
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use worklane_types::{Role, UserId, UserStatus};

    fn sample_user() -> User {
        User {
            id: UserId::from("u-1"),
            email: "a@x.com".to_string(),
            name: "Ada".to_string(),
            role: Role::Admin,
            department: None,
            status: UserStatus::Active,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path())
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let user = sample_user();

        store.save(&user, "tok-123").await.unwrap();
        let loaded = store.load().await.expect("session should exist");

        assert_eq!(
            loaded,
            StoredSession {
                user,
                token: "tok-123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_load_empty_store_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let user = sample_user();

        store.save(&user, "old-token").await.unwrap();
        store.save(&user, "new-token").await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.token, "new-token");
    }

    #[tokio::test]
    async fn test_load_corrupt_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        tokio::fs::create_dir_all(dir.path()).await.unwrap();
        tokio::fs::write(store.session_path(), "{ not json")
            .await
            .unwrap();

        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_load_missing_user_data_key_returns_none() {
        // A document with only one of the two keys is not a session.
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        tokio::fs::write(store.session_path(), r#"{"authToken":"tok"}"#)
            .await
            .unwrap();

        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample_user(), "tok").await.unwrap();
        store.clear().await.unwrap();

        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Clearing an empty store, twice, still succeeds.
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_document_uses_unified_key_names() {
        // The on-disk names are part of the adapter contract: the web and
        // mobile clients historically disagreed on key names, and this
        // adapter settled on authToken + userData.
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample_user(), "tok").await.unwrap();
        let raw = tokio::fs::read_to_string(store.session_path())
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert!(doc.get("authToken").is_some());
        assert!(doc.get("userData").is_some());
    }
}
