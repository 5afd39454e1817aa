//! In-memory session storage.

use std::sync::Mutex;
use worklane_types::User;

use crate::{SessionStore, StoreError, StoredSession};

/// A [`SessionStore`] that keeps the session in process memory.
///
/// Nothing survives a restart — which is exactly right for tests, and for
/// contexts (like a kiosk mode) where persisting credentials to disk is
/// undesirable.
///
/// Interior mutability via `Mutex` because the trait takes `&self`; the
/// lock is held only for the duration of a clone or swap, never across
/// an await.
#[derive(Debug, Default)]
pub struct MemoryStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    async fn save(&self, user: &User, token: &str) -> Result<(), StoreError> {
        let mut guard = self.session.lock().expect("store lock poisoned");
        *guard = Some(StoredSession {
            user: user.clone(),
            token: token.to_string(),
        });
        Ok(())
    }

    async fn load(&self) -> Option<StoredSession> {
        self.session.lock().expect("store lock poisoned").clone()
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.session.lock().expect("store lock poisoned").take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklane_types::{Role, UserId, UserStatus};

    fn sample_user() -> User {
        User {
            id: UserId::from("u-1"),
            email: "a@x.com".to_string(),
            name: "Ada".to_string(),
            role: Role::Employee,
            department: Some("ops".to_string()),
            status: UserStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryStore::new();
        let user = sample_user();

        store.save(&user, "tok").await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.user, user);
        assert_eq!(loaded.token, "tok");
    }

    #[tokio::test]
    async fn test_load_empty_returns_none() {
        let store = MemoryStore::new();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_twice_is_idempotent() {
        let store = MemoryStore::new();
        store.save(&sample_user(), "tok").await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(store.load().await.is_none());
    }
}
