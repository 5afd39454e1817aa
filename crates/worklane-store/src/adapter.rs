//! The storage seam: what the session layer needs from persistence.

use worklane_types::User;

use crate::StoreError;

/// A persisted `{user, token}` pair, exactly as saved.
///
/// `PartialEq` makes round-trip assertions in tests trivial.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub user: User,
    pub token: String,
}

/// Durable storage for the current session.
///
/// # Contract
///
/// - [`save`](Self::save) is atomic from the caller's perspective: both
///   the user and the token are persisted, or the call reports failure.
///   A half-written session must never be observable by a later `load`.
/// - [`load`](Self::load) never fails to the caller. Absent data and
///   unparseable data both come back as `None` (the cause is logged) —
///   the session layer treats either as "nobody was logged in".
/// - [`clear`](Self::clear) is idempotent: clearing an already-empty
///   store succeeds.
/// - Single writer: the session manager is the only mutator. No other
///   component may write to the backing storage.
///
/// # Trait bounds
///
/// - `Send + Sync` → the store can be shared across async tasks.
/// - `'static` → it doesn't borrow temporary data; it lives as long as
///   the session manager that owns it.
pub trait SessionStore: Send + Sync + 'static {
    /// Persists the user/token pair, replacing any previous session.
    fn save(
        &self,
        user: &User,
        token: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Returns the persisted session, or `None` if there isn't one
    /// (including when the stored data is unreadable or corrupt).
    fn load(&self) -> impl Future<Output = Option<StoredSession>> + Send;

    /// Removes any persisted session. Safe to call when already empty.
    fn clear(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
