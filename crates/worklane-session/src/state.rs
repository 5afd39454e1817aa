//! Session state types: the state machine's vocabulary.

use chrono::{DateTime, Utc};
use std::time::Duration;
use worklane_auth::AuthError;
use worklane_types::User;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session timeout behavior.
///
/// The token's embedded expiry is the hard ceiling on a session; this
/// config only controls the soft warning ahead of it.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How far ahead of token expiry the idle warning is raised.
    ///
    /// Default: 30 minutes. The warning timer is only armed when the
    /// token's remaining lifetime exceeds this window — a token already
    /// inside the window runs straight to its hard expiry.
    pub warning_window: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            warning_window: Duration::from_secs(30 * 60),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The lifecycle state of the session.
///
/// ```text
///                  ┌──(stored token valid)──→ Authenticated
/// Initializing ────┤                              │  ↑
///                  └──(none / expired)──→ Unauthenticated
///                                             │       │
///                         login()             │       │ (activity)
/// Unauthenticated ──→ Authenticating ──(ok)──→ Authenticated
///        ↑                   │                    │
///        └────(failure)──────┘      (idle, warning timer fires)
///        ↑                                        ↓
///        │                                     Warning
///        │          (idle until token expiry)     │
///        └──────────── Expiring ←─────────────────┘
/// ```
///
/// Plus one transition not drawn: `logout()` goes to `Unauthenticated`
/// from ANY state, and `refresh_user()` hitting a server-side rejection
/// does the same.
///
/// - **Initializing**: process start, before the persisted session has
///   been checked. The UI shows a loading state.
/// - **Unauthenticated**: nobody is logged in.
/// - **Authenticating**: a login call is in flight.
/// - **Authenticated**: live session, timers armed.
/// - **Warning**: still authenticated, but the idle warning has fired.
///   Activity returns to `Authenticated`; further idleness expires.
/// - **Expiring**: terminal transition state while forced logout runs
///   (network logout attempted, local state torn down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    Unauthenticated,
    Authenticating,
    Authenticated,
    Warning,
    Expiring,
}

impl SessionState {
    /// `true` during startup restore and while a login is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Initializing | Self::Authenticating)
    }

    /// `true` when a user is signed in (including while the idle
    /// warning is showing). Does NOT check token expiry — use
    /// [`SessionManager::is_authenticated`](crate::SessionManager::is_authenticated)
    /// for the full invariant.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::Authenticated | Self::Warning)
    }
}

// ---------------------------------------------------------------------------
// SessionEvent
// ---------------------------------------------------------------------------

/// What fired inside [`wait_for_timeout`](crate::SessionManager::wait_for_timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The idle warning deadline passed. The session is now in
    /// [`SessionState::Warning`]; the UI should prompt the user.
    Warning,

    /// The token expired. Forced logout has already completed — the
    /// session is back to [`SessionState::Unauthenticated`].
    Expired,
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// An immutable view of the session, published to subscribers on every
/// transition.
///
/// Reactive consumers (a UI store, a status widget) hold a
/// `watch::Receiver<SessionSnapshot>` and re-render when it changes.
/// The token itself is deliberately not part of the snapshot — only the
/// manager and its collaborators handle the credential.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Current lifecycle state.
    pub state: SessionState,

    /// The signed-in user, if any.
    pub user: Option<User>,

    /// When the idle warning was raised. Cleared on activity or logout.
    pub warned_at: Option<DateTime<Utc>>,

    /// The most recent failed operation's error. Cleared by the next
    /// successful login and by logout.
    pub error: Option<AuthError>,
}

impl SessionSnapshot {
    /// The all-null starting snapshot.
    pub(crate) fn initial() -> Self {
        Self {
            state: SessionState::Initializing,
            user: None,
            warned_at: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_warning_window_is_thirty_minutes() {
        let config = SessionConfig::default();
        assert_eq!(config.warning_window, Duration::from_secs(1800));
    }

    #[test]
    fn test_is_loading_states() {
        assert!(SessionState::Initializing.is_loading());
        assert!(SessionState::Authenticating.is_loading());
        assert!(!SessionState::Authenticated.is_loading());
        assert!(!SessionState::Unauthenticated.is_loading());
        assert!(!SessionState::Warning.is_loading());
        assert!(!SessionState::Expiring.is_loading());
    }

    #[test]
    fn test_is_signed_in_states() {
        assert!(SessionState::Authenticated.is_signed_in());
        assert!(SessionState::Warning.is_signed_in());
        assert!(!SessionState::Initializing.is_signed_in());
        assert!(!SessionState::Authenticating.is_signed_in());
        assert!(!SessionState::Unauthenticated.is_signed_in());
        assert!(!SessionState::Expiring.is_signed_in());
    }

    #[test]
    fn test_initial_snapshot_is_all_null_loading() {
        let snap = SessionSnapshot::initial();
        assert_eq!(snap.state, SessionState::Initializing);
        assert!(snap.user.is_none());
        assert!(snap.warned_at.is_none());
        assert!(snap.error.is_none());
    }
}
