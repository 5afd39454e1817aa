//! The session manager: the state machine that owns authentication state.
//!
//! This is the central piece of the client core. It is responsible for:
//! - Logging in and out
//! - Restoring a persisted session at startup
//! - Arming the idle-warning and hard-expiry timers
//! - Resetting those timers on user activity
//! - Forcing logout when the token expires or the server rejects it
//! - Answering role queries without ever failing
//!
//! # Concurrency note
//!
//! `SessionManager` is NOT internally locked — every operation takes
//! `&mut self`. This is intentional: the manager is owned by a single
//! task (the app shell's event loop) and driven through a channel or
//! mutex at a higher level. All mutations are therefore serialized; no
//! two transitions ever race. Reactive consumers observe the session
//! through cheap [`SessionSnapshot`] clones on a watch channel, never
//! through shared mutable state.
//!
//! A `login` call in flight is not cancelled or de-duplicated when
//! another `login` begins — callers must avoid double-submission (the
//! `&mut self` receiver makes accidental overlap hard, but a queued
//! second call will still run).

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};
use worklane_auth::{AuthApi, AuthError};
use worklane_store::SessionStore;
use worklane_types::{Credentials, Role, User};

use crate::{SessionConfig, SessionError, SessionEvent, SessionSnapshot, SessionState};

// ---------------------------------------------------------------------------
// Timer deadlines
// ---------------------------------------------------------------------------

/// The armed deadlines while a session is live.
///
/// Absolute instants, not countdowns: activity re-derives them from the
/// token's (unchanged) expiry, so rescheduling can never push the hard
/// deadline past the token's cryptographic lifetime.
#[derive(Debug, Clone, Copy)]
struct Deadlines {
    /// When to raise the idle warning. `None` when the token's remaining
    /// lifetime is already inside the warning window (or the warning has
    /// fired).
    warn_at: Option<Instant>,
    /// When the token expires and forced logout runs.
    expire_at: Instant,
}

// ---------------------------------------------------------------------------
// SessionManager
// ---------------------------------------------------------------------------

/// Owns authentication state and drives the session lifecycle.
///
/// Generic over its two injected collaborators:
/// - `A`: the network auth client ([`AuthApi`])
/// - `S`: persistent storage ([`SessionStore`])
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ check_session() ──→ [Authenticated] or [Unauthenticated]
///                                     │
///              wait_for_timeout() ────┤──→ Warning ──→ Expired
///              record_activity()  ←───┘       │
///                                             ▼
///              logout() ─────────────→ [Unauthenticated]
/// ```
///
/// Invariants upheld across all paths:
/// - Authenticated/Warning imply both a user and an unexpired token.
/// - Timers are armed only while Authenticated/Warning, and every exit
///   path (logout, forced expiry, server-side rejection) disarms them.
/// - A successful login clears any stale error from a previous failure.
pub struct SessionManager<A: AuthApi, S: SessionStore> {
    api: A,
    store: S,
    config: SessionConfig,

    state: SessionState,
    user: Option<User>,
    token: Option<String>,
    error: Option<AuthError>,
    warned_at: Option<chrono::DateTime<Utc>>,
    deadlines: Option<Deadlines>,

    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<A: AuthApi, S: SessionStore> SessionManager<A, S> {
    /// Creates a manager in the `Initializing` state.
    ///
    /// Call [`check_session`](Self::check_session) next to resolve the
    /// persisted session; until then the session reads as loading.
    pub fn new(api: A, store: S, config: SessionConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::initial());
        Self {
            api,
            store,
            config,
            state: SessionState::Initializing,
            user: None,
            token: None,
            error: None,
            warned_at: None,
            deadlines: None,
            snapshot_tx,
        }
    }

    // =====================================================================
    // Lifecycle operations
    // =====================================================================

    /// Resolves the persisted session at startup.
    ///
    /// A stored token that is still valid restores the session without a
    /// network round trip. A missing, expired, or unparseable token
    /// resolves to `Unauthenticated` — and the stale persisted state is
    /// cleared so the next startup doesn't re-examine it.
    pub async fn check_session(&mut self) {
        match self.store.load().await {
            Some(stored) if !worklane_token::is_expired(&stored.token) => {
                tracing::info!(user = %stored.user.id, "session restored from storage");
                self.user = Some(stored.user);
                self.token = Some(stored.token);
                self.state = SessionState::Authenticated;
                self.arm_timers();
            }
            Some(stored) => {
                match worklane_token::try_expiry(&stored.token) {
                    Ok(_) => tracing::info!("stored session expired, clearing"),
                    Err(e) => tracing::info!(error = %e, "stored token unusable, clearing"),
                }
                if let Err(e) = self.store.clear().await {
                    tracing::warn!(error = %e, "failed to clear stale session");
                }
                self.state = SessionState::Unauthenticated;
            }
            None => {
                self.state = SessionState::Unauthenticated;
            }
        }
        self.notify();
    }

    /// Performs a login.
    ///
    /// The session reads as loading ([`SessionState::Authenticating`])
    /// while the call is in flight. On success the user/token pair is
    /// persisted, timers are armed, and any stale error is cleared. On
    /// failure the session is `Unauthenticated` with the error both
    /// recorded in the snapshot and returned.
    ///
    /// If persistence fails the login still succeeds — the live session
    /// is intact, only restart survival is degraded. The failure is
    /// logged.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        self.state = SessionState::Authenticating;
        self.notify();

        match self.api.login(credentials).await {
            Ok(resp) => {
                if let Err(e) = self.store.save(&resp.user, &resp.token).await {
                    tracing::warn!(error = %e, "session persist failed, continuing in memory");
                }
                tracing::info!(user = %resp.user.id, role = %resp.user.role, "login succeeded");
                self.user = Some(resp.user);
                self.token = Some(resp.token);
                self.error = None;
                self.warned_at = None;
                self.state = SessionState::Authenticated;
                self.arm_timers();
                self.notify();
                Ok(())
            }
            Err(e) => {
                tracing::info!(error = %e, "login failed");
                self.user = None;
                self.token = None;
                self.deadlines = None;
                self.error = Some(e.clone());
                self.state = SessionState::Unauthenticated;
                self.notify();
                Err(e)
            }
        }
    }

    /// Logs out, from any state.
    ///
    /// The network logout is best-effort: a failure is logged and
    /// swallowed, never surfaced — local cleanup is unconditional.
    /// Timers are disarmed, the store is cleared, and every field resets.
    pub async fn logout(&mut self) {
        if let Some(token) = self.token.take() {
            if let Err(e) = self.api.logout(&token).await {
                tracing::debug!(error = %e, "network logout failed, proceeding with local cleanup");
            }
        }
        self.teardown().await;
    }

    /// Re-fetches the profile of the signed-in user.
    ///
    /// An [`AuthError::Unauthorized`] response means the session was
    /// invalidated server-side: the manager tears down to
    /// `Unauthenticated`. Any other failure is recorded but leaves the
    /// session signed in.
    pub async fn refresh_user(&mut self) -> Result<(), SessionError> {
        let token = self
            .token
            .clone()
            .ok_or(SessionError::NotAuthenticated)?;

        match self.api.profile(&token).await {
            Ok(user) => {
                if let Err(e) = self.store.save(&user, &token).await {
                    tracing::warn!(error = %e, "session persist failed after profile refresh");
                }
                self.user = Some(user);
                self.notify();
                Ok(())
            }
            Err(AuthError::Unauthorized) => {
                tracing::info!("session invalidated server-side, logging out");
                self.teardown().await;
                Err(AuthError::Unauthorized.into())
            }
            Err(e) => {
                self.error = Some(e.clone());
                self.notify();
                Err(e.into())
            }
        }
    }

    /// Replaces the current token with a freshly issued one.
    ///
    /// The new token is persisted and the timers are re-armed from its
    /// expiry. Like [`refresh_user`](Self::refresh_user), a server-side
    /// rejection tears the session down.
    pub async fn refresh_token(&mut self) -> Result<(), SessionError> {
        let token = self
            .token
            .clone()
            .ok_or(SessionError::NotAuthenticated)?;
        let user = self.user.clone().ok_or(SessionError::NotAuthenticated)?;

        match self.api.refresh(&token).await {
            Ok(new_token) => {
                if let Err(e) = self.store.save(&user, &new_token).await {
                    tracing::warn!(error = %e, "session persist failed after token refresh");
                }
                tracing::debug!("token refreshed");
                self.token = Some(new_token);
                self.warned_at = None;
                self.state = SessionState::Authenticated;
                self.arm_timers();
                self.notify();
                Ok(())
            }
            Err(AuthError::Unauthorized) => {
                tracing::info!("token refresh rejected server-side, logging out");
                self.teardown().await;
                Err(AuthError::Unauthorized.into())
            }
            Err(e) => {
                self.error = Some(e.clone());
                self.notify();
                Err(e.into())
            }
        }
    }

    /// Replaces the in-memory user record and re-persists it.
    ///
    /// For local edits that have already been accepted by the backend
    /// (e.g., a profile form save).
    pub async fn update_user(&mut self, user: User) -> Result<(), SessionError> {
        let token = self
            .token
            .clone()
            .ok_or(SessionError::NotAuthenticated)?;

        if let Err(e) = self.store.save(&user, &token).await {
            tracing::warn!(error = %e, "session persist failed after user update");
        }
        self.user = Some(user);
        self.notify();
        Ok(())
    }

    // =====================================================================
    // Timers
    // =====================================================================

    /// Records user activity (pointer, key, scroll, touch).
    ///
    /// While `Authenticated` or `Warning`: returns to `Authenticated`
    /// and re-derives both deadlines from "now" against the same token.
    /// Activity never extends the token's cryptographic expiry — it only
    /// clears the soft warning up to that ceiling. Ignored in every
    /// other state.
    pub fn record_activity(&mut self) {
        if !self.state.is_signed_in() {
            return;
        }
        let was_warning = self.state == SessionState::Warning;
        self.state = SessionState::Authenticated;
        self.warned_at = None;
        self.arm_timers();
        if was_warning {
            tracing::debug!("activity detected, idle warning cleared");
        }
        self.notify();
    }

    /// Waits for the next armed deadline and applies its transition.
    ///
    /// Designed to sit inside the app shell's `tokio::select!` loop:
    ///
    /// ```ignore
    /// loop {
    ///     tokio::select! {
    ///         Some(action) = actions.recv() => { /* login/logout/activity */ }
    ///         event = manager.wait_for_timeout() => match event {
    ///             SessionEvent::Warning => show_timeout_prompt(),
    ///             SessionEvent::Expired => show_login_screen(),
    ///         }
    ///     }
    /// }
    /// ```
    ///
    /// Pends forever when no timers are armed (not signed in), so it is
    /// always safe to poll. Cancellation-safe: state changes only after
    /// a deadline has fully elapsed, so dropping the future mid-wait
    /// loses nothing — the deadline stays armed for the next call.
    ///
    /// - Warning deadline: transitions to [`SessionState::Warning`],
    ///   records the warning timestamp, returns [`SessionEvent::Warning`].
    /// - Expiry deadline: passes through [`SessionState::Expiring`],
    ///   attempts the network logout best-effort, clears the store, and
    ///   resolves to `Unauthenticated` before returning
    ///   [`SessionEvent::Expired`].
    pub async fn wait_for_timeout(&mut self) -> SessionEvent {
        let Some(deadlines) = self.deadlines else {
            return std::future::pending().await;
        };

        if let Some(warn_at) = deadlines.warn_at {
            sleep_until(warn_at).await;
            self.state = SessionState::Warning;
            self.warned_at = Some(Utc::now());
            self.deadlines = Some(Deadlines {
                warn_at: None,
                expire_at: deadlines.expire_at,
            });
            tracing::info!("idle warning raised");
            self.notify();
            return SessionEvent::Warning;
        }

        sleep_until(deadlines.expire_at).await;
        tracing::info!("session expired, forcing logout");
        self.state = SessionState::Expiring;
        self.notify();

        if let Some(token) = self.token.take() {
            if let Err(e) = self.api.logout(&token).await {
                tracing::debug!(error = %e, "network logout failed during forced expiry");
            }
        }
        self.teardown().await;
        SessionEvent::Expired
    }

    /// Derives both deadlines from the current token's remaining
    /// lifetime. The warning deadline is only armed when the remaining
    /// lifetime strictly exceeds the warning window.
    fn arm_timers(&mut self) {
        let Some(token) = self.token.as_deref() else {
            self.deadlines = None;
            return;
        };

        let remaining = worklane_token::time_until_expiry(token);
        let now = Instant::now();
        let expire_at = now + remaining;
        let warn_at = (remaining > self.config.warning_window)
            .then(|| expire_at - self.config.warning_window);

        tracing::debug!(
            remaining_secs = remaining.as_secs(),
            warning_armed = warn_at.is_some(),
            "session timers armed"
        );
        self.deadlines = Some(Deadlines { warn_at, expire_at });
    }

    /// Local cleanup shared by logout, forced expiry, and server-side
    /// rejection: disarm timers, clear the store, reset every field,
    /// land in `Unauthenticated`.
    async fn teardown(&mut self) {
        self.deadlines = None;
        if let Err(e) = self.store.clear().await {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
        self.user = None;
        self.token = None;
        self.error = None;
        self.warned_at = None;
        self.state = SessionState::Unauthenticated;
        self.notify();
    }

    // =====================================================================
    // Queries
    // =====================================================================

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The current token, if any. Handle with care — this is the
    /// credential other API clients attach as a bearer header.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The most recent failed operation's error, if it hasn't been
    /// cleared by a successful login or a logout since.
    pub fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    /// `true` during startup restore and while a login is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// The full authentication invariant, evaluated now: signed in AND
    /// user present AND token present AND token not yet expired.
    ///
    /// Re-checks expiry at every call — a session whose hard timer
    /// simply hasn't fired yet still reads as unauthenticated once the
    /// token's embedded expiry has passed.
    pub fn is_authenticated(&self) -> bool {
        self.state.is_signed_in()
            && self.user.is_some()
            && self
                .token
                .as_deref()
                .is_some_and(|t| !worklane_token::is_expired(t))
    }

    /// `true` if a user is signed in and holds exactly this role.
    /// Never fails: no user means `false`.
    pub fn has_role(&self, role: Role) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(role))
    }

    /// `true` if a user is signed in and holds any of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_any_role(roles))
    }

    /// Shorthand for `has_role(Role::Admin)`.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Shorthand for `has_role(Role::Employee)`.
    pub fn is_employee(&self) -> bool {
        self.has_role(Role::Employee)
    }

    // =====================================================================
    // Observation
    // =====================================================================

    /// Subscribes to session snapshots. The receiver immediately holds
    /// the current snapshot and is notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The current snapshot, without subscribing.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            user: self.user.clone(),
            warned_at: self.warned_at,
            error: self.error.clone(),
        }
    }

    fn notify(&self) {
        // send_replace delivers even when nobody is subscribed yet.
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

// =========================================================================
// Tests
// =========================================================================
