//! The auth API seam.
//!
//! The session manager doesn't talk HTTP — it talks to anything that
//! implements [`AuthApi`]. Production injects
//! [`HttpAuthClient`](crate::HttpAuthClient); tests inject a scripted
//! mock. Same pattern as
//! any other swappable collaborator: define WHAT the calls are here,
//! leave HOW to the implementation.

use serde::Deserialize;
use worklane_types::{Credentials, User};

use crate::AuthError;

/// A successful login: the authenticated user plus their token.
///
/// The backend also sends a human-readable `message` ("Login successful");
/// it's kept for display but nothing downstream depends on it.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
    pub token: String,
}

/// The four auth calls the session lifecycle needs.
///
/// # Trait bounds
///
/// - `Send + Sync` → implementations can be shared across async tasks.
/// - `'static` → no borrowed data; the client lives as long as the
///   session manager that owns it.
pub trait AuthApi: Send + Sync + 'static {
    /// Exchanges credentials for a user + token pair.
    ///
    /// # Errors
    /// - [`AuthError::InvalidCredentials`] — wrong email/password (401)
    /// - [`AuthError::Validation`] — malformed request (400)
    /// - [`AuthError::Network`] — transport failure
    /// - [`AuthError::Server`] — anything else non-2xx
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, AuthError>> + Send;

    /// Invalidates the token server-side.
    ///
    /// Best-effort by contract: the session layer logs a failure and
    /// proceeds with local cleanup regardless.
    fn logout(&self, token: &str) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Fetches the current user's profile.
    ///
    /// # Errors
    /// [`AuthError::Unauthorized`] when the token is rejected — the
    /// signal that the session has been invalidated server-side.
    fn profile(&self, token: &str) -> impl Future<Output = Result<User, AuthError>> + Send;

    /// Exchanges the current token for a fresh one.
    ///
    /// # Errors
    /// [`AuthError::Unauthorized`] when the current token is already
    /// rejected.
    fn refresh(&self, token: &str) -> impl Future<Output = Result<String, AuthError>> + Send;
}

/// Delegation so a shared `Arc<impl AuthApi>` can be injected directly.
impl<T: AuthApi> AuthApi for std::sync::Arc<T> {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, AuthError>> + Send {
        (**self).login(credentials)
    }

    fn logout(&self, token: &str) -> impl Future<Output = Result<(), AuthError>> + Send {
        (**self).logout(token)
    }

    fn profile(&self, token: &str) -> impl Future<Output = Result<User, AuthError>> + Send {
        (**self).profile(token)
    }

    fn refresh(&self, token: &str) -> impl Future<Output = Result<String, AuthError>> + Send {
        (**self).refresh(token)
    }
}
