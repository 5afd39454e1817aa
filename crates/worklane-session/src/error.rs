//! Error types for the session layer.

use worklane_auth::AuthError;

/// Errors surfaced by session operations.
///
/// Deliberately small: most failure handling happens *inside* the state
/// machine (logout failures are swallowed, token-parse failures collapse
/// to the logged-out state). What leaks out is either "you're not logged
/// in" or a normalized auth failure the caller may want to display.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The operation needs an authenticated session and there isn't one.
    #[error("no authenticated session")]
    NotAuthenticated,

    /// A network auth call failed. See [`AuthError`] for the taxonomy.
    #[error(transparent)]
    Auth(#[from] AuthError),
}
