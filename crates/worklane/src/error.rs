//! Unified error type for the Worklane client core.

use worklane_auth::AuthError;
use worklane_session::SessionError;
use worklane_store::StoreError;
use worklane_token::TokenError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `worklane` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WorklaneError {
    /// A token-decoding error (malformed segments, bad claims).
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A storage error (persisting or clearing the session).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A normalized auth-call failure (credentials, network, server).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A session-lifecycle error.
    #[error(transparent)]
    Session(#[from] SessionError),
}
