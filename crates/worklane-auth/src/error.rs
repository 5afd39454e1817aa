//! The auth error taxonomy.

/// Every way an auth call can fail, normalized.
///
/// The session layer keeps the most recent failure around (and snapshots
/// it out to subscribers), so this type is `Clone + PartialEq` — which is
/// also why the transport error is carried as a message string rather
/// than the underlying `reqwest::Error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request was malformed (HTTP 400) — e.g., a missing field.
    /// Recoverable: the caller re-prompts with corrected input.
    /// Carries the server's message, since it names the offending field.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Wrong email or password (HTTP 401 on login). Shown to the user
    /// as-is; retrying the same credentials is pointless.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The current token was rejected server-side (HTTP 401 on an
    /// authenticated call). The session is dead: the manager responds
    /// by forcing a local logout.
    #[error("session rejected by server")]
    Unauthorized,

    /// The request never completed — DNS, connect, or timeout failure.
    /// The caller may retry manually.
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success response (typically 5xx). Shown generically.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}
