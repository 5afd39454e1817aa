//! Error types for the store layer.

/// Errors that can occur while persisting or clearing a session.
///
/// Note there is no "load" variant: by contract,
/// [`SessionStore::load`](crate::SessionStore::load) never fails to the
/// caller — a missing or
/// unreadable session is reported as "no session", with the cause logged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A filesystem operation failed. `context` names the operation
    /// (e.g., "writing session file") so logs are actionable.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The session could not be serialized for writing.
    #[error("serializing session: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Shorthand for building an [`StoreError::Io`] with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
