//! # Worklane client core
//!
//! The shared session/auth core used by the Worklane admin dashboard and
//! companion app shells. It owns the authenticated-session lifecycle —
//! login, restore, idle warning, forced expiry, role gating — on top of
//! three injected collaborators: a network auth client, a persistent
//! store, and a token codec.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use worklane::prelude::*;
//!
//! # async fn run() -> Result<(), WorklaneError> {
//! let api = HttpAuthClient::new("https://api.worklane.example")?;
//! let store = FileStore::new(FileStore::default_dir().expect("platform data dir"));
//! let mut session = SessionManager::new(api, store, SessionConfig::default());
//!
//! // Resolve any persisted session from a previous run.
//! session.check_session().await;
//!
//! if !session.is_authenticated() {
//!     session
//!         .login(&Credentials::new("admin@worklane.example", "secret"))
//!         .await?;
//! }
//!
//! // Drive timeouts from the app's event loop:
//! match session.wait_for_timeout().await {
//!     SessionEvent::Warning => { /* prompt "still there?" */ }
//!     SessionEvent::Expired => { /* back to the login screen */ }
//! }
//! # Ok(())
//! # }
//! ```

mod error;
pub mod telemetry;

pub use error::WorklaneError;

/// Everything an app shell typically imports.
pub mod prelude {
    pub use crate::WorklaneError;
    pub use worklane_auth::{AuthApi, AuthError, HttpAuthClient, LoginResponse};
    pub use worklane_session::{
        SessionConfig, SessionError, SessionEvent, SessionManager, SessionSnapshot, SessionState,
    };
    pub use worklane_store::{FileStore, MemoryStore, SessionStore, StoredSession};
    pub use worklane_types::{Credentials, Role, User, UserId, UserStatus};
}

/// Token codec re-exported as a namespace: `worklane::token::is_expired(...)`.
pub use worklane_token as token;
