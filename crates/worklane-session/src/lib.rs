//! Authenticated-session lifecycle for the Worklane client core.
//!
//! This crate owns the one piece of real state-machine behavior in the
//! client: who is logged in, how long their token lives, when to warn
//! them about an idle session, and when to force them out.
//!
//! 1. **Authentication** — exchanging credentials for a session
//!    ([`SessionManager::login`])
//! 2. **Restore** — resuming a persisted session at startup
//!    ([`SessionManager::check_session`])
//! 3. **Idle timeout** — warning before expiry and forcing logout at
//!    expiry ([`SessionManager::wait_for_timeout`],
//!    [`SessionManager::record_activity`])
//! 4. **Authorization queries** — role checks that never fail
//!    ([`SessionManager::has_role`] and friends)
//!
//! # How it fits in the stack
//!
//! ```text
//! UI / app shell (above)   ← drives login/logout, renders snapshots
//!     ↕
//! Session Layer (this crate)  ← state machine + timers
//!     ↕
//! Auth client, store, token codec (below)  ← injected collaborators
//! ```
//!
//! Collaborators are injected through the [`AuthApi`](worklane_auth::AuthApi)
//! and [`SessionStore`](worklane_store::SessionStore) traits — there is no
//! process-wide singleton. Each app instance constructs its own manager
//! and disposes of it explicitly.

mod error;
mod manager;
mod state;

pub use error::SessionError;
pub use manager::SessionManager;
pub use state::{SessionConfig, SessionEvent, SessionSnapshot, SessionState};
