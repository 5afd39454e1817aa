//! Persistent session storage for the Worklane client core.
//!
//! When the app restarts, the session manager asks this layer "was anyone
//! logged in?". The answer is a `{user, token}` pair mirrored to disk on
//! every login and profile refresh.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← sole writer; restores from here at startup
//!     ↕
//! Store Layer (this crate)  ← durable {user, token} mirror
//!     ↕
//! Filesystem / memory (below)
//! ```
//!
//! The [`SessionStore`] trait is the seam: production uses [`FileStore`]
//! (a JSON document on disk), tests and ephemeral contexts use
//! [`MemoryStore`]. Historically the web and mobile clients persisted
//! under different key names (`authToken`/`user` vs `auth_token`/
//! `user_data`); that difference is an implementation detail of the
//! adapter now, invisible above this crate.

mod adapter;
mod error;
mod file;
mod memory;

pub use adapter::{SessionStore, StoredSession};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
