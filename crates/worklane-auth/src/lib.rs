//! Network auth client for the Worklane client core.
//!
//! A thin wrapper over the backend's four auth endpoints:
//!
//! | Call                      | Endpoint             |
//! |---------------------------|----------------------|
//! | [`AuthApi::login`]        | `POST /auth/login`   |
//! | [`AuthApi::logout`]       | `POST /auth/logout`  |
//! | [`AuthApi::profile`]      | `GET /auth/profile`  |
//! | [`AuthApi::refresh`]      | `POST /auth/refresh` |
//!
//! Every failure is normalized into the [`AuthError`] taxonomy so the
//! session layer can react by *kind* (re-prompt, force logout, show a
//! generic message) instead of pattern-matching on status codes or
//! transport errors.
//!
//! This layer never retries. Whether a `Network` failure is worth
//! retrying is a caller policy decision, not a transport one.

mod api;
mod error;
mod http;

pub use api::{AuthApi, LoginResponse};
pub use error::AuthError;
pub use http::HttpAuthClient;
