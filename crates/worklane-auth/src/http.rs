//! reqwest-backed [`AuthApi`] implementation.

use serde::Deserialize;
use std::time::Duration;
use worklane_types::{Credentials, User};

use crate::{AuthApi, AuthError, LoginResponse};

/// How long any single auth call may take before we give up.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The `{token}` body of a successful refresh.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    token: String,
}

/// Error bodies come back as `{ "message": "..." }`. Parsing is
/// best-effort — a missing or non-JSON body degrades to the raw text.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// HTTP client for the backend's auth endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAuthClient {
    /// Creates a client for the given backend base URL
    /// (e.g., `https://api.worklane.example`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl AuthApi for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(network_error)?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let message = error_message(resp).await;
            tracing::debug!(status, "login rejected");
            return Err(classify_login_failure(status, message));
        }

        resp.json::<LoginResponse>().await.map_err(|e| body_error(status, e))
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let message = error_message(resp).await;
            return Err(classify_bearer_failure(status, message));
        }
        Ok(())
    }

    async fn profile(&self, token: &str) -> Result<User, AuthError> {
        let resp = self
            .http
            .get(self.url("/auth/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let message = error_message(resp).await;
            return Err(classify_bearer_failure(status, message));
        }

        resp.json::<User>().await.map_err(|e| body_error(status, e))
    }

    async fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/refresh"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let message = error_message(resp).await;
            return Err(classify_bearer_failure(status, message));
        }

        let body: RefreshResponse =
            resp.json().await.map_err(|e| body_error(status, e))?;
        Ok(body.token)
    }
}

// ---------------------------------------------------------------------------
// Status → taxonomy mapping
// ---------------------------------------------------------------------------
//
// These are pure so the taxonomy is testable without a live server.

/// Maps a failed login response to the taxonomy. On the login endpoint,
/// 401 means "wrong credentials" — there is no token to be unauthorized.
fn classify_login_failure(status: u16, message: String) -> AuthError {
    match status {
        400 => AuthError::Validation(message),
        401 => AuthError::InvalidCredentials,
        _ => AuthError::Server { status, message },
    }
}

/// Maps a failed bearer-authenticated response to the taxonomy. Here a
/// 401 means the token itself was rejected.
fn classify_bearer_failure(status: u16, message: String) -> AuthError {
    match status {
        400 => AuthError::Validation(message),
        401 => AuthError::Unauthorized,
        _ => AuthError::Server { status, message },
    }
}

/// A transport failure: the request never produced a response.
fn network_error(e: reqwest::Error) -> AuthError {
    AuthError::Network(e.to_string())
}

/// A 2xx whose body didn't match the expected shape. That's a server
/// contract violation, not a client bug, so it lands in `Server`.
fn body_error(status: u16, e: reqwest::Error) -> AuthError {
    AuthError::Server {
        status,
        message: format!("unexpected response body: {e}"),
    }
}

/// Pulls the server's `{ "message": ... }` out of an error response,
/// falling back to the raw body text.
async fn error_message(resp: reqwest::Response) -> String {
    let text = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiMessage>(&text) {
        Ok(body) => body.message,
        Err(_) => text,
    }
}

// =========================================================================
// Tests
// =========================================================================
