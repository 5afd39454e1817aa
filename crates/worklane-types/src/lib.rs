//! Shared domain types for the Worklane client core.
//!
//! These are the records that cross every layer boundary: the persisted
//! session mirrors a [`User`], the auth client deserializes one from the
//! backend, and the session manager answers role queries against one.
//! Keeping them in a leaf crate means the store and the network client
//! can both depend on them without depending on each other.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for a user.
///
/// This is a "newtype wrapper" — a common Rust pattern where you wrap a
/// primitive type (here `String`, since the backend issues opaque string
/// ids) in a named struct. Why bother?
///
/// 1. **Type safety**: you can't accidentally pass a department name where
///    a user id is expected, even though both are strings underneath.
/// 2. **Readability**: `fn profile(user: &UserId)` is clearer than
///    `fn profile(user: &str)`.
///
/// `#[serde(transparent)]` tells serde to serialize this as just the inner
/// string, not as `{ "0": "..." }` — so the wire format is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// An authorization tier attached to a user.
///
/// Roles gate capabilities in the admin dashboard and the companion app
/// (e.g., only admins see user management, only managers approve shifts).
/// The backend sends these as lowercase strings, hence
/// `#[serde(rename_all = "lowercase")]`.
///
/// `Copy` is fine here — a role is a single discriminant, cheap to
/// duplicate, and role checks pass it by value everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access: user management, reports, configuration.
    Admin,
    /// Manages a department: shift approval, team reports.
    Manager,
    /// Leads a team within a department.
    Leader,
    /// Regular staff: own shifts, todos, punch-in.
    Employee,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Leader => "leader",
            Role::Employee => "employee",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// UserStatus
// ---------------------------------------------------------------------------

/// Whether an account is currently usable.
///
/// Deactivated accounts keep their records (shift history, reports) but
/// can no longer log in. The backend enforces this; clients only display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A user record as returned by the backend.
///
/// This is the shape of `GET /auth/profile` and of the `user` field in the
/// login response. It is also what the store persists (as `userData`) so a
/// restarted app can restore its session without a network round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque backend-issued identifier.
    pub id: UserId,

    /// Login email, unique per account.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Authorization tier. See [`Role`].
    pub role: Role,

    /// Department the user belongs to, if assigned.
    #[serde(default)]
    pub department: Option<String>,

    /// Account status. Inactive users cannot authenticate.
    pub status: UserStatus,
}

impl User {
    /// Returns `true` if the user holds exactly this role.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Returns `true` if the user holds any of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Shorthand for `has_role(Role::Admin)`.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Shorthand for `has_role(Role::Employee)`.
    pub fn is_employee(&self) -> bool {
        self.has_role(Role::Employee)
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Login credentials, the body of `POST /auth/login`.
///
/// Derives `Serialize` for the request body and `Deserialize` so config
/// files and test fixtures can construct it the same way the wire does.
/// Deliberately NOT `Debug`-printed anywhere with the password visible —
/// the manual `Debug` impl below redacts it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Redacts the password so credentials can appear in logs safely.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =========================================================================
// Tests
// =========================================================================
