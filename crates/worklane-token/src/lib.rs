//! Token codec for the Worklane client core.
//!
//! The backend issues a signed token on login with an embedded expiry
//! claim. This crate answers the three questions the session layer asks
//! about that opaque string:
//!
//! 1. **When does it expire?** ([`expiry`], or [`try_expiry`] when the
//!    caller wants to log *why* a token has no usable expiry)
//! 2. **Has it expired?** ([`is_expired`], [`is_expired_at`])
//! 3. **How long is left?** ([`time_until_expiry`], [`time_until_expiry_at`])
//!
//! # Fail closed
//!
//! A token that cannot be decoded is treated as *expired*, never as
//! "unknown". A malformed credential must push the client toward the
//! logged-out state, not leave it limping along with a token the backend
//! will reject anyway.
//!
//! # Testability
//!
//! Every predicate has an `_at(token, now)` variant taking an explicit
//! clock reading, so tests never race the wall clock. The plain variants
//! just pass `Utc::now()`.

use chrono::{DateTime, Utc};
use std::time::Duration;

mod claims;
mod error;

pub use claims::{Claims, decode_claims};
pub use error::TokenError;

/// Extracts the expiry timestamp from a token, reporting why it can't.
///
/// # Errors
/// - [`TokenError::WrongSegmentCount`] / [`TokenError::PayloadEncoding`] /
///   [`TokenError::PayloadParse`] — the payload segment didn't decode
/// - [`TokenError::MissingExpiry`] — the claims decoded but the `exp`
///   claim is absent or outside the representable timestamp range
pub fn try_expiry(token: &str) -> Result<DateTime<Utc>, TokenError> {
    let claims = decode_claims(token)?;
    let exp = claims.exp.ok_or(TokenError::MissingExpiry)?;
    DateTime::from_timestamp(exp, 0).ok_or(TokenError::MissingExpiry)
}

/// Extracts the expiry timestamp from a token.
///
/// The infallible form of [`try_expiry`]: `None` for any token without a
/// usable expiry, whatever the reason.
pub fn expiry(token: &str) -> Option<DateTime<Utc>> {
    try_expiry(token).ok()
}

/// Returns `true` if the token is expired as of `now`.
///
/// Fail closed: an unparseable token counts as expired.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match expiry(token) {
        Some(exp) => exp <= now,
        None => true,
    }
}

/// Returns `true` if the token is expired right now.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}

/// Returns the remaining lifetime of the token as of `now`.
///
/// Zero for expired or unparseable tokens — never negative, so callers
/// can feed this straight into timer arithmetic.
pub fn time_until_expiry_at(token: &str, now: DateTime<Utc>) -> Duration {
    match expiry(token) {
        Some(exp) if exp > now => (exp - now).to_std().unwrap_or(Duration::ZERO),
        _ => Duration::ZERO,
    }
}

/// Returns the remaining lifetime of the token right now.
pub fn time_until_expiry(token: &str) -> Duration {
    time_until_expiry_at(token, Utc::now())
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::TimeDelta;

    /// Builds an unsigned token expiring at the given Unix timestamp.
    fn token_expiring_at(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp},"sub":"u-1"}}"#).as_bytes());
        format!("{header}.{body}.sig")
    }

    /// Builds an unsigned token with no `exp` claim at all.
    fn token_without_expiry() -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
        let body = URL_SAFE_NO_PAD.encode(br#"{"sub":"u-1"}"#);
        format!("{header}.{body}.sig")
    }

    /// A fixed "now" so tests never depend on the wall clock.
    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    // =====================================================================
    // expiry()
    // =====================================================================

    #[test]
    fn test_expiry_returns_embedded_timestamp() {
        let token = token_expiring_at(1_700_086_400);
        let exp = expiry(&token).unwrap();
        assert_eq!(exp.timestamp(), 1_700_086_400);
    }

    #[test]
    fn test_expiry_none_for_missing_exp_claim() {
        assert_eq!(expiry(&token_without_expiry()), None);
    }

    #[test]
    fn test_expiry_none_for_wrong_segment_count() {
        assert_eq!(expiry("not-a-token"), None);
        assert_eq!(expiry("two.segments"), None);
    }

    #[test]
    fn test_expiry_none_for_garbage_payload() {
        assert_eq!(expiry("head.%%%.sig"), None);
    }

    // =====================================================================
    // try_expiry()
    // =====================================================================

    #[test]
    fn test_try_expiry_reports_missing_exp_claim() {
        let err = try_expiry(&token_without_expiry()).unwrap_err();
        assert!(matches!(err, TokenError::MissingExpiry));
    }

    #[test]
    fn test_try_expiry_reports_out_of_range_exp_claim() {
        // An `exp` too large for a timestamp is as unusable as no `exp`.
        let token = token_expiring_at(i64::MAX);
        let err = try_expiry(&token).unwrap_err();
        assert!(matches!(err, TokenError::MissingExpiry));
    }

    #[test]
    fn test_try_expiry_reports_decode_failures_distinctly() {
        assert!(matches!(
            try_expiry("two.segments"),
            Err(TokenError::WrongSegmentCount(2))
        ));
        assert!(matches!(
            try_expiry("head.%%%.sig"),
            Err(TokenError::PayloadEncoding(_))
        ));
    }

    // =====================================================================
    // is_expired_at()
    // =====================================================================

    #[test]
    fn test_is_expired_false_for_future_expiry() {
        let now = fixed_now();
        let token = token_expiring_at(now.timestamp() + 3600);
        assert!(!is_expired_at(&token, now));
    }

    #[test]
    fn test_is_expired_true_for_past_expiry() {
        let now = fixed_now();
        let token = token_expiring_at(now.timestamp() - 1);
        assert!(is_expired_at(&token, now));
    }

    #[test]
    fn test_is_expired_true_at_exact_expiry_instant() {
        // Boundary: expiry <= now counts as expired.
        let now = fixed_now();
        let token = token_expiring_at(now.timestamp());
        assert!(is_expired_at(&token, now));
    }

    #[test]
    fn test_is_expired_true_for_malformed_token() {
        // Fail closed on every malformed shape.
        let now = fixed_now();
        assert!(is_expired_at("", now));
        assert!(is_expired_at("a.b", now));
        assert!(is_expired_at("a.b.c.d", now));
        assert!(is_expired_at("head.!!!.sig", now));
        assert!(is_expired_at(&token_without_expiry(), now));
    }

    // =====================================================================
    // time_until_expiry_at()
    // =====================================================================

    #[test]
    fn test_time_until_expiry_matches_remaining_lifetime() {
        let now = fixed_now();
        let token = token_expiring_at(now.timestamp() + 86_400);
        assert_eq!(
            time_until_expiry_at(&token, now),
            Duration::from_secs(86_400)
        );
    }

    #[test]
    fn test_time_until_expiry_zero_for_expired_token() {
        let now = fixed_now();
        let token = token_expiring_at(now.timestamp() - 100);
        assert_eq!(time_until_expiry_at(&token, now), Duration::ZERO);
    }

    #[test]
    fn test_time_until_expiry_zero_for_malformed_token() {
        assert_eq!(time_until_expiry_at("garbage", fixed_now()), Duration::ZERO);
    }

    #[test]
    fn test_time_until_expiry_subsecond_now_rounds_down() {
        // `now` can land between whole seconds; the remaining duration
        // must still come out non-negative and at most the whole-second gap.
        let now = fixed_now() + TimeDelta::milliseconds(250);
        let token = token_expiring_at(fixed_now().timestamp() + 10);
        let remaining = time_until_expiry_at(&token, now);
        assert_eq!(remaining, Duration::from_millis(9_750));
    }
}
