//! Claims extraction from the token's payload segment.
//!
//! A token is three base64url segments joined by dots:
//! `header.payload.signature`. We only ever look at the middle one.
//! Verifying the signature is the backend's job — the client decodes the
//! payload purely to learn *when the backend will stop accepting it*, so
//! it can warn the user and clean up before requests start failing.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use std::collections::HashMap;

use crate::TokenError;

/// The claims we care about from a token payload.
///
/// Every field is optional at the serde level — the codec fails closed
/// later rather than rejecting tokens with unexpected shapes outright.
/// Unknown claims are preserved in `extra` via `#[serde(flatten)]` so
/// diagnostic logging can show the full payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Expiration time, seconds since the Unix epoch.
    pub exp: Option<i64>,

    /// Issued-at time, seconds since the Unix epoch.
    pub iat: Option<i64>,

    /// Subject — the backend puts the user id here.
    pub sub: Option<String>,

    /// Email, when the backend embeds it.
    pub email: Option<String>,

    /// Role name, when the backend embeds it. Kept as a raw string:
    /// authorization decisions use the profile record, not the token.
    pub role: Option<String>,

    /// Any claims we don't model explicitly.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Decodes the payload segment of a token into [`Claims`].
///
/// Does NOT validate the signature, the `exp` value, or anything else —
/// this is pure structure extraction. Use the helpers in the crate root
/// ([`is_expired`](crate::is_expired) and friends) for expiry decisions.
///
/// # Errors
/// - [`TokenError::WrongSegmentCount`] — not `header.payload.signature`
/// - [`TokenError::PayloadEncoding`] — payload segment isn't base64url
/// - [`TokenError::PayloadParse`] — decoded bytes aren't a JSON object
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::WrongSegmentCount(segments.len()));
    }

    let payload = URL_SAFE_NO_PAD.decode(segments[1])?;
    let claims: Claims = serde_json::from_slice(&payload)?;
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an unsigned token with the given JSON payload. The header
    /// and signature segments are irrelevant to the decoder, so any
    /// base64url filler works.
    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn test_decode_claims_full_payload() {
        let token = token_with_payload(
            r#"{"exp":1700000000,"iat":1699990000,"sub":"u-1","email":"a@x.com","role":"admin"}"#,
        );
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000));
        assert_eq!(claims.iat, Some(1_699_990_000));
        assert_eq!(claims.sub.as_deref(), Some("u-1"));
        assert_eq!(claims.email.as_deref(), Some("a@x.com"));
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_decode_claims_preserves_unknown_claims() {
        let token = token_with_payload(r#"{"exp":1,"deviceId":"tablet-7"}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(
            claims.extra.get("deviceId"),
            Some(&serde_json::json!("tablet-7"))
        );
    }

    #[test]
    fn test_decode_claims_missing_fields_are_none() {
        let token = token_with_payload("{}");
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, None);
        assert_eq!(claims.sub, None);
    }

    #[test]
    fn test_decode_claims_two_segments_rejected() {
        let result = decode_claims("onlyheader.payload");
        assert!(matches!(result, Err(TokenError::WrongSegmentCount(2))));
    }

    #[test]
    fn test_decode_claims_four_segments_rejected() {
        let result = decode_claims("a.b.c.d");
        assert!(matches!(result, Err(TokenError::WrongSegmentCount(4))));
    }

    #[test]
    fn test_decode_claims_bad_base64_rejected() {
        // '!' is outside the base64url alphabet.
        let result = decode_claims("head.!!!not-base64!!!.sig");
        assert!(matches!(result, Err(TokenError::PayloadEncoding(_))));
    }

    #[test]
    fn test_decode_claims_non_json_payload_rejected() {
        let body = URL_SAFE_NO_PAD.encode(b"this is not json");
        let result = decode_claims(&format!("head.{body}.sig"));
        assert!(matches!(result, Err(TokenError::PayloadParse(_))));
    }
}
