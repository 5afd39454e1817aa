//! Error types for token decoding.
//!
//! These exist mostly for logging — the public expiry helpers collapse
//! every failure into "expired" (fail closed), but when a stored token is
//! rejected at startup it's useful to know *why* it didn't parse.

/// Errors that can occur while decoding a token's payload segment.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token didn't have exactly three dot-separated segments.
    /// A well-formed token is `header.payload.signature`.
    #[error("malformed token: expected 3 segments, found {0}")]
    WrongSegmentCount(usize),

    /// The payload segment wasn't valid base64url.
    #[error("payload segment is not valid base64url: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    /// The decoded payload wasn't a valid JSON claims object.
    #[error("payload is not a valid claims object: {0}")]
    PayloadParse(#[from] serde_json::Error),

    /// The claims parsed but carried no usable `exp` claim.
    /// Covers both a missing field and a timestamp outside the
    /// representable range.
    #[error("claims carry no usable expiry")]
    MissingExpiry,
}
