//! Token Codec
//!
//! Issues and verifies stateless bearer tokens. A token is
//! `"<subject-uuid>.<issued-at-ms>.<signature>"` where the signature is
//! HMAC-SHA256 over `"<subject-uuid>.<issued-at-ms>"`, base64url encoded
//! without padding.
//!
//! The codec is constructed from explicit configuration (secret + TTL);
//! there is no process-global secret.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use kernel::id::UserId;
use sha2::Sha256;
use std::fmt;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// Credential scheme expected in the transport slot
pub const CREDENTIAL_SCHEME: &str = "Bearer";

/// Token verification failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Token cannot be parsed into subject, issued-at, and signature
    Malformed,
    /// Signature does not match the payload
    InvalidSignature,
    /// Validity window has elapsed since issued-at
    Expired,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "token format is invalid"),
            Self::InvalidSignature => write!(f, "token signature does not match"),
            Self::Expired => write!(f, "token has expired"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Stateless token codec
///
/// Pure with respect to the signing secret; no I/O and no stored state.
#[derive(Clone)]
pub struct TokenCodec {
    secret: [u8; 32],
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from a signing secret and validity window
    pub fn new(secret: [u8; 32], ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Issue a signed token for the given subject
    pub fn issue(&self, subject: &UserId) -> String {
        self.issue_at(subject, Utc::now().timestamp_millis())
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let (payload, signature_b64) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
        let (subject_str, issued_at_str) = payload.split_once('.').ok_or(TokenError::Malformed)?;

        // Exactly three dot-separated parts
        if issued_at_str.contains('.') {
            return Err(TokenError::Malformed);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        // The payload is authentic from here on; unparseable fields mean
        // the token was issued in a format this codec never produces.
        let issued_at_ms: i64 = issued_at_str.parse().map_err(|_| TokenError::Malformed)?;

        let age_ms = Utc::now().timestamp_millis() - issued_at_ms;
        if age_ms > self.ttl.as_millis() as i64 {
            return Err(TokenError::Expired);
        }

        subject_str.parse().map_err(|_| TokenError::Malformed)
    }

    /// Validity window in seconds (for cookie Max-Age)
    pub fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs()
    }

    fn issue_at(&self, subject: &UserId, issued_at_ms: i64) -> String {
        let payload = format!("{}.{}", subject, issued_at_ms);

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature))
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[SECRET]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
