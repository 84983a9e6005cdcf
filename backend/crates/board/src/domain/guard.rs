//! Authorization Guard
//!
//! Capability check for resource mutations. Each resource type is
//! registered with exactly one [`OwnershipMode`]; the guard compares the
//! caller's claim against the resource's owner under that mode and
//! rejects before any write happens.

use kernel::id::UserId;
use platform::crypto::{constant_time_eq, sha256};
use std::fmt;

/// Ownership mode, selected per resource type at registration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnershipMode {
    /// Resource is owned by the identity stored on it; the resolved
    /// identity must match
    #[default]
    IdentityMatch,
    /// Resource carries its own secret; the caller must supply a
    /// matching candidate (legacy compatibility mode)
    SecretMatch,
}

/// Guard failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// Acting identity is not the resource owner
    IdentityMismatch,
    /// Candidate secret does not match the stored digest
    SecretMismatch,
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdentityMismatch => write!(f, "acting identity is not the resource owner"),
            Self::SecretMismatch => write!(f, "candidate secret does not match"),
        }
    }
}

impl std::error::Error for GuardError {}

// ============================================================================
// Actor and claims
// ============================================================================

/// The acting identity resolved by the session middleware
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: UserId,
    pub nickname: String,
}

/// Capability claim presented with a mutation
///
/// Carries whichever proofs the caller has; the guard consults the one
/// its mode requires.
#[derive(Debug, Clone, Default)]
pub struct AccessClaim<'a> {
    /// Resolved identity, if the request was authenticated
    pub actor: Option<&'a UserId>,
    /// Candidate secret from the request body, if supplied
    pub secret: Option<&'a str>,
}

impl<'a> AccessClaim<'a> {
    /// Claim backed by a resolved identity
    pub fn identity(actor: &'a UserId) -> Self {
        Self {
            actor: Some(actor),
            secret: None,
        }
    }

    /// Claim backed by a candidate secret
    pub fn secret(secret: &'a str) -> Self {
        Self {
            actor: None,
            secret: Some(secret),
        }
    }

    /// Claim carrying both proofs
    pub fn new(actor: Option<&'a UserId>, secret: Option<&'a str>) -> Self {
        Self { actor, secret }
    }
}

// ============================================================================
// Edit secret (legacy secret-owned mode)
// ============================================================================

/// Stored digest of a per-resource edit secret
///
/// The clear-text secret is never persisted; only its SHA-256 digest is.
#[derive(Clone, PartialEq, Eq)]
pub struct EditSecret([u8; 32]);

impl EditSecret {
    /// Derive the stored digest from a clear-text secret
    pub fn derive(secret: &str) -> Self {
        Self(sha256(secret.as_bytes()))
    }

    /// Compare a candidate secret against the stored digest
    ///
    /// Constant-time over the digest bytes.
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(&self.0, &sha256(candidate.as_bytes()))
    }

    /// Digest bytes for persistence
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Restore from persisted digest bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let digest: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(digest))
    }
}

impl fmt::Debug for EditSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EditSecret").field(&"[DIGEST]").finish()
    }
}

// ============================================================================
// Owned resources
// ============================================================================

/// A resource the guard can authorize mutations on
pub trait Owned {
    /// Identity that created the resource
    fn owner_id(&self) -> &UserId;

    /// Stored edit-secret digest, if the resource carries one
    fn edit_secret(&self) -> Option<&EditSecret>;
}

/// Authorize a mutation on `resource` under `mode`
///
/// Must be called after the existence check and before any write.
pub fn authorize(
    mode: OwnershipMode,
    resource: &impl Owned,
    claim: &AccessClaim<'_>,
) -> Result<(), GuardError> {
    match mode {
        OwnershipMode::IdentityMatch => match claim.actor {
            Some(actor) if actor == resource.owner_id() => Ok(()),
            _ => Err(GuardError::IdentityMismatch),
        },
        OwnershipMode::SecretMatch => {
            let stored = resource.edit_secret().ok_or(GuardError::SecretMismatch)?;
            match claim.secret {
                Some(candidate) if stored.matches(candidate) => Ok(()),
                _ => Err(GuardError::SecretMismatch),
            }
        }
    }
}
