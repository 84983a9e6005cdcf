//! Password Value Objects
//!
//! Domain wrappers around `platform::password` for the two password
//! representations the auth flow needs: raw user input (hash-before-store)
//! and the stored Argon2id hash (verify-on-login).
//!
//! Relational policy checks (password must not contain the nickname,
//! confirm must match) are part of the signup validation, not these types.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword`. Memory is automatically
/// zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with length/character validation
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    /// Check whether the password contains the given substring
    ///
    /// Used by the signup policy (password must not contain the nickname).
    pub fn contains(&self, needle: &str) -> bool {
        self.0.as_str().contains(needle)
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Stored Password (Hashed, for persistence)
// ============================================================================

/// Hashed password for database storage
///
/// Stores the password in Argon2id PHC string format.
/// Safe to store in the database.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredPassword(HashedPassword);

impl StoredPassword {
    /// Create from a raw password by hashing
    ///
    /// ## Arguments
    /// * `raw` - The validated raw password
    /// * `pepper` - Optional application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        Ok(Self(raw.inner().hash(pepper)?))
    }

    /// Create from a PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(phc_string)?))
    }

    /// Get the PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// ## Arguments
    /// * `raw` - The raw password to verify
    /// * `pepper` - Must match the pepper used during hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("1234".to_string()).is_ok());
        assert!(RawPassword::new("123".to_string()).is_err());
        assert!(RawPassword::new("".to_string()).is_err());
    }

    #[test]
    fn test_contains_nickname() {
        let raw = RawPassword::new("Developer123".to_string()).unwrap();
        assert!(raw.contains("Developer"));
        assert!(!raw.contains("Admin"));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("pass1".to_string()).unwrap();
        let stored = StoredPassword::from_raw(&raw, None).unwrap();

        assert!(stored.verify(&raw, None));

        let wrong = RawPassword::new("other".to_string()).unwrap();
        assert!(!stored.verify(&wrong, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("pass1".to_string()).unwrap();
        let stored = StoredPassword::from_raw(&raw, None).unwrap();

        let phc = stored.as_phc_string().to_string();
        let restored = StoredPassword::from_phc_string(phc).unwrap();

        assert!(restored.verify(&raw, None));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("secret99".to_string()).unwrap();
        assert!(format!("{:?}", raw).contains("REDACTED"));

        let stored = StoredPassword::from_raw(&raw, None).unwrap();
        assert!(format!("{:?}", stored).contains("HASH"));
    }
}
