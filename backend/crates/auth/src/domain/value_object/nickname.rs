//! Nickname Value Object
//!
//! A nickname is the public handle a user registers and logs in with.
//!
//! ## Invariants
//! - Length: 3 to 30 characters (after trimming surrounding whitespace)
//! - ASCII letters (a-z, A-Z) and digits (0-9) only
//! - Case is preserved; uniqueness is checked on the exact string

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a nickname (in characters)
pub const NICKNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a nickname (in characters)
pub const NICKNAME_MAX_LENGTH: usize = 30;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when nickname validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NicknameError {
    /// Nickname is empty after trimming
    Empty,

    /// Nickname is too short (minimum: NICKNAME_MIN_LENGTH)
    TooShort { length: usize, min: usize },

    /// Nickname is too long (maximum: NICKNAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Nickname contains a character outside a-z, A-Z, 0-9
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for NicknameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Nickname cannot be empty."),
            Self::TooShort { min, .. } => {
                write!(f, "Nickname must be at least {min} characters.")
            }
            Self::TooLong { max, .. } => {
                write!(f, "Nickname must be at most {max} characters.")
            }
            Self::InvalidCharacter { .. } => {
                write!(
                    f,
                    "Nickname must consist of letters (a-z, A-Z) and digits (0-9) only."
                )
            }
        }
    }
}

impl std::error::Error for NicknameError {}

// ============================================================================
// Nickname Value Object
// ============================================================================

/// Validated nickname
///
/// # Invariants
/// - Non-empty after trimming
/// - Length between NICKNAME_MIN_LENGTH and NICKNAME_MAX_LENGTH
/// - ASCII alphanumeric characters only
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    /// Create a new Nickname from raw input
    ///
    /// Trims surrounding whitespace and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, NicknameError> {
        let trimmed = input.as_ref().trim().to_string();
        Self::validate(&trimmed)?;
        Ok(Self(trimmed))
    }

    /// Get the nickname as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Validate a trimmed nickname
    fn validate(value: &str) -> Result<(), NicknameError> {
        if value.is_empty() {
            return Err(NicknameError::Empty);
        }

        let length = value.chars().count();
        if length < NICKNAME_MIN_LENGTH {
            return Err(NicknameError::TooShort {
                length,
                min: NICKNAME_MIN_LENGTH,
            });
        }
        if length > NICKNAME_MAX_LENGTH {
            return Err(NicknameError::TooLong {
                length,
                max: NICKNAME_MAX_LENGTH,
            });
        }

        for (position, char) in value.chars().enumerate() {
            if !char.is_ascii_alphanumeric() {
                return Err(NicknameError::InvalidCharacter { char, position });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Nickname").field(&self.0).finish()
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = NicknameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Nickname {
    type Error = NicknameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Nickname> for String {
    fn from(nickname: Nickname) -> Self {
        nickname.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert!(matches!(Nickname::new(""), Err(NicknameError::Empty)));
        }

        #[test]
        fn test_whitespace_only_fails() {
            assert!(matches!(Nickname::new("   "), Err(NicknameError::Empty)));
        }

        #[test]
        fn test_too_short() {
            assert!(matches!(
                Nickname::new("ab"),
                Err(NicknameError::TooShort { length: 2, min: 3 })
            ));
        }

        #[test]
        fn test_minimum_length() {
            let nickname = Nickname::new("abc").unwrap();
            assert_eq!(nickname.as_str(), "abc");
        }

        #[test]
        fn test_maximum_length() {
            let input = "a".repeat(NICKNAME_MAX_LENGTH);
            assert!(Nickname::new(&input).is_ok());
        }

        #[test]
        fn test_too_long() {
            let input = "a".repeat(NICKNAME_MAX_LENGTH + 1);
            assert!(matches!(
                Nickname::new(&input),
                Err(NicknameError::TooLong { .. })
            ));
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_alphanumeric() {
            assert!(Nickname::new("Developer").is_ok());
            assert!(Nickname::new("dev123").is_ok());
            assert!(Nickname::new("123").is_ok());
        }

        #[test]
        fn test_case_preserved() {
            let nickname = Nickname::new("DevUser").unwrap();
            assert_eq!(nickname.as_str(), "DevUser");
        }

        #[test]
        fn test_underscore_fails() {
            assert!(matches!(
                Nickname::new("dev_user"),
                Err(NicknameError::InvalidCharacter { char: '_', .. })
            ));
        }

        #[test]
        fn test_special_char_fails() {
            assert!(matches!(
                Nickname::new("dev@user"),
                Err(NicknameError::InvalidCharacter { char: '@', .. })
            ));
        }

        #[test]
        fn test_whitespace_in_middle_fails() {
            assert!(matches!(
                Nickname::new("dev user"),
                Err(NicknameError::InvalidCharacter { char: ' ', .. })
            ));
        }

        #[test]
        fn test_unicode_fails() {
            assert!(matches!(
                Nickname::new("개발자"),
                Err(NicknameError::InvalidCharacter { .. })
            ));
        }

        #[test]
        fn test_surrounding_whitespace_trimmed() {
            let nickname = Nickname::new("  dev  ").unwrap();
            assert_eq!(nickname.as_str(), "dev");
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize() {
            let nickname = Nickname::new("Developer").unwrap();
            let json = serde_json::to_string(&nickname).unwrap();
            assert_eq!(json, "\"Developer\"");
        }

        #[test]
        fn test_deserialize() {
            let nickname: Nickname = serde_json::from_str("\"Developer\"").unwrap();
            assert_eq!(nickname.as_str(), "Developer");
        }

        #[test]
        fn test_deserialize_invalid() {
            let result: Result<Nickname, _> = serde_json::from_str("\"ab\"");
            assert!(result.is_err());
        }
    }

    mod error_messages {
        use super::*;

        #[test]
        fn test_too_short_message() {
            let err = NicknameError::TooShort { length: 2, min: 3 };
            assert_eq!(err.to_string(), "Nickname must be at least 3 characters.");
        }

        #[test]
        fn test_invalid_character_message() {
            let err = NicknameError::InvalidCharacter {
                char: '@',
                position: 3,
            };
            assert!(err.to_string().contains("letters"));
        }
    }
}
