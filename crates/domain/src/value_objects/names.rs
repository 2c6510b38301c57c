//! Validated name and credential newtypes
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for character names
const MAX_CHARACTER_NAME_LENGTH: usize = 100;

/// Maximum length for account usernames
const MAX_USERNAME_LENGTH: usize = 64;

/// Maximum length for email addresses (RFC 5321 path limit)
const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").ok());

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character name (non-empty, <=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 100 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_CHARACTER_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Character name cannot exceed {} characters",
                MAX_CHARACTER_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

// ============================================================================
// Username
// ============================================================================

/// A validated account username (non-empty, <=64 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new validated username.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the username is empty or too long.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Username cannot be empty"));
        }
        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Username cannot exceed {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> String {
        name.0
    }
}

// ============================================================================
// Email
// ============================================================================

/// An email address accepted by the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a validated email address.
    ///
    /// The address is trimmed and must look like `local@domain.tld`.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.len() > MAX_EMAIL_LENGTH || !Self::is_valid(trimmed) {
            return Err(DomainError::validation("Invalid email address"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Whether `candidate` is a well-formed address.
    pub fn is_valid(candidate: &str) -> bool {
        EMAIL_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> String {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod character_name {
        use super::*;

        #[test]
        fn valid_name() {
            let name = CharacterName::new("Rand Oman").expect("valid");
            assert_eq!(name.as_str(), "Rand Oman");
            assert_eq!(name.to_string(), "Rand Oman");
        }

        #[test]
        fn empty_name_rejected() {
            let err = CharacterName::new("").expect_err("empty");
            assert!(matches!(err, DomainError::Validation(_)));
            assert!(err.to_string().contains("cannot be empty"));
        }

        #[test]
        fn whitespace_only_rejected() {
            assert!(CharacterName::new("   ").is_err());
        }

        #[test]
        fn name_is_trimmed() {
            let name = CharacterName::new("  Vex  ").expect("valid");
            assert_eq!(name.as_str(), "Vex");
        }

        #[test]
        fn too_long_rejected() {
            let long = "x".repeat(MAX_CHARACTER_NAME_LENGTH + 1);
            assert!(CharacterName::new(long).is_err());
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<CharacterName, _> = serde_json::from_str("\"  \"");
            assert!(result.is_err());
        }
    }

    mod username {
        use super::*;

        #[test]
        fn valid_username() {
            let name = Username::new("dm_otto").expect("valid");
            assert_eq!(name.as_str(), "dm_otto");
        }

        #[test]
        fn inner_space_kept_outer_trimmed() {
            let name = Username::new("  dm otto ").expect("valid");
            assert_eq!(name.as_str(), "dm otto");
        }

        #[test]
        fn empty_rejected() {
            assert!(Username::new(" ").is_err());
        }
    }

    mod email {
        use super::*;

        #[test]
        fn accepts_common_addresses() {
            for candidate in [
                "player@example.com",
                "first.last+dnd@mail.example.org",
                "under_score@sub-domain.io",
            ] {
                assert!(Email::is_valid(candidate), "{candidate} should be valid");
            }
        }

        #[test]
        fn rejects_malformed_addresses() {
            for candidate in [
                "",
                "no-at-sign.com",
                "missing@tld",
                "two@@example.com",
                "spaces in@example.com",
                "@example.com",
            ] {
                assert!(!Email::is_valid(candidate), "{candidate} should be invalid");
            }
        }

        #[test]
        fn new_trims_and_reports_validation_error() {
            let email = Email::new("  player@example.com ").expect("valid");
            assert_eq!(email.as_str(), "player@example.com");

            let err = Email::new("nope").expect_err("invalid");
            assert_eq!(err, DomainError::validation("Invalid email address"));
        }
    }
}
