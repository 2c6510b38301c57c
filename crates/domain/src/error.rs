//! Domain errors
//!
//! One error type for the rules, catalog and builder. The engine wraps it in
//! its use-case errors; `message()` is what a player sees.

use thiserror::Error;

use crate::value_objects::DiceParseError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bad input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Name missing from the catalog
    #[error("Entity not found: {entity_type} {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Level, subclass or feat rule broken
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Malformed player input: empty names, scores out of range.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error, used for catalog lookups ("Race", "Elf")
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Used by `FromStr` impls such as `ArmorCategory`.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// The message without the category prefix, for display to players.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Constraint(msg) | Self::Parse(msg) => msg.clone(),
            Self::NotFound { entity_type, id } => format!("Unknown {}: {}", entity_type, id),
        }
    }
}

impl From<DiceParseError> for DomainError {
    fn from(err: DiceParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn not_found_names_the_catalog_entry() {
        let err = DomainError::not_found("Race", "Warforged");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(err.to_string(), "Entity not found: Race Warforged");
        assert_eq!(err.message(), "Unknown Race: Warforged");
    }

    #[test]
    fn constraint_error() {
        let err = DomainError::constraint("class listed twice");
        assert_eq!(err.to_string(), "Constraint violation: class listed twice");
    }

    #[test]
    fn dice_parse_errors_convert() {
        let dice_err = DiceParseError::Empty;
        let domain_err: DomainError = dice_err.into();
        assert!(matches!(domain_err, DomainError::Parse(_)));
        assert!(domain_err.to_string().contains("Empty dice formula"));
    }
}
