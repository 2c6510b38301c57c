//! Use cases - user stories orchestrated over the ports.
//!
//! Each module owns its error type. Repository failures are logged where
//! they happen and reach the UI as a generic "Operation failed".

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod characters;
pub mod dice;

pub use admin::{AdminError, AdminUseCases};
pub use auth::{AuthError, AuthUseCases};
pub use catalog::{CatalogUseCases, AUTO_GENERATED_NAME};
pub use characters::{CharacterError, CharacterUseCases};
pub use dice::{DiceError, DiceUseCases};

use crate::infrastructure::ports::RepoError;

/// What the UI shows for storage failures.
pub const OPERATION_FAILED: &str = "Operation failed";

/// Log a repository failure before it propagates.
pub(crate) fn logged(operation: &'static str) -> impl FnOnce(RepoError) -> RepoError {
    move |e| {
        tracing::error!(operation, error = %e, "Repository operation failed");
        e
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub auth: AuthUseCases,
    pub characters: CharacterUseCases,
    pub admin: AdminUseCases,
    pub dice: DiceUseCases,
    pub catalog: CatalogUseCases,
}
