//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Database access (SQLite today, swappable in tests)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{CharacterRepo, UserRepo};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use repos::{MockCharacterRepo, MockUserRepo};
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};
