//! Repository port traits for database access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tavernkeep_domain::{
    ArmorSelection, Character, CharacterDetails, CharacterId, NewUser, User, UserCredentials,
    UserId,
};

use super::error::RepoError;

// =============================================================================
// Accounts
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a new account. Duplicate username or email is a `ConstraintViolation`.
    async fn insert(&self, user: &NewUser) -> Result<User, RepoError>;
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
    async fn get_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, UserCredentials)>, RepoError>;
    async fn username_exists(&self, username: &str) -> Result<bool, RepoError>;
    async fn email_exists(&self, email: &str) -> Result<bool, RepoError>;
    async fn list(&self) -> Result<Vec<User>, RepoError>;
    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<(), RepoError>;
    /// Delete the account together with its characters.
    async fn delete(&self, id: UserId) -> Result<(), RepoError>;
}

// =============================================================================
// Characters
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn insert(
        &self,
        user_id: UserId,
        details: &CharacterDetails,
        created_at: DateTime<Utc>,
    ) -> Result<Character, RepoError>;
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Character>, RepoError>;
    /// `None` restores full hit points.
    async fn update_hit_points(
        &self,
        id: CharacterId,
        current_hp: Option<i32>,
    ) -> Result<(), RepoError>;
    async fn update_armor(&self, id: CharacterId, armor: &ArmorSelection)
        -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
}
