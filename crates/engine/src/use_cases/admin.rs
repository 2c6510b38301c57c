//! Account administration.

use std::sync::Arc;

use tavernkeep_domain::{Character, User, UserId};

use super::{logged, OPERATION_FAILED};
use crate::infrastructure::ports::{CharacterRepo, RepoError, UserRepo};

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Administrator access required")]
    Forbidden,
    #[error("User not found: {0}")]
    UserNotFound(UserId),
    #[error("You cannot remove your own account")]
    SelfRemoval,
    #[error("You cannot revoke your own admin rights")]
    SelfDemotion,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl AdminError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Repo(_) => OPERATION_FAILED.to_string(),
            other => other.to_string(),
        }
    }
}

pub struct AdminUseCases {
    users: Arc<dyn UserRepo>,
    characters: Arc<dyn CharacterRepo>,
}

impl AdminUseCases {
    pub fn new(users: Arc<dyn UserRepo>, characters: Arc<dyn CharacterRepo>) -> Self {
        Self { users, characters }
    }

    fn require_admin(actor: &User) -> Result<(), AdminError> {
        if actor.is_admin {
            Ok(())
        } else {
            tracing::warn!(user_id = %actor.id, "Non-admin attempted an admin operation");
            Err(AdminError::Forbidden)
        }
    }

    async fn existing_user(&self, id: UserId) -> Result<User, AdminError> {
        self.users
            .get(id)
            .await
            .map_err(logged("get_user"))?
            .ok_or(AdminError::UserNotFound(id))
    }

    pub async fn list_users(&self, actor: &User) -> Result<Vec<User>, AdminError> {
        Self::require_admin(actor)?;
        Ok(self.users.list().await.map_err(logged("list_users"))?)
    }

    pub async fn user_characters(
        &self,
        actor: &User,
        user_id: UserId,
    ) -> Result<Vec<Character>, AdminError> {
        Self::require_admin(actor)?;
        self.existing_user(user_id).await?;
        Ok(self
            .characters
            .list_for_user(user_id)
            .await
            .map_err(logged("list_characters"))?)
    }

    /// Delete an account and everything it owns.
    pub async fn remove_user(&self, actor: &User, user_id: UserId) -> Result<(), AdminError> {
        Self::require_admin(actor)?;
        if actor.id == user_id {
            return Err(AdminError::SelfRemoval);
        }
        self.existing_user(user_id).await?;
        self.users
            .delete(user_id)
            .await
            .map_err(logged("delete_user"))?;
        tracing::info!(admin_id = %actor.id, user_id = %user_id, "Removed user");
        Ok(())
    }

    pub async fn set_admin(
        &self,
        actor: &User,
        user_id: UserId,
        is_admin: bool,
    ) -> Result<(), AdminError> {
        Self::require_admin(actor)?;
        if actor.id == user_id && !is_admin {
            return Err(AdminError::SelfDemotion);
        }
        self.users
            .set_admin(user_id, is_admin)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    AdminError::UserNotFound(user_id)
                } else {
                    logged("set_admin")(e).into()
                }
            })?;
        tracing::info!(admin_id = %actor.id, user_id = %user_id, is_admin, "Changed admin flag");
        Ok(())
    }

    /// Promote `username` at startup. A missing account is not an error.
    pub async fn bootstrap_admin(&self, username: &str) -> Result<Option<User>, AdminError> {
        let Some(user) = self
            .users
            .get_by_username(username.trim())
            .await
            .map_err(logged("get_user"))?
        else {
            tracing::warn!(username, "Bootstrap admin account does not exist yet");
            return Ok(None);
        };

        if user.is_admin {
            return Ok(Some(user));
        }

        self.users
            .set_admin(user.id, true)
            .await
            .map_err(logged("set_admin"))?;
        tracing::info!(user_id = %user.id, "Promoted bootstrap admin");
        Ok(Some(User {
            is_admin: true,
            ..user
        }))
    }
}
