//! Registration and login.

use std::sync::Arc;

use tavernkeep_domain::{Email, NewUser, User, Username};

use super::{logged, OPERATION_FAILED};
use crate::infrastructure::password::{hash_password, verify_password, PasswordError};
use crate::infrastructure::ports::{RepoError, UserRepo};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("{0}")]
    InvalidUsername(String),
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already exists")]
    EmailTaken,
    /// Same message for unknown users and wrong passwords.
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Password(_) | Self::Repo(_) => OPERATION_FAILED.to_string(),
            other => other.to_string(),
        }
    }
}

pub struct AuthUseCases {
    users: Arc<dyn UserRepo>,
    min_password_length: usize,
}

impl AuthUseCases {
    pub fn new(users: Arc<dyn UserRepo>, min_password_length: usize) -> Self {
        Self {
            users,
            min_password_length: min_password_length.max(1),
        }
    }

    /// Create an account.
    ///
    /// Checks run in a fixed order so the first problem is the one reported:
    /// password confirmation, email format, username format, password length,
    /// username uniqueness, email uniqueness.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        repeat_password: &str,
        email: &str,
    ) -> Result<User, AuthError> {
        if password != repeat_password {
            return Err(AuthError::PasswordMismatch);
        }
        let email = Email::new(email).map_err(|_| AuthError::InvalidEmail)?;
        let username =
            Username::new(username).map_err(|e| AuthError::InvalidUsername(e.message()))?;
        if password.chars().count() < self.min_password_length {
            return Err(AuthError::PasswordTooShort(self.min_password_length));
        }

        if self
            .users
            .username_exists(username.as_str())
            .await
            .map_err(logged("username_exists"))?
        {
            return Err(AuthError::UsernameTaken);
        }
        if self
            .users
            .email_exists(email.as_str())
            .await
            .map_err(logged("email_exists"))?
        {
            return Err(AuthError::EmailTaken);
        }

        let credentials = hash_password(password)?;
        let new_user = NewUser {
            username,
            email,
            credentials,
            is_admin: false,
        };

        let user = match self.users.insert(&new_user).await {
            Ok(user) => user,
            Err(e) if e.is_constraint() => {
                return Err(self.registration_conflict(&new_user).await?);
            }
            Err(e) => return Err(logged("insert_user")(e).into()),
        };

        tracing::info!(user_id = %user.id, username = %user.username, "Registered user");
        Ok(user)
    }

    /// Another registration took the username or email between the checks
    /// and the insert. Report whichever is now taken, username first.
    async fn registration_conflict(&self, new_user: &NewUser) -> Result<AuthError, AuthError> {
        let username_taken = self
            .users
            .username_exists(new_user.username.as_str())
            .await
            .map_err(logged("username_exists"))?;
        tracing::debug!(
            username = %new_user.username,
            username_taken,
            "Registration conflicted on insert"
        );
        Ok(if username_taken {
            AuthError::UsernameTaken
        } else {
            AuthError::EmailTaken
        })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some((user, credentials)) = self
            .users
            .get_credentials(username.trim())
            .await
            .map_err(logged("get_credentials"))?
        else {
            tracing::debug!(username, "Login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &credentials)? {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }
}
