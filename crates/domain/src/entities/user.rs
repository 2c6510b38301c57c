//! Account entities.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::value_objects::{Email, Username};

/// A registered account, without its credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub is_admin: bool,
}

/// Stored password material. Never leaves the engine.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// PHC-format hash string
    pub password_hash: String,
    /// Salt used to produce `password_hash`
    pub salt: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("password_hash", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}

/// A validated registration ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub credentials: UserCredentials,
    pub is_admin: bool,
}
