//! SQLite account storage.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tavernkeep_domain::{Email, NewUser, User, UserCredentials, UserId, Username};

use super::flag;
use crate::infrastructure::ports::{RepoError, UserRepo};

const USER_COLUMNS: &str = "UserID, Username, Email, IsAdmin, PasswordHash, Salt";

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(
        &self,
        column: &'static str,
        value: &str,
    ) -> Result<Option<SqliteRow>, RepoError> {
        let query = format!("SELECT {} FROM Users WHERE {} = ?", USER_COLUMNS, column);
        sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_user", e))
    }

    async fn exists(&self, column: &'static str, value: &str) -> Result<bool, RepoError> {
        let query = format!("SELECT COUNT(*) FROM Users WHERE {} = ?", column);
        let count: i64 = sqlx::query_scalar(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("user_exists", e))?;
        Ok(count > 0)
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, RepoError> {
    let username: String = row
        .try_get("Username")
        .map_err(|e| RepoError::database("user_from_row", e))?;
    let email: String = row
        .try_get("Email")
        .map_err(|e| RepoError::database("user_from_row", e))?;
    Ok(User {
        id: UserId::from_raw(
            row.try_get("UserID")
                .map_err(|e| RepoError::database("user_from_row", e))?,
        ),
        username: Username::new(username).map_err(RepoError::serialization)?,
        email: Email::new(email).map_err(RepoError::serialization)?,
        is_admin: flag(
            row.try_get("IsAdmin")
                .map_err(|e| RepoError::database("user_from_row", e))?,
        ),
    })
}

fn credentials_from_row(row: &SqliteRow) -> Result<UserCredentials, RepoError> {
    Ok(UserCredentials {
        password_hash: row
            .try_get("PasswordHash")
            .map_err(|e| RepoError::database("credentials_from_row", e))?,
        salt: row
            .try_get("Salt")
            .map_err(|e| RepoError::database("credentials_from_row", e))?,
    })
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn insert(&self, user: &NewUser) -> Result<User, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO Users (Username, PasswordHash, Salt, Email, IsAdmin)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.username.as_str())
        .bind(&user.credentials.password_hash)
        .bind(&user.credentials.salt)
        .bind(user.email.as_str())
        .bind(user.is_admin)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_user", e))?;

        let id = UserId::from_raw(result.last_insert_rowid());
        tracing::debug!(user_id = %id, username = %user.username, "Inserted user");

        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        })
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let query = format!("SELECT {} FROM Users WHERE UserID = ?", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_user", e))?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let row = self.fetch_one_by("Username", username).await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_credentials(
        &self,
        username: &str,
    ) -> Result<Option<(User, UserCredentials)>, RepoError> {
        let Some(row) = self.fetch_one_by("Username", username).await? else {
            return Ok(None);
        };
        Ok(Some((user_from_row(&row)?, credentials_from_row(&row)?)))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepoError> {
        self.exists("Username", username).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepoError> {
        self.exists("Email", email).await
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let query = format!("SELECT {} FROM Users ORDER BY Username", USER_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_users", e))?;
        rows.iter().map(user_from_row).collect()
    }

    async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE Users SET IsAdmin = ? WHERE UserID = ?")
            .bind(is_admin)
            .bind(id.raw())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("set_admin", e))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("User", id));
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("delete_user", e))?;

        for statement in [
            "DELETE FROM Classes WHERE CharacterID IN (SELECT CharacterID FROM Characters WHERE UserID = ?)",
            "DELETE FROM CharacterSkills WHERE CharacterID IN (SELECT CharacterID FROM Characters WHERE UserID = ?)",
            "DELETE FROM Characters WHERE UserID = ?",
        ] {
            sqlx::query(statement)
                .bind(id.raw())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("delete_user", e))?;
        }

        let result = sqlx::query("DELETE FROM Users WHERE UserID = ?")
            .bind(id.raw())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_user", e))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("User", id));
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("delete_user", e))?;
        tracing::info!(user_id = %id, "Deleted user and their characters");
        Ok(())
    }
}
