//! SQLite persistence.
//!
//! One database file holds accounts and characters. The schema is created on
//! connect and is safe to run against an existing file.

mod characters;
mod users;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

pub use characters::SqliteCharacterRepo;
pub use users::SqliteUserRepo;

const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS Users (
        UserID INTEGER PRIMARY KEY,
        Username TEXT UNIQUE NOT NULL,
        PasswordHash TEXT NOT NULL,
        Salt TEXT NOT NULL,
        Email TEXT UNIQUE NOT NULL,
        IsAdmin INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Characters (
        CharacterID INTEGER PRIMARY KEY AUTOINCREMENT,
        UserID INTEGER NOT NULL REFERENCES Users(UserID) ON DELETE CASCADE,
        CharacterName TEXT NOT NULL,
        Race TEXT NOT NULL,
        Background TEXT,
        AbilityScores TEXT NOT NULL,
        Feats TEXT,
        IsJackOfAllTrades INTEGER NOT NULL DEFAULT 0,
        ArmorType TEXT NOT NULL DEFAULT 'No Armor',
        ArmorName TEXT,
        ShieldBonus INTEGER NOT NULL DEFAULT 0,
        CurrentHp INTEGER,
        CreatedAt TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Classes (
        ClassID INTEGER PRIMARY KEY AUTOINCREMENT,
        CharacterID INTEGER NOT NULL REFERENCES Characters(CharacterID) ON DELETE CASCADE,
        ClassName TEXT NOT NULL,
        Level INTEGER NOT NULL,
        Subclass TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS CharacterSkills (
        SkillID INTEGER PRIMARY KEY AUTOINCREMENT,
        CharacterID INTEGER NOT NULL REFERENCES Characters(CharacterID) ON DELETE CASCADE,
        SkillName TEXT NOT NULL,
        Expertise INTEGER NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_characters_user ON Characters(UserID)",
];

/// Open (creating if needed) the database file and ensure the schema exists.
pub async fn connect(path: &Path) -> Result<SqlitePool, RepoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RepoError::Database {
                operation: "connect",
                message: format!("cannot create {}: {}", parent.display(), e),
            })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))?;

    initialize_schema(&pool).await?;
    tracing::info!(path = %path.display(), "SQLite database ready");
    Ok(pool)
}

pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("initialize_schema", e))?;
    }
    Ok(())
}

/// SQLite stores booleans as integers.
fn flag(value: i64) -> bool {
    value != 0
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    /// Fresh database in a temporary directory. Keep the `TempDir` alive.
    pub async fn temp_pool() -> (TempDir, SqlitePool) {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = super::connect(&dir.path().join("test.db"))
            .await
            .expect("connect");
        (dir, pool)
    }
}
