//! Runtime configuration from the environment.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

pub const DATABASE_ENV: &str = "TAVERNKEEP_DATABASE";
pub const BOOTSTRAP_ADMIN_ENV: &str = "TAVERNKEEP_BOOTSTRAP_ADMIN";
pub const MIN_PASSWORD_LENGTH_ENV: &str = "TAVERNKEEP_MIN_PASSWORD_LENGTH";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

const DATABASE_FILE: &str = "tavernkeep.db";
const DEFAULT_LOG_FILTER: &str = "tavernkeep_player=debug,tavernkeep_engine=debug,dioxus=info";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// Existing username promoted to admin at startup
    pub bootstrap_admin: Option<String>,
    pub min_password_length: usize,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let min_password_length = match get(MIN_PASSWORD_LENGTH_ENV) {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or(ConfigError::Invalid {
                    key: MIN_PASSWORD_LENGTH_ENV,
                    value,
                })?,
            None => 1,
        };

        Ok(Self {
            database_path: get(DATABASE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            bootstrap_admin: get(BOOTSTRAP_ADMIN_ENV),
            min_password_length,
            log_filter: get(LOG_FILTER_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Defaults with an explicit database file.
    pub fn for_database(path: impl AsRef<Path>) -> Self {
        Self {
            database_path: path.as_ref().to_path_buf(),
            bootstrap_admin: None,
            min_password_length: 1,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Platform data directory, or the working directory if none can be resolved.
fn default_database_path() -> PathBuf {
    ProjectDirs::from("", "", "Tavernkeep")
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

/// Load `.env.local` then `.env` from the workspace root.
///
/// Values already set in the process environment win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("config");
        assert!(config.database_path.ends_with(DATABASE_FILE));
        assert_eq!(config.bootstrap_admin, None);
        assert_eq!(config.min_password_length, 1);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (DATABASE_ENV, "/tmp/party.db"),
            (BOOTSTRAP_ADMIN_ENV, " dm "),
            (MIN_PASSWORD_LENGTH_ENV, "8"),
            (LOG_FILTER_ENV, "warn"),
        ]))
        .expect("config");
        assert_eq!(config.database_path, PathBuf::from("/tmp/party.db"));
        assert_eq!(config.bootstrap_admin.as_deref(), Some("dm"));
        assert_eq!(config.min_password_length, 8);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config =
            AppConfig::from_lookup(lookup(&[(BOOTSTRAP_ADMIN_ENV, "  ")])).expect("config");
        assert_eq!(config.bootstrap_admin, None);
    }

    #[test]
    fn rejects_bad_password_length() {
        for bad in ["zero", "0", "-3"] {
            let err = AppConfig::from_lookup(lookup(&[(MIN_PASSWORD_LENGTH_ENV, bad)]))
                .expect_err("invalid");
            assert_eq!(
                err,
                ConfigError::Invalid {
                    key: MIN_PASSWORD_LENGTH_ENV,
                    value: bad.to_string(),
                }
            );
        }
    }
}
