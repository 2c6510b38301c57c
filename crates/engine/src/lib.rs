//! Tavernkeep engine library.
//!
//! Everything behind the desktop window: storage, authentication and the use
//! cases the UI calls.
//!
//! ## Structure
//!
//! - `infrastructure/` - Ports and their SQLite, argon2 and system adapters
//! - `use_cases/` - User stories orchestrated over the ports
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use infrastructure::config::{load_dotenv_from_repo_root, AppConfig, ConfigError};
