//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::AppConfig,
    ports::{CharacterRepo, ClockPort, RandomPort, RepoError, UserRepo},
    sqlite::{self, SqliteCharacterRepo, SqliteUserRepo},
};
use crate::use_cases::{
    AdminUseCases, AuthUseCases, CatalogUseCases, CharacterUseCases, DiceUseCases, UseCases,
};

/// Main application state.
///
/// Holds the repositories and every use case. The desktop UI shares one
/// instance for the lifetime of the window.
pub struct App {
    pub config: AppConfig,
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub users: Arc<dyn UserRepo>,
    pub characters: Arc<dyn CharacterRepo>,
}

impl App {
    /// Open the configured database and wire everything up.
    pub async fn new(config: AppConfig) -> Result<Self, RepoError> {
        let pool = sqlite::connect(&config.database_path).await?;
        let users: Arc<dyn UserRepo> = Arc::new(SqliteUserRepo::new(pool.clone()));
        let characters: Arc<dyn CharacterRepo> = Arc::new(SqliteCharacterRepo::new(pool));

        let app = Self::with_ports(
            config,
            users,
            characters,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
        );

        if let Some(username) = app.config.bootstrap_admin.clone() {
            if let Err(e) = app.use_cases.admin.bootstrap_admin(&username).await {
                tracing::error!(error = %e, "Admin bootstrap failed");
            }
        }

        tracing::info!(database = %app.config.database_path.display(), "Tavernkeep engine ready");
        Ok(app)
    }

    /// Compose from explicit ports.
    pub fn with_ports(
        config: AppConfig,
        users: Arc<dyn UserRepo>,
        characters: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let use_cases = UseCases {
            auth: AuthUseCases::new(users.clone(), config.min_password_length),
            characters: CharacterUseCases::new(characters.clone(), clock),
            admin: AdminUseCases::new(users.clone(), characters.clone()),
            dice: DiceUseCases::new(random.clone()),
            catalog: CatalogUseCases::new(random),
        };

        Self {
            config,
            repositories: Repositories { users, characters },
            use_cases,
        }
    }
}

#[cfg(test)]
mod tests {
    use tavernkeep_domain::catalog::ArmorCategory;
    use tavernkeep_domain::{ArmorSelection, CharacterDraft, ClassLevel};

    use super::*;
    use crate::use_cases::{AuthError, CharacterError};

    async fn app(dir: &tempfile::TempDir) -> App {
        let mut config = AppConfig::for_database(dir.path().join("app.db"));
        config.bootstrap_admin = Some("dm".to_string());
        App::new(config).await.expect("app")
    }

    fn draft() -> CharacterDraft {
        CharacterDraft {
            name: "Pike".to_string(),
            race: "Dwarf".to_string(),
            background: "Acolyte".to_string(),
            ability_scores: [14, 10, 16, 8, 15, 12],
            classes: vec![ClassLevel::new("Fighter", 4), ClassLevel::new("Bard", 2)],
            skills: vec!["Athletics".to_string()],
            expertise: vec![],
            feats: vec!["Tough".to_string()],
            armor: ArmorSelection::new(ArmorCategory::Heavy, Some("Splint".into()), 2),
        }
    }

    #[tokio::test]
    async fn register_login_create_and_read_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = app(&dir).await;
        let auth = &app.use_cases.auth;

        let user = auth
            .register("pike", "grog", "grog", "pike@example.com")
            .await
            .expect("register");
        assert!(matches!(
            auth.register("pike", "x", "x", "other@example.com").await,
            Err(AuthError::UsernameTaken)
        ));
        assert!(matches!(
            auth.login("pike", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        let user_again = auth.login("pike", "grog").await.expect("login");
        assert_eq!(user_again, user);

        let characters = &app.use_cases.characters;
        let created = characters.create(&user, &draft()).await.expect("create");
        let fetched = characters.get(&user, created.id).await.expect("get");
        assert_eq!(fetched, created);
        assert!(fetched.details.is_jack_of_all_trades);

        let sheet = characters.sheet(&user, created.id).await.expect("sheet");
        assert_eq!(sheet.total_level, 6);
        assert_eq!(sheet.proficiency_bonus, 3);
        // Splint 17 + shield 2
        assert_eq!(sheet.armor_class, 19);

        let listed = characters.list(&user).await.expect("list");
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn admin_flow_over_sqlite() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let app = app(&dir).await;
            app.use_cases
                .auth
                .register("dm", "pw", "pw", "dm@example.com")
                .await
                .expect("register dm");
        }

        // The bootstrap runs at startup once the account exists.
        let app = app(&dir).await;
        let dm = app.use_cases.auth.login("dm", "pw").await.expect("login");
        assert!(dm.is_admin);

        let player = app
            .use_cases
            .auth
            .register("vax", "pw", "pw", "vax@example.com")
            .await
            .expect("register");
        let character = app
            .use_cases
            .characters
            .create(&player, &draft())
            .await
            .expect("create");

        let users = app.use_cases.admin.list_users(&dm).await.expect("users");
        assert_eq!(users.len(), 2);
        let owned = app
            .use_cases
            .admin
            .user_characters(&dm, player.id)
            .await
            .expect("characters");
        assert_eq!(owned.len(), 1);

        app.use_cases
            .admin
            .remove_user(&dm, player.id)
            .await
            .expect("remove");
        assert!(matches!(
            app.use_cases.characters.get(&dm, character.id).await,
            Err(CharacterError::NotFound(_))
        ));
    }
}
