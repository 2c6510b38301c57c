//! Character creation, viewing, play-time updates and deletion.
//!
//! Every operation takes the acting user. Characters are visible to their
//! owner and to admins only.

use std::sync::Arc;

use tavernkeep_domain::{
    validate_armor, ArmorSelection, Character, CharacterDraft, CharacterId, CharacterSheet,
    DomainError, User,
};

use super::{logged, OPERATION_FAILED};
use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),
    #[error("You do not have access to this character")]
    Forbidden,
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl CharacterError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => e.message(),
            Self::Repo(_) => OPERATION_FAILED.to_string(),
            other => other.to_string(),
        }
    }
}

pub struct CharacterUseCases {
    characters: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CharacterUseCases {
    pub fn new(characters: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { characters, clock }
    }

    /// Validate the draft and store it for `actor`.
    pub async fn create(
        &self,
        actor: &User,
        draft: &CharacterDraft,
    ) -> Result<Character, CharacterError> {
        let details = draft.validate()?;
        let character = self
            .characters
            .insert(actor.id, &details, self.clock.now())
            .await
            .map_err(logged("insert_character"))?;

        tracing::info!(
            character_id = %character.id,
            user_id = %actor.id,
            classes = %character.class_summary(),
            "Created character"
        );
        Ok(character)
    }

    pub async fn list(&self, actor: &User) -> Result<Vec<Character>, CharacterError> {
        Ok(self
            .characters
            .list_for_user(actor.id)
            .await
            .map_err(logged("list_characters"))?)
    }

    /// Owner or admin only.
    pub async fn get(&self, actor: &User, id: CharacterId) -> Result<Character, CharacterError> {
        let character = self
            .characters
            .get(id)
            .await
            .map_err(logged("get_character"))?
            .ok_or(CharacterError::NotFound(id))?;

        if character.user_id != actor.id && !actor.is_admin {
            tracing::warn!(character_id = %id, user_id = %actor.id, "Denied access to character");
            return Err(CharacterError::Forbidden);
        }
        Ok(character)
    }

    pub async fn sheet(
        &self,
        actor: &User,
        id: CharacterId,
    ) -> Result<CharacterSheet, CharacterError> {
        let character = self.get(actor, id).await?;
        Ok(CharacterSheet::derive(&character.details))
    }

    /// Apply damage (negative) or healing (positive), clamped to 0..=max HP.
    pub async fn update_hit_points(
        &self,
        actor: &User,
        id: CharacterId,
        delta: i32,
    ) -> Result<CharacterSheet, CharacterError> {
        let mut character = self.get(actor, id).await?;
        let before = CharacterSheet::derive(&character.details);

        let hp = before.current_hp.saturating_add(delta).clamp(0, before.max_hp);
        let stored = (hp < before.max_hp).then_some(hp);

        self.characters
            .update_hit_points(id, stored)
            .await
            .map_err(logged("update_hit_points"))?;

        tracing::debug!(character_id = %id, delta, hp, "Updated hit points");
        character.details.current_hp = stored;
        Ok(CharacterSheet::derive(&character.details))
    }

    pub async fn update_armor(
        &self,
        actor: &User,
        id: CharacterId,
        armor: &ArmorSelection,
    ) -> Result<CharacterSheet, CharacterError> {
        let mut character = self.get(actor, id).await?;
        let armor = validate_armor(armor)?;

        self.characters
            .update_armor(id, &armor)
            .await
            .map_err(logged("update_armor"))?;

        character.details.armor = armor;
        Ok(CharacterSheet::derive(&character.details))
    }

    /// Owner or admin only.
    pub async fn delete(&self, actor: &User, id: CharacterId) -> Result<(), CharacterError> {
        let character = self.get(actor, id).await?;
        self.characters
            .delete(character.id)
            .await
            .map_err(logged("delete_character"))?;
        tracing::info!(character_id = %id, user_id = %actor.id, "Deleted character");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tavernkeep_domain::catalog::ArmorCategory;
    use tavernkeep_domain::{
        AbilityScores, CharacterDetails, CharacterName, ClassLevel, Email, UserId, Username,
    };

    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockCharacterRepo;

    fn user(id: i64, is_admin: bool) -> User {
        User {
            id: UserId::from_raw(id),
            username: Username::new(format!("user{}", id)).expect("username"),
            email: Email::new(format!("user{}@example.com", id)).expect("email"),
            is_admin,
        }
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("date"),
        ))
    }

    fn stored(owner: i64) -> Character {
        Character {
            id: CharacterId::from_raw(10),
            user_id: UserId::from_raw(owner),
            created_at: clock().0,
            details: CharacterDetails {
                name: CharacterName::new("Grog").expect("name"),
                race: "Half-Orc".to_string(),
                background: "Soldier".to_string(),
                // CON 14 -> +2; Barbarian 1 has 14 HP
                ability_scores: AbilityScores::from_array([16, 12, 14, 8, 10, 10])
                    .expect("scores"),
                classes: vec![ClassLevel::new("Barbarian", 1)],
                skills: vec![],
                feats: vec![],
                armor: ArmorSelection::default(),
                current_hp: None,
                is_jack_of_all_trades: false,
            },
        }
    }

    fn use_cases(repo: MockCharacterRepo) -> CharacterUseCases {
        CharacterUseCases::new(Arc::new(repo), clock())
    }

    fn draft() -> CharacterDraft {
        CharacterDraft {
            name: "Grog".to_string(),
            race: "Half-Orc".to_string(),
            background: "Soldier".to_string(),
            ability_scores: [16, 12, 14, 8, 10, 10],
            classes: vec![ClassLevel::new("Barbarian", 1)],
            ..CharacterDraft::default()
        }
    }

    #[tokio::test]
    async fn create_validates_before_storing() {
        let mut bad = draft();
        bad.race = "Warforged".to_string();
        // No insert expectation: an invalid draft never reaches storage.
        let err = use_cases(MockCharacterRepo::new())
            .create(&user(1, false), &bad)
            .await
            .expect_err("unknown race");
        assert!(matches!(err, CharacterError::Domain(_)));
        assert_eq!(err.user_message(), "Unknown Race: Warforged");
    }

    #[tokio::test]
    async fn create_stores_with_owner_and_clock() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_insert()
            .withf(|user_id, details, created_at| {
                user_id.raw() == 1
                    && details.name.as_str() == "Grog"
                    && details.skills.iter().any(|s| s.skill == "Intimidation")
                    && *created_at == clock().0
            })
            .times(1)
            .returning(|user_id, details, created_at| {
                Ok(Character {
                    id: CharacterId::from_raw(10),
                    user_id,
                    created_at,
                    details: details.clone(),
                })
            });

        let character = use_cases(repo)
            .create(&user(1, false), &draft())
            .await
            .expect("create");
        assert_eq!(character.class_summary(), "Barbarian 1");
    }

    #[tokio::test]
    async fn strangers_are_forbidden_but_admins_are_not() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored(1))));
        let uc = use_cases(repo);
        let id = CharacterId::from_raw(10);

        assert!(matches!(
            uc.get(&user(2, false), id).await,
            Err(CharacterError::Forbidden)
        ));
        assert!(uc.get(&user(2, true), id).await.is_ok());
        assert!(uc.get(&user(1, false), id).await.is_ok());
    }

    #[tokio::test]
    async fn missing_character_is_not_found() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        let err = use_cases(repo)
            .get(&user(1, false), CharacterId::from_raw(99))
            .await
            .expect_err("missing");
        assert!(matches!(err, CharacterError::NotFound(id) if id.raw() == 99));
    }

    #[tokio::test]
    async fn hit_points_clamp_and_full_health_is_stored_as_none() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored(1))));
        repo.expect_update_hit_points()
            .withf(|_, hp| *hp == Some(0))
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_update_hit_points()
            .withf(|_, hp| hp.is_none())
            .times(1)
            .returning(|_, _| Ok(()));
        let uc = use_cases(repo);
        let owner = user(1, false);
        let id = CharacterId::from_raw(10);

        let sheet = uc.update_hit_points(&owner, id, -50).await.expect("damage");
        assert_eq!((sheet.current_hp, sheet.max_hp), (0, 14));

        let sheet = uc.update_hit_points(&owner, id, 100).await.expect("heal");
        assert_eq!(sheet.current_hp, 14);
    }

    #[tokio::test]
    async fn update_armor_rejects_unknown_armor() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored(1))));
        repo.expect_update_armor()
            .withf(|_, armor| armor.armor_name.as_deref() == Some("Chain Mail"))
            .times(1)
            .returning(|_, _| Ok(()));
        let uc = use_cases(repo);
        let owner = user(1, false);
        let id = CharacterId::from_raw(10);

        let bogus = ArmorSelection::new(ArmorCategory::Heavy, Some("Mithral Robe".into()), 0);
        assert!(matches!(
            uc.update_armor(&owner, id, &bogus).await,
            Err(CharacterError::Domain(_))
        ));

        let chain = ArmorSelection::new(ArmorCategory::Heavy, Some("chain mail".into()), 2);
        let sheet = uc.update_armor(&owner, id, &chain).await.expect("armor");
        assert_eq!(sheet.armor_class, 18);
    }

    #[tokio::test]
    async fn delete_requires_access() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(Some(stored(1))));
        repo.expect_delete().times(1).returning(|_| Ok(()));
        let uc = use_cases(repo);
        let id = CharacterId::from_raw(10);

        assert!(uc.delete(&user(3, false), id).await.is_err());
        uc.delete(&user(1, false), id).await.expect("owner delete");
    }
}
