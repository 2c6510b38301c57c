//! SQLite character storage.
//!
//! A character spans three tables: the `Characters` row, one `Classes` row per
//! class (in the order taken) and one `CharacterSkills` row per proficiency.
//! Ability scores and feats are JSON arrays on the character row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tavernkeep_domain::catalog::ArmorCategory;
use tavernkeep_domain::{
    AbilityScores, ArmorSelection, Character, CharacterDetails, CharacterId, CharacterName,
    ClassLevel, SkillProficiency, UserId,
};

use super::flag;
use crate::infrastructure::ports::{CharacterRepo, RepoError};

const CHARACTER_COLUMNS: &str = "CharacterID, UserID, CharacterName, Race, Background, \
    AbilityScores, Feats, IsJackOfAllTrades, ArmorType, ArmorName, ShieldBonus, CurrentHp, CreatedAt";

pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_classes(&self, id: CharacterId) -> Result<Vec<ClassLevel>, RepoError> {
        let rows = sqlx::query(
            "SELECT ClassName, Level, Subclass FROM Classes WHERE CharacterID = ? ORDER BY ClassID",
        )
        .bind(id.raw())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("load_classes", e))?;

        rows.iter()
            .map(|row| {
                let level: i64 = row
                    .try_get("Level")
                    .map_err(|e| RepoError::database("load_classes", e))?;
                Ok(ClassLevel {
                    class_name: row
                        .try_get("ClassName")
                        .map_err(|e| RepoError::database("load_classes", e))?,
                    level: u8::try_from(level).map_err(|_| {
                        RepoError::serialization(format!("class level out of range: {}", level))
                    })?,
                    subclass: row
                        .try_get("Subclass")
                        .map_err(|e| RepoError::database("load_classes", e))?,
                })
            })
            .collect()
    }

    async fn load_skills(&self, id: CharacterId) -> Result<Vec<SkillProficiency>, RepoError> {
        let rows = sqlx::query(
            "SELECT SkillName, Expertise FROM CharacterSkills WHERE CharacterID = ? ORDER BY SkillID",
        )
        .bind(id.raw())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("load_skills", e))?;

        rows.iter()
            .map(|row| {
                Ok(SkillProficiency {
                    skill: row
                        .try_get("SkillName")
                        .map_err(|e| RepoError::database("load_skills", e))?,
                    expertise: flag(
                        row.try_get("Expertise")
                            .map_err(|e| RepoError::database("load_skills", e))?,
                    ),
                })
            })
            .collect()
    }

    async fn hydrate(&self, row: &SqliteRow) -> Result<Character, RepoError> {
        let mut character = character_from_row(row)?;
        character.details.classes = self.load_classes(character.id).await?;
        character.details.skills = self.load_skills(character.id).await?;
        Ok(character)
    }
}

/// Map the `Characters` row. Classes and skills are loaded separately.
fn character_from_row(row: &SqliteRow) -> Result<Character, RepoError> {
    let get_err = |e| RepoError::database("character_from_row", e);

    let name: String = row.try_get("CharacterName").map_err(get_err)?;
    let scores_json: String = row.try_get("AbilityScores").map_err(get_err)?;
    let feats_json: Option<String> = row.try_get("Feats").map_err(get_err)?;
    let armor_type: String = row.try_get("ArmorType").map_err(get_err)?;
    let created_at: String = row.try_get("CreatedAt").map_err(get_err)?;
    let shield_bonus: i64 = row.try_get("ShieldBonus").map_err(get_err)?;
    let current_hp: Option<i64> = row.try_get("CurrentHp").map_err(get_err)?;

    let ability_scores: AbilityScores =
        serde_json::from_str(&scores_json).map_err(RepoError::serialization)?;
    let feats: Vec<String> = match feats_json.as_deref() {
        None | Some("") => Vec::new(),
        Some(json) => serde_json::from_str(json).map_err(RepoError::serialization)?,
    };

    Ok(Character {
        id: CharacterId::from_raw(row.try_get("CharacterID").map_err(get_err)?),
        user_id: UserId::from_raw(row.try_get("UserID").map_err(get_err)?),
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(RepoError::serialization)?
            .with_timezone(&Utc),
        details: CharacterDetails {
            name: CharacterName::new(name).map_err(RepoError::serialization)?,
            race: row.try_get("Race").map_err(get_err)?,
            background: row
                .try_get::<Option<String>, _>("Background")
                .map_err(get_err)?
                .unwrap_or_default(),
            ability_scores,
            classes: Vec::new(),
            skills: Vec::new(),
            feats,
            armor: ArmorSelection {
                category: armor_type
                    .parse::<ArmorCategory>()
                    .map_err(RepoError::serialization)?,
                armor_name: row.try_get("ArmorName").map_err(get_err)?,
                shield_bonus: i32::try_from(shield_bonus).map_err(RepoError::serialization)?,
            },
            current_hp: current_hp
                .map(i32::try_from)
                .transpose()
                .map_err(RepoError::serialization)?,
            is_jack_of_all_trades: flag(row.try_get("IsJackOfAllTrades").map_err(get_err)?),
        },
    })
}

async fn insert_children(
    tx: &mut Transaction<'_, Sqlite>,
    id: CharacterId,
    details: &CharacterDetails,
) -> Result<(), RepoError> {
    for class in &details.classes {
        sqlx::query(
            "INSERT INTO Classes (CharacterID, ClassName, Level, Subclass) VALUES (?, ?, ?, ?)",
        )
        .bind(id.raw())
        .bind(&class.class_name)
        .bind(i64::from(class.level))
        .bind(class.subclass.as_deref())
        .execute(&mut **tx)
        .await
        .map_err(|e| RepoError::database("insert_classes", e))?;
    }

    for skill in &details.skills {
        sqlx::query(
            "INSERT INTO CharacterSkills (CharacterID, SkillName, Expertise) VALUES (?, ?, ?)",
        )
        .bind(id.raw())
        .bind(&skill.skill)
        .bind(skill.expertise)
        .execute(&mut **tx)
        .await
        .map_err(|e| RepoError::database("insert_skills", e))?;
    }

    Ok(())
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn insert(
        &self,
        user_id: UserId,
        details: &CharacterDetails,
        created_at: DateTime<Utc>,
    ) -> Result<Character, RepoError> {
        let scores_json =
            serde_json::to_string(&details.ability_scores).map_err(RepoError::serialization)?;
        let feats_json = serde_json::to_string(&details.feats).map_err(RepoError::serialization)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("insert_character", e))?;

        let result = sqlx::query(
            r#"
            INSERT INTO Characters (
                UserID, CharacterName, Race, Background, AbilityScores, Feats,
                IsJackOfAllTrades, ArmorType, ArmorName, ShieldBonus, CurrentHp, CreatedAt
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id.raw())
        .bind(details.name.as_str())
        .bind(&details.race)
        .bind(&details.background)
        .bind(&scores_json)
        .bind(&feats_json)
        .bind(details.is_jack_of_all_trades)
        .bind(details.armor.category.label())
        .bind(details.armor.armor_name.as_deref())
        .bind(details.armor.shield_bonus)
        .bind(details.current_hp)
        .bind(created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("insert_character", e))?;

        let id = CharacterId::from_raw(result.last_insert_rowid());
        insert_children(&mut tx, id, details).await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("insert_character", e))?;

        tracing::debug!(character_id = %id, user_id = %user_id, name = %details.name, "Inserted character");

        Ok(Character {
            id,
            user_id,
            created_at,
            details: details.clone(),
        })
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let query = format!(
            "SELECT {} FROM Characters WHERE CharacterID = ?",
            CHARACTER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(id.raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_character", e))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Character>, RepoError> {
        let query = format!(
            "SELECT {} FROM Characters WHERE UserID = ? ORDER BY CharacterID",
            CHARACTER_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(user_id.raw())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_characters", e))?;

        let mut characters = Vec::with_capacity(rows.len());
        for row in &rows {
            characters.push(self.hydrate(row).await?);
        }
        Ok(characters)
    }

    async fn update_hit_points(
        &self,
        id: CharacterId,
        current_hp: Option<i32>,
    ) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE Characters SET CurrentHp = ? WHERE CharacterID = ?")
            .bind(current_hp)
            .bind(id.raw())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("update_hit_points", e))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", id));
        }
        Ok(())
    }

    async fn update_armor(
        &self,
        id: CharacterId,
        armor: &ArmorSelection,
    ) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE Characters SET ArmorType = ?, ArmorName = ?, ShieldBonus = ? WHERE CharacterID = ?",
        )
        .bind(armor.category.label())
        .bind(armor.armor_name.as_deref())
        .bind(armor.shield_bonus)
        .bind(id.raw())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("update_armor", e))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", id));
        }
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;

        for statement in [
            "DELETE FROM Classes WHERE CharacterID = ?",
            "DELETE FROM CharacterSkills WHERE CharacterID = ?",
        ] {
            sqlx::query(statement)
                .bind(id.raw())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("delete_character", e))?;
        }

        let result = sqlx::query("DELETE FROM Characters WHERE CharacterID = ?")
            .bind(id.raw())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;
        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", id));
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;
        tracing::debug!(character_id = %id, "Deleted character");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tavernkeep_domain::{Email, NewUser, User, UserCredentials, Username};

    use super::*;
    use crate::infrastructure::ports::UserRepo;
    use crate::infrastructure::sqlite::test_support::temp_pool;
    use crate::infrastructure::sqlite::SqliteUserRepo;

    async fn owner(pool: &SqlitePool, name: &str) -> User {
        SqliteUserRepo::new(pool.clone())
            .insert(&NewUser {
                username: Username::new(name).expect("username"),
                email: Email::new(format!("{}@example.com", name)).expect("email"),
                credentials: UserCredentials {
                    password_hash: "hash".to_string(),
                    salt: "salt".to_string(),
                },
                is_admin: false,
            })
            .await
            .expect("insert user")
    }

    fn details() -> CharacterDetails {
        CharacterDetails {
            name: CharacterName::new("Vex").expect("name"),
            race: "Tiefling".to_string(),
            background: "Spy".to_string(),
            ability_scores: AbilityScores::from_array([8, 16, 12, 13, 10, 15]).expect("scores"),
            classes: vec![
                ClassLevel::new("Bard", 3).with_subclass("College of Lore"),
                ClassLevel::new("Rogue", 2),
            ],
            skills: vec![
                SkillProficiency::proficient("Deception"),
                SkillProficiency::expert("Stealth"),
            ],
            feats: vec!["Alert".to_string()],
            armor: ArmorSelection::new(ArmorCategory::Light, Some("Studded Leather".into()), 2),
            current_hp: Some(17),
            is_jack_of_all_trades: true,
        }
    }

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid date")
    }

    #[tokio::test]
    async fn crud_round_trip_preserves_every_field() {
        let (_dir, pool) = temp_pool().await;
        let user = owner(&pool, "vex").await;
        let repo = SqliteCharacterRepo::new(pool);

        let inserted = repo
            .insert(user.id, &details(), created_at())
            .await
            .expect("insert");
        let fetched = repo.get(inserted.id).await.expect("get").expect("present");

        assert_eq!(fetched, inserted);
        assert_eq!(fetched.details, details());
        assert_eq!(fetched.created_at, created_at());
        assert_eq!(fetched.class_summary(), "College of Lore Bard 3, Rogue 2");
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let (_dir, pool) = temp_pool().await;
        let vex = owner(&pool, "vex").await;
        let mira = owner(&pool, "mira").await;
        let repo = SqliteCharacterRepo::new(pool);

        repo.insert(vex.id, &details(), created_at())
            .await
            .expect("insert");
        let mut second = details();
        second.name = CharacterName::new("Shade").expect("name");
        repo.insert(vex.id, &second, created_at())
            .await
            .expect("insert");

        let listed = repo.list_for_user(vex.id).await.expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].name().as_str(), "Shade");
        assert!(repo.list_for_user(mira.id).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn updates_hit_points_and_armor() {
        let (_dir, pool) = temp_pool().await;
        let user = owner(&pool, "vex").await;
        let repo = SqliteCharacterRepo::new(pool);
        let c = repo
            .insert(user.id, &details(), created_at())
            .await
            .expect("insert");

        repo.update_hit_points(c.id, Some(3)).await.expect("hp");
        let plate = ArmorSelection::new(ArmorCategory::Heavy, Some("Plate".into()), 0);
        repo.update_armor(c.id, &plate).await.expect("armor");

        let fetched = repo.get(c.id).await.expect("get").expect("present");
        assert_eq!(fetched.details.current_hp, Some(3));
        assert_eq!(fetched.details.armor, plate);

        repo.update_hit_points(c.id, None).await.expect("reset");
        let fetched = repo.get(c.id).await.expect("get").expect("present");
        assert_eq!(fetched.details.current_hp, None);

        let missing = repo
            .update_hit_points(CharacterId::from_raw(404), Some(1))
            .await;
        assert!(matches!(missing, Err(e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn delete_removes_children() {
        let (_dir, pool) = temp_pool().await;
        let user = owner(&pool, "vex").await;
        let repo = SqliteCharacterRepo::new(pool.clone());
        let c = repo
            .insert(user.id, &details(), created_at())
            .await
            .expect("insert");

        repo.delete(c.id).await.expect("delete");
        assert!(repo.get(c.id).await.expect("get").is_none());

        let classes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Classes")
            .fetch_one(&pool)
            .await
            .expect("count");
        let skills: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM CharacterSkills")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!((classes, skills), (0, 0));

        assert!(repo.delete(c.id).await.is_err());
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_characters() {
        let (_dir, pool) = temp_pool().await;
        let user = owner(&pool, "vex").await;
        let repo = SqliteCharacterRepo::new(pool.clone());
        let c = repo
            .insert(user.id, &details(), created_at())
            .await
            .expect("insert");

        SqliteUserRepo::new(pool.clone())
            .delete(user.id)
            .await
            .expect("delete user");

        assert!(repo.get(c.id).await.expect("get").is_none());
        let classes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Classes")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(classes, 0);
    }
}
