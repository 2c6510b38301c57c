//! Player character entity.
//!
//! `CharacterDetails` is everything the player chose; `Character` adds the
//! identity assigned when it is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{armor_by_name, ArmorCategory};
use crate::game_systems::WornArmor;
use crate::ids::{CharacterId, UserId};
use crate::value_objects::{AbilityScores, CharacterName};

/// Levels taken in one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLevel {
    pub class_name: String,
    pub level: u8,
    /// Chosen subclass (class level 3 and up)
    pub subclass: Option<String>,
}

impl ClassLevel {
    pub fn new(class_name: impl Into<String>, level: u8) -> Self {
        Self {
            class_name: class_name.into(),
            level,
            subclass: None,
        }
    }

    pub fn with_subclass(mut self, subclass: impl Into<String>) -> Self {
        self.subclass = Some(subclass.into());
        self
    }

    /// "College of Lore Bard 3" or "Rogue 2"
    pub fn label(&self) -> String {
        match &self.subclass {
            Some(sub) => format!("{} {} {}", sub, self.class_name, self.level),
            None => format!("{} {}", self.class_name, self.level),
        }
    }
}

/// Armor and shield worn on the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorSelection {
    pub category: ArmorCategory,
    pub armor_name: Option<String>,
    /// Shield and other flat AC bonuses, 0..=10
    pub shield_bonus: i32,
}

impl ArmorSelection {
    pub fn new(category: ArmorCategory, armor_name: Option<String>, shield_bonus: i32) -> Self {
        Self {
            category,
            armor_name,
            shield_bonus,
        }
    }

    /// Resolve base AC from the catalog. Unknown or missing names count as AC 10.
    pub fn worn(&self) -> WornArmor {
        if self.category == ArmorCategory::NoArmor {
            return WornArmor::none();
        }
        let base_ac = self
            .armor_name
            .as_deref()
            .and_then(armor_by_name)
            .filter(|a| a.category == self.category)
            .map(|a| a.base_ac)
            .unwrap_or(10);
        WornArmor {
            category: self.category,
            base_ac,
        }
    }
}

/// A skill proficiency, optionally with expertise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProficiency {
    pub skill: String,
    pub expertise: bool,
}

impl SkillProficiency {
    pub fn proficient(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            expertise: false,
        }
    }

    pub fn expert(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            expertise: true,
        }
    }
}

/// Everything the player chose for a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetails {
    pub name: CharacterName,
    pub race: String,
    pub background: String,
    pub ability_scores: AbilityScores,
    /// In the order the classes were taken
    pub classes: Vec<ClassLevel>,
    pub skills: Vec<SkillProficiency>,
    pub feats: Vec<String>,
    pub armor: ArmorSelection,
    /// `None` means full hit points
    pub current_hp: Option<i32>,
    pub is_jack_of_all_trades: bool,
}

impl CharacterDetails {
    pub fn total_level(&self) -> u8 {
        self.classes.iter().map(|c| c.level).sum()
    }

    /// "College of Lore Bard 3, Rogue 2"
    pub fn class_summary(&self) -> String {
        self.classes
            .iter()
            .map(ClassLevel::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn skill(&self, name: &str) -> Option<&SkillProficiency> {
        self.skills
            .iter()
            .find(|s| s.skill.eq_ignore_ascii_case(name))
    }

    pub fn has_feat(&self, name: &str) -> bool {
        self.feats.iter().any(|f| f.eq_ignore_ascii_case(name))
    }

    pub fn class_level(&self, class_name: &str) -> u8 {
        self.classes
            .iter()
            .filter(|c| c.class_name.eq_ignore_ascii_case(class_name))
            .map(|c| c.level)
            .sum()
    }
}

/// A stored character owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: CharacterDetails,
}

impl Character {
    pub fn name(&self) -> &CharacterName {
        &self.details.name
    }

    pub fn total_level(&self) -> u8 {
        self.details.total_level()
    }

    pub fn class_summary(&self) -> String {
        self.details.class_summary()
    }
}
