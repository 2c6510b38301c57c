//! Character creation: turn a free-form draft into validated details.
//!
//! The draft mirrors the creation form. `CharacterDraft::validate` checks it
//! against the catalog and the level rules, canonicalises catalog names and
//! merges racial and background skills into the proficiency list.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    armor_by_name, background_by_name, class_by_name, feat_by_name, race_by_name,
    skill_by_name, ArmorCategory, MAX_SHIELD_BONUS, SUBCLASS_LEVEL,
};
use crate::entities::{ArmorSelection, CharacterDetails, ClassLevel, SkillProficiency};
use crate::error::DomainError;
use crate::game_systems::{jack_of_all_trades, CalculationEngine, Dnd5eRules, MAX_LEVEL};
use crate::value_objects::{AbilityScores, CharacterName};

/// Feat that may be taken more than once.
const REPEATABLE_FEAT: &str = "Ability Score Increase";

/// A character as entered on the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    pub name: String,
    pub race: String,
    pub background: String,
    /// Standard order: STR, DEX, CON, INT, WIS, CHA
    pub ability_scores: [i32; 6],
    pub classes: Vec<ClassLevel>,
    /// Skills picked by the player
    pub skills: Vec<String>,
    /// Skills with expertise; each must also be proficient
    pub expertise: Vec<String>,
    pub feats: Vec<String>,
    pub armor: ArmorSelection,
}

impl Default for CharacterDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            race: String::new(),
            background: String::new(),
            ability_scores: AbilityScores::default().to_array(),
            classes: Vec::new(),
            skills: Vec::new(),
            expertise: Vec::new(),
            feats: Vec::new(),
            armor: ArmorSelection::default(),
        }
    }
}

impl CharacterDraft {
    pub fn total_level(&self) -> u8 {
        self.classes
            .iter()
            .fold(0u8, |acc, c| acc.saturating_add(c.level))
    }

    /// Feats the draft may hold at its current level and race.
    pub fn feat_slots(&self) -> usize {
        let bonus = race_by_name(&self.race)
            .map(|r| usize::from(r.bonus_feat))
            .unwrap_or(0);
        Dnd5eRules.feat_slots(self.total_level(), bonus)
    }

    /// Validate the draft into storable character details.
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` for malformed input, `DomainError::NotFound`
    /// for names missing from the catalog and `DomainError::Constraint` for
    /// level, subclass and feat rule violations.
    pub fn validate(&self) -> Result<CharacterDetails, DomainError> {
        let name = CharacterName::new(self.name.as_str())?;

        let race = race_by_name(&self.race).ok_or_else(|| DomainError::not_found("Race", &self.race))?;
        let background = background_by_name(&self.background)
            .ok_or_else(|| DomainError::not_found("Background", &self.background))?;

        let ability_scores = AbilityScores::from_array(self.ability_scores)?;
        let classes = self.validate_classes()?;

        let mut skills: Vec<SkillProficiency> = Vec::new();
        let granted = race
            .granted_skills
            .iter()
            .chain(background.skills.iter())
            .copied();
        for skill in self.skills.iter().map(String::as_str).chain(granted) {
            let info = skill_by_name(skill).ok_or_else(|| DomainError::not_found("Skill", skill))?;
            if !skills.iter().any(|s| s.skill == info.name) {
                skills.push(SkillProficiency::proficient(info.name));
            }
        }
        for skill in &self.expertise {
            let info = skill_by_name(skill).ok_or_else(|| DomainError::not_found("Skill", skill))?;
            let entry = skills
                .iter_mut()
                .find(|s| s.skill == info.name)
                .ok_or_else(|| {
                    DomainError::validation(format!(
                        "Expertise in {} requires proficiency",
                        info.name
                    ))
                })?;
            entry.expertise = true;
        }

        let feats = self.validate_feats()?;
        let armor = self.validate_armor()?;
        let is_jack_of_all_trades = jack_of_all_trades(&classes);

        Ok(CharacterDetails {
            name,
            race: race.name.to_string(),
            background: background.name.to_string(),
            ability_scores,
            classes,
            skills,
            feats,
            armor,
            current_hp: None,
            is_jack_of_all_trades,
        })
    }

    fn validate_classes(&self) -> Result<Vec<ClassLevel>, DomainError> {
        if self.classes.is_empty() {
            return Err(DomainError::validation("Select at least one class"));
        }

        let mut classes: Vec<ClassLevel> = Vec::with_capacity(self.classes.len());
        for entry in &self.classes {
            let class = class_by_name(&entry.class_name)
                .ok_or_else(|| DomainError::not_found("Class", &entry.class_name))?;

            if classes.iter().any(|c| c.class_name == class.name) {
                return Err(DomainError::constraint(format!(
                    "{} is listed more than once",
                    class.name
                )));
            }
            if !(1..=MAX_LEVEL).contains(&entry.level) {
                return Err(DomainError::constraint(format!(
                    "{} level must be between 1 and {}",
                    class.name, MAX_LEVEL
                )));
            }

            let subclass = match entry.subclass.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(sub) => {
                    if entry.level < SUBCLASS_LEVEL {
                        return Err(DomainError::constraint(format!(
                            "{} subclasses unlock at level {}",
                            class.name, SUBCLASS_LEVEL
                        )));
                    }
                    let canonical = class
                        .subclasses
                        .iter()
                        .find(|s| s.eq_ignore_ascii_case(sub))
                        .ok_or_else(|| {
                            DomainError::constraint(format!(
                                "{} is not a {} subclass",
                                sub, class.name
                            ))
                        })?;
                    Some(canonical.to_string())
                }
            };

            classes.push(ClassLevel {
                class_name: class.name.to_string(),
                level: entry.level,
                subclass,
            });
        }

        let total: u32 = classes.iter().map(|c| u32::from(c.level)).sum();
        if total > u32::from(MAX_LEVEL) {
            return Err(DomainError::constraint(format!(
                "Total character level {} exceeds {}",
                total, MAX_LEVEL
            )));
        }
        Ok(classes)
    }

    fn validate_feats(&self) -> Result<Vec<String>, DomainError> {
        let mut feats: Vec<String> = Vec::new();
        for raw in self.feats.iter().filter(|f| !f.trim().is_empty()) {
            let feat = feat_by_name(raw).ok_or_else(|| DomainError::not_found("Feat", raw))?;
            if feat.name != REPEATABLE_FEAT && feats.iter().any(|f| f == feat.name) {
                return Err(DomainError::constraint(format!(
                    "{} can only be taken once",
                    feat.name
                )));
            }
            feats.push(feat.name.to_string());
        }

        let slots = self.feat_slots();
        if feats.len() > slots {
            return Err(DomainError::constraint(format!(
                "{} feats selected but only {} available at level {}",
                feats.len(),
                slots,
                self.total_level()
            )));
        }
        Ok(feats)
    }

    fn validate_armor(&self) -> Result<ArmorSelection, DomainError> {
        validate_armor(&self.armor)
    }
}

/// Check an armor selection against the catalog and canonicalise its name.
pub fn validate_armor(armor: &ArmorSelection) -> Result<ArmorSelection, DomainError> {
    if !(0..=MAX_SHIELD_BONUS).contains(&armor.shield_bonus) {
        return Err(DomainError::validation(format!(
            "Shield bonus must be between 0 and {}",
            MAX_SHIELD_BONUS
        )));
    }

    let armor_name = match (armor.category, armor.armor_name.as_deref().map(str::trim)) {
        (ArmorCategory::NoArmor, _) | (_, None) | (_, Some("")) => None,
        (category, Some(name)) => {
            let info = armor_by_name(name).ok_or_else(|| DomainError::not_found("Armor", name))?;
            if info.category != category {
                return Err(DomainError::validation(format!(
                    "{} is not {}",
                    info.name, category
                )));
            }
            Some(info.name.to_string())
        }
    };

    Ok(ArmorSelection {
        category: armor.category,
        armor_name,
        shield_bonus: armor.shield_bonus,
    })
}
