//! Derived character sheet.
//!
//! Everything here is computed from `CharacterDetails` and the catalog; the
//! sheet is never stored.

use serde::{Deserialize, Serialize};

use crate::catalog::{class_by_name, feat_by_name, race_by_name, FeatEffect, SKILLS};
use crate::entities::CharacterDetails;
use crate::game_systems::{
    format_modifier, jack_of_all_trades, CalculationEngine, ClassHitDice, Dnd5eRules,
    ProficiencyLevel,
};
use crate::value_objects::Ability;

/// Hit die used for classes missing from the catalog.
const DEFAULT_HIT_DIE: u8 = 8;

/// Default walking speed when the race is unknown.
const DEFAULT_SPEED: u8 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityLine {
    pub ability: Ability,
    pub score: i32,
    pub modifier: i32,
    pub save_proficient: bool,
    pub save_modifier: i32,
}

impl AbilityLine {
    pub fn modifier_label(&self) -> String {
        format_modifier(self.modifier)
    }

    pub fn save_label(&self) -> String {
        format_modifier(self.save_modifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLine {
    pub name: String,
    pub ability: Ability,
    pub proficiency: ProficiencyLevel,
    pub modifier: i32,
}

impl SkillLine {
    pub fn modifier_label(&self) -> String {
        format_modifier(self.modifier)
    }
}

/// The full derived sheet for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    pub name: String,
    pub race: String,
    pub background: String,
    pub class_summary: String,
    pub total_level: u8,
    pub proficiency_bonus: i32,
    /// Standard order
    pub abilities: Vec<AbilityLine>,
    pub max_hp: i32,
    pub current_hp: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub passive_perception: i32,
    pub speed: u8,
    /// Alphabetical, all eighteen skills
    pub skills: Vec<SkillLine>,
    pub feats: Vec<String>,
    /// Class features gained so far and racial traits
    pub features: Vec<String>,
    pub jack_of_all_trades: bool,
}

impl CharacterSheet {
    /// Derive the sheet with the D&D 5e rules.
    pub fn derive(details: &CharacterDetails) -> Self {
        Self::derive_with(&Dnd5eRules, details)
    }

    pub fn derive_with(rules: &dyn CalculationEngine, details: &CharacterDetails) -> Self {
        let scores = &details.ability_scores;
        let modifier = |ability: Ability| rules.ability_modifier(scores.get(ability));

        let total_level = details.total_level();
        let proficiency_bonus = rules.proficiency_bonus(total_level);
        let jack = jack_of_all_trades(&details.classes);

        let save_proficiencies: Vec<Ability> = details
            .classes
            .first()
            .and_then(|c| class_by_name(&c.class_name))
            .map(|c| c.saving_throws.to_vec())
            .unwrap_or_default();

        let abilities: Vec<AbilityLine> = Ability::ALL
            .into_iter()
            .map(|ability| {
                let proficient = save_proficiencies.contains(&ability);
                AbilityLine {
                    ability,
                    score: scores.get(ability),
                    modifier: modifier(ability),
                    save_proficient: proficient,
                    save_modifier: rules.saving_throw_modifier(
                        modifier(ability),
                        proficient,
                        proficiency_bonus,
                    ),
                }
            })
            .collect();

        let skills: Vec<SkillLine> = SKILLS
            .iter()
            .map(|info| {
                let proficiency = match details.skill(info.name) {
                    Some(s) if s.expertise => ProficiencyLevel::Expert,
                    Some(_) => ProficiencyLevel::Proficient,
                    None if jack => ProficiencyLevel::Half,
                    None => ProficiencyLevel::None,
                };
                SkillLine {
                    name: info.name.to_string(),
                    ability: info.ability,
                    proficiency,
                    modifier: rules.skill_modifier(
                        modifier(info.ability),
                        proficiency,
                        proficiency_bonus,
                    ),
                }
            })
            .collect();

        let mut initiative_bonus = 0;
        let mut hp_per_level = 0;
        for feat in details.feats.iter().filter_map(|f| feat_by_name(f)) {
            match feat.effect {
                FeatEffect::Initiative(bonus) => initiative_bonus += bonus,
                FeatEffect::HitPointsPerLevel(bonus) => hp_per_level += bonus,
                FeatEffect::None => {}
            }
        }

        let hit_dice: Vec<ClassHitDice> = details
            .classes
            .iter()
            .map(|c| ClassHitDice {
                hit_die: class_by_name(&c.class_name)
                    .map(|info| info.hit_die)
                    .unwrap_or(DEFAULT_HIT_DIE),
                levels: c.level,
            })
            .collect();
        let max_hp = rules.hit_points(&hit_dice, modifier(Ability::Constitution), hp_per_level);
        let current_hp = details
            .current_hp
            .map(|hp| hp.clamp(0, max_hp))
            .unwrap_or(max_hp);

        let unarmored_bonus = if details.class_level("Barbarian") > 0 {
            modifier(Ability::Constitution)
        } else {
            0
        };
        let armor_class = rules.armor_class(
            details.armor.worn(),
            modifier(Ability::Dexterity),
            details.armor.shield_bonus,
            unarmored_bonus,
        );

        let perception = skills
            .iter()
            .find(|s| s.name == "Perception")
            .map(|s| s.modifier)
            .unwrap_or_else(|| modifier(Ability::Wisdom));

        let race = race_by_name(&details.race);

        Self {
            name: details.name.to_string(),
            race: details.race.clone(),
            background: details.background.clone(),
            class_summary: details.class_summary(),
            total_level,
            proficiency_bonus,
            abilities,
            max_hp,
            current_hp,
            armor_class,
            initiative: rules.initiative(modifier(Ability::Dexterity), initiative_bonus),
            passive_perception: rules.passive_perception(perception),
            speed: race.map(|r| r.speed).unwrap_or(DEFAULT_SPEED),
            skills,
            feats: details.feats.clone(),
            features: collect_features(details),
            jack_of_all_trades: jack,
        }
    }

    pub fn ability(&self, ability: Ability) -> Option<&AbilityLine> {
        self.abilities.iter().find(|a| a.ability == ability)
    }

    pub fn skill(&self, name: &str) -> Option<&SkillLine> {
        self.skills.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn proficiency_label(&self) -> String {
        format_modifier(self.proficiency_bonus)
    }

    pub fn initiative_label(&self) -> String {
        format_modifier(self.initiative)
    }
}

fn collect_features(details: &CharacterDetails) -> Vec<String> {
    let mut features = Vec::new();

    if let Some(race) = race_by_name(&details.race) {
        features.extend(race.traits.iter().map(|t| format!("{}: {}", race.name, t)));
    }

    for class in &details.classes {
        let Some(info) = class_by_name(&class.class_name) else {
            continue;
        };
        for level in 1..=class.level {
            let Some(row) = info.row(level) else {
                continue;
            };
            features.extend(
                row.features
                    .split(", ")
                    .filter(|f| !f.is_empty())
                    .map(|f| format!("{} {}: {}", info.name, level, f)),
            );
        }
    }

    features
}
