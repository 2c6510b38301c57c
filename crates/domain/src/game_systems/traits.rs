//! Calculation rules shared by the sheet, the builder and the dice roller.

use serde::{Deserialize, Serialize};

use crate::catalog::ArmorCategory;

/// Hit die and levels taken in one class, in the order the classes were taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassHitDice {
    pub hit_die: u8,
    pub levels: u8,
}

/// Armor worn, resolved from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WornArmor {
    pub category: ArmorCategory,
    /// Base AC of the armor; ignored for `ArmorCategory::NoArmor`.
    pub base_ac: i32,
}

impl WornArmor {
    pub fn none() -> Self {
        Self {
            category: ArmorCategory::NoArmor,
            base_ac: 10,
        }
    }
}

/// Calculation rules for the game system.
///
/// Implements the closed-form formulas of the sheet. All inputs are already
/// resolved from the catalog, so implementations never fail.
pub trait CalculationEngine: Send + Sync {
    /// Calculate ability modifier from score.
    ///
    /// For D&D-like systems: floor((score - 10) / 2)
    fn ability_modifier(&self, score: i32) -> i32;

    /// Calculate proficiency bonus from total character level.
    ///
    /// For D&D 5e: ((level - 1) / 4) + 2
    fn proficiency_bonus(&self, level: u8) -> i32;

    /// Maximum hit points across all class levels.
    ///
    /// `bonus_per_level` is added once per character level (Tough feat).
    fn hit_points(&self, classes: &[ClassHitDice], con_modifier: i32, bonus_per_level: i32)
        -> i32;

    /// Armor Class from worn armor, Dexterity and shield bonus.
    ///
    /// `unarmored_bonus` is added only when no armor is worn
    /// (Barbarian Unarmored Defense passes the Constitution modifier).
    fn armor_class(
        &self,
        armor: WornArmor,
        dex_modifier: i32,
        shield_bonus: i32,
        unarmored_bonus: i32,
    ) -> i32;

    /// Calculate skill check modifier.
    fn skill_modifier(
        &self,
        ability_modifier: i32,
        proficiency_level: ProficiencyLevel,
        proficiency_bonus: i32,
    ) -> i32;

    /// Calculate saving throw modifier.
    fn saving_throw_modifier(
        &self,
        ability_modifier: i32,
        proficient: bool,
        proficiency_bonus: i32,
    ) -> i32;

    /// Initiative: Dexterity modifier plus feat bonuses.
    fn initiative(&self, dex_modifier: i32, bonus: i32) -> i32;

    /// Passive perception from the Perception skill modifier.
    fn passive_perception(&self, perception_modifier: i32) -> i32;

    /// Number of feats available at `total_level`, plus racial bonus feats.
    fn feat_slots(&self, total_level: u8, bonus: usize) -> usize;
}

/// Proficiency level for skills and saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    /// Not proficient
    #[default]
    None,
    /// Half proficiency (Jack of All Trades)
    Half,
    /// Standard proficiency
    Proficient,
    /// Expertise (double proficiency)
    Expert,
}

impl ProficiencyLevel {
    /// Marker shown next to the skill on the sheet.
    pub fn marker(&self) -> &'static str {
        match self {
            ProficiencyLevel::None => "",
            ProficiencyLevel::Half => "½",
            ProficiencyLevel::Proficient => "●",
            ProficiencyLevel::Expert => "◆",
        }
    }
}
