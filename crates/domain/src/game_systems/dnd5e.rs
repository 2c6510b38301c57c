//! D&D 5th Edition calculation rules.

use super::traits::{CalculationEngine, ClassHitDice, ProficiencyLevel, WornArmor};
use crate::catalog::{ArmorCategory, FEAT_LEVELS, MAX_SHIELD_BONUS};
use crate::entities::ClassLevel;

/// Highest character level.
pub const MAX_LEVEL: u8 = 20;

/// Class level at which Bards gain Jack of All Trades.
const JACK_OF_ALL_TRADES_LEVEL: u8 = 2;

/// D&D 5e rules. Stateless; use the unit value directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dnd5eRules;

impl CalculationEngine for Dnd5eRules {
    fn ability_modifier(&self, score: i32) -> i32 {
        // Rust's / truncates toward zero; the table floors.
        (score - 10).div_euclid(2)
    }

    fn proficiency_bonus(&self, level: u8) -> i32 {
        let level = level.clamp(1, MAX_LEVEL) as i32;
        ((level - 1) / 4) + 2
    }

    fn hit_points(
        &self,
        classes: &[ClassHitDice],
        con_modifier: i32,
        bonus_per_level: i32,
    ) -> i32 {
        let mut total = 0;

        for class in classes.iter().filter(|c| c.levels > 0) {
            let die = class.hit_die as i32;
            let average = (die / 2) + 1;
            total += die + con_modifier;
            total += (average + con_modifier) * (class.levels as i32 - 1);
        }

        let levels: i32 = classes.iter().map(|c| c.levels as i32).sum();
        // Never below zero.
        (total + bonus_per_level * levels).max(0)
    }

    fn armor_class(
        &self,
        armor: WornArmor,
        dex_modifier: i32,
        shield_bonus: i32,
        unarmored_bonus: i32,
    ) -> i32 {
        let base = match armor.category {
            ArmorCategory::NoArmor => 10 + dex_modifier + unarmored_bonus,
            ArmorCategory::Light => armor.base_ac + dex_modifier,
            ArmorCategory::Medium => armor.base_ac + dex_modifier.min(2),
            ArmorCategory::Heavy => armor.base_ac,
        };
        base + shield_bonus.clamp(0, MAX_SHIELD_BONUS)
    }

    fn skill_modifier(
        &self,
        ability_modifier: i32,
        proficiency_level: ProficiencyLevel,
        proficiency_bonus: i32,
    ) -> i32 {
        let prof = match proficiency_level {
            ProficiencyLevel::None => 0,
            ProficiencyLevel::Half => proficiency_bonus / 2,
            ProficiencyLevel::Proficient => proficiency_bonus,
            ProficiencyLevel::Expert => proficiency_bonus * 2,
        };
        ability_modifier + prof
    }

    fn saving_throw_modifier(
        &self,
        ability_modifier: i32,
        proficient: bool,
        proficiency_bonus: i32,
    ) -> i32 {
        if proficient {
            ability_modifier + proficiency_bonus
        } else {
            ability_modifier
        }
    }

    fn initiative(&self, dex_modifier: i32, bonus: i32) -> i32 {
        dex_modifier + bonus
    }

    fn passive_perception(&self, perception_modifier: i32) -> i32 {
        10 + perception_modifier
    }

    fn feat_slots(&self, total_level: u8, bonus: usize) -> usize {
        FEAT_LEVELS.iter().filter(|&&l| total_level >= l).count() + bonus
    }
}

/// Whether any Bard class has reached Jack of All Trades.
pub fn jack_of_all_trades(classes: &[ClassLevel]) -> bool {
    classes.iter().any(|c| {
        c.class_name.eq_ignore_ascii_case("Bard") && c.level >= JACK_OF_ALL_TRADES_LEVEL
    })
}

/// Format a modifier the way the sheet prints it: "+3", "+0", "-1".
pub fn format_modifier(value: i32) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Score -> modifier, straight from the Player's Handbook table.
    const MODIFIER_TABLE: [(i32, i32); 30] = [
        (1, -5),
        (2, -4),
        (3, -4),
        (4, -3),
        (5, -3),
        (6, -2),
        (7, -2),
        (8, -1),
        (9, -1),
        (10, 0),
        (11, 0),
        (12, 1),
        (13, 1),
        (14, 2),
        (15, 2),
        (16, 3),
        (17, 3),
        (18, 4),
        (19, 4),
        (20, 5),
        (21, 5),
        (22, 6),
        (23, 6),
        (24, 7),
        (25, 7),
        (26, 8),
        (27, 8),
        (28, 9),
        (29, 9),
        (30, 10),
    ];

    /// Level -> proficiency bonus.
    const PROFICIENCY_TABLE: [(u8, i32); 20] = [
        (1, 2),
        (2, 2),
        (3, 2),
        (4, 2),
        (5, 3),
        (6, 3),
        (7, 3),
        (8, 3),
        (9, 4),
        (10, 4),
        (11, 4),
        (12, 4),
        (13, 5),
        (14, 5),
        (15, 5),
        (16, 5),
        (17, 6),
        (18, 6),
        (19, 6),
        (20, 6),
    ];

    fn hd(hit_die: u8, levels: u8) -> ClassHitDice {
        ClassHitDice { hit_die, levels }
    }

    fn armor(category: ArmorCategory, base_ac: i32) -> WornArmor {
        WornArmor { category, base_ac }
    }

    #[test]
    fn ability_modifier_matches_reference_table() {
        for (score, expected) in MODIFIER_TABLE {
            assert_eq!(Dnd5eRules.ability_modifier(score), expected, "score {score}");
        }
    }

    #[test]
    fn proficiency_bonus_matches_reference_table() {
        for (level, expected) in PROFICIENCY_TABLE {
            assert_eq!(Dnd5eRules.proficiency_bonus(level), expected, "level {level}");
        }
    }

    #[test]
    fn proficiency_bonus_clamps_level() {
        assert_eq!(Dnd5eRules.proficiency_bonus(0), 2);
        assert_eq!(Dnd5eRules.proficiency_bonus(25), 6);
    }

    #[test]
    fn hit_points_single_class() {
        // Level 1 Barbarian, +2 CON: 12 + 2
        assert_eq!(Dnd5eRules.hit_points(&[hd(12, 1)], 2, 0), 14);
        // Level 5 Fighter, +2 CON: 12 + 4 * (6 + 2)
        assert_eq!(Dnd5eRules.hit_points(&[hd(10, 5)], 2, 0), 44);
        // With Tough: +2 per level
        assert_eq!(Dnd5eRules.hit_points(&[hd(10, 5)], 2, 2), 54);
    }

    #[test]
    fn hit_points_first_level_of_each_class_is_max() {
        // Barbarian 1 (d12) then Rogue 1 (d8): 12 + 8
        assert_eq!(Dnd5eRules.hit_points(&[hd(12, 1), hd(8, 1)], 0, 0), 20);
        // Bard 3 (d8) then Rogue 2 (d8), CON +1:
        // Bard 8+1, 2 * (5+1); Rogue 8+1, 5+1
        assert_eq!(Dnd5eRules.hit_points(&[hd(8, 3), hd(8, 2)], 1, 0), 36);
        // Order does not matter
        assert_eq!(
            Dnd5eRules.hit_points(&[hd(8, 1), hd(12, 1)], 0, 0),
            Dnd5eRules.hit_points(&[hd(12, 1), hd(8, 1)], 0, 0)
        );
    }

    #[test]
    fn hit_points_low_constitution_is_not_floored_per_level() {
        // d6 with -3 CON: 3, then 1 + 1
        assert_eq!(Dnd5eRules.hit_points(&[hd(6, 3)], -3, 0), 5);
        // d6 with -5 CON: 1, then -1 - 1, never below zero overall
        assert_eq!(Dnd5eRules.hit_points(&[hd(6, 3)], -5, 0), 0);
    }

    #[test]
    fn armor_class_by_category() {
        let rules = Dnd5eRules;
        assert_eq!(rules.armor_class(WornArmor::none(), 3, 0, 0), 13);
        assert_eq!(rules.armor_class(armor(ArmorCategory::Light, 12), 3, 0, 0), 15);
        assert_eq!(rules.armor_class(armor(ArmorCategory::Medium, 14), 3, 0, 0), 16);
        assert_eq!(rules.armor_class(armor(ArmorCategory::Medium, 14), -1, 0, 0), 13);
        assert_eq!(rules.armor_class(armor(ArmorCategory::Heavy, 18), 3, 2, 0), 20);
    }

    #[test]
    fn armor_class_unarmored_defense_and_shield_clamp() {
        let rules = Dnd5eRules;
        assert_eq!(rules.armor_class(WornArmor::none(), 2, 0, 3), 15);
        // Unarmored bonus does not apply in armor
        assert_eq!(rules.armor_class(armor(ArmorCategory::Heavy, 16), 2, 0, 3), 16);
        assert_eq!(rules.armor_class(WornArmor::none(), 0, 15, 0), 20);
        assert_eq!(rules.armor_class(WornArmor::none(), 0, -4, 0), 10);
    }

    #[test]
    fn skill_modifier_levels() {
        let rules = Dnd5eRules;
        assert_eq!(rules.skill_modifier(2, ProficiencyLevel::None, 3), 2);
        assert_eq!(rules.skill_modifier(2, ProficiencyLevel::Half, 3), 3);
        assert_eq!(rules.skill_modifier(2, ProficiencyLevel::Proficient, 3), 5);
        assert_eq!(rules.skill_modifier(2, ProficiencyLevel::Expert, 3), 8);
    }

    #[test]
    fn saves_initiative_and_passive_perception() {
        let rules = Dnd5eRules;
        assert_eq!(rules.saving_throw_modifier(1, true, 2), 3);
        assert_eq!(rules.saving_throw_modifier(1, false, 2), 1);
        assert_eq!(rules.initiative(2, 5), 7);
        assert_eq!(rules.passive_perception(4), 14);
    }

    #[test]
    fn feat_slots_follow_asi_levels() {
        let rules = Dnd5eRules;
        assert_eq!(rules.feat_slots(1, 0), 0);
        assert_eq!(rules.feat_slots(1, 1), 1);
        assert_eq!(rules.feat_slots(4, 0), 1);
        assert_eq!(rules.feat_slots(18, 0), 4);
        assert_eq!(rules.feat_slots(20, 1), 6);
    }

    #[test]
    fn jack_of_all_trades_requires_bard_two() {
        let bard1 = ClassLevel::new("Bard", 1);
        let bard2 = ClassLevel::new("Bard", 2);
        let rogue5 = ClassLevel::new("Rogue", 5);
        assert!(!jack_of_all_trades(&[bard1, rogue5.clone()]));
        assert!(jack_of_all_trades(&[rogue5, bard2]));
    }

    #[test]
    fn modifier_formatting() {
        assert_eq!(format_modifier(3), "+3");
        assert_eq!(format_modifier(0), "+0");
        assert_eq!(format_modifier(-1), "-1");
    }
}
