//! Dice rolling against the injected random port.

use std::sync::Arc;

use tavernkeep_domain::catalog::class_by_name;
use tavernkeep_domain::value_objects::{reorder_by_priority, roll_ability_scores};
use tavernkeep_domain::{Ability, CharacterSheet, DiceFormula, DiceParseError, DiceRollResult};

use crate::infrastructure::ports::RandomPort;

/// Dice offered by the roller.
pub const STANDARD_DICE: [u8; 7] = [4, 6, 8, 10, 12, 20, 100];

#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    #[error(transparent)]
    Parse(#[from] DiceParseError),
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),
}

pub struct DiceUseCases {
    random: Arc<dyn RandomPort>,
}

impl DiceUseCases {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    fn rng(&self) -> impl FnMut(i32, i32) -> i32 + '_ {
        move |low, high| self.random.gen_range(low, high)
    }

    /// Parse and roll a formula such as "2d6+3".
    pub fn roll(&self, formula: &str) -> Result<DiceRollResult, DiceError> {
        let formula = DiceFormula::parse(formula)?;
        Ok(self.roll_formula(&formula))
    }

    pub fn roll_formula(&self, formula: &DiceFormula) -> DiceRollResult {
        let result = formula.roll_with(self.rng());
        tracing::debug!(formula = %formula, total = result.total, "Rolled dice");
        result
    }

    /// Roll `count` dice with `sides` faces and no modifier.
    pub fn roll_dice(&self, sides: u8, count: u8) -> Result<DiceRollResult, DiceError> {
        Ok(self.roll_formula(&DiceFormula::new(count, sides, 0)?))
    }

    /// Six 4d6-drop-lowest scores, best first in the class's priority order.
    ///
    /// Unknown or missing classes keep the roll order.
    pub fn roll_stats(&self, class_name: Option<&str>) -> [i32; 6] {
        let scores = roll_ability_scores(self.rng());
        match class_name.and_then(class_by_name) {
            Some(class) => reorder_by_priority(scores, &class.ability_priority),
            None => scores,
        }
    }

    /// d20 plus the sheet's skill modifier.
    pub fn skill_check(
        &self,
        sheet: &CharacterSheet,
        skill: &str,
    ) -> Result<DiceRollResult, DiceError> {
        let line = sheet
            .skill(skill)
            .ok_or_else(|| DiceError::UnknownSkill(skill.to_string()))?;
        Ok(self.roll_formula(&DiceFormula::d20(line.modifier)))
    }

    pub fn ability_check(&self, sheet: &CharacterSheet, ability: Ability) -> DiceRollResult {
        let modifier = sheet.ability(ability).map(|a| a.modifier).unwrap_or(0);
        self.roll_formula(&DiceFormula::d20(modifier))
    }

    pub fn saving_throw(&self, sheet: &CharacterSheet, ability: Ability) -> DiceRollResult {
        let modifier = sheet.ability(ability).map(|a| a.save_modifier).unwrap_or(0);
        self.roll_formula(&DiceFormula::d20(modifier))
    }
}

#[cfg(test)]
mod tests {
    use tavernkeep_domain::catalog::ArmorCategory;
    use tavernkeep_domain::{
        AbilityScores, ArmorSelection, CharacterDetails, CharacterName, ClassLevel,
        SkillProficiency,
    };

    use super::*;
    use crate::infrastructure::clock::SequenceRandom;

    fn dice(values: impl IntoIterator<Item = i32>) -> DiceUseCases {
        DiceUseCases::new(Arc::new(SequenceRandom::new(values)))
    }

    fn sheet() -> CharacterSheet {
        CharacterSheet::derive(&CharacterDetails {
            name: CharacterName::new("Nim").expect("name"),
            race: "Halfling".to_string(),
            background: "Criminal".to_string(),
            // DEX 16 -> +3
            ability_scores: AbilityScores::from_array([8, 16, 12, 10, 12, 14]).expect("scores"),
            classes: vec![ClassLevel::new("Rogue", 1)],
            skills: vec![SkillProficiency::expert("Stealth")],
            feats: vec![],
            armor: ArmorSelection::new(ArmorCategory::Light, Some("Leather".into()), 0),
            current_hp: None,
            is_jack_of_all_trades: false,
        })
    }

    #[test]
    fn roll_parses_and_sums() {
        let result = dice([4, 5]).roll("2d6+3").expect("roll");
        assert_eq!(result.individual_rolls, vec![4, 5]);
        assert_eq!(result.total, 12);
        assert_eq!(result.breakdown(), "2d6[4, 5] + 3 = 12");
    }

    #[test]
    fn bad_formula_and_bad_die_are_errors() {
        assert!(matches!(dice([]).roll("banana"), Err(DiceError::Parse(_))));
        assert!(dice([]).roll_dice(1, 1).is_err());
        assert!(dice([]).roll_dice(6, 0).is_err());
    }

    #[test]
    fn roll_dice_uses_every_standard_die() {
        for sides in STANDARD_DICE {
            let result = dice([i32::from(sides)]).roll_dice(sides, 1).expect("roll");
            assert_eq!(result.total, i32::from(sides));
        }
    }

    #[test]
    fn roll_stats_orders_by_class_priority() {
        // Four dice per score, lowest dropped: 18, 15, 12, 9, 6, 3
        let rolls = [
            6, 6, 6, 1, 5, 5, 5, 1, 4, 4, 4, 1, 3, 3, 3, 1, 2, 2, 2, 1, 1, 1, 1, 1,
        ];
        let scores = dice(rolls).roll_stats(Some("Barbarian"));
        let barbarian = class_by_name("Barbarian").expect("barbarian");
        assert_eq!(
            scores[barbarian.ability_priority[0].index()],
            18,
            "best score goes to the first priority"
        );
        assert_eq!(scores[barbarian.ability_priority[5].index()], 3);

        let unordered = dice(rolls).roll_stats(None);
        assert_eq!(unordered, [18, 15, 12, 9, 6, 3]);
    }

    #[test]
    fn skill_check_adds_sheet_modifier() {
        // Stealth: DEX 3 + expertise 2 * 2
        let result = dice([20]).skill_check(&sheet(), "stealth").expect("check");
        assert_eq!(result.total, 27);
        assert!(result.is_natural_20());

        assert!(matches!(
            dice([10]).skill_check(&sheet(), "Basket Weaving"),
            Err(DiceError::UnknownSkill(_))
        ));
    }

    #[test]
    fn saving_throws_use_save_modifier() {
        // Rogue saves: DEX and INT
        let result = dice([10]).saving_throw(&sheet(), Ability::Dexterity);
        assert_eq!(result.total, 15);
        let result = dice([10]).ability_check(&sheet(), Ability::Dexterity);
        assert_eq!(result.total, 13);
    }
}
