//! Dice rolling value objects and parsing
//!
//! Supports dice formulas like "1d20+5", "2d6-1", "4d6", etc.
//! Randomness is supplied by the caller as an inclusive range source.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::Ability;

/// Largest number of dice a single formula may roll
pub const MAX_DICE_COUNT: u8 = 100;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY or XdY+Z
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be between 1 and 100
    #[error("Dice count must be between 1 and 100")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
}

/// A parsed dice formula like "2d6+3"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Modifier to add/subtract after rolling (+Z or -Z)
    pub modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(dice_count: u8, die_size: u8, modifier: i32) -> Result<Self, DiceParseError> {
        if dice_count == 0 || dice_count > MAX_DICE_COUNT {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// A single d20 with a modifier, as used for checks and saves.
    pub fn d20(modifier: i32) -> Self {
        Self {
            dice_count: 1,
            die_size: 20,
            modifier,
        }
    }

    /// Parse a dice formula string like "1d20+5", "2d6-1", "1d100"
    ///
    /// Supported formats:
    /// - "XdY" - Roll X dice of size Y
    /// - "XdY+Z" - Roll X dice of size Y, add Z
    /// - "XdY-Z" - Roll X dice of size Y, subtract Z
    /// - "dY" - Roll 1 die of size Y (shorthand)
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let d_pos = input.find('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let dice_count_str = &input[..d_pos];
        let dice_count: u8 = if dice_count_str.is_empty() {
            1
        } else {
            dice_count_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", dice_count_str))
            })?
        };

        let after_d = &input[d_pos + 1..];

        let (die_size_str, modifier) = if let Some(plus_pos) = after_d.find('+') {
            let mod_str = &after_d[plus_pos + 1..];
            let modifier: i32 = mod_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid modifier: '+{}'", mod_str))
            })?;
            (&after_d[..plus_pos], modifier)
        } else if let Some(minus_pos) = after_d.rfind('-') {
            if minus_pos == 0 {
                return Err(DiceParseError::InvalidFormat(format!(
                    "Invalid die size: '{}'",
                    after_d
                )));
            }
            let mod_str = &after_d[minus_pos + 1..];
            let modifier: i32 = mod_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid modifier: '-{}'", mod_str))
            })?;
            (&after_d[..minus_pos], -modifier)
        } else {
            (after_d, 0)
        };

        let die_size: u8 = die_size_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", die_size_str))
        })?;

        Self::new(dice_count, die_size, modifier)
    }

    /// Roll the dice using `rng`, an inclusive `(low, high)` range source.
    pub fn roll_with<R>(&self, mut rng: R) -> DiceRollResult
    where
        R: FnMut(i32, i32) -> i32,
    {
        let individual_rolls: Vec<i32> = (0..self.dice_count)
            .map(|_| rng(1, self.die_size as i32).clamp(1, self.die_size as i32))
            .collect();

        let dice_total: i32 = individual_rolls.iter().sum();

        DiceRollResult {
            formula: self.clone(),
            individual_rolls,
            dice_total,
            modifier_applied: self.modifier,
            total: dice_total + self.modifier,
        }
    }

    /// Get the minimum possible roll
    pub fn min_roll(&self) -> i32 {
        self.dice_count as i32 + self.modifier
    }

    /// Get the maximum possible roll
    pub fn max_roll(&self) -> i32 {
        (self.dice_count as i32 * self.die_size as i32) + self.modifier
    }

    /// Format as a display string (e.g., "1d20+5")
    pub fn display(&self) -> String {
        if self.modifier == 0 {
            format!("{}d{}", self.dice_count, self.die_size)
        } else if self.modifier > 0 {
            format!("{}d{}+{}", self.dice_count, self.die_size, self.modifier)
        } else {
            format!("{}d{}{}", self.dice_count, self.die_size, self.modifier)
        }
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Result of rolling dice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    /// The formula that was rolled
    pub formula: DiceFormula,
    /// Individual die results
    pub individual_rolls: Vec<i32>,
    /// Sum of dice before modifier
    pub dice_total: i32,
    /// Modifier that was applied
    pub modifier_applied: i32,
    /// Final total (dice_total + modifier)
    pub total: i32,
}

impl DiceRollResult {
    /// Format as a breakdown string (e.g., "1d20(14) + 5 = 19")
    pub fn breakdown(&self) -> String {
        let dice = format!("{}d{}", self.formula.dice_count, self.formula.die_size);
        let rolls = if self.individual_rolls.len() == 1 {
            format!("({})", self.individual_rolls[0])
        } else {
            let joined: Vec<String> = self
                .individual_rolls
                .iter()
                .map(|r| r.to_string())
                .collect();
            format!("[{}]", joined.join(", "))
        };

        match self.modifier_applied {
            0 => format!("{dice}{rolls} = {}", self.total),
            m if m > 0 => format!("{dice}{rolls} + {m} = {}", self.total),
            m => format!("{dice}{rolls} - {} = {}", -m, self.total),
        }
    }

    /// Check if this is a natural 20 on a single d20
    pub fn is_natural_20(&self) -> bool {
        self.formula.die_size == 20
            && self.formula.dice_count == 1
            && self.individual_rolls.first() == Some(&20)
    }

    /// Check if this is a natural 1 on a single d20
    pub fn is_natural_1(&self) -> bool {
        self.formula.die_size == 20
            && self.formula.dice_count == 1
            && self.individual_rolls.first() == Some(&1)
    }
}

/// Roll one ability score: 4d6, drop the lowest.
pub fn roll_ability_score<R>(rng: &mut R) -> i32
where
    R: FnMut(i32, i32) -> i32,
{
    let mut rolls: Vec<i32> = (0..4).map(|_| rng(1, 6).clamp(1, 6)).collect();
    rolls.sort_unstable();
    rolls[1..].iter().sum()
}

/// Roll six ability scores with the 4d6-drop-lowest method.
///
/// The scores are returned in roll order; use [`reorder_by_priority`] to
/// assign them to abilities.
pub fn roll_ability_scores<R>(mut rng: R) -> [i32; 6]
where
    R: FnMut(i32, i32) -> i32,
{
    let mut scores = [0; 6];
    for score in &mut scores {
        *score = roll_ability_score(&mut rng);
    }
    scores
}

/// Sort `scores` high to low and hand them out in `priority` order.
///
/// The result is in standard ability order (STR, DEX, CON, INT, WIS, CHA).
/// Abilities missing from `priority` receive the leftover scores in
/// standard order.
pub fn reorder_by_priority(scores: [i32; 6], priority: &[Ability]) -> [i32; 6] {
    let mut sorted = scores;
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut order: Vec<Ability> = Vec::with_capacity(6);
    for ability in priority.iter().chain(Ability::ALL.iter()) {
        if !order.contains(ability) {
            order.push(*ability);
        }
    }

    let mut result = [0; 6];
    for (ability, score) in order.into_iter().zip(sorted) {
        result[ability.index()] = score;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields the given values in a loop.
    fn sequence(values: Vec<i32>) -> impl FnMut(i32, i32) -> i32 {
        let mut index = 0;
        move |_, _| {
            let value = values[index % values.len()];
            index += 1;
            value
        }
    }

    #[test]
    fn test_parse_simple_d20() {
        let formula = DiceFormula::parse("1d20").expect("parse");
        assert_eq!(formula, DiceFormula::d20(0));
    }

    #[test]
    fn test_parse_shorthand_d20() {
        let formula = DiceFormula::parse("d20").expect("parse");
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 20);
    }

    #[test]
    fn test_parse_with_modifiers() {
        assert_eq!(DiceFormula::parse("1d20+5").expect("parse").modifier, 5);
        assert_eq!(DiceFormula::parse("1d20-3").expect("parse").modifier, -3);
        let formula = DiceFormula::parse("  2D6+3 ").expect("parse");
        assert_eq!(formula.dice_count, 2);
        assert_eq!(formula.die_size, 6);
        assert_eq!(formula.modifier, 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(DiceFormula::parse(""), Err(DiceParseError::Empty)));
        assert!(matches!(
            DiceFormula::parse("20"),
            Err(DiceParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            DiceFormula::parse("0d20"),
            Err(DiceParseError::InvalidDiceCount)
        ));
        assert!(matches!(
            DiceFormula::parse("101d6"),
            Err(DiceParseError::InvalidDiceCount)
        ));
        assert!(matches!(
            DiceFormula::parse("1d1"),
            Err(DiceParseError::InvalidDieSize)
        ));
        assert!(matches!(
            DiceFormula::parse("1d-4"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_roll_with_sums_dice_and_modifier() {
        let formula = DiceFormula::new(3, 6, 2).expect("valid");
        let result = formula.roll_with(sequence(vec![1, 4, 6]));
        assert_eq!(result.individual_rolls, vec![1, 4, 6]);
        assert_eq!(result.dice_total, 11);
        assert_eq!(result.total, 13);
    }

    #[test]
    fn test_roll_with_clamps_out_of_range_source() {
        let formula = DiceFormula::new(2, 8, 0).expect("valid");
        let result = formula.roll_with(sequence(vec![0, 99]));
        assert_eq!(result.individual_rolls, vec![1, 8]);
    }

    #[test]
    fn test_min_max() {
        let formula = DiceFormula::new(2, 6, -1).expect("valid");
        assert_eq!(formula.min_roll(), 1);
        assert_eq!(formula.max_roll(), 11);
    }

    #[test]
    fn test_breakdown() {
        let single = DiceFormula::d20(5).roll_with(sequence(vec![14]));
        assert_eq!(single.breakdown(), "1d20(14) + 5 = 19");

        let multi = DiceFormula::new(2, 6, 3)
            .expect("valid")
            .roll_with(sequence(vec![4, 5]));
        assert_eq!(multi.breakdown(), "2d6[4, 5] + 3 = 12");

        let negative = DiceFormula::d20(-2).roll_with(sequence(vec![10]));
        assert_eq!(negative.breakdown(), "1d20(10) - 2 = 8");
    }

    #[test]
    fn test_natural_20_and_1() {
        let nat20 = DiceFormula::d20(0).roll_with(sequence(vec![20]));
        assert!(nat20.is_natural_20());
        assert!(!nat20.is_natural_1());

        let nat1 = DiceFormula::d20(3).roll_with(sequence(vec![1]));
        assert!(nat1.is_natural_1());
    }

    #[test]
    fn test_display() {
        assert_eq!(DiceFormula::d20(0).display(), "1d20");
        assert_eq!(DiceFormula::d20(5).to_string(), "1d20+5");
        assert_eq!(DiceFormula::d20(-3).display(), "1d20-3");
    }

    #[test]
    fn test_roll_ability_score_drops_lowest() {
        let mut rng = sequence(vec![1, 6, 5, 4]);
        assert_eq!(roll_ability_score(&mut rng), 15);
    }

    #[test]
    fn test_roll_ability_scores_within_bounds() {
        let scores = roll_ability_scores(sequence(vec![6, 6, 6, 6, 1, 1, 1, 1, 2, 3, 4, 5]));
        assert_eq!(scores, [18, 3, 12, 18, 3, 12]);
    }

    #[test]
    fn test_reorder_by_priority() {
        // Barbarian: STR, CON, DEX, WIS, CHA, INT
        let priority = [
            Ability::Strength,
            Ability::Constitution,
            Ability::Dexterity,
            Ability::Wisdom,
            Ability::Charisma,
            Ability::Intelligence,
        ];
        let result = reorder_by_priority([8, 15, 10, 14, 12, 13], &priority);
        assert_eq!(result, [15, 13, 14, 8, 12, 10]);
    }

    #[test]
    fn test_reorder_with_partial_priority() {
        let result = reorder_by_priority([8, 10, 12, 13, 14, 15], &[Ability::Charisma]);
        assert_eq!(result, [14, 13, 12, 10, 8, 15]);
    }
}
