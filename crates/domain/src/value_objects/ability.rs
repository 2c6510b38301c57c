//! The six D&D abilities and a validated score block.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::game_systems::{CalculationEngine, Dnd5eRules};

/// Lowest legal ability score.
pub const MIN_ABILITY_SCORE: i32 = 1;
/// Highest legal ability score.
pub const MAX_ABILITY_SCORE: i32 = 30;

/// One of the six abilities, in standard sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Standard order: STR, DEX, CON, INT, WIS, CHA.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Position in the standard order.
    pub fn index(self) -> usize {
        match self {
            Self::Strength => 0,
            Self::Dexterity => 1,
            Self::Constitution => 2,
            Self::Intelligence => 3,
            Self::Wisdom => 4,
            Self::Charisma => 5,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| {
                a.name().eq_ignore_ascii_case(needle) || a.abbreviation().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown ability: {}", s)))
    }
}

/// Six ability scores in standard order, each within 1..=30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct AbilityScores([i32; 6]);

impl AbilityScores {
    /// Build from an array in standard order.
    pub fn from_array(scores: [i32; 6]) -> Result<Self, DomainError> {
        for (ability, score) in Ability::ALL.iter().zip(scores) {
            validate_score(*ability, score)?;
        }
        Ok(Self(scores))
    }

    /// The 15, 14, 13, 12, 10, 8 standard array in sheet order.
    pub fn standard_array() -> Self {
        Self([15, 14, 13, 12, 10, 8])
    }

    pub fn to_array(self) -> [i32; 6] {
        self.0
    }

    pub fn get(&self, ability: Ability) -> i32 {
        self.0[ability.index()]
    }

    pub fn set(&mut self, ability: Ability, score: i32) -> Result<(), DomainError> {
        validate_score(ability, score)?;
        self.0[ability.index()] = score;
        Ok(())
    }

    /// Raise a score by one, saturating at 30.
    pub fn increase(&mut self, ability: Ability) {
        let slot = &mut self.0[ability.index()];
        *slot = (*slot + 1).min(MAX_ABILITY_SCORE);
    }

    /// Lower a score by one, saturating at 1.
    pub fn decrease(&mut self, ability: Ability) {
        let slot = &mut self.0[ability.index()];
        *slot = (*slot - 1).max(MIN_ABILITY_SCORE);
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        Dnd5eRules.ability_modifier(self.get(ability))
    }

    /// Iterate `(ability, score)` pairs in standard order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self([10; 6])
    }
}

impl TryFrom<Vec<i32>> for AbilityScores {
    type Error = DomainError;

    fn try_from(scores: Vec<i32>) -> Result<Self, Self::Error> {
        let array: [i32; 6] = scores.try_into().map_err(|v: Vec<i32>| {
            DomainError::validation(format!("Expected 6 ability scores, got {}", v.len()))
        })?;
        Self::from_array(array)
    }
}

impl From<AbilityScores> for Vec<i32> {
    fn from(scores: AbilityScores) -> Self {
        scores.0.to_vec()
    }
}

fn validate_score(ability: Ability, score: i32) -> Result<(), DomainError> {
    if !(MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&score) {
        return Err(DomainError::validation(format!(
            "{} score must be between {} and {}, got {}",
            ability, MIN_ABILITY_SCORE, MAX_ABILITY_SCORE, score
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_abbreviations() {
        assert_eq!("dex".parse::<Ability>().expect("abbr"), Ability::Dexterity);
        assert_eq!("Wisdom".parse::<Ability>().expect("name"), Ability::Wisdom);
        assert!("Luck".parse::<Ability>().is_err());
    }

    #[test]
    fn rejects_out_of_range_scores() {
        let err = AbilityScores::from_array([10, 10, 31, 10, 10, 10]).expect_err("31 too high");
        assert!(err.to_string().contains("Constitution"));
        assert!(AbilityScores::from_array([0, 10, 10, 10, 10, 10]).is_err());
    }

    #[test]
    fn increase_and_decrease_saturate() {
        let mut scores = AbilityScores::from_array([30, 1, 10, 10, 10, 10]).expect("valid");
        scores.increase(Ability::Strength);
        scores.decrease(Ability::Dexterity);
        assert_eq!(scores.get(Ability::Strength), 30);
        assert_eq!(scores.get(Ability::Dexterity), 1);
    }

    #[test]
    fn modifier_uses_floor_division() {
        let scores = AbilityScores::from_array([15, 9, 8, 10, 1, 30]).expect("valid");
        assert_eq!(scores.modifier(Ability::Strength), 2);
        assert_eq!(scores.modifier(Ability::Dexterity), -1);
        assert_eq!(scores.modifier(Ability::Constitution), -1);
        assert_eq!(scores.modifier(Ability::Intelligence), 0);
        assert_eq!(scores.modifier(Ability::Wisdom), -5);
        assert_eq!(scores.modifier(Ability::Charisma), 10);
    }

    #[test]
    fn serde_uses_plain_list_and_validates() {
        let scores = AbilityScores::standard_array();
        let json = serde_json::to_string(&scores).expect("serialize");
        assert_eq!(json, "[15,14,13,12,10,8]");
        assert!(serde_json::from_str::<AbilityScores>("[15,14,13]").is_err());
    }
}
