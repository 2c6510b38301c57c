//! Value objects - Immutable objects defined by their attributes

mod ability;
mod dice;
mod names;

pub use ability::{Ability, AbilityScores, MAX_ABILITY_SCORE, MIN_ABILITY_SCORE};
pub use dice::{
    reorder_by_priority, roll_ability_score, roll_ability_scores, DiceFormula, DiceParseError,
    DiceRollResult, MAX_DICE_COUNT,
};
pub use names::{CharacterName, Email, Username};
