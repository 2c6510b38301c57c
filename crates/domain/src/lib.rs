//! Tavernkeep domain: D&D 5e rules, the static catalog and character entities.
//!
//! Pure code only. No I/O, no async runtime and no random number generator;
//! callers inject randomness as an inclusive range closure.

pub mod builder;
pub mod catalog;
pub mod character_sheet;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use builder::{validate_armor, CharacterDraft};
pub use character_sheet::{AbilityLine, CharacterSheet, SkillLine};
pub use entities::{
    ArmorSelection, Character, CharacterDetails, ClassLevel, NewUser, SkillProficiency, User,
    UserCredentials,
};
pub use error::DomainError;
pub use game_systems::{
    format_modifier, CalculationEngine, Dnd5eRules, ProficiencyLevel, MAX_LEVEL,
};
pub use ids::{CharacterId, UserId};
pub use value_objects::{
    Ability, AbilityScores, CharacterName, DiceFormula, DiceParseError, DiceRollResult, Email,
    Username,
};
