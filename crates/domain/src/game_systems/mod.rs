//! Game system rules.
//!
//! The calculation interface lives in `traits.rs`; `dnd5e.rs` holds the
//! D&D 5th Edition formulas used throughout the sheet.

mod dnd5e;
mod traits;

pub use dnd5e::{format_modifier, jack_of_all_trades, Dnd5eRules, MAX_LEVEL};
pub use traits::{CalculationEngine, ClassHitDice, ProficiencyLevel, WornArmor};
