//! Domain entities - Core business objects with identity

mod character;
mod user;

pub use character::{ArmorSelection, Character, CharacterDetails, ClassLevel, SkillProficiency};
pub use user::{NewUser, User, UserCredentials};
