//! Armor categories and named armor with base AC.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Largest shield/AC bonus accepted from the sheet.
pub const MAX_SHIELD_BONUS: i32 = 10;

/// How armor interacts with Dexterity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArmorCategory {
    #[default]
    NoArmor,
    Light,
    Medium,
    Heavy,
}

impl ArmorCategory {
    pub const ALL: [ArmorCategory; 4] = [
        ArmorCategory::NoArmor,
        ArmorCategory::Light,
        ArmorCategory::Medium,
        ArmorCategory::Heavy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NoArmor => "No Armor",
            Self::Light => "Light Armor",
            Self::Medium => "Medium Armor",
            Self::Heavy => "Heavy Armor",
        }
    }

    /// Named armor pieces in this category, in table order.
    pub fn armors(self) -> impl Iterator<Item = &'static ArmorInfo> {
        ARMOR.iter().filter(move |a| a.category == self)
    }
}

impl fmt::Display for ArmorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ArmorCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse(format!("Unknown armor type: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorInfo {
    pub name: &'static str,
    pub category: ArmorCategory,
    pub base_ac: i32,
}

const fn armor(name: &'static str, category: ArmorCategory, base_ac: i32) -> ArmorInfo {
    ArmorInfo {
        name,
        category,
        base_ac,
    }
}

pub static ARMOR: &[ArmorInfo] = &[
    armor("Padded", ArmorCategory::Light, 11),
    armor("Leather", ArmorCategory::Light, 11),
    armor("Studded Leather", ArmorCategory::Light, 12),
    armor("Hide", ArmorCategory::Medium, 12),
    armor("Chain Shirt", ArmorCategory::Medium, 13),
    armor("Scale Mail", ArmorCategory::Medium, 14),
    armor("Spiked Armor", ArmorCategory::Medium, 14),
    armor("Breastplate", ArmorCategory::Medium, 14),
    armor("Halfplate", ArmorCategory::Medium, 15),
    armor("Ring Mail", ArmorCategory::Heavy, 14),
    armor("Chain Mail", ArmorCategory::Heavy, 16),
    armor("Splint", ArmorCategory::Heavy, 17),
    armor("Plate", ArmorCategory::Heavy, 18),
];

/// Look up a named armor piece (case-insensitive).
pub fn armor_by_name(name: &str) -> Option<&'static ArmorInfo> {
    ARMOR.iter().find(|a| a.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_partition_the_table() {
        let light: Vec<_> = ArmorCategory::Light.armors().map(|a| a.name).collect();
        assert_eq!(light, vec!["Padded", "Leather", "Studded Leather"]);
        assert_eq!(ArmorCategory::Medium.armors().count(), 6);
        assert_eq!(ArmorCategory::Heavy.armors().count(), 4);
        assert_eq!(ArmorCategory::NoArmor.armors().count(), 0);
    }

    #[test]
    fn lookup_and_parse() {
        assert_eq!(armor_by_name("plate").map(|a| a.base_ac), Some(18));
        assert!(armor_by_name("Mithral").is_none());
        assert_eq!(
            "Medium Armor".parse::<ArmorCategory>().expect("parse"),
            ArmorCategory::Medium
        );
    }
}
