//! Static rules content: races, classes, backgrounds, feats, skills, armor.
//!
//! Lookups are case-insensitive. Option lists are sorted for display.

mod armor;
mod backgrounds;
mod classes;
mod feats;
mod races;
mod skills;

pub use armor::{armor_by_name, ArmorCategory, ArmorInfo, ARMOR, MAX_SHIELD_BONUS};
pub use backgrounds::{
    background_by_name, background_description, BackgroundInfo, BACKGROUNDS,
    BACKGROUND_NOT_FOUND,
};
pub use classes::{
    class_by_name, class_description, subclass_by_name, subclass_description, ClassInfo,
    LevelRow, SkillChoices, SubclassInfo, CLASSES, SUBCLASSES, SUBCLASS_LEVEL,
};
pub use feats::{
    feat_by_name, feat_description, FeatEffect, FeatInfo, FEATS, FEAT_LEVELS, NO_FEAT_SELECTED,
};
pub use races::{race_by_name, race_description, RaceInfo, RACES, RACE_NOT_FOUND};
pub use skills::{skill_by_name, skill_description, SkillInfo, SKILLS, SKILL_NOT_FOUND};

fn sorted_names(names: impl Iterator<Item = &'static str>) -> Vec<&'static str> {
    let mut names: Vec<_> = names.collect();
    names.sort_unstable();
    names
}

pub fn race_names() -> Vec<&'static str> {
    sorted_names(RACES.iter().map(|r| r.name))
}

pub fn class_names() -> Vec<&'static str> {
    sorted_names(CLASSES.iter().map(|c| c.name))
}

pub fn background_names() -> Vec<&'static str> {
    sorted_names(BACKGROUNDS.iter().map(|b| b.name))
}

pub fn feat_names() -> Vec<&'static str> {
    sorted_names(FEATS.iter().map(|f| f.name))
}

/// Skill names in sheet order (already alphabetical).
pub fn skill_names() -> Vec<&'static str> {
    SKILLS.iter().map(|s| s.name).collect()
}

/// Subclasses available to `class_name`; empty for unknown classes.
pub fn subclass_names(class_name: &str) -> Vec<&'static str> {
    class_by_name(class_name)
        .map(|c| sorted_names(c.subclasses.iter().copied()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_lists_are_sorted() {
        assert_eq!(class_names(), vec!["Barbarian", "Bard", "Fighter", "Rogue"]);
        let races = race_names();
        assert!(races.contains(&"Half-Orc"));
        assert!(races.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(feat_names().first(), Some(&"Ability Score Increase"));
        assert_eq!(skill_names().len(), 18);
    }

    #[test]
    fn subclass_lists() {
        assert_eq!(
            subclass_names("Bard"),
            vec!["College of Lore", "College of Swords"]
        );
        assert!(subclass_names("Wizard").is_empty());
    }

    #[test]
    fn every_referenced_skill_exists() {
        for bg in BACKGROUNDS {
            for skill in bg.skills {
                assert!(skill_by_name(skill).is_some(), "{skill}");
            }
        }
        for race in RACES {
            for skill in race.granted_skills {
                assert!(skill_by_name(skill).is_some(), "{skill}");
            }
        }
        for class in CLASSES {
            if let SkillChoices::From(list) = class.skill_choices {
                for skill in list {
                    assert!(skill_by_name(skill).is_some(), "{skill}");
                }
            }
        }
    }
}
