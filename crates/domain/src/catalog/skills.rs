//! The eighteen skills and their governing abilities.

use crate::value_objects::Ability;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInfo {
    pub name: &'static str,
    pub ability: Ability,
    pub description: &'static str,
}

const fn skill(name: &'static str, ability: Ability, description: &'static str) -> SkillInfo {
    SkillInfo {
        name,
        ability,
        description,
    }
}

/// Alphabetical, as printed on the sheet.
pub static SKILLS: &[SkillInfo] = &[
    skill(
        "Acrobatics",
        Ability::Dexterity,
        "Perform tasks that need finesse and agility, such as flips, rolls and keeping your balance.",
    ),
    skill(
        "Animal Handling",
        Ability::Wisdom,
        "Calm, train or communicate with animals.",
    ),
    skill(
        "Arcana",
        Ability::Intelligence,
        "Recall lore about spells, magic items, eldritch symbols, magical traditions and the planes of existence.",
    ),
    skill(
        "Athletics",
        Ability::Strength,
        "Climb, jump, swim and otherwise rely on raw physical prowess.",
    ),
    skill(
        "Deception",
        Ability::Charisma,
        "Lie convincingly, hide your intentions or otherwise mislead others.",
    ),
    skill(
        "History",
        Ability::Intelligence,
        "Recall knowledge of historical events, legendary people, ancient kingdoms and lost cultures.",
    ),
    skill(
        "Insight",
        Ability::Wisdom,
        "Read the true intentions of a creature, such as spotting a lie or predicting its next move.",
    ),
    skill(
        "Intimidation",
        Ability::Charisma,
        "Influence others through threats, hostile actions and displays of force.",
    ),
    skill(
        "Investigation",
        Ability::Intelligence,
        "Look for clues, make deductions and work out the details of puzzles, objects or places.",
    ),
    skill(
        "Medicine",
        Ability::Wisdom,
        "Stabilize the dying, diagnose illnesses and treat wounds.",
    ),
    skill(
        "Nature",
        Ability::Intelligence,
        "Recall knowledge of terrain, plants and animals, the weather and natural cycles.",
    ),
    skill(
        "Perception",
        Ability::Wisdom,
        "Spot, hear or otherwise notice the presence of something.",
    ),
    skill(
        "Performance",
        Ability::Charisma,
        "Entertain an audience with music, dance, acting or storytelling.",
    ),
    skill(
        "Persuasion",
        Ability::Charisma,
        "Influence someone with tact and good faith, or negotiate a favourable deal.",
    ),
    skill(
        "Religion",
        Ability::Intelligence,
        "Recall knowledge of deities, rites and prayers, religious hierarchies, holy symbols and secret cults.",
    ),
    skill(
        "Sleight of Hand",
        Ability::Dexterity,
        "Pick pockets, palm objects, perform conjuring tricks and plant things on others unnoticed.",
    ),
    skill(
        "Stealth",
        Ability::Dexterity,
        "Hide, move silently and slip past guards.",
    ),
    skill(
        "Survival",
        Ability::Wisdom,
        "Follow tracks, hunt game, guide a group through the wilds and predict the weather.",
    ),
];

pub const SKILL_NOT_FOUND: &str = "skill not found";

pub fn skill_by_name(name: &str) -> Option<&'static SkillInfo> {
    SKILLS.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

/// "Acrobatics: Dexterity-based skill. ..." or the fallback text.
pub fn skill_description(name: &str) -> String {
    match skill_by_name(name) {
        Some(info) => format!(
            "{}: {}-based skill. {}",
            info.name,
            info.ability.name(),
            info.description
        ),
        None => SKILL_NOT_FOUND.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_eighteen_sorted_skills() {
        assert_eq!(SKILLS.len(), 18);
        let names: Vec<_> = SKILLS.iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn governing_abilities() {
        assert_eq!(skill_by_name("Athletics").map(|s| s.ability), Some(Ability::Strength));
        assert_eq!(skill_by_name("stealth").map(|s| s.ability), Some(Ability::Dexterity));
        assert_eq!(skill_by_name("Religion").map(|s| s.ability), Some(Ability::Intelligence));
        assert_eq!(skill_by_name("Perception").map(|s| s.ability), Some(Ability::Wisdom));
    }

    #[test]
    fn description_fallback() {
        assert!(skill_description("Stealth").starts_with("Stealth: Dexterity-based skill."));
        assert_eq!(skill_description("Basket Weaving"), "skill not found");
    }
}
