//! Character backgrounds.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Skill proficiencies the background grants.
    pub skills: &'static [&'static str],
    pub tools: &'static str,
    pub equipment: &'static str,
}

pub const BACKGROUND_NOT_FOUND: &str = "no background found";

pub static BACKGROUNDS: &[BackgroundInfo] = &[
    BackgroundInfo {
        name: "Acolyte",
        description: "You are devoted to a specific god or pantheon. As an acolyte you are respected by others of your faith.",
        skills: &["Insight", "Religion"],
        tools: "Languages: 2 of your choice",
        equipment: "A holy symbol, a prayer book, 5 sticks of incense, vestments, a set of common clothes and a pouch of 15 gp",
    },
    BackgroundInfo {
        name: "Criminal",
        description: "You have a history of breaking the law and contacts in the underworld who still owe you favours.",
        skills: &["Deception", "Stealth"],
        tools: "One type of gaming set, thieves' tools",
        equipment: "A crowbar, a set of dark common clothes with a hood and a pouch of 15 gp",
    },
    BackgroundInfo {
        name: "Folk Hero",
        description: "You come from a humble social rank, but you are destined for so much more. The people of your home village already regard you as their champion.",
        skills: &["Animal Handling", "Survival"],
        tools: "One type of artisan's tools, vehicles (land)",
        equipment: "A set of artisan's tools, a shovel, an iron pot, a set of common clothes and a pouch of 10 gp",
    },
    BackgroundInfo {
        name: "Sage",
        description: "You spent years learning the lore of the multiverse, scouring manuscripts and studying scrolls under the masters of your field.",
        skills: &["Arcana", "History"],
        tools: "Languages: 2 of your choice",
        equipment: "A bottle of black ink, a quill, a small knife, a letter from a dead colleague, a set of common clothes and a pouch of 10 gp",
    },
    BackgroundInfo {
        name: "Soldier",
        description: "War and battle are what you know best. You trained your whole life and joined a military service when you came of age.",
        skills: &["Athletics", "Intimidation"],
        tools: "One type of gaming set, vehicles (land)",
        equipment: "An insignia of rank, a trophy from a fallen foe, a set of bone dice, common clothes and a pouch of 10 gp",
    },
    BackgroundInfo {
        name: "Spy",
        description: "A criminal or perhaps a government agent. Whatever set you on the path of stealth and deception has honed your skills of trickery.",
        skills: &["Deception", "Stealth"],
        tools: "One type of gaming set, thieves' tools",
        equipment: "A crowbar, a set of dark common clothes with a hood and a pouch of 15 gp",
    },
];

pub fn background_by_name(name: &str) -> Option<&'static BackgroundInfo> {
    BACKGROUNDS
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
}

pub fn background_description(name: &str) -> String {
    match background_by_name(name) {
        Some(bg) => format!(
            "{}\n\nSkill Proficiencies: {}.\n\nTool Proficiencies: {}.\n\nEquipment: {}.",
            bg.description,
            bg.skills.join(", "),
            bg.tools,
            bg.equipment
        ),
        None => BACKGROUND_NOT_FOUND.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soldier_grants_athletics_and_intimidation() {
        let soldier = background_by_name("Soldier").expect("soldier");
        assert_eq!(soldier.skills, &["Athletics", "Intimidation"]);
    }

    #[test]
    fn description_fallback() {
        assert!(background_description("Acolyte").contains("Skill Proficiencies: Insight, Religion."));
        assert_eq!(background_description("Pirate"), "no background found");
    }
}
