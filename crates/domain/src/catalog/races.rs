//! Playable races.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub traits: &'static [&'static str],
    /// Walking speed in feet.
    pub speed: u8,
    /// Skills the race always grants.
    pub granted_skills: &'static [&'static str],
    /// Grants one extra skill of the player's choice.
    pub bonus_skill: bool,
    /// Grants one feat at first level.
    pub bonus_feat: bool,
}

pub const RACE_NOT_FOUND: &str = "race not found";

pub static RACES: &[RaceInfo] = &[
    RaceInfo {
        name: "Dwarf",
        description: "Bold and hardy, dwarves are known as skilled warriors, miners and workers of stone and metal. They stand well under five feet tall but are broad and compact, and often live to more than 350 years.",
        traits: &[
            "Darkvision",
            "Dwarven Resilience",
            "Dwarven Combat Training",
            "Stonecunning",
        ],
        speed: 25,
        granted_skills: &[],
        bonus_skill: false,
        bonus_feat: false,
    },
    RaceInfo {
        name: "Elf",
        description: "Elves are a magical people of otherworldly grace who live in places of ethereal beauty. They mature slowly, claim adulthood around the age of 100 and can live to be 750.",
        traits: &["Darkvision", "Keen Senses", "Fey Ancestry", "Trance"],
        speed: 30,
        granted_skills: &["Perception"],
        bonus_skill: false,
        bonus_feat: false,
    },
    RaceInfo {
        name: "Half-Orc",
        description: "Half-orcs inherit a tendency toward chaos from their orc parents and are not strongly inclined toward good. Larger Medium creatures, they range from five to well over six feet tall. They can shrug off a killing blow and deal more damage with critical hits.",
        traits: &[
            "Darkvision",
            "Menacing",
            "Relentless Endurance",
            "Savage Attacks",
        ],
        speed: 30,
        granted_skills: &["Intimidation"],
        bonus_skill: false,
        bonus_feat: false,
    },
    RaceInfo {
        name: "Halfling",
        description: "The diminutive halflings survive in a world full of larger creatures by avoiding notice or, barring that, avoiding offense. They stand about three feet tall and value the comforts of home.",
        traits: &["Lucky", "Brave", "Halfling Nimbleness"],
        speed: 25,
        granted_skills: &[],
        bonus_skill: false,
        bonus_feat: false,
    },
    RaceInfo {
        name: "Human",
        description: "Humans are adaptable and ambitious, living nearly a century and reaching adulthood in their late teens. They are Medium creatures five to six feet tall with a walking speed of 30 feet.",
        traits: &[
            "Increase 2 different ability scores by 1",
            "Gain an additional skill proficiency",
            "Gain an additional Feat",
            "Languages: Common and one additional language",
        ],
        speed: 30,
        granted_skills: &[],
        bonus_skill: true,
        bonus_feat: true,
    },
    RaceInfo {
        name: "Tiefling",
        description: "To be greeted with stares and whispers, to suffer violence and insult on the street, to see mistrust and fear in every eye: this is the lot of the tiefling. They age at the same rate as humans but live a little longer, and are Medium creatures with a walking speed of 30 feet.",
        traits: &["Darkvision", "Hellish Resistance", "Infernal Legacy"],
        speed: 30,
        granted_skills: &[],
        bonus_skill: false,
        bonus_feat: false,
    },
];

pub fn race_by_name(name: &str) -> Option<&'static RaceInfo> {
    RACES.iter().find(|r| r.name.eq_ignore_ascii_case(name.trim()))
}

/// Description followed by the trait list, or the fallback text.
pub fn race_description(name: &str) -> String {
    match race_by_name(name) {
        Some(race) => format!(
            "{}\n\nSpeed: {} ft.\n\nTraits:\n- {}",
            race.description,
            race.speed,
            race.traits.join("\n- ")
        ),
        None => RACE_NOT_FOUND.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_grants_feat_and_skill() {
        let human = race_by_name("human").expect("human");
        assert!(human.bonus_feat);
        assert!(human.bonus_skill);
        assert!(!race_by_name("Tiefling").expect("tiefling").bonus_feat);
    }

    #[test]
    fn description_lists_traits() {
        let text = race_description("Half-Orc");
        assert!(text.contains("- Relentless Endurance"));
        assert_eq!(race_description("Warforged"), "race not found");
    }
}
