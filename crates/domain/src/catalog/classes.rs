//! Classes, their progression tables and subclasses.

use crate::value_objects::Ability;
use crate::value_objects::Ability::{Charisma as CHA, Constitution as CON, Dexterity as DEX};
use crate::value_objects::Ability::{Intelligence as INT, Strength as STR, Wisdom as WIS};

/// Class level at which a subclass is chosen.
pub const SUBCLASS_LEVEL: u8 = 3;

/// Which skills a class may pick at first level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillChoices {
    Any,
    From(&'static [&'static str]),
}

impl SkillChoices {
    pub fn allows(&self, skill: &str) -> bool {
        match self {
            Self::Any => true,
            Self::From(list) => list.iter().any(|s| s.eq_ignore_ascii_case(skill)),
        }
    }
}

/// One row of a class progression table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRow {
    pub features: &'static str,
    /// Values for the class-specific columns, in `ClassInfo::columns` order.
    pub values: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub hit_die: u8,
    pub primary_ability: Ability,
    pub saving_throws: [Ability; 2],
    pub skill_choices: SkillChoices,
    pub skill_picks: usize,
    pub equipment: &'static [&'static str],
    /// Where rolled scores go, best first.
    pub ability_priority: [Ability; 6],
    pub subclasses: &'static [&'static str],
    /// Extra progression columns besides Level and Features.
    pub columns: &'static [&'static str],
    /// Twenty rows, index 0 is level 1.
    pub progression: &'static [LevelRow; 20],
}

impl ClassInfo {
    pub fn row(&self, level: u8) -> Option<&'static LevelRow> {
        let index = usize::from(level).checked_sub(1)?;
        self.progression.get(index)
    }

    pub fn has_subclass(&self, subclass: &str) -> bool {
        self.subclasses
            .iter()
            .any(|s| s.eq_ignore_ascii_case(subclass))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubclassInfo {
    pub name: &'static str,
    pub class_name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

const fn row(features: &'static str, values: &'static [&'static str]) -> LevelRow {
    LevelRow { features, values }
}

static BARBARIAN_TABLE: [LevelRow; 20] = [
    row("Rage, Unarmored Defense", &["2", "+2"]),
    row("Reckless Attack, Danger Sense", &["2", "+2"]),
    row("Primal Path", &["3", "+2"]),
    row("Ability Score Improvement", &["3", "+2"]),
    row("Extra Attack, Fast Movement", &["3", "+2"]),
    row("Path Feature", &["4", "+2"]),
    row("Feral Instinct", &["4", "+2"]),
    row("Ability Score Improvement", &["4", "+2"]),
    row("Brutal Critical (1 die)", &["4", "+3"]),
    row("Path Feature", &["4", "+3"]),
    row("Relentless Rage", &["4", "+3"]),
    row("Ability Score Improvement", &["5", "+3"]),
    row("Brutal Critical (2 dice)", &["5", "+3"]),
    row("Path Feature", &["5", "+3"]),
    row("Persistent Rage", &["5", "+3"]),
    row("Ability Score Improvement", &["5", "+4"]),
    row("Brutal Critical (3 dice)", &["6", "+4"]),
    row("Indomitable Might", &["6", "+4"]),
    row("Ability Score Improvement", &["6", "+4"]),
    row("Primal Champion", &["Unlimited", "+4"]),
];

static BARD_TABLE: [LevelRow; 20] = [
    row("Spellcasting, Bardic Inspiration (d6)", &["2", "4", "2"]),
    row("Jack of All Trades, Song of Rest (d6)", &["2", "5", "3"]),
    row("Bard College, Expertise", &["2", "6", "4/2"]),
    row("Ability Score Improvement", &["3", "7", "4/3"]),
    row("Bardic Inspiration (d8), Font of Inspiration", &["3", "8", "4/3/2"]),
    row("Countercharm, Bard College Feature", &["3", "9", "4/3/3"]),
    row("", &["3", "10", "4/3/3/1"]),
    row("Ability Score Improvement", &["3", "11", "4/3/3/2"]),
    row("Song of Rest (d8)", &["3", "12", "4/3/3/3/1"]),
    row(
        "Bardic Inspiration (d10), Expertise, Magical Secrets",
        &["4", "14", "4/3/3/3/2"],
    ),
    row("", &["4", "15", "4/3/3/3/2/1"]),
    row("Ability Score Improvement", &["4", "15", "4/3/3/3/2/1"]),
    row("Song of Rest (d10)", &["4", "16", "4/3/3/3/2/1/1"]),
    row("Magical Secrets, Bard College Feature", &["4", "18", "4/3/3/3/2/1/1"]),
    row("Bardic Inspiration (d12)", &["4", "19", "4/3/3/3/2/1/1/1"]),
    row("Ability Score Improvement", &["4", "19", "4/3/3/3/2/1/1/1"]),
    row("Song of Rest (d12)", &["4", "20", "4/3/3/3/2/1/1/1/1"]),
    row("Magical Secrets", &["4", "22", "4/3/3/3/3/1/1/1/1"]),
    row("Ability Score Improvement", &["4", "22", "4/3/3/3/3/2/1/1/1"]),
    row("Superior Inspiration", &["4", "22", "4/3/3/3/3/2/2/1/1"]),
];

static FIGHTER_TABLE: [LevelRow; 20] = [
    row("Fighting Style, Second Wind", &[]),
    row("Action Surge (one use)", &[]),
    row("Martial Archetype", &[]),
    row("Ability Score Improvement", &[]),
    row("Extra Attack", &[]),
    row("Ability Score Improvement", &[]),
    row("Martial Archetype Feature", &[]),
    row("Ability Score Improvement", &[]),
    row("Indomitable (one use)", &[]),
    row("Martial Archetype Feature", &[]),
    row("Extra Attack (2)", &[]),
    row("Ability Score Improvement", &[]),
    row("Indomitable (two uses)", &[]),
    row("Ability Score Improvement", &[]),
    row("Martial Archetype Feature", &[]),
    row("Ability Score Improvement", &[]),
    row("Action Surge (two uses), Indomitable (three uses)", &[]),
    row("Martial Archetype Feature", &[]),
    row("Ability Score Improvement", &[]),
    row("Extra Attack (3)", &[]),
];

static ROGUE_TABLE: [LevelRow; 20] = [
    row("Expertise, Sneak Attack, Thieves' Cant", &["1d6"]),
    row("Cunning Action", &["1d6"]),
    row("Roguish Archetype", &["2d6"]),
    row("Ability Score Improvement", &["2d6"]),
    row("Uncanny Dodge", &["3d6"]),
    row("Expertise", &["3d6"]),
    row("Evasion", &["4d6"]),
    row("Ability Score Improvement", &["4d6"]),
    row("Roguish Archetype Feature", &["5d6"]),
    row("Ability Score Improvement", &["5d6"]),
    row("Reliable Talent", &["6d6"]),
    row("Ability Score Improvement", &["6d6"]),
    row("Roguish Archetype Feature", &["7d6"]),
    row("Blindsense", &["7d6"]),
    row("Slippery Mind", &["8d6"]),
    row("Ability Score Improvement", &["8d6"]),
    row("Roguish Archetype Feature", &["9d6"]),
    row("Elusive", &["9d6"]),
    row("Ability Score Improvement", &["10d6"]),
    row("Stroke of Luck", &["10d6"]),
];

pub static CLASSES: &[ClassInfo] = &[
    ClassInfo {
        name: "Barbarian",
        description: "If you're gonna be dumb, you gotta be tough. A strong warrior who can shrug off blows without the need for armor. At level 1 you may select 2 skills from the list below.",
        hit_die: 12,
        primary_ability: STR,
        saving_throws: [STR, CON],
        skill_choices: SkillChoices::From(&[
            "Animal Handling",
            "Athletics",
            "Intimidation",
            "Nature",
            "Perception",
            "Survival",
        ]),
        skill_picks: 2,
        equipment: &[
            "A greataxe or any martial melee weapon",
            "Two handaxes or any simple weapon",
            "An explorer's pack",
            "Four javelins",
        ],
        ability_priority: [STR, CON, DEX, WIS, CHA, INT],
        subclasses: &["Path of the Totem Warrior", "Path of Wild Magic"],
        columns: &["Rages", "Rage Damage"],
        progression: &BARBARIAN_TABLE,
    },
    ClassInfo {
        name: "Bard",
        description: "I seduce the dragon... A charismatic performer and jack of all trades. At level 1 you may select 3 skills from the entire skills list.",
        hit_die: 8,
        primary_ability: CHA,
        saving_throws: [DEX, CHA],
        skill_choices: SkillChoices::Any,
        skill_picks: 3,
        equipment: &[
            "A rapier, a longsword or any simple weapon",
            "A diplomat's pack or an entertainer's pack",
            "A lute or any other musical instrument",
            "Leather armor",
            "A dagger",
        ],
        ability_priority: [CHA, DEX, CON, INT, WIS, STR],
        subclasses: &["College of Lore", "College of Swords"],
        columns: &["Cantrips Known", "Spells Known", "Spell Slots"],
        progression: &BARD_TABLE,
    },
    ClassInfo {
        name: "Fighter",
        description: "A master of martial combat, skilled with a variety of weapons and armor. At level 1 you may select 2 skills from the list below.",
        hit_die: 10,
        primary_ability: STR,
        saving_throws: [STR, CON],
        skill_choices: SkillChoices::From(&[
            "Acrobatics",
            "Animal Handling",
            "Athletics",
            "History",
            "Insight",
            "Intimidation",
            "Perception",
            "Survival",
        ]),
        skill_picks: 2,
        equipment: &[
            "Chain mail, or leather armor with a longbow and 20 arrows",
            "A martial weapon and a shield, or two martial weapons",
            "A light crossbow and 20 bolts, or two handaxes",
            "A dungeoneer's pack or an explorer's pack",
        ],
        ability_priority: [STR, CON, DEX, WIS, INT, CHA],
        subclasses: &["Battle Master", "Champion"],
        columns: &[],
        progression: &FIGHTER_TABLE,
    },
    ClassInfo {
        name: "Rogue",
        description: "Rogues excel at stealth and deception, using their skills to surprise their enemies and escape danger. At level 1 you may select 4 skills from the options below.",
        hit_die: 8,
        primary_ability: DEX,
        saving_throws: [DEX, INT],
        skill_choices: SkillChoices::From(&[
            "Acrobatics",
            "Athletics",
            "Deception",
            "Insight",
            "Intimidation",
            "Investigation",
            "Perception",
            "Performance",
            "Persuasion",
            "Sleight of Hand",
            "Stealth",
        ]),
        skill_picks: 4,
        equipment: &[
            "A rapier or a shortsword",
            "A shortbow with a quiver of 20 arrows, or a shortsword",
            "A burglar's pack, a dungeoneer's pack or an explorer's pack",
            "Leather armor, two daggers and thieves' tools",
        ],
        ability_priority: [DEX, INT, CON, WIS, CHA, STR],
        subclasses: &["Assassin", "Thief"],
        columns: &["Sneak Attack"],
        progression: &ROGUE_TABLE,
    },
];

pub static SUBCLASSES: &[SubclassInfo] = &[
    SubclassInfo {
        name: "Path of the Totem Warrior",
        class_name: "Barbarian",
        description: "Drawing on the spirits of animals, gaining their powers as a totemic warrior.",
        features: &[
            "Spirit Seeker",
            "Totem Spirit",
            "Aspect of the Beast",
            "Spirit Walker",
            "Totemic Attunement",
        ],
    },
    SubclassInfo {
        name: "Path of Wild Magic",
        class_name: "Barbarian",
        description: "A barbarian infused with wild magic, creating unpredictable magical effects.",
        features: &[
            "Wild Surge",
            "Magic Awareness",
            "Bolstering Magic",
            "Unstable Backlash",
            "Controlled Surge",
        ],
    },
    SubclassInfo {
        name: "College of Lore",
        class_name: "Bard",
        description: "A scholar and a spy, a diplomat and a provocateur, a healer and a slayer.",
        features: &[
            "Bonus Proficiencies",
            "Cutting Words",
            "Additional Magical Secrets",
            "Peerless Skill",
        ],
    },
    SubclassInfo {
        name: "College of Swords",
        class_name: "Bard",
        description: "Blades perform stunts such as sword swallowing, knife throwing, juggling and mock combat.",
        features: &[
            "Bonus Proficiencies",
            "Fighting Style",
            "Blade Flourish",
            "Extra Attack",
            "Master's Flourish",
        ],
    },
    SubclassInfo {
        name: "Battle Master",
        class_name: "Fighter",
        description: "A student of the art of war who turns combat into a game of tactics and manoeuvres.",
        features: &[
            "Combat Superiority",
            "Student of War",
            "Know Your Enemy",
            "Improved Combat Superiority",
            "Relentless",
        ],
    },
    SubclassInfo {
        name: "Champion",
        class_name: "Fighter",
        description: "A fighter who hones raw physical power to deadly perfection.",
        features: &[
            "Improved Critical",
            "Remarkable Athlete",
            "Additional Fighting Style",
            "Superior Critical",
            "Survivor",
        ],
    },
    SubclassInfo {
        name: "Assassin",
        class_name: "Rogue",
        description: "Specializes in stealth and surprise attacks. Masters of disguise and deadly in their precision.",
        features: &[
            "Bonus Proficiencies (disguise kit, poisoner's kit)",
            "Assassinate",
            "Infiltration Expertise",
            "Impostor",
            "Death Strike",
        ],
    },
    SubclassInfo {
        name: "Thief",
        class_name: "Rogue",
        description: "Thieves are adept at sneaking, stealing and using their cunning to gain advantages.",
        features: &[
            "Fast Hands",
            "Second-Story Work",
            "Supreme Sneak",
            "Use Magic Device",
            "Thief's Reflexes",
        ],
    },
];

pub fn class_by_name(name: &str) -> Option<&'static ClassInfo> {
    CLASSES.iter().find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}

pub fn subclass_by_name(name: &str) -> Option<&'static SubclassInfo> {
    SUBCLASSES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

/// Class description with hit die, saves, skill choices and equipment.
pub fn class_description(name: &str) -> Option<String> {
    let class = class_by_name(name)?;
    let skills = match class.skill_choices {
        SkillChoices::Any => "Any".to_string(),
        SkillChoices::From(list) => list.join(", "),
    };
    Some(format!(
        "{}\n\nHit Die: d{}\nPrimary Ability: {}\nSaving Throws: {}, {}\nSkills (choose {}): {}\n\nEquipment:\n- {}",
        class.description,
        class.hit_die,
        class.primary_ability,
        class.saving_throws[0],
        class.saving_throws[1],
        class.skill_picks,
        skills,
        class.equipment.join("\n- ")
    ))
}

pub fn subclass_description(name: &str) -> Option<String> {
    let subclass = subclass_by_name(name)?;
    Some(format!(
        "{}\n\nFeatures:\n- {}",
        subclass.description,
        subclass.features.join("\n- ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_has_matching_subclass_entries() {
        for class in CLASSES {
            for name in class.subclasses {
                let sub = subclass_by_name(name).expect("subclass listed in catalog");
                assert_eq!(sub.class_name, class.name);
            }
        }
    }

    #[test]
    fn progression_rows_fill_every_column() {
        for class in CLASSES {
            for row in class.progression.iter() {
                assert_eq!(row.values.len(), class.columns.len(), "{}", class.name);
            }
        }
    }

    #[test]
    fn row_lookup_is_one_based() {
        let rogue = class_by_name("rogue").expect("rogue");
        assert_eq!(rogue.row(1).map(|r| r.values[0]), Some("1d6"));
        assert_eq!(rogue.row(20).map(|r| r.values[0]), Some("10d6"));
        assert!(rogue.row(0).is_none());
        assert!(rogue.row(21).is_none());
    }

    #[test]
    fn skill_choices() {
        let barbarian = class_by_name("Barbarian").expect("barbarian");
        assert!(barbarian.skill_choices.allows("Athletics"));
        assert!(!barbarian.skill_choices.allows("Stealth"));
        assert!(class_by_name("Bard").expect("bard").skill_choices.allows("Stealth"));
    }

    #[test]
    fn descriptions() {
        let text = class_description("Barbarian").expect("barbarian");
        assert!(text.contains("Hit Die: d12"));
        assert!(text.contains("Saving Throws: Strength, Constitution"));
        assert!(class_description("Artificer").is_none());
        assert!(subclass_description("Thief")
            .expect("thief")
            .contains("- Fast Hands"));
    }
}
