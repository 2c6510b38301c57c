//! Feats and their mechanical effects on the sheet.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatEffect {
    /// Narrative or situational; nothing on the sheet changes.
    None,
    /// Flat bonus to initiative.
    Initiative(i32),
    /// Extra hit points for every character level.
    HitPointsPerLevel(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub effect: FeatEffect,
}

/// Character levels at which a feat (or ability score improvement) is gained.
pub const FEAT_LEVELS: [u8; 5] = [4, 8, 12, 16, 19];

pub const NO_FEAT_SELECTED: &str = "No Feat selected.\n\nUnless your Dungeon Master says otherwise, you may gain a Feat at levels 4, 8, 12, 16, and 19.";

pub static FEATS: &[FeatInfo] = &[
    FeatInfo {
        name: "Ability Score Increase",
        description: "Increase one ability score by 2, or two ability scores by 1 each. No score can exceed 20 this way.",
        effect: FeatEffect::None,
    },
    FeatInfo {
        name: "Alert",
        description: "You cannot be surprised while conscious, gain a +5 bonus to initiative, and other creatures don't gain advantage on attack rolls against you as a result of being unseen by you.",
        effect: FeatEffect::Initiative(5),
    },
    FeatInfo {
        name: "Tavern Brawler",
        description: "Increase Strength or Constitution by 1 (max 20), gain proficiency with improvised weapons, your unarmed strikes use a d4 for damage, and you can try to grapple as a bonus action after hitting with an unarmed strike or improvised weapon.",
        effect: FeatEffect::None,
    },
    FeatInfo {
        name: "Tough",
        description: "Your hit point maximum increases by twice your level, and by an additional 2 every time you gain a level.",
        effect: FeatEffect::HitPointsPerLevel(2),
    },
    FeatInfo {
        name: "War Caster",
        description: "You have advantage on Constitution saves to maintain concentration, can perform somatic components while holding weapons or a shield, and can cast a single-target spell instead of making an opportunity attack.",
        effect: FeatEffect::None,
    },
];

pub fn feat_by_name(name: &str) -> Option<&'static FeatInfo> {
    FEATS.iter().find(|f| f.name.eq_ignore_ascii_case(name.trim()))
}

/// Description of the feat, or the help text about when feats are gained.
pub fn feat_description(name: &str) -> &'static str {
    feat_by_name(name)
        .map(|f| f.description)
        .unwrap_or(NO_FEAT_SELECTED)
}
