//! Read-only catalog access for the creation form, plus random characters.

use std::sync::Arc;

use tavernkeep_domain::catalog::{
    self, background_description, class_by_name, feat_description, race_description,
    skill_description, ArmorCategory, ClassInfo, NO_FEAT_SELECTED,
};
use tavernkeep_domain::value_objects::{reorder_by_priority, roll_ability_scores};
use tavernkeep_domain::{CharacterDraft, ClassLevel};

use crate::infrastructure::ports::RandomPort;

/// Name given to auto-generated characters.
pub const AUTO_GENERATED_NAME: &str = "Rand Oman";

const CLASS_NOT_FOUND: &str = "no class found";
const SUBCLASS_NOT_FOUND: &str = "no subclass found";

pub struct CatalogUseCases {
    random: Arc<dyn RandomPort>,
}

impl CatalogUseCases {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    pub fn race_options(&self) -> Vec<&'static str> {
        catalog::race_names()
    }

    pub fn class_options(&self) -> Vec<&'static str> {
        catalog::class_names()
    }

    pub fn subclass_options(&self, class_name: &str) -> Vec<&'static str> {
        catalog::subclass_names(class_name)
    }

    pub fn background_options(&self) -> Vec<&'static str> {
        catalog::background_names()
    }

    pub fn feat_options(&self) -> Vec<&'static str> {
        catalog::feat_names()
    }

    pub fn skill_options(&self) -> Vec<&'static str> {
        catalog::skill_names()
    }

    pub fn armor_options(&self, category: ArmorCategory) -> Vec<&'static str> {
        category.armors().map(|a| a.name).collect()
    }

    pub fn class(&self, name: &str) -> Option<&'static ClassInfo> {
        class_by_name(name)
    }

    pub fn race_description(&self, name: &str) -> String {
        race_description(name)
    }

    pub fn class_description(&self, name: &str) -> String {
        catalog::class_description(name).unwrap_or_else(|| CLASS_NOT_FOUND.to_string())
    }

    pub fn subclass_description(&self, name: &str) -> String {
        catalog::subclass_description(name).unwrap_or_else(|| SUBCLASS_NOT_FOUND.to_string())
    }

    pub fn background_description(&self, name: &str) -> String {
        background_description(name)
    }

    /// Blank means no feat picked yet.
    pub fn feat_description(&self, name: &str) -> &'static str {
        if name.trim().is_empty() {
            NO_FEAT_SELECTED
        } else {
            feat_description(name)
        }
    }

    pub fn skill_description(&self, name: &str) -> String {
        skill_description(name)
    }

    fn pick<'a>(&self, options: &[&'a str]) -> &'a str {
        if options.is_empty() {
            return "";
        }
        let last = i32::try_from(options.len() - 1).unwrap_or(i32::MAX);
        let index = usize::try_from(self.random.gen_range(0, last)).unwrap_or(0);
        options.get(index).copied().unwrap_or(options[0])
    }

    /// A random first-level draft named `name`: race, class, background and
    /// rolled scores placed by the class's ability priority. Skills and feats
    /// are left to the player. A blank name falls back to
    /// [`AUTO_GENERATED_NAME`].
    pub fn auto_generate(&self, name: &str) -> CharacterDraft {
        let name = match name.trim() {
            "" => AUTO_GENERATED_NAME,
            given => given,
        };
        let race = self.pick(&self.race_options());
        let class_name = self.pick(&self.class_options());
        let background = self.pick(&self.background_options());

        let rolled = roll_ability_scores(|low, high| self.random.gen_range(low, high));
        let ability_scores = match class_by_name(class_name) {
            Some(class) => reorder_by_priority(rolled, &class.ability_priority),
            None => rolled,
        };

        tracing::debug!(race, class = class_name, background, "Auto-generated character");

        CharacterDraft {
            name: name.to_string(),
            race: race.to_string(),
            background: background.to_string(),
            ability_scores,
            classes: vec![ClassLevel::new(class_name, 1)],
            ..CharacterDraft::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{SequenceRandom, SystemRandom};

    #[test]
    fn options_are_sorted() {
        let uc = CatalogUseCases::new(Arc::new(SystemRandom::new()));
        let races = uc.race_options();
        let mut sorted = races.clone();
        sorted.sort_unstable();
        assert_eq!(races, sorted);
        assert!(uc.class_options().contains(&"Bard"));
        assert_eq!(uc.skill_options().len(), 18);
        assert!(uc.subclass_options("Bard").contains(&"College of Lore"));
        assert_eq!(
            uc.armor_options(ArmorCategory::Light),
            vec!["Padded", "Leather", "Studded Leather"]
        );
    }

    #[test]
    fn descriptions_fall_back() {
        let uc = CatalogUseCases::new(Arc::new(SystemRandom::new()));
        assert_eq!(uc.background_description("Pirate"), "no background found");
        assert_eq!(uc.skill_description("Juggling"), "skill not found");
        assert_eq!(uc.class_description("Artificer"), CLASS_NOT_FOUND);
        assert_eq!(uc.feat_description(""), NO_FEAT_SELECTED);
        assert!(uc.class_description("Rogue").contains("Hit Die: d8"));
    }

    #[test]
    fn auto_generated_draft_is_valid() {
        let uc = CatalogUseCases::new(Arc::new(SystemRandom::new()));
        for _ in 0..25 {
            let draft = uc.auto_generate("");
            assert_eq!(draft.name, AUTO_GENERATED_NAME);
            assert_eq!(draft.total_level(), 1);
            let details = draft.validate().expect("auto-generated drafts validate");
            assert!(details
                .ability_scores
                .iter()
                .all(|(_, score)| (3..=18).contains(&score)));
        }
    }

    #[test]
    fn auto_generate_is_driven_by_the_random_port() {
        // First option of each list, then 24 sixes
        let mut values = vec![0, 0, 0];
        values.extend(std::iter::repeat(6).take(24));
        let uc = CatalogUseCases::new(Arc::new(SequenceRandom::new(values)));

        let draft = uc.auto_generate(" Vex ");
        assert_eq!(draft.name, "Vex");
        assert_eq!(draft.race, uc.race_options()[0]);
        assert_eq!(draft.classes[0].class_name, uc.class_options()[0]);
        assert_eq!(draft.background, uc.background_options()[0]);
        assert_eq!(draft.ability_scores, [18; 6]);
    }
}
