//! Character creation form
//!
//! Editing rules for the creation screen, kept free of Dioxus so they can be
//! unit tested. The view holds one `CreationForm` in a signal and submits
//! `to_draft()` to the engine, which does the authoritative validation.

use tavernkeep_domain::catalog::{background_by_name, class_by_name, race_by_name, SUBCLASS_LEVEL};
use tavernkeep_domain::value_objects::{MAX_ABILITY_SCORE, MIN_ABILITY_SCORE};
use tavernkeep_domain::{Ability, CharacterDraft, ClassLevel, MAX_LEVEL};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationForm {
    draft: CharacterDraft,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a generated or previously entered draft.
    pub fn from_draft(draft: CharacterDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &CharacterDraft {
        &self.draft
    }

    /// The draft to submit, without blank feat rows.
    pub fn to_draft(&self) -> CharacterDraft {
        let mut draft = self.draft.clone();
        draft.feats.retain(|f| !f.trim().is_empty());
        draft
    }

    pub fn set_name(&mut self, name: String) {
        self.draft.name = name;
    }

    pub fn set_race(&mut self, race: String) {
        self.draft.race = race;
        self.prune();
    }

    pub fn set_background(&mut self, background: String) {
        self.draft.background = background;
        self.prune();
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    pub fn classes(&self) -> &[ClassLevel] {
        &self.draft.classes
    }

    /// First class taken; decides where rolled scores go.
    pub fn primary_class(&self) -> Option<&str> {
        self.draft.classes.first().map(|c| c.class_name.as_str())
    }

    pub fn total_level(&self) -> u8 {
        self.draft.total_level()
    }

    /// Levels still available before the character cap.
    pub fn remaining_levels(&self) -> u8 {
        MAX_LEVEL.saturating_sub(self.total_level())
    }

    /// Add a class at level 1. Unknown or repeated classes are ignored.
    pub fn add_class(&mut self, class_name: &str) -> bool {
        let Some(class) = class_by_name(class_name) else {
            return false;
        };
        if self.remaining_levels() == 0 || self.has_class(class.name) {
            return false;
        }
        self.draft.classes.push(ClassLevel::new(class.name, 1));
        self.prune();
        true
    }

    pub fn remove_class(&mut self, index: usize) {
        if index < self.draft.classes.len() {
            self.draft.classes.remove(index);
            self.prune();
        }
    }

    /// Swap the class of a row. The subclass is reset.
    pub fn set_class(&mut self, index: usize, class_name: &str) -> bool {
        let Some(class) = class_by_name(class_name) else {
            return false;
        };
        let taken_elsewhere = self
            .draft
            .classes
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.class_name == class.name);
        if taken_elsewhere {
            return false;
        }
        match self.draft.classes.get_mut(index) {
            Some(row) => {
                row.class_name = class.name.to_string();
                row.subclass = None;
                true
            }
            None => false,
        }
    }

    /// Set a row's level, clamped so the total stays within the cap.
    pub fn set_level(&mut self, index: usize, level: u8) {
        let others: u8 = self
            .draft
            .classes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, c)| c.level)
            .sum();
        let max = MAX_LEVEL.saturating_sub(others).max(1);
        if let Some(row) = self.draft.classes.get_mut(index) {
            row.level = level.clamp(1, max);
            if row.level < SUBCLASS_LEVEL {
                row.subclass = None;
            }
        }
        self.prune();
    }

    pub fn subclass_unlocked(&self, index: usize) -> bool {
        self.draft
            .classes
            .get(index)
            .is_some_and(|c| c.level >= SUBCLASS_LEVEL)
    }

    /// A blank name clears the subclass.
    pub fn set_subclass(&mut self, index: usize, subclass: &str) {
        let unlocked = self.subclass_unlocked(index);
        if let Some(row) = self.draft.classes.get_mut(index) {
            let subclass = subclass.trim();
            row.subclass = (unlocked && !subclass.is_empty()).then(|| subclass.to_string());
        }
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.draft.classes.iter().any(|c| c.class_name == class_name)
    }

    // -------------------------------------------------------------------------
    // Ability scores
    // -------------------------------------------------------------------------

    pub fn score(&self, ability: Ability) -> i32 {
        self.draft.ability_scores[ability.index()]
    }

    pub fn increase_score(&mut self, ability: Ability) {
        let slot = &mut self.draft.ability_scores[ability.index()];
        *slot = (*slot + 1).min(MAX_ABILITY_SCORE);
    }

    pub fn decrease_score(&mut self, ability: Ability) {
        let slot = &mut self.draft.ability_scores[ability.index()];
        *slot = (*slot - 1).max(MIN_ABILITY_SCORE);
    }

    pub fn set_scores(&mut self, scores: [i32; 6]) {
        self.draft.ability_scores =
            scores.map(|s| s.clamp(MIN_ABILITY_SCORE, MAX_ABILITY_SCORE));
    }

    // -------------------------------------------------------------------------
    // Skills
    // -------------------------------------------------------------------------

    /// Skills the race and background hand out for free.
    pub fn granted_skills(&self) -> Vec<&'static str> {
        let race = race_by_name(&self.draft.race)
            .map(|r| r.granted_skills)
            .unwrap_or_default();
        let background = background_by_name(&self.draft.background)
            .map(|b| b.skills)
            .unwrap_or_default();
        race.iter().chain(background.iter()).copied().collect()
    }

    pub fn is_granted(&self, skill: &str) -> bool {
        self.granted_skills()
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill))
    }

    pub fn is_picked(&self, skill: &str) -> bool {
        self.draft
            .skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill))
    }

    pub fn is_proficient(&self, skill: &str) -> bool {
        self.is_picked(skill) || self.is_granted(skill)
    }

    pub fn has_expertise(&self, skill: &str) -> bool {
        self.draft
            .expertise
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill))
    }

    /// Pick or unpick a skill. Granted skills cannot be unpicked.
    pub fn toggle_skill(&mut self, skill: &str) {
        if self.is_picked(skill) {
            self.draft.skills.retain(|s| !s.eq_ignore_ascii_case(skill));
            self.prune();
        } else if !self.is_granted(skill) {
            self.draft.skills.push(skill.to_string());
        }
    }

    /// Expertise is only available on proficient skills.
    pub fn toggle_expertise(&mut self, skill: &str) {
        if self.has_expertise(skill) {
            self.draft
                .expertise
                .retain(|s| !s.eq_ignore_ascii_case(skill));
        } else if self.is_proficient(skill) {
            self.draft.expertise.push(skill.to_string());
        }
    }

    // -------------------------------------------------------------------------
    // Feats
    // -------------------------------------------------------------------------

    pub fn feats(&self) -> &[String] {
        &self.draft.feats
    }

    pub fn feat_slots(&self) -> usize {
        self.draft.feat_slots()
    }

    pub fn can_add_feat(&self) -> bool {
        self.draft.feats.len() < self.feat_slots()
    }

    pub fn add_feat(&mut self, feat: &str) -> bool {
        if !self.can_add_feat() {
            return false;
        }
        self.draft.feats.push(feat.to_string());
        true
    }

    pub fn set_feat(&mut self, index: usize, feat: &str) {
        if let Some(slot) = self.draft.feats.get_mut(index) {
            *slot = feat.to_string();
        }
    }

    pub fn remove_feat(&mut self, index: usize) {
        if index < self.draft.feats.len() {
            self.draft.feats.remove(index);
        }
    }

    /// Drop choices that the latest edit made impossible.
    fn prune(&mut self) {
        let slots = self.feat_slots();
        self.draft.feats.truncate(slots);

        let expertise = std::mem::take(&mut self.draft.expertise);
        self.draft.expertise = expertise
            .into_iter()
            .filter(|s| self.is_proficient(s))
            .collect();
    }
}
