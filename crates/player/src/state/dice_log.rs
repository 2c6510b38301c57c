//! Roll history shown beside the dice roller and the character sheet.

use std::collections::VecDeque;

use tavernkeep_domain::DiceRollResult;

/// Entries kept before the oldest are dropped.
pub const DICE_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceLogEntry {
    /// What was rolled, e.g. "Stealth check" or "3d6"
    pub label: String,
    pub result: DiceRollResult,
}

impl DiceLogEntry {
    pub fn line(&self) -> String {
        let mut line = format!("{}: {}", self.label, self.result.breakdown());
        if self.result.is_natural_20() {
            line.push_str(" (natural 20)");
        } else if self.result.is_natural_1() {
            line.push_str(" (natural 1)");
        }
        line
    }
}

/// Newest-first roll history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiceLog {
    entries: VecDeque<DiceLogEntry>,
}

impl DiceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, result: DiceRollResult) {
        self.entries.push_front(DiceLogEntry {
            label: label.into(),
            result,
        });
        self.entries.truncate(DICE_LOG_CAPACITY);
    }

    pub fn latest(&self) -> Option<&DiceLogEntry> {
        self.entries.front()
    }

    pub fn entries(&self) -> impl Iterator<Item = &DiceLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every logged total.
    pub fn total(&self) -> i32 {
        self.entries.iter().map(|e| e.result.total).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
