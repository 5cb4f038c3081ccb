use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const CURSE_SLOTS: usize = 4;

/// Four resistance boxes keyed "1".."4" on the sheet. A checked box is one unit of
/// resistance the hunter can still spend against the curse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, bool>", into = "IndexMap<String, bool>")]
pub struct CurseResistance {
    slots: [bool; CURSE_SLOTS],
}

impl CurseResistance {
    pub fn new(slots: [bool; CURSE_SLOTS]) -> Self {
        Self { slots }
    }

    /// Every box checked, as a freshly created hunter starts.
    pub fn full() -> Self {
        Self { slots: [true; CURSE_SLOTS] }
    }

    /// Shown for a hunter whose record predates the field.
    pub fn hunter_sheet_default() -> Self {
        Self { slots: [true, true, false, false] }
    }

    /// First `count` boxes checked.
    pub fn with_remaining(count: usize) -> Self {
        let mut slots = [false; CURSE_SLOTS];
        for slot in slots.iter_mut().take(count) {
            *slot = true;
        }
        Self { slots }
    }

    pub fn slots(&self) -> [bool; CURSE_SLOTS] {
        self.slots
    }

    /// Box by its sheet key, 1-based.
    pub fn slot(&self, key: usize) -> Option<bool> {
        key.checked_sub(1).and_then(|i| self.slots.get(i).copied())
    }

    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| **s).count()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Uncheck the lowest-keyed checked box and return its key.
    pub fn fall(&mut self) -> Option<usize> {
        let idx = self.slots.iter().position(|s| *s)?;
        self.slots[idx] = false;
        Some(idx + 1)
    }
}

impl From<IndexMap<String, bool>> for CurseResistance {
    fn from(map: IndexMap<String, bool>) -> Self {
        let mut slots = [false; CURSE_SLOTS];
        for (key, checked) in map {
            if let Ok(n) = key.trim().parse::<usize>() {
                if (1..=CURSE_SLOTS).contains(&n) {
                    slots[n - 1] = checked;
                }
            }
        }
        Self { slots }
    }
}

impl From<CurseResistance> for IndexMap<String, bool> {
    fn from(res: CurseResistance) -> Self {
        res.slots
            .iter()
            .enumerate()
            .map(|(i, checked)| ((i + 1).to_string(), *checked))
            .collect()
    }
}

impl fmt::Display for CurseResistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for checked in self.slots {
            f.write_str(if checked { "●" } else { "○" })?;
        }
        Ok(())
    }
}
