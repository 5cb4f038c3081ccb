//! Scarce attribute ceilings: one attribute may sit at 5, another at 4, another
//! at 3; everything else tops out at 2.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, warn};

use crate::Attribute;

/// Ceilings handed out in order; the last one repeats for every remaining attribute.
pub const TIERS: [i32; 4] = [5, 4, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierEntry {
    pub attribute: Attribute,
    /// Value being written now.
    pub current: i32,
    /// Last value the sheet accepted.
    pub previous: i32,
}

impl TierEntry {
    pub fn new(attribute: Attribute, current: i32, previous: i32) -> Self {
        Self { attribute, current, previous }
    }

    /// An entry with no pending change.
    pub fn settled(attribute: Attribute, value: i32) -> Self {
        Self::new(attribute, value, value)
    }

    pub fn is_change(&self) -> bool {
        self.current != self.previous
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSlot {
    pub attribute: Attribute,
    pub value: i32,
    pub cap: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAllocation {
    /// Walk order, highest claim first.
    pub slots: Vec<TierSlot>,
    /// Changes pushed above their ceiling, as attempted; each reverted to its previous value.
    pub rejected: Vec<TierSlot>,
}

impl TierAllocation {
    pub fn cap_of(&self, attribute: Attribute) -> Option<i32> {
        self.slots.iter().find(|s| s.attribute == attribute).map(|s| s.cap)
    }

    pub fn value_of(&self, attribute: Attribute) -> Option<i32> {
        self.slots.iter().find(|s| s.attribute == attribute).map(|s| s.value)
    }

    pub fn is_rejected(&self, attribute: Attribute) -> bool {
        self.rejected.iter().any(|s| s.attribute == attribute)
    }
}

fn walk_order(a: &TierEntry, b: &TierEntry) -> Ordering {
    b.current
        .cmp(&a.current)
        .then(b.previous.cmp(&a.previous))
        .then_with(|| a.attribute.key().cmp(b.attribute.key()))
}

/// Hand out ceilings. A tier stays on offer until an attribute reaches it; whoever
/// reaches it first in walk order keeps it.
pub fn assign_tiers(entries: &[TierEntry]) -> Vec<TierSlot> {
    let mut order = entries.to_vec();
    order.sort_by(walk_order);

    let mut cursor = 0;
    order
        .iter()
        .map(|e| {
            let cap = TIERS[cursor];
            if e.current >= cap && cursor + 1 < TIERS.len() {
                cursor += 1;
            }
            TierSlot { attribute: e.attribute, value: e.current, cap }
        })
        .collect()
}

/// Assign ceilings, reject changes that overshoot theirs, then assign again on the
/// accepted values.
pub fn allocate(entries: &[TierEntry]) -> TierAllocation {
    let first = assign_tiers(entries);

    let mut rejected = Vec::new();
    let accepted: Vec<TierEntry> = entries
        .iter()
        .map(|e| {
            let cap = first
                .iter()
                .find(|s| s.attribute == e.attribute)
                .map_or(TIERS[TIERS.len() - 1], |s| s.cap);
            if e.is_change() && e.current > cap {
                warn!(attribute = %e.attribute, value = e.current, cap, "attribute over its tier; reverting");
                rejected.push(TierSlot { attribute: e.attribute, value: e.current, cap });
                TierEntry { current: e.previous, ..*e }
            } else {
                *e
            }
        })
        .collect();

    let slots = assign_tiers(&accepted);
    debug!(?slots, ?rejected, "tiers allocated");
    TierAllocation { slots, rejected }
}
