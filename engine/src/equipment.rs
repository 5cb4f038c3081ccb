use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use crate::Attribute;

/// Equipment items a hunter carries before physical rolls suffer.
pub const ENCUMBRANCE_LIMIT: usize = 8;

const ID_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Equipment,
    Gear,
    /// A Yokai's signature move, listed on NPC sheets.
    Movimiento,
}

impl ItemKind {
    pub fn carries_bonus(self) -> bool {
        matches!(self, ItemKind::Equipment | ItemKind::Gear)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default = "generate_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<i32>,
}

impl Item {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            kind,
            description: String::new(),
            bonus: kind.carries_bonus().then_some(0),
        }
    }

    pub fn with_bonus(mut self, bonus: i32) -> Self {
        if self.kind.carries_bonus() {
            self.bonus = Some(bonus);
        }
        self
    }

    pub fn bonus(&self) -> i32 {
        self.bonus.unwrap_or(0)
    }

    /// Item-sheet defaults: bonus-bearing kinds get 0, moves never carry one.
    pub fn prepare(&mut self) {
        if self.kind.carries_bonus() {
            self.bonus.get_or_insert(0);
        } else {
            self.bonus = None;
        }
    }

    pub fn is_equipment(&self) -> bool {
        self.kind == ItemKind::Equipment
    }
}

/// Fields an item edit may touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub bonus: Option<i32>,
}

impl ItemPatch {
    pub fn apply(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(bonus) = self.bonus {
            if item.kind.carries_bonus() {
                item.bonus = Some(bonus);
            }
        }
    }
}

/// Host-style document id: 16 random alphanumerics.
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

pub fn equipment_count(items: &[Item]) -> usize {
    items.iter().filter(|i| i.is_equipment()).count()
}

/// Penalty subtracted from courage and self-control once the pack holds more than
/// `ENCUMBRANCE_LIMIT` equipment items.
pub fn encumbrance_penalty(attribute: Attribute, equipment_count: usize) -> i32 {
    if attribute.is_encumbered_by_gear() && equipment_count > ENCUMBRANCE_LIMIT {
        i32::try_from(equipment_count - ENCUMBRANCE_LIMIT).unwrap_or(i32::MAX)
    } else {
        0
    }
}

/// "+2", "-1", "+0".
pub fn format_bonus(bonus: i32) -> String {
    format!("{:+}", bonus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_applies_only_to_physical_attributes_past_limit() {
        assert_eq!(encumbrance_penalty(Attribute::Courage, 8), 0);
        assert_eq!(encumbrance_penalty(Attribute::Courage, 10), 2);
        assert_eq!(encumbrance_penalty(Attribute::SelfControl, 9), 1);
        assert_eq!(encumbrance_penalty(Attribute::Wisdom, 12), 0);
        assert_eq!(encumbrance_penalty(Attribute::Sharpness, 12), 0);
    }

    #[test]
    fn huge_pack_penalty_stays_positive() {
        assert_eq!(encumbrance_penalty(Attribute::Courage, usize::MAX), i32::MAX);
    }

    #[test]
    fn only_equipment_counts_toward_encumbrance() {
        let items = vec![
            Item::new(ItemKind::Equipment, "Ofuda"),
            Item::new(ItemKind::Gear, "Lantern"),
            Item::new(ItemKind::Movimiento, "Spectral Claw"),
            Item::new(ItemKind::Equipment, "Salt"),
        ];
        assert_eq!(equipment_count(&items), 2);
    }

    #[test]
    fn moves_never_carry_a_bonus() {
        let mut m = Item::new(ItemKind::Movimiento, "Howl").with_bonus(3);
        assert_eq!(m.bonus, None);
        m.bonus = Some(2);
        m.prepare();
        assert_eq!(m.bonus, None);

        let mut e: Item =
            serde_json::from_str(r#"{"name": "Katana", "type": "equipment"}"#).unwrap();
        e.prepare();
        assert_eq!(e.bonus, Some(0));
        assert_eq!(e.id.len(), 16);
    }

    #[test]
    fn signed_bonus_labels() {
        assert_eq!(format_bonus(2), "+2");
        assert_eq!(format_bonus(-1), "-1");
        assert_eq!(format_bonus(0), "+0");
    }
}
