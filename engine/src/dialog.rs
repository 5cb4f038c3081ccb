//! What the roll and delete dialogs offer. The host draws them; these are the rules
//! behind which controls are enabled.

use serde::Serialize;

use crate::{
    equipment::format_bonus, i18n::MessageKey, Attribute, Character, Localizer, RollType,
    SheetError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentChoice {
    pub label: String,
    pub bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOptions {
    pub title: String,
    pub attribute: Attribute,
    pub enabled_types: Vec<RollType>,
    pub selected_type: RollType,
    /// The curse box can be ticked (still subject to picking a normal roll).
    pub curse_enabled: bool,
    /// First entry is always "None" with a bonus of 0.
    pub equipment: Vec<EquipmentChoice>,
}

impl RollOptions {
    /// Whether the curse box stays enabled once `roll_type` is picked.
    pub fn curse_allowed_with(&self, roll_type: RollType) -> bool {
        self.curse_enabled && roll_type == RollType::Normal
    }
}

pub fn roll_options(character: &Character, attribute: Attribute, l10n: &dyn Localizer) -> RollOptions {
    let exhausted = character.curse_resistance().is_exhausted();
    let (enabled_types, selected_type) = if exhausted {
        (vec![RollType::Disadvantage], RollType::Disadvantage)
    } else {
        (RollType::ALL.to_vec(), RollType::Normal)
    };

    let mut equipment = vec![EquipmentChoice { label: l10n.localize(MessageKey::NoEquipment), bonus: 0 }];
    equipment.extend(character.equipment().map(|item| EquipmentChoice {
        label: format!("{} ({})", item.name, format_bonus(item.bonus())),
        bonus: item.bonus(),
    }));

    RollOptions {
        title: format!("{} {}", l10n.localize(MessageKey::RollOf), l10n.localize(attribute.label())),
        attribute,
        enabled_types,
        selected_type,
        curse_enabled: !exhausted,
        equipment,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionPrompt {
    pub title: String,
    pub message: String,
    pub confirm: String,
    pub cancel: String,
}

pub fn deletion_prompt(
    character: &Character,
    item_id: &str,
    l10n: &dyn Localizer,
) -> Result<DeletionPrompt, SheetError> {
    let item = character.item(item_id)?;
    Ok(DeletionPrompt {
        title: l10n.localize(MessageKey::ConfirmDeletionTitle),
        message: l10n.format(MessageKey::ConfirmDeletionMessage, &[("item", item.name.as_str())]),
        confirm: l10n.localize(MessageKey::Delete),
        cancel: l10n.localize(MessageKey::Cancel),
    })
}
