//! Character records as the host stores them, and the sheet rules applied when
//! they are shown, edited and rolled.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    attributes::clamp_attribute,
    equipment::{self, generate_id, Item, ItemKind, ItemPatch},
    health::{cap_max, cap_value, HealthClamp},
    i18n::MessageKey,
    roll,
    store::CharacterStore,
    tiers::{self, TierEntry},
    Attribute, Attributes, CurseResistance, DieRoller, Health, Localizer, Notice, RollRequest,
    RollResult, SheetError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActorKind {
    Hunter,
    NpcYokai,
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActorKind::Hunter => "hunter",
            ActorKind::NpcYokai => "npcYokai",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub health: Health,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curse_resistance: Option<CurseResistance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    // Older NPC records used these before `description` / `level`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default = "generate_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActorKind,
    #[serde(default)]
    pub system: SystemData,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A sheet input addressed by its host path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetField {
    Attribute(Attribute),
    HealthMax,
    HealthValue,
}

impl FromStr for SheetField {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system.health.max" => Ok(SheetField::HealthMax),
            "system.health.value" => Ok(SheetField::HealthValue),
            _ => {
                let attr = s
                    .strip_prefix("system.attributes.")
                    .map(|rest| rest.strip_suffix(".value").unwrap_or(rest))
                    .ok_or_else(|| SheetError::UnknownField(s.to_string()))?;
                attr.parse()
                    .map(SheetField::Attribute)
                    .map_err(|_| SheetError::UnknownField(s.to_string()))
            }
        }
    }
}

/// Several fields written at once, checked before they are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorUpdate {
    #[serde(default)]
    pub attributes: BTreeMap<Attribute, i32>,
    #[serde(default)]
    pub health_max: Option<i32>,
    #[serde(default)]
    pub health_value: Option<i32>,
    #[serde(default)]
    pub curse_resistance: Option<CurseResistance>,
}

impl ActorUpdate {
    pub fn attribute(mut self, attribute: Attribute, value: i32) -> Self {
        self.attributes.insert(attribute, value);
        self
    }

    pub fn health_max(mut self, max: i32) -> Self {
        self.health_max = Some(max);
        self
    }

    pub fn health_value(mut self, value: i32) -> Self {
        self.health_value = Some(value);
        self
    }
}

/// Integer text as typed into a sheet; anything unparsable counts as 0. Numbers too
/// large for an `i32` saturate so the field bounds still clamp them.
pub fn parse_input(raw: &str) -> i32 {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && matches!(c, '-' | '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    let number = &trimmed[..digits_end];
    let negative = number.starts_with('-');
    if number.trim_start_matches(|c: char| c == '-' || c == '+').is_empty() {
        return 0;
    }
    match number.parse::<i64>().map(i32::try_from) {
        Ok(Ok(n)) => n,
        Ok(Err(_)) | Err(_) if negative => i32::MIN,
        _ => i32::MAX,
    }
}

fn health_notice(clamp: HealthClamp) -> Notice {
    match clamp {
        HealthClamp::MaxCapped => Notice::warn(MessageKey::MaxHealthCapWarning),
        HealthClamp::ValueCapped => Notice::warn(MessageKey::HealthCapWarning),
    }
}

fn attribute_cap_notice(attribute: Attribute) -> Notice {
    Notice::warn(MessageKey::AttributeCapWarning).with_label("attribute", attribute.label())
}

impl Character {
    /// A new hunter: every attribute at 0 and all four resistance boxes checked.
    pub fn new_hunter(name: impl Into<String>) -> Self {
        let mut attributes = Attributes::default();
        attributes.fill_missing();
        Self {
            id: generate_id(),
            name: name.into(),
            kind: ActorKind::Hunter,
            system: SystemData {
                attributes,
                curse_resistance: Some(CurseResistance::full()),
                ..Default::default()
            },
            items: Vec::new(),
        }
    }

    pub fn new_npc(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            kind: ActorKind::NpcYokai,
            system: SystemData {
                description: Some(String::new()),
                level: Some(0),
                ..Default::default()
            },
            items: Vec::new(),
        }
    }

    pub fn is_hunter(&self) -> bool {
        self.kind == ActorKind::Hunter
    }

    /// Fill the defaults a sheet needs before it can be shown.
    pub fn prepare(&mut self) {
        match self.kind {
            ActorKind::Hunter => {
                self.system.attributes.fill_missing();
                if self.system.curse_resistance.is_none() {
                    debug!(character = %self.id, "hunter without curse resistance; using sheet default");
                    self.system.curse_resistance = Some(CurseResistance::hunter_sheet_default());
                }
            }
            ActorKind::NpcYokai => {
                if self.system.description.is_none() {
                    self.system.description =
                        Some(self.system.background.clone().unwrap_or_default());
                }
                if self.system.level.is_none() {
                    self.system.level = Some(self.system.age.unwrap_or(0));
                }
            }
        }
        for item in &mut self.items {
            item.prepare();
        }
    }

    /// Resistance as the sheet shows it, defaults included.
    pub fn curse_resistance(&self) -> CurseResistance {
        self.system.curse_resistance.unwrap_or_else(|| match self.kind {
            ActorKind::Hunter => CurseResistance::hunter_sheet_default(),
            ActorKind::NpcYokai => CurseResistance::default(),
        })
    }

    pub fn equipment(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_equipment())
    }

    pub fn movimientos(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.kind == ItemKind::Movimiento)
    }

    pub fn equipment_count(&self) -> usize {
        equipment::equipment_count(&self.items)
    }

    pub fn item(&self, id: &str) -> Result<&Item, SheetError> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| SheetError::ItemNotFound(id.to_string()))
    }

    /// Equipment by display name, ignoring case.
    pub fn find_equipment(&self, name: &str) -> Option<&Item> {
        self.equipment().find(|i| i.name.eq_ignore_ascii_case(name.trim()))
    }

    /* ---------------- edits ---------------- */

    /// One field typed into the sheet. Bad numbers become 0; values past their bounds
    /// are clamped with a warning.
    pub fn apply_input(&mut self, field: &str, raw: &str) -> Result<Vec<Notice>, SheetError> {
        let parsed: SheetField = field.parse()?;
        let value = parse_input(raw);
        let mut notices = Vec::new();
        match parsed {
            SheetField::Attribute(attribute) => {
                self.require_hunter(field)?;
                let (value, capped) = clamp_attribute(value);
                if capped {
                    notices.push(attribute_cap_notice(attribute));
                }
                notices.extend(self.commit_attributes(&[(attribute, value)]));
            }
            SheetField::HealthMax => {
                notices.extend(self.system.health.set_max(value).into_iter().map(health_notice));
            }
            SheetField::HealthValue => {
                notices.extend(self.system.health.set_value(value).map(health_notice));
            }
        }
        Ok(notices)
    }

    /// Several fields at once: same bounds as single inputs, with current health
    /// checked against the maximum from this same update when it carries one.
    pub fn apply_update(&mut self, update: &ActorUpdate) -> Result<Vec<Notice>, SheetError> {
        if !update.attributes.is_empty() {
            self.require_hunter("system.attributes")?;
        }
        let mut notices = Vec::new();

        let mut proposed = Vec::with_capacity(update.attributes.len());
        for (&attribute, &value) in &update.attributes {
            let (value, capped) = clamp_attribute(value);
            if capped {
                notices.push(attribute_cap_notice(attribute));
            }
            proposed.push((attribute, value));
        }
        if !proposed.is_empty() {
            notices.extend(self.commit_attributes(&proposed));
        }

        let health = &mut self.system.health;
        if let Some(max) = update.health_max {
            let (max, capped) = cap_max(max);
            if capped {
                notices.push(health_notice(HealthClamp::MaxCapped));
            }
            health.max = max;
        }
        match update.health_value {
            Some(value) => {
                let (value, capped) = cap_value(value, health.max);
                if capped {
                    notices.push(health_notice(HealthClamp::ValueCapped));
                }
                health.value = value;
            }
            None if health.value > health.max => {
                health.value = health.max;
                notices.push(health_notice(HealthClamp::ValueCapped));
            }
            None => {}
        }

        if let Some(res) = update.curse_resistance {
            self.system.curse_resistance = Some(res);
        }
        Ok(notices)
    }

    fn require_hunter(&self, field: &str) -> Result<(), SheetError> {
        if self.is_hunter() {
            Ok(())
        } else {
            Err(SheetError::UnsupportedField { field: field.to_string(), kind: self.kind })
        }
    }

    /// Run proposed attribute values through the tier allocator against the stored
    /// ones; accepted values are written, rejected ones raise a warning.
    fn commit_attributes(&mut self, proposed: &[(Attribute, i32)]) -> Vec<Notice> {
        let entries: Vec<TierEntry> = Attribute::ALL
            .iter()
            .map(|&attribute| {
                let previous = self.system.attributes.value_or_zero(attribute);
                let current = proposed
                    .iter()
                    .find(|(a, _)| *a == attribute)
                    .map_or(previous, |&(_, v)| v);
                TierEntry::new(attribute, current, previous)
            })
            .collect();
        let allocation = tiers::allocate(&entries);

        let mut notices = Vec::new();
        for entry in &entries {
            if let Some(slot) = allocation.rejected.iter().find(|s| s.attribute == entry.attribute) {
                notices.push(
                    Notice::warn(MessageKey::AttributeTierWarning)
                        .with_label("attribute", entry.attribute.label())
                        .with("cap", slot.cap.to_string()),
                );
            } else if proposed.iter().any(|(a, _)| *a == entry.attribute) {
                self.system.attributes.set(entry.attribute, entry.current);
            }
        }
        notices
    }

    /* ---------------- items ---------------- */

    /// Hunters get a blank equipment item, NPCs a blank move.
    pub fn add_item(&mut self, l10n: &dyn Localizer) -> &Item {
        let kind = match self.kind {
            ActorKind::Hunter => ItemKind::Equipment,
            ActorKind::NpcYokai => ItemKind::Movimiento,
        };
        self.items.push(Item::new(kind, l10n.localize(MessageKey::NewItem)));
        &self.items[self.items.len() - 1]
    }

    pub fn edit_item(&mut self, id: &str, patch: &ItemPatch) -> Result<&Item, SheetError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| SheetError::ItemNotFound(id.to_string()))?;
        patch.apply(item);
        Ok(item)
    }

    pub fn remove_item(&mut self, id: &str) -> Result<Notice, SheetError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| SheetError::ItemNotFound(id.to_string()))?;
        let item = self.items.remove(idx);
        Ok(Notice::info(MessageKey::ItemDeleted).with("item", item.name))
    }

    /* ---------------- rolls ---------------- */

    /// Roll one attribute. A missing attribute value aborts before any die is thrown.
    /// When the curse takes a box, the new state is kept here and handed to `store`;
    /// a failed write is logged and the roll still stands.
    pub fn roll_attribute<R, S>(
        &mut self,
        request: &RollRequest,
        dice: &mut R,
        store: &mut S,
    ) -> Result<RollResult, SheetError>
    where
        R: DieRoller + ?Sized,
        S: CharacterStore + ?Sized,
    {
        let base = self
            .system
            .attributes
            .get(request.attribute)
            .ok_or(SheetError::AttributeNotFound(request.attribute))?;
        let resistance = self.curse_resistance();
        let result = roll::resolve(dice, request, base, self.equipment_count(), &resistance);

        if let Some(updated) = result.updated_curse_resistance {
            self.system.curse_resistance = Some(updated);
            if let Err(e) = store.save_curse_resistance(&self.id, &updated) {
                warn!(character = %self.id, error = %e, "curse resistance write-back failed");
            }
        }
        Ok(result)
    }
}
