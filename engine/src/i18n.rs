use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::content;

/// Prefix of every string key the sheets look up.
pub const NAMESPACE: &str = "YOKAIHUNTERSSOCIETY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Courage,
    SelfControl,
    Wisdom,
    Sharpness,
    NewItem,
    ItemNotFound,
    ItemDeleted,
    ErrorOpeningSheet,
    ConfirmDeletionTitle,
    ConfirmDeletionMessage,
    Delete,
    Cancel,
    AttributeCapWarning,
    AttributeTierWarning,
    MaxHealthCapWarning,
    HealthCapWarning,
    ErrorAttributeNotFound,
    RollType,
    RollOf,
    Roll,
    Normal,
    Advantage,
    Disadvantage,
    WithAdvantage,
    WithDisadvantage,
    CurseRoll,
    CurseHasFallen,
    SelectEquipment,
    NoEquipment,
    Attribute,
    EncumbrancePenalty,
    Equipment,
    TotalResult,
    Success,
    BadOmen,
    Failure,
}

impl MessageKey {
    pub fn id(self) -> &'static str {
        use MessageKey::*;
        match self {
            Courage => "Courage",
            SelfControl => "SelfControl",
            Wisdom => "Wisdom",
            Sharpness => "Sharpness",
            NewItem => "NewItem",
            ItemNotFound => "ItemNotFound",
            ItemDeleted => "ItemDeleted",
            ErrorOpeningSheet => "ErrorOpeningSheet",
            ConfirmDeletionTitle => "ConfirmDeletionTitle",
            ConfirmDeletionMessage => "ConfirmDeletionMessage",
            Delete => "Delete",
            Cancel => "Cancel",
            AttributeCapWarning => "AttributeCapWarning",
            AttributeTierWarning => "AttributeTierWarning",
            MaxHealthCapWarning => "MaxHealthCapWarning",
            HealthCapWarning => "HealthCapWarning",
            ErrorAttributeNotFound => "ErrorAttributeNotFound",
            RollType => "RollType",
            RollOf => "RollOf",
            Roll => "Roll",
            Normal => "Normal",
            Advantage => "Advantage",
            Disadvantage => "Disadvantage",
            WithAdvantage => "WithAdvantage",
            WithDisadvantage => "WithDisadvantage",
            CurseRoll => "CurseRoll",
            CurseHasFallen => "CurseHasFallen",
            SelectEquipment => "SelectEquipment",
            NoEquipment => "None",
            Attribute => "Attribute",
            EncumbrancePenalty => "EncumbrancePenalty",
            Equipment => "Equipment",
            TotalResult => "TotalResult",
            Success => "Success",
            BadOmen => "BadOmen",
            Failure => "Failure",
        }
    }

    /// Full key as found in language files, e.g. `YOKAIHUNTERSSOCIETY.BadOmen`.
    pub fn qualified(self) -> String {
        format!("{}.{}", NAMESPACE, self.id())
    }
}

/// The host's string lookup. Missing keys come back as the qualified key itself,
/// which is what the host shows for an untranslated string.
pub trait Localizer {
    fn lookup(&self, key: &str) -> Option<String>;

    fn localize(&self, key: MessageKey) -> String {
        let qualified = key.qualified();
        self.lookup(&qualified).unwrap_or(qualified)
    }

    /// Localize and fill `{name}` placeholders.
    fn format(&self, key: MessageKey, args: &[(&str, &str)]) -> String {
        let mut text = self.localize(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Parse a language file. Both flat (`"NS.Key": ".."`) and nested
    /// (`"NS": { "Key": ".." }`) layouts are accepted.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text).context("language file is not valid JSON")?;
        let mut entries = HashMap::new();
        flatten("", &root, &mut entries);
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read language file: {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("failed to parse language file: {}", path.display()))
    }

    /// One of the language files shipped with the crate.
    pub fn builtin(lang: &str) -> Result<Self> {
        let text = content::builtin_languages()
            .get(lang)
            .copied()
            .with_context(|| format!("no built-in language '{}'", lang))?;
        Self::from_json_str(text)
    }

    pub fn english() -> Self {
        Self::builtin("en").unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() { k.clone() } else { format!("{}.{}", prefix, k) };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}

impl Localizer for Catalog {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_and_flat_layouts_agree() {
        let flat = Catalog::from_json_str(r#"{"YOKAIHUNTERSSOCIETY.Success": "Éxito"}"#).unwrap();
        let nested =
            Catalog::from_json_str(r#"{"YOKAIHUNTERSSOCIETY": {"Success": "Éxito"}}"#).unwrap();
        assert_eq!(flat.localize(MessageKey::Success), "Éxito");
        assert_eq!(nested.localize(MessageKey::Success), "Éxito");
    }

    #[test]
    fn missing_key_falls_back_to_qualified_key() {
        let empty = Catalog::default();
        assert_eq!(empty.localize(MessageKey::BadOmen), "YOKAIHUNTERSSOCIETY.BadOmen");
    }

    #[test]
    fn placeholders_are_filled() {
        let en = Catalog::english();
        assert_eq!(
            en.format(MessageKey::ItemDeleted, &[("item", "Katana")]),
            "Katana was deleted."
        );
    }

    #[test]
    fn builtin_languages_cover_every_roll_label() {
        for lang in ["en", "es"] {
            let cat = Catalog::builtin(lang).unwrap();
            for key in [
                MessageKey::CurseRoll,
                MessageKey::TotalResult,
                MessageKey::Success,
                MessageKey::BadOmen,
                MessageKey::Failure,
                MessageKey::CurseHasFallen,
            ] {
                assert!(cat.lookup(&key.qualified()).is_some(), "{lang} lacks {}", key.id());
            }
        }
    }
}
