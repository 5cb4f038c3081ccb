use std::fmt;

use serde::Serialize;

use crate::{i18n::MessageKey, Localizer, SheetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoticeLevel::Info => "INFO",
            NoticeLevel::Warn => "WARN",
            NoticeLevel::Error => "ERROR",
        })
    }
}

/// A toast for the host to show. Arguments are already-resolved text for the
/// message's `{placeholders}`, except attribute names, which are localized late.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    #[serde(serialize_with = "serialize_key")]
    pub key: MessageKey,
    pub args: Vec<(String, NoticeArg)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NoticeArg {
    Text(String),
    Label(#[serde(serialize_with = "serialize_key")] MessageKey),
}

fn serialize_key<S: serde::Serializer>(key: &MessageKey, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&key.qualified())
}

impl Notice {
    fn new(level: NoticeLevel, key: MessageKey) -> Self {
        Self { level, key, args: Vec::new() }
    }

    pub fn info(key: MessageKey) -> Self {
        Self::new(NoticeLevel::Info, key)
    }

    pub fn warn(key: MessageKey) -> Self {
        Self::new(NoticeLevel::Warn, key)
    }

    pub fn error(key: MessageKey) -> Self {
        Self::new(NoticeLevel::Error, key)
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.args.push((name.to_string(), NoticeArg::Text(value.into())));
        self
    }

    pub fn with_label(mut self, name: &str, label: MessageKey) -> Self {
        self.args.push((name.to_string(), NoticeArg::Label(label)));
        self
    }

    pub fn render(&self, l10n: &dyn Localizer) -> String {
        let resolved: Vec<(String, String)> = self
            .args
            .iter()
            .map(|(name, arg)| {
                let text = match arg {
                    NoticeArg::Text(t) => t.clone(),
                    NoticeArg::Label(k) => l10n.localize(*k),
                };
                (name.clone(), text)
            })
            .collect();
        let args: Vec<(&str, &str)> =
            resolved.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
        l10n.format(self.key, &args)
    }
}

impl From<&SheetError> for Notice {
    fn from(err: &SheetError) -> Self {
        match err {
            SheetError::AttributeNotFound(attr) => {
                Notice::error(MessageKey::ErrorAttributeNotFound).with_label("attribute", attr.label())
            }
            SheetError::ItemNotFound(_) => Notice::error(MessageKey::ItemNotFound),
            SheetError::UnknownAttribute(name) => {
                Notice::error(MessageKey::ErrorAttributeNotFound).with("attribute", name.clone())
            }
            SheetError::UnknownField(_)
            | SheetError::UnsupportedField { .. }
            | SheetError::InvalidRollType(_) => {
                Notice::error(MessageKey::ErrorOpeningSheet).with("item", err.to_string())
            }
        }
    }
}
