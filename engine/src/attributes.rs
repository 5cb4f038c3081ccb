use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{i18n::MessageKey, SheetError};

/// Highest value any attribute may hold on the sheet.
pub const ATTRIBUTE_CAP: i32 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Courage,
    SelfControl,
    Wisdom,
    Sharpness,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Courage,
        Attribute::SelfControl,
        Attribute::Wisdom,
        Attribute::Sharpness,
    ];

    /// Key used in character data and sheet field paths.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Courage => "courage",
            Attribute::SelfControl => "selfControl",
            Attribute::Wisdom => "wisdom",
            Attribute::Sharpness => "sharpness",
        }
    }

    pub fn label(self) -> MessageKey {
        match self {
            Attribute::Courage => MessageKey::Courage,
            Attribute::SelfControl => MessageKey::SelfControl,
            Attribute::Wisdom => MessageKey::Wisdom,
            Attribute::Sharpness => MessageKey::Sharpness,
        }
    }

    /// Physical attributes suffer when the hunter carries too much gear.
    pub fn is_encumbered_by_gear(self) -> bool {
        matches!(self, Attribute::Courage | Attribute::SelfControl)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attribute {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "courage" => Ok(Attribute::Courage),
            "selfcontrol" => Ok(Attribute::SelfControl),
            "wisdom" => Ok(Attribute::Wisdom),
            "sharpness" => Ok(Attribute::Sharpness),
            _ => Err(SheetError::UnknownAttribute(s.to_string())),
        }
    }
}

/// `{ "value": n }` as stored by the host. A present score may still lack a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub value: Option<i32>,
}

impl Score {
    pub fn new(value: i32) -> Self {
        Self { value: Some(value) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courage: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_control: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wisdom: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharpness: Option<Score>,
}

impl Attributes {
    pub fn new(courage: i32, self_control: i32, wisdom: i32, sharpness: i32) -> Self {
        Self {
            courage: Some(Score::new(courage)),
            self_control: Some(Score::new(self_control)),
            wisdom: Some(Score::new(wisdom)),
            sharpness: Some(Score::new(sharpness)),
        }
    }

    fn slot(&self, attribute: Attribute) -> &Option<Score> {
        match attribute {
            Attribute::Courage => &self.courage,
            Attribute::SelfControl => &self.self_control,
            Attribute::Wisdom => &self.wisdom,
            Attribute::Sharpness => &self.sharpness,
        }
    }

    fn slot_mut(&mut self, attribute: Attribute) -> &mut Option<Score> {
        match attribute {
            Attribute::Courage => &mut self.courage,
            Attribute::SelfControl => &mut self.self_control,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Sharpness => &mut self.sharpness,
        }
    }

    /// Stored value, `None` when the score or its value is missing.
    pub fn get(&self, attribute: Attribute) -> Option<i32> {
        self.slot(attribute).and_then(|s| s.value)
    }

    /// Stored value with missing entries read as 0.
    pub fn value_or_zero(&self, attribute: Attribute) -> i32 {
        self.get(attribute).unwrap_or(0)
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        *self.slot_mut(attribute) = Some(Score::new(value));
    }

    /// Missing scores become `{ value: 0 }`; a score present without a value is left alone.
    pub fn fill_missing(&mut self) {
        for attribute in Attribute::ALL {
            let slot = self.slot_mut(attribute);
            if slot.is_none() {
                *slot = Some(Score::new(0));
            }
        }
    }
}

/// Clamp an attribute write into `0..=ATTRIBUTE_CAP`. The flag reports a cut at the top.
pub fn clamp_attribute(value: i32) -> (i32, bool) {
    if value > ATTRIBUTE_CAP {
        (ATTRIBUTE_CAP, true)
    } else {
        (value.max(0), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_loose_spellings() {
        assert_eq!("selfControl".parse::<Attribute>().unwrap(), Attribute::SelfControl);
        assert_eq!("self-control".parse::<Attribute>().unwrap(), Attribute::SelfControl);
        assert_eq!("SHARPNESS".parse::<Attribute>().unwrap(), Attribute::Sharpness);
        assert!("luck".parse::<Attribute>().is_err());
    }

    #[test]
    fn clamp_caps_top_and_floors_negative() {
        assert_eq!(clamp_attribute(7), (5, true));
        assert_eq!(clamp_attribute(5), (5, false));
        assert_eq!(clamp_attribute(-2), (0, false));
    }

    #[test]
    fn fill_missing_keeps_valueless_scores() {
        let mut attrs = Attributes {
            courage: Some(Score { value: None }),
            ..Default::default()
        };
        attrs.fill_missing();
        assert_eq!(attrs.get(Attribute::Courage), None);
        assert_eq!(attrs.get(Attribute::Wisdom), Some(0));
    }

    #[test]
    fn serializes_with_host_keys() {
        let attrs = Attributes::new(1, 2, 3, 4);
        let json = serde_json::to_value(attrs).unwrap();
        assert_eq!(json["selfControl"]["value"], 2);
        assert_eq!(json["sharpness"]["value"], 4);
    }
}
