use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub mod attributes;
pub mod content;
pub mod curse;
pub mod dialog;
pub mod equipment;
pub mod error;
pub mod health;
pub mod i18n;
pub mod logging;
pub mod message;
pub mod notice;
pub mod roll;
pub mod sheet;
pub mod store;
pub mod tiers;

pub use attributes::{Attribute, Attributes, ATTRIBUTE_CAP};
pub use curse::CurseResistance;
pub use error::{SheetError, StoreError};
pub use health::{Health, HEALTH_CAP};
pub use i18n::{Catalog, Localizer, MessageKey};
pub use notice::{Notice, NoticeLevel};
pub use roll::{resolve, DieFace, DieSource, Outcome, RollRequest, RollResult};
pub use sheet::{ActorKind, Character};

/// How many d6 are thrown and which two are kept.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollType {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl RollType {
    pub const ALL: [RollType; 3] = [RollType::Normal, RollType::Advantage, RollType::Disadvantage];

    pub fn as_str(self) -> &'static str {
        match self {
            RollType::Normal => "normal",
            RollType::Advantage => "advantage",
            RollType::Disadvantage => "disadvantage",
        }
    }

    /// Dice expression in the host's notation.
    pub fn formula(self) -> &'static str {
        match self {
            RollType::Normal => "2d6",
            RollType::Advantage => "3d6kh2",
            RollType::Disadvantage => "3d6kl2",
        }
    }
}

impl fmt::Display for RollType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RollType {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "" => Ok(RollType::Normal),
            "advantage" | "adv" => Ok(RollType::Advantage),
            "disadvantage" | "dis" => Ok(RollType::Disadvantage),
            other => Err(SheetError::InvalidRollType(other.to_string())),
        }
    }
}

/// Source of individual die faces. The host's dice engine sits behind this seam;
/// closures `FnMut(sides) -> face` work too, which keeps tests scriptable.
pub trait DieRoller {
    fn roll_die(&mut self, sides: u8) -> u8;
}

impl<F: FnMut(u8) -> u8> DieRoller for F {
    fn roll_die(&mut self, sides: u8) -> u8 {
        self(sides)
    }
}

pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    pub fn d6(&mut self) -> u8 {
        self.roll_die(6)
    }

    pub fn d8(&mut self) -> u8 {
        self.roll_die(8)
    }
}

impl DieRoller for Dice {
    fn roll_die(&mut self, sides: u8) -> u8 {
        self.rng.gen_range(1..=sides.max(1))
    }
}
