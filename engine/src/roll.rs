//! Attribute roll resolution: 2d6 (or 3d6 keep two) plus the attribute, with the
//! optional curse die, encumbrance and an equipment bonus.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{equipment::encumbrance_penalty, Attribute, CurseResistance, DieRoller, RollType};

pub const BASE_DIE_SIDES: u8 = 6;
pub const CURSE_DIE_SIDES: u8 = 8;

/// A total of exactly this is a bad omen; anything above succeeds.
pub const BAD_OMEN_TOTAL: i32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieSource {
    Base,
    Curse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieFace {
    pub value: u8,
    pub sides: u8,
    pub source: DieSource,
    pub discarded: bool,
}

impl DieFace {
    fn base(value: u8) -> Self {
        Self { value, sides: BASE_DIE_SIDES, source: DieSource::Base, discarded: false }
    }

    fn curse(value: u8) -> Self {
        Self { value, sides: CURSE_DIE_SIDES, source: DieSource::Curse, discarded: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    BadOmen,
    Failure,
}

impl Outcome {
    pub fn classify(total: i32) -> Self {
        if total > BAD_OMEN_TOTAL {
            Outcome::Success
        } else if total == BAD_OMEN_TOTAL {
            Outcome::BadOmen
        } else {
            Outcome::Failure
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollRequest {
    pub attribute: Attribute,
    #[serde(default)]
    pub roll_type: RollType,
    #[serde(default)]
    pub curse_roll: bool,
    #[serde(default)]
    pub equipment_bonus: i32,
}

impl RollRequest {
    pub fn new(attribute: Attribute) -> Self {
        Self { attribute, roll_type: RollType::Normal, curse_roll: false, equipment_bonus: 0 }
    }

    pub fn with_type(mut self, roll_type: RollType) -> Self {
        self.roll_type = roll_type;
        self
    }

    pub fn with_curse(mut self, curse_roll: bool) -> Self {
        self.curse_roll = curse_roll;
        self
    }

    pub fn with_bonus(mut self, equipment_bonus: i32) -> Self {
        self.equipment_bonus = equipment_bonus;
        self
    }

    /// Apply the dialog rules: the curse die only joins a normal roll, and a hunter
    /// with no resistance left rolls at disadvantage without it.
    pub fn normalized(self, resistance: &CurseResistance) -> Self {
        let mut req = self;
        if resistance.is_exhausted() {
            req.roll_type = RollType::Disadvantage;
            req.curse_roll = false;
        }
        if req.roll_type != RollType::Normal {
            req.curse_roll = false;
        }
        req
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    /// The request as actually rolled, after normalization.
    pub request: RollRequest,
    /// Base dice in roll order, then the curse die when one was thrown.
    pub dice: Vec<DieFace>,
    pub dice_total: i32,
    pub attribute_base: i32,
    pub encumbrance_penalty: i32,
    pub attribute_contribution: i32,
    pub equipment_bonus: i32,
    pub final_total: i32,
    pub outcome: Outcome,
    pub curse_roll: bool,
    pub curse_fallen: bool,
    pub updated_curse_resistance: Option<CurseResistance>,
}

impl RollResult {
    pub fn kept(&self) -> impl Iterator<Item = &DieFace> {
        self.dice.iter().filter(|d| !d.discarded)
    }

    pub fn discarded(&self) -> impl Iterator<Item = &DieFace> {
        self.dice.iter().filter(|d| d.discarded)
    }

    pub fn curse_die(&self) -> Option<&DieFace> {
        self.dice.iter().find(|d| d.source == DieSource::Curse)
    }

    /// Dice in display order: the curse pool is shown lowest first.
    pub fn display_dice(&self) -> Vec<DieFace> {
        let mut dice = self.dice.clone();
        if self.curse_roll {
            dice.sort_by_key(|d| d.value);
        }
        dice
    }
}

/// Resolve one attribute roll. `resistance` is the character's state before the
/// roll; a changed state comes back in `updated_curse_resistance` for write-back.
pub fn resolve<R: DieRoller + ?Sized>(
    dice: &mut R,
    request: &RollRequest,
    attribute_base: i32,
    equipment_count: usize,
    resistance: &CurseResistance,
) -> RollResult {
    let request = request.normalized(resistance);
    let mut faces = roll_base(dice, request.roll_type);

    let mut curse_fallen = false;
    let mut updated_curse_resistance = None;
    if request.curse_roll {
        let remaining = resistance.remaining();
        let curse = dice.roll_die(CURSE_DIE_SIDES);
        faces.push(DieFace::curse(curse));
        discard_first(&mut faces, Pick::Lowest);
        debug!(curse, remaining, "curse die thrown");

        if usize::from(curse) > remaining {
            let mut next = *resistance;
            if let Some(slot) = next.fall() {
                info!(slot, curse, remaining, "the curse has fallen");
                curse_fallen = true;
                updated_curse_resistance = Some(next);
            }
        }
    }

    let dice_total: i32 = faces.iter().filter(|d| !d.discarded).map(|d| i32::from(d.value)).sum();
    let encumbrance_penalty = encumbrance_penalty(request.attribute, equipment_count);
    let attribute_contribution = attribute_base - encumbrance_penalty;
    let final_total = dice_total + attribute_contribution + request.equipment_bonus;
    let outcome = Outcome::classify(final_total);

    info!(
        attribute = %request.attribute,
        roll_type = %request.roll_type,
        curse = request.curse_roll,
        dice_total,
        encumbrance_penalty,
        final_total,
        ?outcome,
        "attribute roll resolved"
    );

    RollResult {
        request,
        dice: faces,
        dice_total,
        attribute_base,
        encumbrance_penalty,
        attribute_contribution,
        equipment_bonus: request.equipment_bonus,
        final_total,
        outcome,
        curse_roll: request.curse_roll,
        curse_fallen,
        updated_curse_resistance,
    }
}

fn roll_base<R: DieRoller + ?Sized>(dice: &mut R, roll_type: RollType) -> Vec<DieFace> {
    let count = match roll_type {
        RollType::Normal => 2,
        RollType::Advantage | RollType::Disadvantage => 3,
    };
    let mut faces: Vec<DieFace> =
        (0..count).map(|_| DieFace::base(dice.roll_die(BASE_DIE_SIDES))).collect();
    match roll_type {
        RollType::Normal => {}
        RollType::Advantage => discard_first(&mut faces, Pick::Lowest),
        RollType::Disadvantage => discard_first(&mut faces, Pick::Highest),
    }
    debug!(?roll_type, faces = ?faces.iter().map(|d| d.value).collect::<Vec<_>>(), "base dice");
    faces
}

#[derive(Clone, Copy)]
enum Pick {
    Lowest,
    Highest,
}

/// Mark one kept die discarded; ties go to the earliest die in the pool.
fn discard_first(faces: &mut [DieFace], pick: Pick) {
    let mut chosen: Option<usize> = None;
    for (i, face) in faces.iter().enumerate() {
        if face.discarded {
            continue;
        }
        let better = match (chosen, pick) {
            (None, _) => true,
            (Some(c), Pick::Lowest) => face.value < faces[c].value,
            (Some(c), Pick::Highest) => face.value > faces[c].value,
        };
        if better {
            chosen = Some(i);
        }
    }
    if let Some(i) = chosen {
        faces[i].discarded = true;
    }
}
