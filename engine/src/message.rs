use std::fmt;

use serde::Serialize;

use crate::{
    equipment::format_bonus, i18n::MessageKey, DieFace, DieSource, Localizer, Outcome, RollResult,
    RollType,
};

/// Chat message for one roll, as plain text lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollCard {
    pub title: String,
    pub lines: Vec<String>,
    pub outcome: Outcome,
    pub curse_fallen: bool,
}

impl fmt::Display for RollCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

pub fn outcome_label(outcome: Outcome) -> MessageKey {
    match outcome {
        Outcome::Success => MessageKey::Success,
        Outcome::BadOmen => MessageKey::BadOmen,
        Outcome::Failure => MessageKey::Failure,
    }
}

/// `5`, `[3]` for a discarded die, `{8}` for the curse die.
fn tile(face: &DieFace) -> String {
    let value = match face.source {
        DieSource::Base => face.value.to_string(),
        DieSource::Curse => format!("{{{}}}", face.value),
    };
    if face.discarded {
        format!("[{}]", value)
    } else {
        value
    }
}

fn dice_label(result: &RollResult, l10n: &dyn Localizer) -> String {
    if result.curse_roll {
        return l10n.localize(MessageKey::CurseRoll);
    }
    let mode = match result.request.roll_type {
        RollType::Normal => MessageKey::Normal,
        RollType::Advantage => MessageKey::WithAdvantage,
        RollType::Disadvantage => MessageKey::WithDisadvantage,
    };
    format!("{} {}", l10n.localize(MessageKey::Roll), l10n.localize(mode))
}

pub fn render_roll_card(actor_name: &str, result: &RollResult, l10n: &dyn Localizer) -> RollCard {
    let title = format!(
        "{}: {} {}",
        actor_name,
        l10n.localize(MessageKey::RollOf),
        l10n.localize(result.request.attribute.label())
    );

    let tiles: Vec<String> = result.display_dice().iter().map(tile).collect();
    let mut lines = vec![
        format!("{}: {}", dice_label(result, l10n), tiles.join(" ")),
        format!("{}: {}", l10n.localize(MessageKey::Attribute), result.attribute_base),
    ];
    if result.encumbrance_penalty != 0 {
        lines.push(format!(
            "{}: {}",
            l10n.localize(MessageKey::EncumbrancePenalty),
            -result.encumbrance_penalty
        ));
    }
    if result.equipment_bonus != 0 {
        lines.push(format!(
            "{}: {}",
            l10n.localize(MessageKey::Equipment),
            format_bonus(result.equipment_bonus)
        ));
    }
    lines.push(format!("{}: {}", l10n.localize(MessageKey::TotalResult), result.final_total));
    lines.push(l10n.localize(outcome_label(result.outcome)));
    if result.curse_fallen {
        lines.push(l10n.localize(MessageKey::CurseHasFallen));
    }

    RollCard { title, lines, outcome: result.outcome, curse_fallen: result.curse_fallen }
}
