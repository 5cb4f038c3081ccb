use proptest::prelude::*;
use yokai_engine::{
    health::Health,
    resolve,
    tiers::{allocate, TierEntry},
    Attribute, CurseResistance, Dice, Outcome, RollRequest, RollType, HEALTH_CAP,
};

fn roll_type() -> impl Strategy<Value = RollType> {
    prop_oneof![
        Just(RollType::Normal),
        Just(RollType::Advantage),
        Just(RollType::Disadvantage)
    ]
}

fn attribute() -> impl Strategy<Value = Attribute> {
    prop_oneof![
        Just(Attribute::Courage),
        Just(Attribute::SelfControl),
        Just(Attribute::Wisdom),
        Just(Attribute::Sharpness)
    ]
}

fn entries(current: [i32; 4], previous: [i32; 4]) -> Vec<TierEntry> {
    Attribute::ALL
        .iter()
        .enumerate()
        .map(|(i, &a)| TierEntry::new(a, current[i], previous[i]))
        .collect()
}

proptest! {
    #[test]
    fn totals_add_up(
        seed in any::<u64>(),
        rt in roll_type(),
        curse in any::<bool>(),
        remaining in 0usize..=4,
        base in 0i32..=5,
        items in 0usize..14,
        bonus in -3i32..=3,
        attr in attribute(),
    ) {
        let req = RollRequest::new(attr).with_type(rt).with_curse(curse).with_bonus(bonus);
        let r = resolve(&mut Dice::from_seed(seed), &req, base, items, &CurseResistance::with_remaining(remaining));

        let kept: i32 = r.kept().map(|d| i32::from(d.value)).sum();
        prop_assert_eq!(r.dice_total, kept);

        let penalty = if matches!(attr, Attribute::Courage | Attribute::SelfControl) {
            items.saturating_sub(8) as i32
        } else {
            0
        };
        prop_assert_eq!(r.encumbrance_penalty, penalty);
        prop_assert_eq!(r.attribute_contribution, base - penalty);
        prop_assert_eq!(r.final_total, kept + base - penalty + bonus);
        prop_assert_eq!(r.outcome, Outcome::classify(r.final_total));
    }

    #[test]
    fn discard_count_follows_roll_shape(
        seed in any::<u64>(),
        rt in roll_type(),
        curse in any::<bool>(),
        remaining in 0usize..=4,
    ) {
        let req = RollRequest::new(Attribute::Wisdom).with_type(rt).with_curse(curse);
        let r = resolve(&mut Dice::from_seed(seed), &req, 0, 0, &CurseResistance::with_remaining(remaining));

        let curse_active = curse && rt == RollType::Normal && remaining > 0;
        prop_assert_eq!(r.curse_roll, curse_active);
        prop_assert_eq!(r.kept().count(), 2);
        match r.request.roll_type {
            RollType::Normal => prop_assert_eq!(r.discarded().count(), usize::from(curse_active)),
            _ => {
                prop_assert_eq!(r.dice.len(), 3);
                prop_assert_eq!(r.discarded().count(), 1);
            }
        }
        if remaining == 0 {
            prop_assert_eq!(r.request.roll_type, RollType::Disadvantage);
        }
    }

    #[test]
    fn curse_takes_at_most_one_box(seed in any::<u64>(), remaining in 1usize..=4) {
        let req = RollRequest::new(Attribute::Courage).with_curse(true);
        let r = resolve(&mut Dice::from_seed(seed), &req, 0, 0, &CurseResistance::with_remaining(remaining));
        let curse = usize::from(r.curse_die().map(|d| d.value).unwrap_or(0));

        match r.updated_curse_resistance {
            Some(after) => {
                prop_assert!(r.curse_fallen);
                prop_assert!(curse > remaining);
                prop_assert_eq!(after.remaining(), remaining - 1);
            }
            None => {
                prop_assert!(!r.curse_fallen);
                prop_assert!(curse <= remaining);
            }
        }
    }

    #[test]
    fn outcome_thresholds(total in -20i32..40) {
        let expected = if total > 9 {
            Outcome::Success
        } else if total == 9 {
            Outcome::BadOmen
        } else {
            Outcome::Failure
        };
        prop_assert_eq!(Outcome::classify(total), expected);
    }

    #[test]
    fn tier_allocation_settles(
        current in prop::array::uniform4(0i32..=5),
        previous in prop::array::uniform4(0i32..=5),
    ) {
        let input = entries(current, previous);
        let first = allocate(&input);
        prop_assert_eq!(&first, &allocate(&input));

        for slot in &first.rejected {
            prop_assert!(slot.value > slot.cap);
            let i = Attribute::ALL.iter().position(|&a| a == slot.attribute).unwrap();
            prop_assert_eq!(first.value_of(slot.attribute), Some(previous[i]));
        }

        let settled: Vec<_> = Attribute::ALL
            .iter()
            .map(|&a| TierEntry::settled(a, first.value_of(a).unwrap()))
            .collect();
        let again = allocate(&settled);
        prop_assert!(again.rejected.is_empty());
        prop_assert_eq!(&again, &allocate(&settled));
    }

    #[test]
    fn health_stays_in_bounds(max in -5i32..40, value in -5i32..40) {
        let mut health = Health::default();
        health.set_max(max);
        health.set_value(value);
        prop_assert!(health.is_valid());
        prop_assert!(health.max <= HEALTH_CAP);
        if value > health.max {
            prop_assert_eq!(health.value, health.max);
        }
    }
}
