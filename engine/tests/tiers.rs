use yokai_engine::tiers::{allocate, TierEntry};
use yokai_engine::Attribute::{self, *};

fn entries(current: [i32; 4], previous: [i32; 4]) -> Vec<TierEntry> {
    Attribute::ALL
        .iter()
        .enumerate()
        .map(|(i, &a)| TierEntry::new(a, current[i], previous[i]))
        .collect()
}

#[test]
fn second_attribute_cannot_take_a_held_tier() {
    // courage, selfControl, wisdom, sharpness
    let alloc = allocate(&entries([5, 0, 5, 0], [5, 0, 3, 0]));
    assert!(alloc.is_rejected(Wisdom));
    assert_eq!(alloc.rejected[0].cap, 4);
    assert_eq!(alloc.value_of(Wisdom), Some(3));
    assert_eq!(alloc.cap_of(Courage), Some(5));
    assert_eq!(alloc.cap_of(Wisdom), Some(4));
}

#[test]
fn lowering_is_always_accepted() {
    let alloc = allocate(&entries([2, 4, 3, 2], [5, 4, 3, 2]));
    assert!(alloc.rejected.is_empty());
    assert_eq!(alloc.value_of(Courage), Some(2));
    // Nothing reaches 5 any more, so no ceiling drops.
    assert_eq!(alloc.cap_of(SelfControl), Some(5));
    assert_eq!(alloc.cap_of(Sharpness), Some(5));
}

#[test]
fn third_tier_already_held() {
    let alloc = allocate(&entries([5, 4, 3, 3], [5, 4, 3, 2]));
    assert!(alloc.is_rejected(Sharpness));
    assert_eq!(alloc.rejected[0].cap, 2);
    assert_eq!(alloc.value_of(Sharpness), Some(2));
    assert_eq!(alloc.cap_of(Wisdom), Some(3));
}

#[test]
fn simultaneous_reach_goes_to_first_key() {
    let alloc = allocate(&entries([5, 0, 5, 0], [0, 0, 0, 0]));
    assert!(!alloc.is_rejected(Courage));
    assert!(alloc.is_rejected(Wisdom));
    assert_eq!(alloc.cap_of(Courage), Some(5));
}

#[test]
fn unchanged_values_are_never_rejected() {
    // Imported data may already break the tiers; only edits are policed.
    let alloc = allocate(&entries([5, 5, 5, 5], [5, 5, 5, 5]));
    assert!(alloc.rejected.is_empty());
    let caps: Vec<_> = alloc.slots.iter().map(|s| s.cap).collect();
    assert_eq!(caps, [5, 4, 3, 2]);
}

#[test]
fn rerun_gives_same_assignment() {
    let input = entries([3, 4, 2, 5], [3, 2, 2, 5]);
    assert_eq!(allocate(&input), allocate(&input));
}
