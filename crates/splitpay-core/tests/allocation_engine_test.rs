// Behaviour of the allocation engine across equal and custom modes.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use splitpay_core::{
    AllocationEngine, AllocationMode, Field, FieldValue, Participant, SplitPayError,
};

fn participants(count: usize) -> Vec<Participant> {
    (0..count).map(|i| Participant::new(format!("p{i}"), format!("Person {i}"))).collect()
}

fn abc() -> Vec<Participant> {
    vec![Participant::new("a", "Ana"), Participant::new("b", "Luis"), Participant::new("c", "Andrés")]
}

#[test]
fn equal_split_of_one_hundred_between_three() {
    let engine = AllocationEngine::new(abc(), dec!(100));

    let amounts: Vec<_> = engine.entries().iter().map(|e| e.amount.clone()).collect();
    assert_eq!(
        amounts,
        vec![
            FieldValue::Value(dec!(33.33)),
            FieldValue::Value(dec!(33.33)),
            FieldValue::Value(dec!(33.34)),
        ]
    );

    let summary = engine.summarize();
    assert_eq!(summary.total_assigned_amount, dec!(100));
    assert_eq!(summary.total_assigned_percent, dec!(100));
    assert_eq!(summary.remaining_amount, Decimal::ZERO);
    assert!(summary.is_complete);
}

#[test]
fn custom_edit_tracks_remaining_until_reconciled() {
    let people = vec![Participant::new("a", "A"), Participant::new("b", "B")];
    let mut engine = AllocationEngine::new(people, dec!(50));

    engine.edit_field("a", Field::Amount, "30").unwrap();
    let a = engine.entry("a").unwrap();
    assert_eq!(a.amount, FieldValue::Value(dec!(30)));
    assert_eq!(a.percent, FieldValue::Value(dec!(60)));

    let summary = engine.summarize();
    assert_eq!(summary.remaining_amount, dec!(20));
    assert_eq!(summary.remaining_percent, dec!(40));
    assert!(!summary.is_complete);
    assert_eq!(
        engine.confirm().unwrap_err(),
        SplitPayError::Incomplete { remaining_amount: dec!(20), remaining_percent: dec!(40) }
    );

    engine.edit_field("b", Field::Percent, "40").unwrap();
    let b = engine.entry("b").unwrap();
    assert_eq!(b.amount, FieldValue::Value(dec!(20)));

    let summary = engine.summarize();
    assert_eq!(summary.remaining_amount, Decimal::ZERO);
    assert!(summary.is_complete);

    let finalized = engine.confirm().unwrap();
    assert_eq!(finalized.len(), 2);
    assert_eq!(finalized[0].participant_id, "a");
    assert_eq!(finalized[0].amount, dec!(30));
    assert_eq!(finalized[1].percent, dec!(40));
}

#[test]
fn over_allocation_shows_negative_remaining() {
    let people = vec![Participant::new("a", "A"), Participant::new("b", "B")];
    let mut engine = AllocationEngine::new(people, dec!(50));
    engine.edit_field("a", Field::Amount, "40").unwrap();
    engine.edit_field("b", Field::Amount, "20").unwrap();

    let summary = engine.summarize();
    assert_eq!(summary.remaining_amount, dec!(-10));
    assert_eq!(summary.remaining_percent, dec!(-20));
    assert!(!summary.is_complete);
}

#[test]
fn zero_total_cannot_be_confirmed() {
    let engine = AllocationEngine::new(abc(), Decimal::ZERO);

    assert!(engine.entries().iter().all(|e| {
        e.amount == FieldValue::Value(Decimal::ZERO) && e.percent == FieldValue::Value(Decimal::ZERO)
    }));
    assert!(!engine.summarize().is_complete);
    assert_eq!(
        engine.confirm().unwrap_err(),
        SplitPayError::NonPositiveTotal { total: Decimal::ZERO }
    );
}

#[test]
fn no_participants_is_never_complete() {
    let engine = AllocationEngine::new(Vec::new(), dec!(100));
    assert!(engine.entries().is_empty());

    let summary = engine.summarize();
    assert_eq!(summary.total_assigned_amount, Decimal::ZERO);
    assert!(!summary.is_complete);
    assert_eq!(engine.confirm().unwrap_err(), SplitPayError::NoParticipants);
}

#[test]
fn draft_cell_blocks_completion_until_committed() {
    let people = vec![Participant::new("a", "A"), Participant::new("b", "B")];
    let mut engine = AllocationEngine::new(people, dec!(50));
    engine.edit_field("a", Field::Percent, "100").unwrap();
    engine.edit_field("b", Field::Amount, "-").unwrap();

    let summary = engine.summarize();
    assert_eq!(summary.remaining_amount, Decimal::ZERO);
    assert!(!summary.is_complete);

    engine.commit_field("b", Field::Amount).unwrap();
    let b = engine.entry("b").unwrap();
    assert_eq!(b.amount, FieldValue::Value(Decimal::ZERO));
    assert_eq!(b.percent, FieldValue::Value(Decimal::ZERO));
    assert!(engine.summarize().is_complete);
}

#[test]
fn commit_is_a_no_op_in_equal_mode() {
    let mut engine = AllocationEngine::new(abc(), dec!(60));
    let before = engine.state().clone();
    engine.commit_field("a", Field::Amount).unwrap();
    assert_eq!(engine.state(), &before);
}

#[test]
fn reset_returns_to_automatic_updates() {
    let mut engine = AllocationEngine::new(abc(), dec!(60));
    engine.edit_field("a", Field::Amount, "60").unwrap();
    engine.reset_to_equal();
    assert_eq!(engine.mode(), AllocationMode::Equal);

    engine.set_total(dec!(90));
    assert!(engine.entries().iter().all(|e| e.amount == FieldValue::Value(dec!(30))));
}

#[test]
fn leading_zeros_are_collapsed_on_edit() {
    let mut engine = AllocationEngine::new(abc(), dec!(100));
    engine.edit_field("a", Field::Amount, "0025").unwrap();
    assert_eq!(engine.entry("a").unwrap().amount, FieldValue::Value(dec!(25)));
    assert_eq!(engine.entry("a").unwrap().percent, FieldValue::Value(dec!(25)));
}

#[test]
fn percent_edit_with_zero_total_derives_zero_amount() {
    let mut engine = AllocationEngine::new(abc(), Decimal::ZERO);
    engine.edit_field("b", Field::Percent, "50").unwrap();
    assert_eq!(engine.entry("b").unwrap().amount, FieldValue::Value(Decimal::ZERO));
}

proptest! {
    #[test]
    fn equal_split_reconciles(count in 1usize..50, total_cents in 1i64..5_000_000) {
        let total = Decimal::new(total_cents, 2);
        let engine = AllocationEngine::new(participants(count), total);
        let summary = engine.summarize();

        prop_assert!((summary.total_assigned_amount - total).abs() <= dec!(0.02));
        prop_assert!((summary.total_assigned_percent - dec!(100)).abs() <= dec!(0.02));
        prop_assert!(summary.is_complete);
    }

    #[test]
    fn first_edit_blanks_other_rows(count in 1usize..20, pick in 0usize..20, amount in 0i64..10_000) {
        let pick = pick % count;
        let mut engine = AllocationEngine::new(participants(count), dec!(100));
        let id = format!("p{pick}");
        engine.edit_field(&id, Field::Amount, &amount.to_string()).unwrap();

        prop_assert_eq!(engine.mode(), AllocationMode::Custom);
        prop_assert_eq!(engine.entries().len(), count);
        for entry in engine.entries() {
            if entry.participant_id == id {
                prop_assert!(entry.is_filled());
            } else {
                prop_assert_eq!(&entry.amount, &FieldValue::Unset);
                prop_assert_eq!(&entry.percent, &FieldValue::Unset);
            }
        }
    }

    #[test]
    fn amount_survives_percent_round_trip(total_cents in 1i64..=10_000, fraction in 0i64..=10_000) {
        let total = Decimal::new(total_cents, 2);
        let amount = (total * Decimal::new(fraction, 4)).round_dp(2);
        let mut engine = AllocationEngine::new(participants(2), total);

        engine.edit_field("p0", Field::Amount, &amount.to_string()).unwrap();
        let percent = engine.entry("p0").unwrap().percent.to_string();
        engine.edit_field("p0", Field::Percent, &percent).unwrap();

        let back = engine.entry("p0").unwrap().amount.value_or_zero();
        prop_assert!((back - amount).abs() <= dec!(0.01));
    }

    #[test]
    fn commit_is_idempotent(text in "[0-9.\\-]{0,4}", use_percent in any::<bool>()) {
        let field = if use_percent { Field::Percent } else { Field::Amount };
        let mut engine = AllocationEngine::new(participants(3), dec!(75));
        engine.edit_field("p1", field, &text).unwrap();

        engine.commit_field("p1", field).unwrap();
        let once = engine.state().clone();
        engine.commit_field("p1", field).unwrap();
        prop_assert_eq!(engine.state(), &once);
    }

    #[test]
    fn reset_matches_fresh_initialization(
        count in 1usize..12,
        total_cents in 0i64..1_000_000,
        edits in proptest::collection::vec((0usize..12, "[0-9]{1,3}"), 1..6),
    ) {
        let total = Decimal::new(total_cents, 2);
        let mut engine = AllocationEngine::new(participants(count), total);
        for (row, text) in &edits {
            engine.edit_field(&format!("p{}", row % count), Field::Percent, text).unwrap();
        }

        engine.reset_to_equal();
        let fresh = AllocationEngine::new(participants(count), total);
        prop_assert_eq!(engine.state(), fresh.state());
    }
}
