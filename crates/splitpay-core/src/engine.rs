//! The allocation engine.
//!
//! Owns one [`AllocationState`] and is the only place it changes. In `Equal` mode
//! the rows follow the participants and the total automatically; the first edit of
//! any cell switches to `Custom`, blanks every other row, and from then on the
//! rows only change through edits, commits or an explicit reset.

use std::collections::HashMap;

use rust_decimal::Decimal;
use splitpay_calculator::{
    HUNDRED, ParsedInput, TOLERANCE, amount_from_percent, checked_sum, equal_shares,
    parse_input, percent_of_total, round2,
};
use splitpay_types::{
    AllocationEntry, AllocationMode, AllocationState, AllocationSummary, Field, FieldValue,
    FinalizedAllocation, Participant,
};
use tracing::{debug, info, instrument};

use crate::error::{SplitPayError, SplitPayResult};

#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    participants: Vec<Participant>,
    state: AllocationState,
}

impl AllocationEngine {
    /// Creates an engine holding an equal split of `total` across `participants`.
    pub fn new(participants: Vec<Participant>, total: Decimal) -> Self {
        let mut engine = Self::default();
        engine.initialize_equal(participants, total);
        engine
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn entries(&self) -> &[AllocationEntry] {
        &self.state.entries
    }

    pub fn entry(&self, participant_id: &str) -> Option<&AllocationEntry> {
        self.state.entry(participant_id)
    }

    pub fn mode(&self) -> AllocationMode {
        self.state.mode
    }

    pub fn total(&self) -> Decimal {
        self.state.total
    }

    /// Replaces the whole state with an equal split.
    ///
    /// A zero or negative total gives every participant zero amount and zero percent.
    #[instrument(skip(self, participants), fields(participant_count = participants.len()))]
    pub fn initialize_equal(
        &mut self,
        participants: Vec<Participant>,
        total: Decimal,
    ) -> &AllocationState {
        let entries = equal_shares(total, participants.len())
            .into_iter()
            .zip(&participants)
            .map(|(share, p)| AllocationEntry::with_values(p, share.amount, share.percent))
            .collect();

        self.participants = participants;
        self.state = AllocationState { mode: AllocationMode::Equal, total, entries };

        debug!(total = %total, "Initialized equal split");
        &self.state
    }

    /// Equal split of the current participants and total, regardless of the mode.
    #[instrument(skip(self))]
    pub fn reset_to_equal(&mut self) -> &AllocationState {
        info!(previous_mode = ?self.state.mode, "Resetting allocation to equal split");
        let participants = std::mem::take(&mut self.participants);
        let total = self.state.total;
        self.initialize_equal(participants, total)
    }

    /// Updates the participant list.
    ///
    /// In `Equal` mode the split is recomputed. In `Custom` mode rows of
    /// participants that remain are kept (in the new order), newcomers get blank
    /// rows and rows of removed participants are dropped.
    #[instrument(skip(self, participants), fields(participant_count = participants.len()))]
    pub fn set_participants(&mut self, participants: Vec<Participant>) -> &AllocationState {
        if self.state.mode == AllocationMode::Equal {
            let total = self.state.total;
            return self.initialize_equal(participants, total);
        }

        let mut previous: HashMap<String, AllocationEntry> = std::mem::take(&mut self.state.entries)
            .into_iter()
            .map(|e| (e.participant_id.clone(), e))
            .collect();

        self.state.entries = participants
            .iter()
            .map(|p| match previous.remove(&p.id) {
                Some(entry) => AllocationEntry { name: p.name.clone(), ..entry },
                None => AllocationEntry::unset(p),
            })
            .collect();
        self.participants = participants;

        debug!(dropped = previous.len(), "Kept custom rows across participant change");
        &self.state
    }

    /// Updates the total.
    ///
    /// In `Equal` mode the split is recomputed. In `Custom` mode the amounts stay
    /// as entered and the percent of every row holding an amount is derived again
    /// from the new total; draft and unset cells are left alone.
    #[instrument(skip(self))]
    pub fn set_total(&mut self, total: Decimal) -> &AllocationState {
        if self.state.mode == AllocationMode::Equal {
            let participants = std::mem::take(&mut self.participants);
            return self.initialize_equal(participants, total);
        }

        self.state.total = total;
        for entry in &mut self.state.entries {
            if let FieldValue::Value(amount) = entry.amount {
                entry.percent = FieldValue::Value(percent_of_total(amount, total));
            }
        }
        debug!(total = %total, "Re-derived custom percents");
        &self.state
    }

    /// Applies text typed into one cell and derives the other cell of the row.
    ///
    /// The first edit in `Equal` mode switches to `Custom` and blanks every other
    /// row. Text that does not parse is kept as a draft and the counterpart cell
    /// is cleared until the input becomes a number.
    #[instrument(skip(self, raw_text))]
    pub fn edit_field(
        &mut self,
        participant_id: &str,
        field: Field,
        raw_text: &str,
    ) -> SplitPayResult<&AllocationState> {
        let index = self.position(participant_id)?;
        let total = self.state.total;

        if self.state.mode == AllocationMode::Equal {
            info!(participant_id, "Switching to custom allocation");
            self.state.mode = AllocationMode::Custom;
            for (i, entry) in self.state.entries.iter_mut().enumerate() {
                if i != index {
                    entry.clear();
                }
            }
        }

        let (edited, derived) = match parse_input(raw_text) {
            ParsedInput::Number(value) => {
                let counterpart = match field {
                    Field::Amount => percent_of_total(value, total),
                    Field::Percent => amount_from_percent(value, total),
                };
                (FieldValue::Value(value), FieldValue::Value(counterpart))
            }
            ParsedInput::Partial(text) => (FieldValue::Draft(text), FieldValue::Unset),
            ParsedInput::Empty => (FieldValue::Unset, FieldValue::Unset),
        };

        let entry = &mut self.state.entries[index];
        debug!(edited = %edited, derived = %derived, "Applied cell edit");
        *entry.get_mut(field) = edited;
        *entry.get_mut(field.counterpart()) = derived;

        Ok(&self.state)
    }

    /// Settles a cell when it loses focus: a draft or unset cell becomes zero,
    /// along with its counterpart. Does nothing in `Equal` mode or on a cell that
    /// already holds a number.
    #[instrument(skip(self))]
    pub fn commit_field(
        &mut self,
        participant_id: &str,
        field: Field,
    ) -> SplitPayResult<&AllocationState> {
        let index = self.position(participant_id)?;
        if self.state.mode == AllocationMode::Equal {
            return Ok(&self.state);
        }

        let entry = &mut self.state.entries[index];
        if entry.get(field).is_pending() {
            *entry.get_mut(field) = FieldValue::Value(Decimal::ZERO);
            *entry.get_mut(field.counterpart()) = FieldValue::Value(Decimal::ZERO);
            debug!("Committed blank cell as zero");
        }

        Ok(&self.state)
    }

    /// Aggregate figures for the current state.
    ///
    /// The allocation is complete when there is at least one participant, the
    /// total is positive, and either the mode is `Equal` or every row holds
    /// numbers that add up to the total and to 100% within one cent. Sums that
    /// leave the decimal range are reported saturated and never complete.
    pub fn summarize(&self) -> AllocationSummary {
        let total = self.effective_total();
        let amounts = || self.state.entries.iter().map(|e| e.amount.value_or_zero());
        let percents = || self.state.entries.iter().map(|e| e.percent.value_or_zero());

        let total_assigned_amount = amounts().fold(Decimal::ZERO, Decimal::saturating_add);
        let total_assigned_percent = percents().fold(Decimal::ZERO, Decimal::saturating_add);
        let remaining_amount = round2(total.saturating_sub(total_assigned_amount));
        let remaining_percent = round2(HUNDRED.saturating_sub(total_assigned_percent));

        let in_range = checked_sum(amounts()).is_some() && checked_sum(percents()).is_some();
        let reconciled = match self.state.mode {
            AllocationMode::Equal => true,
            AllocationMode::Custom => {
                self.state.entries.iter().all(AllocationEntry::is_filled)
                    && remaining_amount.abs() <= TOLERANCE
                    && remaining_percent.abs() <= TOLERANCE
            }
        };
        let is_complete =
            !self.state.entries.is_empty() && total > Decimal::ZERO && in_range && reconciled;

        AllocationSummary {
            total_assigned_amount,
            total_assigned_percent,
            remaining_amount,
            remaining_percent,
            is_complete,
        }
    }

    /// The finalized allocation, available once the split reconciles.
    #[instrument(skip(self))]
    pub fn confirm(&self) -> SplitPayResult<Vec<FinalizedAllocation>> {
        if self.state.entries.is_empty() {
            return Err(SplitPayError::NoParticipants);
        }
        if self.state.total <= Decimal::ZERO {
            return Err(SplitPayError::NonPositiveTotal { total: self.state.total });
        }

        let summary = self.summarize();
        if !summary.is_complete {
            return Err(SplitPayError::Incomplete {
                remaining_amount: summary.remaining_amount,
                remaining_percent: summary.remaining_percent,
            });
        }

        info!(participant_count = self.state.entries.len(), "Allocation confirmed");
        Ok(self
            .state
            .entries
            .iter()
            .map(|e| FinalizedAllocation {
                participant_id: e.participant_id.clone(),
                amount: e.amount.value_or_zero(),
                percent: e.percent.value_or_zero(),
            })
            .collect())
    }

    fn position(&self, participant_id: &str) -> SplitPayResult<usize> {
        self.state
            .entries
            .iter()
            .position(|e| e.participant_id == participant_id)
            .ok_or_else(|| SplitPayError::unknown_participant(participant_id))
    }

    fn effective_total(&self) -> Decimal {
        self.state.total.max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn people(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|n| Participant::new(n.to_lowercase(), *n)).collect()
    }

    #[test]
    fn edit_keeps_only_edited_row() {
        let mut engine = AllocationEngine::new(people(&["A", "B", "C"]), dec!(90));
        engine.edit_field("b", Field::Percent, "50").unwrap();

        assert_eq!(engine.mode(), AllocationMode::Custom);
        assert_eq!(engine.entries().len(), 3);
        let b = engine.entry("b").unwrap();
        assert_eq!(b.amount, FieldValue::Value(dec!(45)));
        assert_eq!(b.percent, FieldValue::Value(dec!(50)));
        assert_eq!(engine.entry("a").unwrap().amount, FieldValue::Unset);
        assert_eq!(engine.entry("c").unwrap().percent, FieldValue::Unset);
    }

    #[test]
    fn draft_clears_counterpart() {
        let mut engine = AllocationEngine::new(people(&["A", "B"]), dec!(50));
        engine.edit_field("a", Field::Amount, ".").unwrap();

        let a = engine.entry("a").unwrap();
        assert_eq!(a.amount, FieldValue::Draft(".".to_string()));
        assert_eq!(a.percent, FieldValue::Unset);
    }

    #[test]
    fn rejected_input_leaves_cell_unset() {
        let mut engine = AllocationEngine::new(people(&["A"]), dec!(10));
        engine.edit_field("a", Field::Amount, "1.2.3").unwrap();
        assert_eq!(engine.entry("a").unwrap().amount, FieldValue::Unset);
    }

    #[test]
    fn unknown_participant_is_rejected_without_mode_switch() {
        let mut engine = AllocationEngine::new(people(&["A"]), dec!(10));
        let err = engine.edit_field("zz", Field::Amount, "5").unwrap_err();
        assert_eq!(err, SplitPayError::unknown_participant("zz"));
        assert_eq!(engine.mode(), AllocationMode::Equal);
    }

    #[test]
    fn total_change_follows_equal_mode_only() {
        let mut engine = AllocationEngine::new(people(&["A", "B"]), dec!(50));
        engine.set_total(dec!(80));
        assert_eq!(engine.entry("a").unwrap().amount, FieldValue::Value(dec!(40)));

        engine.edit_field("a", Field::Amount, "20").unwrap();
        engine.set_total(dec!(100));
        assert_eq!(engine.total(), dec!(100));
        assert_eq!(engine.entry("a").unwrap().amount, FieldValue::Value(dec!(20)));
        assert_eq!(engine.entry("a").unwrap().percent, FieldValue::Value(dec!(20)));
        assert_eq!(engine.entry("b").unwrap().percent, FieldValue::Unset);
    }

    #[test]
    fn custom_total_change_keeps_rows_consistent() {
        let mut engine = AllocationEngine::new(people(&["A", "B"]), dec!(50));
        engine.edit_field("a", Field::Amount, "30").unwrap();
        engine.edit_field("b", Field::Amount, "-").unwrap();
        engine.set_total(dec!(100));

        let a = engine.entry("a").unwrap();
        assert_eq!(a.amount, FieldValue::Value(dec!(30)));
        assert_eq!(a.percent, FieldValue::Value(dec!(30)));
        assert_eq!(engine.entry("b").unwrap().amount, FieldValue::Draft("-".to_string()));

        let summary = engine.summarize();
        assert_eq!(summary.remaining_amount, dec!(70));
        assert_eq!(summary.remaining_percent, dec!(70));
    }

    #[test]
    fn oversized_rows_leave_summary_incomplete() {
        let huge = "50000000000000000000000000000";
        let mut engine = AllocationEngine::new(people(&["A", "B"]), dec!(100));
        engine.edit_field("a", Field::Amount, huge).unwrap();
        engine.edit_field("b", Field::Amount, huge).unwrap();

        let summary = engine.summarize();
        assert!(!summary.is_complete);
        assert_eq!(summary.total_assigned_amount, Decimal::MAX);
        assert!(matches!(engine.confirm(), Err(SplitPayError::Incomplete { .. })));
    }

    #[test]
    fn custom_rows_survive_participant_change() {
        let mut engine = AllocationEngine::new(people(&["A", "B"]), dec!(50));
        engine.edit_field("a", Field::Amount, "30").unwrap();
        engine.set_participants(people(&["C", "A"]));

        let ids: Vec<_> = engine.entries().iter().map(|e| e.participant_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(engine.entry("a").unwrap().amount, FieldValue::Value(dec!(30)));
        assert_eq!(engine.entry("c").unwrap().amount, FieldValue::Unset);
    }

    #[test]
    fn negative_total_splits_to_zero() {
        let engine = AllocationEngine::new(people(&["A", "B"]), dec!(-5));
        assert!(engine.entries().iter().all(|e| e.amount == FieldValue::Value(Decimal::ZERO)));
        assert!(!engine.summarize().is_complete);
    }
}
