use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A person taking part in a split, as supplied by the contact-selection step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Participant {
    /// Unique identifier of the participant
    pub id: String,
    /// Display name
    pub name: String,
}

impl Participant {
    /// Creates a new participant.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }

    /// Uppercase initials taken from the first two words of the name.
    ///
    /// A single-word name yields one letter and an empty name yields an empty string.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// The two editable columns of an allocation row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Currency amount assigned to the participant
    Amount,
    /// Share of the total, in percent (0-100)
    Percent,
}

impl Field {
    /// The column that is derived when this one is edited.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Amount => Self::Percent,
            Self::Percent => Self::Amount,
        }
    }

    /// Lowercase name used in logs and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Percent => "percent",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a single allocation cell.
///
/// Only `Value` contributes to sums. `Draft` holds normalized input that does not
/// parse yet (a lone `.` or `-`), and `Unset` marks a cell that still has to be
/// entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    /// A parsed number
    Value(Decimal),
    /// Partial text awaiting more input
    Draft(String),
    /// Nothing entered
    #[default]
    Unset,
}

impl FieldValue {
    /// Returns the number held by this cell, if any.
    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Draft(_) | Self::Unset => None,
        }
    }

    /// The number held by this cell, counting drafts and unset cells as zero.
    pub fn value_or_zero(&self) -> Decimal {
        self.as_decimal().unwrap_or(Decimal::ZERO)
    }

    /// True for `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// True for `Draft` and `Unset`, the cells a commit normalizes to zero.
    pub const fn is_pending(&self) -> bool {
        !self.is_value()
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Draft(text) => f.write_str(text),
            Self::Unset => Ok(()),
        }
    }
}

/// How the allocation is currently being produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum AllocationMode {
    /// Total divided evenly, recomputed whenever the inputs change
    #[default]
    Equal,
    /// Amounts or percents entered by hand
    Custom,
}

/// One row of the split table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    /// Identifier of the participant this row belongs to
    pub participant_id: String,
    /// Display name of the participant
    pub name: String,
    /// Amount cell
    pub amount: FieldValue,
    /// Percent cell
    pub percent: FieldValue,
}

impl AllocationEntry {
    /// Creates a row with both cells unset.
    pub fn unset(participant: &Participant) -> Self {
        Self {
            participant_id: participant.id.clone(),
            name: participant.name.clone(),
            amount: FieldValue::Unset,
            percent: FieldValue::Unset,
        }
    }

    /// Creates a row holding the given numbers.
    pub fn with_values(participant: &Participant, amount: Decimal, percent: Decimal) -> Self {
        Self {
            participant_id: participant.id.clone(),
            name: participant.name.clone(),
            amount: FieldValue::Value(amount),
            percent: FieldValue::Value(percent),
        }
    }

    /// Returns the cell for `field`.
    pub const fn get(&self, field: Field) -> &FieldValue {
        match field {
            Field::Amount => &self.amount,
            Field::Percent => &self.percent,
        }
    }

    /// Returns the cell for `field` mutably.
    pub const fn get_mut(&mut self, field: Field) -> &mut FieldValue {
        match field {
            Field::Amount => &mut self.amount,
            Field::Percent => &mut self.percent,
        }
    }

    /// Clears both cells.
    pub fn clear(&mut self) {
        self.amount = FieldValue::Unset;
        self.percent = FieldValue::Unset;
    }

    /// True when both cells hold numbers.
    pub const fn is_filled(&self) -> bool {
        self.amount.is_value() && self.percent.is_value()
    }
}

/// The allocation owned by an engine: mode, target total and one row per participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AllocationState {
    /// Current allocation mode
    pub mode: AllocationMode,
    /// Amount being split
    pub total: Decimal,
    /// Rows in participant order
    pub entries: Vec<AllocationEntry>,
}

impl AllocationState {
    /// Finds the row of a participant.
    pub fn entry(&self, participant_id: &str) -> Option<&AllocationEntry> {
        self.entries.iter().find(|e| e.participant_id == participant_id)
    }
}

/// Aggregate reconciliation figures for presentation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    /// Sum of all amount cells
    pub total_assigned_amount: Decimal,
    /// Sum of all percent cells
    pub total_assigned_percent: Decimal,
    /// Total minus the assigned amount; negative when over-allocated
    pub remaining_amount: Decimal,
    /// 100 minus the assigned percent; negative when over-allocated
    pub remaining_percent: Decimal,
    /// Whether the allocation may be confirmed
    pub is_complete: bool,
}

/// A confirmed share, handed to the payment-confirmation step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedAllocation {
    /// Identifier of the participant
    pub participant_id: String,
    /// Amount owed by the participant
    pub amount: Decimal,
    /// Share of the total in percent
    pub percent: Decimal,
}
