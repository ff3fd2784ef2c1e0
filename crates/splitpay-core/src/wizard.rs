//! The three-step split flow: pick contacts, enter the amount, allocate.
//!
//! Each step gates the next one. Moving onto the split step hands the selected
//! contacts and the total to the [`AllocationEngine`]; an untouched equal split
//! follows them, while custom rows survive going back and forth.

use std::fmt;

use serde::{Deserialize, Serialize};
use splitpay_types::{
    AllocationState, AllocationSummary, Field, FinalizedAllocation, Participant,
};
use tracing::{info, instrument};

use crate::amount::AmountEntry;
use crate::contacts::ContactSelection;
use crate::engine::AllocationEngine;
use crate::error::{SplitPayError, SplitPayResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    SelectContacts,
    EnterTotal,
    Split,
}

impl WizardStep {
    /// 1-based position shown in the step indicator.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::SelectContacts => 1,
            WizardStep::EnterTotal => 2,
            WizardStep::Split => 3,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::SelectContacts => write!(f, "Select Contacts"),
            WizardStep::EnterTotal => write!(f, "Enter Total"),
            WizardStep::Split => write!(f, "Split Payment"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SplitWizard {
    step: WizardStep,
    contacts: ContactSelection,
    amount: AmountEntry,
    engine: AllocationEngine,
}

impl SplitWizard {
    pub fn new(rows: Vec<Participant>) -> Self {
        Self {
            step: WizardStep::SelectContacts,
            contacts: ContactSelection::new(rows),
            amount: AmountEntry::default(),
            engine: AllocationEngine::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn contacts(&self) -> &ContactSelection {
        &self.contacts
    }

    pub fn contacts_mut(&mut self) -> &mut ContactSelection {
        &mut self.contacts
    }

    pub fn amount(&self) -> &AmountEntry {
        &self.amount
    }

    pub fn amount_mut(&mut self) -> &mut AmountEntry {
        &mut self.amount
    }

    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    /// Whether `next` is currently allowed.
    pub fn can_proceed(&self) -> bool {
        match self.step {
            WizardStep::SelectContacts => self.contacts.selected_count() > 0,
            WizardStep::EnterTotal => self.amount.total().is_some(),
            WizardStep::Split => false,
        }
    }

    #[instrument(skip(self), fields(step = %self.step))]
    pub fn next(&mut self) -> SplitPayResult<WizardStep> {
        match self.step {
            WizardStep::SelectContacts if self.can_proceed() => {
                self.step = WizardStep::EnterTotal;
            }
            WizardStep::SelectContacts => {
                return Err(SplitPayError::step(self.step, "select at least one contact"));
            }
            WizardStep::EnterTotal => {
                let Some(total) = self.amount.total() else {
                    return Err(SplitPayError::step(self.step, "enter an amount greater than zero"));
                };
                self.engine.set_participants(self.contacts.selected());
                self.engine.set_total(total);
                self.step = WizardStep::Split;
                info!(total = %total, participants = self.engine.entries().len(), "Entered split step");
            }
            WizardStep::Split => {
                return Err(SplitPayError::step(self.step, "already on the last step"));
            }
        }
        Ok(self.step)
    }

    #[instrument(skip(self), fields(step = %self.step))]
    pub fn back(&mut self) -> SplitPayResult<WizardStep> {
        self.step = match self.step {
            WizardStep::SelectContacts => {
                return Err(SplitPayError::step(self.step, "already on the first step"));
            }
            WizardStep::EnterTotal => WizardStep::SelectContacts,
            WizardStep::Split => WizardStep::EnterTotal,
        };
        Ok(self.step)
    }

    pub fn edit_field(
        &mut self,
        participant_id: &str,
        field: Field,
        raw_text: &str,
    ) -> SplitPayResult<&AllocationState> {
        self.ensure_split_step()?;
        self.engine.edit_field(participant_id, field, raw_text)
    }

    pub fn commit_field(
        &mut self,
        participant_id: &str,
        field: Field,
    ) -> SplitPayResult<&AllocationState> {
        self.ensure_split_step()?;
        self.engine.commit_field(participant_id, field)
    }

    pub fn reset_to_equal(&mut self) -> SplitPayResult<&AllocationState> {
        self.ensure_split_step()?;
        Ok(self.engine.reset_to_equal())
    }

    pub fn summary(&self) -> AllocationSummary {
        self.engine.summarize()
    }

    /// The finalized allocation for the payment-confirmation step.
    pub fn confirm(&self) -> SplitPayResult<Vec<FinalizedAllocation>> {
        self.ensure_split_step()?;
        self.engine.confirm()
    }

    fn ensure_split_step(&self) -> SplitPayResult<()> {
        if self.step == WizardStep::Split {
            Ok(())
        } else {
            Err(SplitPayError::step(self.step, "allocation is only available on the split step"))
        }
    }
}
