#![deny(warnings)]
#![allow(missing_docs)]
//! Core functionality for SplitPay.
//!
//! This crate holds the allocation engine that keeps amounts and percentages of a
//! split in sync, together with the wizard steps that feed it: contact selection
//! and amount entry.

use tracing::{debug, instrument};

/// Base amount and tip entry
pub mod amount;
/// Contact selection for the first wizard step
pub mod contacts;
/// Allocation state machine
pub mod engine;
/// Error types for core operations
pub mod error;
/// Step sequencing of the split flow
pub mod wizard;

pub use amount::{AmountEntry, TipChoice, TipPreset};
pub use contacts::ContactSelection;
pub use engine::AllocationEngine;
pub use error::{ErrorCategory, SplitPayError, SplitPayResult};
pub use splitpay_types::{
    AllocationEntry, AllocationMode, AllocationState, AllocationSummary, Field, FieldValue,
    FinalizedAllocation, Participant,
};
pub use wizard::{SplitWizard, WizardStep};

/// Initialize the core components
#[instrument]
pub fn init() {
    debug!("Initializing SplitPay core");
}
