//! SplitPay Types
//!
//! This crate defines the data model shared across the SplitPay workspace
//! (`splitpay-calculator`, `splitpay-core` and `splitpay-api`). Keeping these
//! types here lets the calculator and the engine agree on field values without
//! depending on each other.

#![deny(warnings)]
#![deny(missing_docs)]

mod types;
pub use types::{
    AllocationEntry, AllocationMode, AllocationState, AllocationSummary, Field, FieldValue,
    FinalizedAllocation, Participant,
};
