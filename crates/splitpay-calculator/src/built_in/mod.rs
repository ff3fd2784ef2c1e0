//! Built-in calculators used by the allocation engine and the amount step.

// Allocation calculators
pub mod amount_percent;
pub mod even_split;

// Amount-entry calculators
pub mod tip;
