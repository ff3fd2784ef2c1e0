#![deny(warnings)]
//! The numeric toolbox behind SplitPay allocations.
//!
//! Everything here is a pure function over `rust_decimal::Decimal`: rounding to
//! cents, turning raw keyboard input into numbers, converting between amounts and
//! percentages, and spreading a total evenly without losing a cent.

pub mod built_in;
pub mod input;
pub mod rounding;

pub use built_in::amount_percent::{amount_from_percent, percent_of_total};
pub use built_in::even_split::{EqualShare, distribute_evenly, equal_shares};
pub use built_in::tip::{format_currency, total_with_tip};
pub use input::{ParsedInput, normalize_input, parse_input};
pub use rounding::{HUNDRED, TOLERANCE, checked_sum, round2};
