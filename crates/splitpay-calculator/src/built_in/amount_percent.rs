//! Amount ↔ percent conversion.
//!
//! percent = round2(amount / total * 100)
//! amount  = round2(percent / 100 * total)
//!
//! Both return 0 when `total` is zero or negative. Results that fall outside the
//! decimal range also collapse to 0.

use rust_decimal::Decimal;

use crate::rounding::{HUNDRED, round2};

/// Share of `total` represented by `amount`, in percent.
pub fn percent_of_total(amount: Decimal, total: Decimal) -> Decimal {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    amount
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map(round2)
        .unwrap_or_default()
}

/// Amount of `total` represented by `percent`.
pub fn amount_from_percent(percent: Decimal, total: Decimal) -> Decimal {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent
        .checked_div(HUNDRED)
        .and_then(|ratio| ratio.checked_mul(total))
        .map(round2)
        .unwrap_or_default()
}
