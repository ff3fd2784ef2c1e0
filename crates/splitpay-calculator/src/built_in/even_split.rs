//! Even Split Calculator
//!
//! Divides a total into `n` shares of `round2(total / n)` and hands the rounding
//! remainder out one cent at a time, starting from the last share. The shares
//! always add up to `round2(total)` and each one is the floor or the ceiling of
//! the exact quotient, so none of them goes negative.

use rust_decimal::Decimal;

use crate::rounding::{HUNDRED, TOLERANCE, round2};

/// Amount and percent of one equal share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualShare {
    pub amount: Decimal,
    pub percent: Decimal,
}

/// Splits `total` into `n` cent-exact shares. A non-positive total yields zeros, as
/// does a total whose shares cannot be represented.
pub fn distribute_evenly(total: Decimal, n: usize) -> Vec<Decimal> {
    if n == 0 {
        return Vec::new();
    }
    if total <= Decimal::ZERO {
        return vec![Decimal::ZERO; n];
    }

    let total = round2(total);
    let share = round2(total / Decimal::from(n));
    let mut shares = vec![share; n];

    // near the top of the decimal range the rounded shares can overshoot it
    let Some(assigned) = share.checked_mul(Decimal::from(n)) else {
        return vec![Decimal::ZERO; n];
    };
    let mut remainder = total - assigned;
    for slot in shares.iter_mut().rev() {
        if remainder.is_zero() {
            break;
        }
        let step = if remainder.is_sign_positive() { TOLERANCE } else { -TOLERANCE };
        *slot += step;
        remainder -= step;
    }

    shares
}

/// Equal amounts and percents for `n` participants.
///
/// When `total` is zero or negative every share, percent included, is zero.
pub fn equal_shares(total: Decimal, n: usize) -> Vec<EqualShare> {
    if total <= Decimal::ZERO {
        return vec![EqualShare { amount: Decimal::ZERO, percent: Decimal::ZERO }; n];
    }
    distribute_evenly(total, n)
        .into_iter()
        .zip(distribute_evenly(HUNDRED, n))
        .map(|(amount, percent)| EqualShare { amount, percent })
        .collect()
}
