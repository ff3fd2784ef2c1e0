//! Cent rounding shared by every SplitPay computation.

use rust_decimal::{Decimal, RoundingStrategy};

/// One hundred, the percent scale.
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest difference still considered reconciled (one cent, or 0.01 percent).
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rounds half away from zero to two decimal places.
///
/// `2.345` becomes `2.35` and `-2.345` becomes `-2.35`.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum of `values`, or `None` when it leaves the decimal range.
pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, Decimal::checked_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_midpoint_away_from_zero() {
        assert_eq!(round2(dec!(2.345)), dec!(2.35));
        assert_eq!(round2(dec!(2.344)), dec!(2.34));
        assert_eq!(round2(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round2(dec!(33.333333)), dec!(33.33));
    }

    #[test]
    fn checked_sum_reports_overflow() {
        assert_eq!(checked_sum([dec!(1.5), dec!(2.25)]), Some(dec!(3.75)));
        assert_eq!(checked_sum([]), Some(Decimal::ZERO));
        assert_eq!(checked_sum([Decimal::MAX, Decimal::ONE]), None);
    }

    #[test]
    fn tolerance_is_one_cent() {
        assert_eq!(TOLERANCE, dec!(0.01));
    }
}
