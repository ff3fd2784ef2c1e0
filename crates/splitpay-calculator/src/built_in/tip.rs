//! Calculators for the amount-entry step: adding a tip to a base amount and
//! rendering money for display.

use rust_decimal::Decimal;

use crate::rounding::{HUNDRED, round2};

/// Adds `tip_percent` of `base` to `base`.
///
/// Adding 10% to 80 results in 88 (80 + 80 * 0.10). The result is rounded to cents.
/// Returns `None` when the total falls outside the decimal range.
pub fn total_with_tip(base: Decimal, tip_percent: Decimal) -> Option<Decimal> {
    base.checked_mul(tip_percent)
        .and_then(|tip| tip.checked_div(HUNDRED))
        .and_then(|tip| base.checked_add(tip))
        .map(round2)
}

/// Formats an amount as US dollars with thousands separators, e.g. `$1,234.50`.
///
/// A missing or zero amount renders as `$0.00`.
pub fn format_currency(amount: Option<Decimal>) -> String {
    let amount = match amount {
        Some(a) if !a.is_zero() => round2(a),
        _ => return "$0.00".to_string(),
    };

    let text = format!("{:.2}", amount.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn adds_tip() {
        assert_eq!(total_with_tip(dec!(80), dec!(10)), Some(dec!(88)));
        assert_eq!(total_with_tip(dec!(33.33), dec!(15)), Some(dec!(38.33)));
        assert_eq!(total_with_tip(dec!(50), Decimal::ZERO), Some(dec!(50)));
    }

    #[test]
    fn tip_outside_decimal_range_is_none() {
        assert_eq!(total_with_tip(Decimal::MAX, dec!(15)), None);
        assert_eq!(total_with_tip(dec!(50000000000000000000000000000), dec!(100)), None);
    }

    #[test]
    fn formats_dollars() {
        assert_eq!(format_currency(Some(dec!(1234.5))), "$1,234.50");
        assert_eq!(format_currency(Some(dec!(999))), "$999.00");
        assert_eq!(format_currency(Some(dec!(1000000))), "$1,000,000.00");
        assert_eq!(format_currency(Some(dec!(-42.1))), "-$42.10");
        assert_eq!(format_currency(Some(Decimal::ZERO)), "$0.00");
        assert_eq!(format_currency(None), "$0.00");
    }
}
