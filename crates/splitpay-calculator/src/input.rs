//! Turning raw text-field input into numbers.
//!
//! Input arrives one keystroke at a time, so text such as `"."` or `"-"` is a
//! legitimate intermediate state rather than an error. [`parse_input`] tells the
//! three cases apart: a usable number, partial text to keep as typed, and nothing
//! usable at all.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static LEADING_ZEROS_BEFORE_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+([1-9])").expect("leading zero pattern is valid"));

static LEADING_ZEROS_BEFORE_POINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+(\.|$)").expect("leading zero pattern is valid"));

/// Outcome of reading one text-field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// The text is a finite number
    Number(Decimal),
    /// Normalized text that does not parse yet, kept so the user can keep typing
    Partial(String),
    /// Empty or rejected input
    Empty,
}

/// Cleans raw input.
///
/// Characters outside `[0-9.-]` are dropped and redundant leading zeros are
/// collapsed (`005` → `5`, `00.5` → `0.5`, `00` → `0`). Returns `None` when the
/// text carries more than one decimal point or more than one minus sign.
pub fn normalize_input(raw: &str) -> Option<String> {
    let kept: String =
        raw.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-').collect();

    if kept.matches('.').count() > 1 || kept.matches('-').count() > 1 {
        return None;
    }

    let (sign, body) = match kept.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", kept.as_str()),
    };
    let body = LEADING_ZEROS_BEFORE_DIGIT.replace(body, "$1");
    let body = LEADING_ZEROS_BEFORE_POINT.replace(&body, "0$1");

    Some(format!("{sign}{body}"))
}

/// Normalizes `raw` and classifies the result.
pub fn parse_input(raw: &str) -> ParsedInput {
    let Some(text) = normalize_input(raw) else {
        return ParsedInput::Empty;
    };
    if text.is_empty() {
        return ParsedInput::Empty;
    }
    match parse_number(&text) {
        Some(Some(value)) => ParsedInput::Number(value),
        // well-formed but outside the decimal range
        Some(None) => ParsedInput::Empty,
        None => ParsedInput::Partial(text),
    }
}

/// Parses normalized text, accepting a bare leading or trailing decimal point
/// (`".5"`, `"5."`). A lone `.` or `-`, or a minus sign anywhere but the front,
/// is not a number yet and yields `None`. A number that does not fit in a
/// [`Decimal`] yields `Some(None)`.
fn parse_number(text: &str) -> Option<Option<Decimal>> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if body.contains('-') || !body.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let body = body.strip_suffix('.').unwrap_or(body);
    let mut digits = String::with_capacity(body.len() + 2);
    if negative {
        digits.push('-');
    }
    if body.starts_with('.') {
        digits.push('0');
    }
    digits.push_str(body);

    Some(Decimal::from_str(&digits).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn strips_foreign_characters() {
        assert_eq!(normalize_input("$1,234.50").as_deref(), Some("1234.50"));
        assert_eq!(normalize_input("abc").as_deref(), Some(""));
    }

    #[test]
    fn collapses_leading_zeros() {
        assert_eq!(normalize_input("005").as_deref(), Some("5"));
        assert_eq!(normalize_input("00.5").as_deref(), Some("0.5"));
        assert_eq!(normalize_input("00").as_deref(), Some("0"));
        assert_eq!(normalize_input("0").as_deref(), Some("0"));
        assert_eq!(normalize_input("-007").as_deref(), Some("-7"));
        assert_eq!(normalize_input("100").as_deref(), Some("100"));
    }

    #[test]
    fn rejects_repeated_separators() {
        assert_eq!(normalize_input("1.2.3"), None);
        assert_eq!(normalize_input("--4"), None);
        assert_eq!(parse_input("1..2"), ParsedInput::Empty);
    }

    #[test]
    fn classifies_input() {
        assert_eq!(parse_input("30"), ParsedInput::Number(dec!(30)));
        assert_eq!(parse_input("5."), ParsedInput::Number(dec!(5)));
        assert_eq!(parse_input(".5"), ParsedInput::Number(dec!(0.5)));
        assert_eq!(parse_input("-.25"), ParsedInput::Number(dec!(-0.25)));
        assert_eq!(parse_input("."), ParsedInput::Partial(".".to_string()));
        assert_eq!(parse_input("-"), ParsedInput::Partial("-".to_string()));
        assert_eq!(parse_input("5-"), ParsedInput::Partial("5-".to_string()));
        assert_eq!(parse_input(""), ParsedInput::Empty);
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert_eq!(
            parse_input("79228162514264337593543950335"),
            ParsedInput::Number(Decimal::MAX)
        );
        assert_eq!(parse_input("79228162514264337593543950336"), ParsedInput::Empty);
        assert_eq!(parse_input(&format!("-{}", "9".repeat(40))), ParsedInput::Empty);
    }
}
