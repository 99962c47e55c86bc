//! Unicode-aware decimal digits. `\d` in our patterns matches any `Nd` character,
//! so values have to be read the same way, not only for ASCII `0-9`.

use once_cell::sync::Lazy;
use regex::Regex;

static ANY_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit pattern"));
static ONE_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").expect("valid digit pattern"));

pub fn contains_digit(text: &str) -> bool {
    ANY_DIGIT.is_match(text)
}

pub fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    ONE_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a decimal digit from any script.
///
/// Unicode assigns `Nd` characters only in contiguous runs of ten, zero first,
/// so the value is the number of digit code points directly below `c`, mod 10.
pub fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let below = (0..c as u32)
        .rev()
        .map_while(|cp| char::from_u32(cp).filter(|p| is_decimal_digit(*p)))
        .count() as u32;
    Some(below % 10)
}

/// Parses a run of decimal digits. Values too large for a `u64` saturate
/// at `u64::MAX`; `None` if any character is not a digit or the run is empty.
pub fn parse_decimal(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u64, |acc, c| {
        let d = decimal_value(c)?;
        Some(acc.saturating_mul(10).saturating_add(u64::from(d)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_digit_covers_other_scripts() {
        assert!(contains_digit("shipped 3 releases"));
        assert!(contains_digit("led \u{0663} teams"));
        assert!(contains_digit("\u{0969} quarters"));
        assert!(!contains_digit("no numbers here"));
        // superscripts and fractions are not decimal digits
        assert!(!contains_digit("x\u{00B2} \u{00BD}"));
    }

    #[test]
    fn test_decimal_value_by_script() {
        assert_eq!(decimal_value('7'), Some(7));
        assert_eq!(decimal_value('\u{0660}'), Some(0));
        assert_eq!(decimal_value('\u{0665}'), Some(5));
        assert_eq!(decimal_value('\u{096F}'), Some(9));
        assert_eq!(decimal_value('\u{FF18}'), Some(8));
        // mathematical digits: five adjacent runs of ten
        assert_eq!(decimal_value('\u{1D7D8}'), Some(0));
        assert_eq!(decimal_value('\u{1D7E3}'), Some(1));
        assert_eq!(decimal_value('a'), None);
        assert_eq!(decimal_value('\u{00B2}'), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("42"), Some(42));
        assert_eq!(parse_decimal("\u{0661}\u{0662}"), Some(12));
        assert_eq!(parse_decimal("99999999999999999999999"), Some(u64::MAX));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("4a"), None);
    }
}
