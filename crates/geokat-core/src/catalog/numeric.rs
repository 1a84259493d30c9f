//! Numeric token cleanup for OCR-damaged coordinate values.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_NUMERIC: Regex = Regex::new(r"[^\d.\-]").unwrap();
    static ref ANY_DIGIT: Regex = Regex::new(r"\d").unwrap();
}

/// Characters scanners routinely misread inside numbers, with their
/// intended digits and signs. Includes both Latin and Cyrillic
/// lookalikes and every dash variant seen in the source archive.
const CONFUSABLES: &[(char, char)] = &[
    ('O', '0'),
    ('О', '0'),
    ('I', '1'),
    ('L', '1'),
    ('Е', '1'),
    ('Z', '2'),
    ('З', '3'),
    ('S', '5'),
    ('Б', '6'),
    ('B', '8'),
    ('В', '8'),
    ('°', '0'),
    ('=', '-'),
    ('−', '-'),
    ('–', '-'),
    ('—', '-'),
    ('_', '-'),
];

/// Clean one numeric token.
///
/// Maps OCR confusables to digits and signs, strips internal whitespace
/// (thousands grouping), normalizes the decimal separator to `.`,
/// collapses repeated signs and separators, and finally drops everything
/// that is not part of a number. Returns the empty string when no digit
/// survives; the caller treats that as a missing value.
pub fn clean_number(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let mapped: String = value
        .trim()
        .chars()
        .map(|c| {
            CONFUSABLES
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect();

    let mut s = WHITESPACE.replace_all(&mapped, "").replace(',', ".");

    // More than one dash: keep a leading sign if there was one, drop the
    // rest.
    if s.matches('-').count() > 1 {
        s = if s.starts_with('-') {
            format!("-{}", s.replace('-', ""))
        } else {
            s.replace('-', "")
        };
    }

    // More than one dot: the first one is the separator, the rest are
    // noise.
    if s.matches('.').count() > 1 {
        let mut parts = s.split('.');
        let head = parts.next().unwrap_or("").to_string();
        let tail: String = parts.collect();
        s = format!("{}.{}", head, tail);
    }

    let cleaned = NON_NUMERIC.replace_all(&s, "");
    if ANY_DIGIT.is_match(&cleaned) {
        cleaned.into_owned()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn passes_clean_values_through() {
        assert_eq!(clean_number("-12929.73"), "-12929.73");
        assert_eq!(clean_number("170.93"), "170.93");
        assert_eq!(clean_number("42"), "42");
    }

    #[test]
    fn normalizes_separators_and_grouping() {
        assert_eq!(clean_number("—12 929,73"), "-12929.73");
        assert_eq!(clean_number("1 701,87"), "1701.87");
        assert_eq!(clean_number("−5,0"), "-5.0");
    }

    #[test]
    fn maps_ocr_confusables() {
        assert_eq!(clean_number("ЗЗ5.12"), "335.12");
        assert_eq!(clean_number("1O0.5"), "100.5");
        assert_eq!(clean_number("=17"), "-17");
    }

    #[test]
    fn collapses_repeated_signs() {
        assert_eq!(clean_number("--5"), "-5");
        assert_eq!(clean_number("-–5"), "-5");
        assert_eq!(clean_number("5-6-7"), "567");
    }

    #[test]
    fn collapses_repeated_dots() {
        assert_eq!(clean_number("1.2.3"), "1.23");
        assert_eq!(clean_number("12..5"), "12.5");
    }

    #[test]
    fn strips_leftover_junk() {
        assert_eq!(clean_number("x17.5м"), "17.5");
    }

    #[test]
    fn no_digits_means_empty() {
        assert_eq!(clean_number("---"), "");
        assert_eq!(clean_number("прочерк"), "");
        assert_eq!(clean_number(""), "");
    }
}
