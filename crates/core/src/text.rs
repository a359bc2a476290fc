//! Text helpers shared by the navigator, venue picker and dashboards.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static FIRST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Combining diacritical marks block (U+0300..=U+036F).
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Fold `text` for accent- and case-insensitive matching.
///
/// Lowercases, decomposes to NFD and drops combining diacritics, so
/// `"Recintó"` and `"RECINTO"` both fold to `"recinto"`.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

/// Accent- and case-insensitive substring test.
///
/// `needle` is expected to be folded already.
pub fn folded_contains(haystack: &str, folded_needle: &str) -> bool {
    fold(haystack).contains(folded_needle)
}

/// Extract the first run of ASCII digits in `text` as a number.
///
/// Returns `None` when there are no digits or the run does not fit in a `u64`.
pub fn first_number(text: &str) -> Option<u64> {
    FIRST_NUMBER_RE
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_accents_and_case() {
        assert_eq!(fold("Recintó"), "recinto");
        assert_eq!(fold("UNIDAD EDUCATIVA SAN JOSÉ"), "unidad educativa san jose");
        assert_eq!(fold("Ñandú"), "nandu");
    }

    #[test]
    fn folded_contains_is_symmetric_over_accents() {
        assert!(folded_contains("Recintó Central", &fold("recinto")));
        assert!(folded_contains("Recinto Central", &fold("Recintó")));
        assert!(!folded_contains("Colegio", &fold("recinto")));
    }

    #[test]
    fn first_number_extracts_leading_run() {
        assert_eq!(first_number("DISTRITO 10"), Some(10));
        assert_eq!(first_number("D2 norte 7"), Some(2));
    }

    #[test]
    fn first_number_absent() {
        assert_eq!(first_number("RURAL"), None);
        assert_eq!(first_number(""), None);
    }

    #[test]
    fn first_number_ignores_non_ascii_digits() {
        assert_eq!(first_number("DISTRITO \u{0663}"), None);
        assert_eq!(first_number("\u{0663} mesa 4"), Some(4));
    }
}
