//! Text tokenization for field matching.
//!
//! A token is a maximal run of ASCII word characters (`[A-Za-z0-9_]`), lower-cased,
//! at least [`MIN_TOKEN_LENGTH`] characters long. Everything else, including
//! non-Latin letters, acts as a separator. Tokens are neither stemmed nor deduplicated.

use regex::Regex;
use std::sync::LazyLock;

/// Minimum token length. Single characters carry too little signal to match on.
pub(crate) const MIN_TOKEN_LENGTH: usize = 2;

static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Za-z0-9_]+").expect("word-run pattern is valid"));

/// Returns true for the characters that make up tokens.
pub(crate) const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits text into lower-cased word tokens, preserving their order.
///
/// - `"Registered Nursing"` → `["registered", "nursing"]`
/// - `"C++ & Data-Structures"` → `["data", "structures"]` (`"c"` is too short)
/// - `"Café"` → `["caf"]` (non-ASCII letters split words)
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    WORD_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| word.len() >= MIN_TOKEN_LENGTH)
        .map(str::to_ascii_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Registered Nursing", vec!["registered", "nursing"])]
    #[case("Data-Structures & Algorithms", vec!["data", "structures", "algorithms"])]
    #[case("intro_to_c", vec!["intro_to_c"])]
    #[case("CS 101: Intro", vec!["cs", "101", "intro"])]
    #[case("a b cd", vec!["cd"])]
    #[case("Café au lait", vec!["caf", "au", "lait"])]
    fn test_tokenize_exact(#[case] input: &str, #[case] expected: Vec<&str>) {
        let tokens = tokenize(input);
        check!(tokens == expected);
    }

    #[test]
    fn test_tokens_keep_duplicates() {
        check!(tokenize("notes notes NOTES") == vec!["notes", "notes", "notes"]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    #[case("Москва")]
    #[case("日本")]
    #[case("🦀")]
    fn test_no_tokens(#[case] input: &str) {
        check!(tokenize(input).is_empty());
    }

    #[test]
    fn test_word_chars() {
        check!(is_word_char('a'));
        check!(is_word_char('Z'));
        check!(is_word_char('7'));
        check!(is_word_char('_'));
        check!(!is_word_char('-'));
        check!(!is_word_char(' '));
        check!(!is_word_char('é'));
    }
}
