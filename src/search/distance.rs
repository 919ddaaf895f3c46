//! Edit distance between tokens.

use rapidfuzz::distance::levenshtein;

/// Classic Levenshtein distance: insertions, deletions and substitutions all cost 1.
pub(crate) fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Normalized similarity in `[0, 1]`: `(max_len - distance) / max_len`.
///
/// Two empty strings are identical and score 1.0.
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = edit_distance(a, b);
    (max_len - distance) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("kitten", "sitting", 3)]
    #[case("flaw", "lawn", 2)]
    #[case("", "abc", 3)]
    #[case("same", "same", 0)]
    #[case("calculus", "calculas", 1)]
    fn test_edit_distance(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        check!(edit_distance(a, b) == expected);
        check!(edit_distance(b, a) == expected);
    }

    #[test]
    fn test_similarity_of_empty_strings() {
        check!(similarity("", "") == 1.0);
    }

    #[test]
    fn test_similarity_normalizes_by_longer_string() {
        // one substitution over eight characters
        check!((similarity("calculus", "calculas") - 0.875).abs() < 1e-9);
        check!(similarity("abc", "") == 0.0);
    }
}
