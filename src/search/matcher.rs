//! Query-to-field similarity scoring.
//!
//! [`match_score`] grades how well a free-text query matches a single text field,
//! returning a score in `[0, 1]`. Whole-string checks run first and short-circuit:
//!
//! | Case | Score |
//! |------|-------|
//! | Exact (case-insensitive, trimmed) | 1.0 |
//! | Phrase bounded by non-word characters or string edges | 0.95 |
//! | Plain substring | 0.85 |
//! | Token-level matching | weighted blend, see [`token_score`] |
//!
//! The containment checks look at the whole query only. A query that is a literal
//! substring of the field never reaches token matching, even when it is a single
//! word that is also a token prefix (`"nurs"` vs `"Registered Nursing"` scores 0.85).
//! Multi-word, reordered or misspelled queries fall through to token matching.

use super::distance::similarity;
use super::tokenize::{is_word_char, tokenize};

const EXACT_SCORE: f64 = 1.0;
const PHRASE_SCORE: f64 = 0.95;
const CONTAINS_SCORE: f64 = 0.85;

const EXACT_SHARE: f64 = 0.7;
const PREFIX_SHARE: f64 = 0.5;
const FUZZY_SHARE: f64 = 0.3;
const CONSECUTIVE_BONUS: f64 = 0.1;

/// Shortest query token allowed to match as a prefix of a longer text token.
const MIN_PREFIX_LEN: usize = 3;
/// Both tokens must be at least this long before edit distance is considered.
const MIN_FUZZY_LEN: usize = 4;
/// Similarity must be strictly above this for a fuzzy match.
const FUZZY_THRESHOLD: f64 = 0.8;
const FUZZY_WEIGHT: f64 = 0.6;

/// How a single query token matched its best text token.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenMatch {
    Exact,
    /// Strong or reverse prefix, weight in `[0.7, 1)`.
    Prefix(f64),
    /// Edit-distance match, weight in `(0, 0.7)`.
    Fuzzy(f64),
}

impl TokenMatch {
    const fn weight(self) -> f64 {
        match self {
            Self::Exact => 1.0,
            Self::Prefix(w) | Self::Fuzzy(w) => w,
        }
    }
}

/// Scores how well `query` matches `text`, in `[0, 1]`.
///
/// Empty (or whitespace-only) input on either side scores 0.
pub fn match_score(query: &str, text: &str) -> f64 {
    let query = query.trim();
    let text = text.trim();
    if query.is_empty() || text.is_empty() {
        return 0.0;
    }

    let query_lower = query.to_lowercase();
    let text_lower = text.to_lowercase();

    if query_lower == text_lower {
        return EXACT_SCORE;
    }
    if contains_at_word_boundary(&text_lower, &query_lower) {
        return PHRASE_SCORE;
    }
    if text_lower.contains(&query_lower) {
        return CONTAINS_SCORE;
    }

    let base = token_score(query, text);
    let ratio = query.chars().count() as f64 / text.chars().count() as f64;
    (base * length_penalty(ratio)).min(1.0)
}

/// True if `needle` occurs in `haystack` with a non-word character or string edge
/// on both sides. Every occurrence is checked, including overlapping ones.
fn contains_at_word_boundary(haystack: &str, needle: &str) -> bool {
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }

        // Advance one character so overlapping occurrences are still seen
        let step = haystack[start..].chars().next().map_or(1, char::len_utf8);
        from = start + step;
    }
    false
}

/// Token-level score before the length penalty.
///
/// Each query token takes its best match among the text tokens. Exact hits count
/// toward a 0.7 share, prefix weights toward a 0.5 share and fuzzy weights toward a
/// 0.3 share, each averaged over the number of query tokens. Consecutive query
/// tokens landing on consecutive text positions add 0.1 per pair.
fn token_score(query: &str, text: &str) -> f64 {
    let query_tokens = tokenize(query);
    let text_tokens = tokenize(text);
    if query_tokens.is_empty() || text_tokens.is_empty() {
        return 0.0;
    }

    let mut exact_hits = 0usize;
    let mut prefix_sum = 0.0;
    let mut fuzzy_sum = 0.0;
    let mut consecutive_bonus = 0.0;
    let mut previous_position: Option<usize> = None;

    for query_token in &query_tokens {
        let Some((position, matched)) = best_match(query_token, &text_tokens, previous_position)
        else {
            previous_position = None;
            continue;
        };

        match matched {
            TokenMatch::Exact => exact_hits += 1,
            TokenMatch::Prefix(w) => prefix_sum += w,
            TokenMatch::Fuzzy(w) => fuzzy_sum += w,
        }

        if previous_position.is_some_and(|prev| prev + 1 == position) {
            consecutive_bonus += CONSECUTIVE_BONUS;
        }
        previous_position = Some(position);
    }

    let count = query_tokens.len() as f64;
    let exact_score = exact_hits as f64 / count * EXACT_SHARE;
    let prefix_score = prefix_sum / count * PREFIX_SHARE;
    let fuzzy_score = fuzzy_sum / count * FUZZY_SHARE;

    exact_score + prefix_score + fuzzy_score + consecutive_bonus
}

/// Finds the highest-weight text token for `query_token`.
///
/// Among equally weighted candidates the one right after the previous query
/// token's position wins, otherwise the earliest.
fn best_match(
    query_token: &str,
    text_tokens: &[String],
    previous_position: Option<usize>,
) -> Option<(usize, TokenMatch)> {
    let follows = |position: usize| previous_position.is_some_and(|prev| prev + 1 == position);
    let mut best: Option<(usize, TokenMatch)> = None;

    for (position, text_token) in text_tokens.iter().enumerate() {
        let Some(candidate) = token_match(query_token, text_token) else {
            continue;
        };

        let better = match best {
            None => true,
            Some((best_position, current)) => {
                candidate.weight() > current.weight()
                    || (candidate.weight() == current.weight()
                        && follows(position)
                        && !follows(best_position))
            }
        };
        if better {
            best = Some((position, candidate));
        }
    }

    best
}

/// Grades a single query token against a single text token.
fn token_match(query_token: &str, text_token: &str) -> Option<TokenMatch> {
    if query_token == text_token {
        return Some(TokenMatch::Exact);
    }

    let query_len = query_token.len();
    let text_len = text_token.len();

    if query_len >= MIN_PREFIX_LEN && text_token.starts_with(query_token) {
        return Some(TokenMatch::Prefix(
            0.1f64.mul_add(query_len as f64 / text_len as f64, 0.85),
        ));
    }
    if text_len >= MIN_PREFIX_LEN && query_token.starts_with(text_token) {
        return Some(TokenMatch::Prefix(
            0.1f64.mul_add(text_len as f64 / query_len as f64, 0.7),
        ));
    }

    if query_len >= MIN_FUZZY_LEN && text_len >= MIN_FUZZY_LEN {
        let sim = similarity(query_token, text_token);
        if sim > FUZZY_THRESHOLD {
            return Some(TokenMatch::Fuzzy(sim * FUZZY_WEIGHT));
        }
    }

    None
}

/// Damps matches where the query covers only a sliver of a long field.
fn length_penalty(ratio: f64) -> f64 {
    if ratio < 0.1 {
        0.7
    } else if ratio < 0.2 {
        0.85
    } else {
        1.0
    }
}
