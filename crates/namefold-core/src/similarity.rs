//! Token-sort similarity scoring
//!
//! Both inputs are split on whitespace, their tokens sorted and rejoined,
//! and the two rejoined strings compared by Levenshtein distance. Sorting
//! first makes the score blind to word order, so "skyrim elder scrolls" and
//! "elder scrolls skyrim" are a perfect match.

use strsim::levenshtein;

/// Similarity score between 0 and 100
pub type Score = u8;

/// Highest possible score
pub const MAX_SCORE: Score = 100;

/// Score two strings with the token-sort ratio
///
/// Symmetric, and 100 for any non-empty string compared with itself. Two
/// strings without tokens score 100; one empty and one non-empty score 0.
pub fn token_sort_ratio(a: &str, b: &str) -> Score {
    ratio_of_keys(&token_sort_key(a), &token_sort_key(b))
}

/// Canonical token order of a string: tokens sorted ascending, single-spaced
pub fn token_sort_key(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Score two strings that are already in canonical token order
pub(crate) fn ratio_of_keys(a: &str, b: &str) -> Score {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return MAX_SCORE,
        (true, false) | (false, true) => return 0,
        (false, false) => {}
    }

    let longest = a.chars().count().max(b.chars().count());
    let distance = levenshtein(a, b);
    percent_similar(distance, longest)
}

/// `100 * (1 - distance / longest)` rounded half up, in integer arithmetic
fn percent_similar(distance: usize, longest: usize) -> Score {
    let same = longest.saturating_sub(distance);
    let rounded = (200 * same + longest) / (2 * longest);
    rounded.min(MAX_SCORE as usize) as Score
}
