//! Candidate extraction
//!
//! Scores a query against a list of candidates, keeps those at or above a
//! cutoff and ranks them by score. Equal scores keep the candidates' source
//! order, so a query always ranks the same way for the same input.

use serde::Serialize;

use crate::error::{check_score_bound, NamefoldError, Result};
use crate::normalize::QueryProcessor;
use crate::similarity::{ratio_of_keys, token_sort_key, Score};

/// A candidate that met the cutoff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// The candidate string as given
    pub candidate: String,
    /// Token-sort similarity to the query
    pub score: Score,
    /// Position of the candidate in the source list
    pub index: usize,
}

/// Rank every candidate scoring at least `cutoff` against `query`
///
/// Results are sorted by descending score; ties keep source order. An empty
/// result is not an error. Fails only if `cutoff` is above 100.
pub fn extract<S: AsRef<str>>(query: &str, candidates: &[S], cutoff: Score) -> Result<Vec<Match>> {
    check_score_bound("cutoff", cutoff)?;

    let keys: Vec<String> = candidates
        .iter()
        .map(|c| token_sort_key(c.as_ref()))
        .collect();

    Ok(rank(&token_sort_key(query), candidates, &keys, cutoff))
}

/// Like [`extract`], keeping at most `limit` results
pub fn extract_top<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    cutoff: Score,
    limit: usize,
) -> Result<Vec<Match>> {
    check_limit(limit)?;
    let mut matches = extract(query, candidates, cutoff)?;
    matches.truncate(limit);
    Ok(matches)
}

/// Ad-hoc lookup of a raw query against already-normalized candidates
///
/// The query is cleaned with `processor`; candidates are used as they are.
pub fn find_similar<S: AsRef<str>>(
    raw_query: &str,
    candidates: &[S],
    cutoff: Score,
    limit: usize,
    processor: QueryProcessor,
) -> Result<Vec<Match>> {
    let query = processor.apply(raw_query);
    tracing::debug!(
        raw_query,
        query = query.as_str(),
        processor = processor.label(),
        "Running similarity lookup"
    );
    extract_top(&query, candidates, cutoff, limit)
}

pub(crate) fn check_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(NamefoldError::InvalidConfiguration(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Score a prepared query key against prepared candidate keys
///
/// `keys[i]` must be the token-sort key of `candidates[i]`.
pub(crate) fn rank<S: AsRef<str>>(
    query_key: &str,
    candidates: &[S],
    keys: &[String],
    cutoff: Score,
) -> Vec<Match> {
    let scores = score_all(query_key, keys);

    let mut matches: Vec<Match> = scores
        .into_iter()
        .enumerate()
        .filter(|(_, score)| *score >= cutoff)
        .map(|(index, score)| Match {
            candidate: candidates[index].as_ref().to_string(),
            score,
            index,
        })
        .collect();

    // Stable: equal scores stay in source order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[cfg(not(feature = "parallel"))]
fn score_all(query_key: &str, keys: &[String]) -> Vec<Score> {
    keys.iter().map(|key| ratio_of_keys(query_key, key)).collect()
}

#[cfg(feature = "parallel")]
fn score_all(query_key: &str, keys: &[String]) -> Vec<Score> {
    use rayon::prelude::*;

    // Indexed collect keeps candidate order, so ranking matches the
    // sequential path exactly.
    keys.par_iter()
        .map(|key| ratio_of_keys(query_key, key))
        .collect()
}
