//! Canonicalization of normalized names
//!
//! Turns pairwise similarity into a name → canonical-name mapping. The
//! default [`ClusterStrategy::Greedy`] pass visits names in first-seen order
//! and maps each one to its best match over the whole candidate set. Because
//! every name also matches itself with a perfect score, a name only moves to
//! another label when an earlier candidate ties it at 100 (for example the
//! same words in a different order).
//!
//! The greedy pass is not transitive: `x` may map to `y` while `y` maps to
//! `z`. [`CanonicalMapping::chains`] reports such links. The opt-in
//! [`ClusterStrategy::Connected`] pass avoids them by grouping connected
//! components of the "scores at or above threshold" graph.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use petgraph::unionfind::UnionFind;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{check_score_bound, NamefoldError, Result};
use crate::extract::rank;
use crate::normalize::normalize_game_name;
use crate::similarity::{ratio_of_keys, token_sort_key, Score};

/// Default canonicalization threshold
pub const DEFAULT_CANONICAL_THRESHOLD: Score = 90;

/// The distinct normalized names of one run, in first-seen order
///
/// Built once and never modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    names: Vec<String>,
    keys: Vec<String>,
    positions: HashMap<String, usize>,
}

impl CandidateSet {
    /// Collect distinct names, keeping the first occurrence of each
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for name in names {
            let name = name.into();
            if set.positions.contains_key(&name) {
                continue;
            }
            set.positions.insert(name.clone(), set.names.len());
            set.keys.push(token_sort_key(&name));
            set.names.push(name);
        }
        set
    }

    /// Normalize raw titles and collect the distinct results
    pub fn from_raw_names<I, S>(raw_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_names(
            raw_names
                .into_iter()
                .map(|raw| normalize_game_name(raw.as_ref())),
        )
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in first-seen order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// First-seen position of a name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// How similar names are grouped under one label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStrategy {
    /// Single first-seen pass; each name takes its best match
    #[default]
    Greedy,
    /// Connected components of the threshold graph; the first-seen member
    /// labels the component
    #[serde(alias = "union-find")]
    Connected,
}

impl fmt::Display for ClusterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterStrategy::Greedy => write!(f, "greedy"),
            ClusterStrategy::Connected => write!(f, "connected"),
        }
    }
}

impl FromStr for ClusterStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" => Ok(ClusterStrategy::Greedy),
            "connected" | "union-find" => Ok(ClusterStrategy::Connected),
            other => Err(format!("Unknown cluster strategy: {}", other)),
        }
    }
}

/// A mapping step whose target is itself mapped elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub name: String,
    pub canonical: String,
    pub next: String,
}

/// Normalized name → canonical normalized name
///
/// Every candidate is a key exactly once and every value is a candidate.
/// Iteration follows the candidate set's first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalMapping {
    order: Vec<String>,
    targets: HashMap<String, String>,
}

impl CanonicalMapping {
    fn insert(&mut self, name: String, canonical: String) -> bool {
        if self.targets.contains_key(&name) {
            return false;
        }
        self.order.push(name.clone());
        self.targets.insert(name, canonical);
        true
    }

    /// Canonical label of a normalized name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.targets.get(name).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(name, canonical)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.targets[name].as_str()))
    }

    /// Entries whose canonical label is itself mapped to a different label
    pub fn chains(&self) -> Vec<Chain> {
        self.iter()
            .filter_map(|(name, canonical)| {
                let next = self.get(canonical)?;
                (next != canonical).then(|| Chain {
                    name: name.to_string(),
                    canonical: canonical.to_string(),
                    next: next.to_string(),
                })
            })
            .collect()
    }

    /// True when re-applying the mapping changes nothing
    pub fn is_idempotent(&self) -> bool {
        self.chains().is_empty()
    }

    /// Distinct canonical labels in first-seen order
    pub fn canonical_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.iter()
            .map(|(_, canonical)| canonical)
            .filter(|canonical| seen.insert(*canonical))
            .collect()
    }

    /// Plain map, for callers that need owned lookups
    pub fn into_hash_map(self) -> HashMap<String, String> {
        self.targets
    }
}

impl Serialize for CanonicalMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, canonical) in self.iter() {
            map.serialize_entry(name, canonical)?;
        }
        map.end()
    }
}

/// Build the canonical mapping for a candidate set
///
/// Fails with `DegenerateInput` on an empty set and `InvalidConfiguration`
/// when `threshold` is above 100.
pub fn canonicalize(
    candidates: &CandidateSet,
    threshold: Score,
    strategy: ClusterStrategy,
) -> Result<CanonicalMapping> {
    check_score_bound("canonical_threshold", threshold)?;
    if candidates.is_empty() {
        return Err(NamefoldError::DegenerateInput(
            "candidate set is empty".to_string(),
        ));
    }

    let mapping = match strategy {
        ClusterStrategy::Greedy => greedy(candidates, threshold),
        ClusterStrategy::Connected => connected(candidates, threshold),
    };

    let chains = mapping.chains();
    if !chains.is_empty() {
        tracing::warn!(
            chains = chains.len(),
            "Canonical mapping contains chained labels"
        );
    }
    tracing::info!(
        names = mapping.len(),
        labels = mapping.canonical_names().len(),
        threshold,
        %strategy,
        "Standardized mapping created"
    );

    Ok(mapping)
}

fn greedy(candidates: &CandidateSet, threshold: Score) -> CanonicalMapping {
    let mut mapping = CanonicalMapping::default();

    for (name, key) in candidates.names.iter().zip(&candidates.keys) {
        if mapping.contains_key(name) {
            continue;
        }

        // Queries run against the full set, including names already mapped.
        let matches = rank(key, &candidates.names, &candidates.keys, threshold);
        let canonical = matches
            .into_iter()
            .next()
            .map(|best| best.candidate)
            .unwrap_or_else(|| name.clone());

        if canonical != *name {
            tracing::debug!(
                name = name.as_str(),
                canonical = canonical.as_str(),
                "Mapped to earlier spelling"
            );
        }
        mapping.insert(name.clone(), canonical);
    }

    mapping
}

fn connected(candidates: &CandidateSet, threshold: Score) -> CanonicalMapping {
    let n = candidates.len();
    let mut components = UnionFind::<usize>::new(n);

    for i in 0..n {
        for j in (i + 1)..n {
            if ratio_of_keys(&candidates.keys[i], &candidates.keys[j]) >= threshold {
                components.union(i, j);
            }
        }
    }

    // Walking in first-seen order makes the earliest member the label.
    let mut representative: HashMap<usize, usize> = HashMap::new();
    let mut mapping = CanonicalMapping::default();
    for (i, name) in candidates.names.iter().enumerate() {
        let rep = *representative.entry(components.find(i)).or_insert(i);
        mapping.insert(name.clone(), candidates.names[rep].clone());
    }

    mapping
}
