//! Duplicate-group detection over canonical labels

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// A canonical label reached from more than one distinct raw spelling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub canonical_name: String,
    /// Distinct raw names, in first-seen order
    pub members: Vec<String>,
}

/// Group raw names by canonical label and keep labels with several spellings
///
/// Groups appear in the order their canonical label was first seen.
pub fn find_duplicates<I, R, C>(records: I) -> Vec<DuplicateGroup>
where
    I: IntoIterator<Item = (R, C)>,
    R: AsRef<str>,
    C: AsRef<str>,
{
    let mut groups: Vec<(DuplicateGroup, HashSet<String>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (raw, canonical) in records {
        let (raw, canonical) = (raw.as_ref(), canonical.as_ref());

        let slot = *index.entry(canonical.to_string()).or_insert_with(|| {
            groups.push((
                DuplicateGroup {
                    canonical_name: canonical.to_string(),
                    members: Vec::new(),
                },
                HashSet::new(),
            ));
            groups.len() - 1
        });

        let (group, seen) = &mut groups[slot];
        if seen.insert(raw.to_string()) {
            group.members.push(raw.to_string());
        }
    }

    groups
        .into_iter()
        .map(|(group, _)| group)
        .filter(|group| group.members.len() > 1)
        .collect()
}
