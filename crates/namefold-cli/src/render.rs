//! Table previews for terminal output

use std::collections::HashSet;

use comfy_table::Table;
use namefold_core::{DuplicateGroup, Match, RawRecord, ResolvedRecord};

pub fn records_table(records: &[RawRecord], rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["user_id", "game_name", "action", "hours", "unknown"]);
    for record in records.iter().take(rows) {
        table.add_row(vec![
            record.user_id.as_str(),
            record.raw_name.as_str(),
            record.action.as_str(),
            record.hours.as_str(),
            record.unknown.as_str(),
        ]);
    }
    table
}

pub fn cleaned_table(records: &[ResolvedRecord], rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["game_name", "clean_name"]);
    for resolved in records.iter().take(rows) {
        table.add_row(vec![
            resolved.record.raw_name.as_str(),
            resolved.clean_name.as_str(),
        ]);
    }
    table
}

pub fn matches_table(matches: &[Match]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["candidate", "score", "index"]);
    for m in matches {
        table.add_row(vec![
            m.candidate.clone(),
            m.score.to_string(),
            m.index.to_string(),
        ]);
    }
    table
}

/// First `rows` distinct (raw, standard) pairs in record order
pub fn standardized_table(records: &[ResolvedRecord], rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["game_name", "standard_name"]);
    let mut seen = HashSet::new();
    for resolved in records {
        if seen.len() == rows {
            break;
        }
        let pair = (
            resolved.record.raw_name.as_str(),
            resolved.standard_name.as_str(),
        );
        if seen.insert(pair) {
            table.add_row(vec![pair.0, pair.1]);
        }
    }
    table
}

pub fn duplicates_table(groups: &[DuplicateGroup], rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["standard_name", "spellings", "game_name"]);
    for group in groups.iter().take(rows) {
        table.add_row(vec![
            group.canonical_name.clone(),
            group.members.len().to_string(),
            group.members.join(" | "),
        ]);
    }
    table
}
