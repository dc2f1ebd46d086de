//! Play-log records

use serde::{Deserialize, Serialize};

/// One row of the play log
///
/// Only `raw_name` is inspected; the other fields are carried as their
/// original text so they come out exactly as they went in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub user_id: String,
    #[serde(rename = "game_name")]
    pub raw_name: String,
    pub action: String,
    pub hours: String,
    pub unknown: String,
}

impl RawRecord {
    pub fn new(
        user_id: impl Into<String>,
        raw_name: impl Into<String>,
        action: impl Into<String>,
        hours: impl Into<String>,
        unknown: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            raw_name: raw_name.into(),
            action: action.into(),
            hours: hours.into(),
            unknown: unknown.into(),
        }
    }

    /// A record that only carries a title
    pub fn named(raw_name: impl Into<String>) -> Self {
        Self::new("", raw_name, "", "", "")
    }
}

/// A record together with its normalized and canonical names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    pub clean_name: String,
    pub standard_name: String,
}
