//! Text normalization for game titles
//!
//! Two cleaners live here:
//!
//! - [`normalize_game_name`] is the domain cleaner used to build the
//!   candidate set. It folds case, drops separators, rewrites the common
//!   edition suffixes and strips punctuation.
//! - [`default_process`] is the generic cleaner offered for ad-hoc lookups.
//!   It only folds case and blanks out non-alphanumeric characters.

/// Literal rewrites applied after hyphen handling, in order.
const EDITION_REWRITES: [(&str, &str); 3] = [
    ("game of the year edition", "goty"),
    ("directors cut", "directorscut"),
    ("edition", ""),
];

/// Normalize a raw game title into its comparison form
///
/// - Converts to lowercase
/// - Turns `" - "` and any other `-` into a single space
/// - Rewrites `game of the year edition` to `goty` and `directors cut` to
///   `directorscut`, then deletes `edition`
/// - Drops everything that is neither alphanumeric nor a plain space
/// - Collapses whitespace and trims
///
/// The pass is repeated until the output stops changing. Punctuation removal
/// can splice a rewrite target together (`"Director's Cut"` becomes
/// `"directors cut"`), and the repeat folds those too, so the result is
/// always a fixed point: `normalize_game_name(normalize_game_name(x)) ==
/// normalize_game_name(x)`.
pub fn normalize_game_name(raw: &str) -> String {
    let mut current = normalize_pass(raw);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One application of the cleaning steps
fn normalize_pass(raw: &str) -> String {
    let mut name = raw.to_lowercase();

    name = name.replace(" - ", " ").replace('-', " ");

    for (from, to) in EDITION_REWRITES {
        name = name.replace(from, to);
    }

    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();

    collapse_whitespace(&kept)
}

/// Collapse runs of whitespace into a single space and trim both ends
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Generic query cleaner
///
/// Lowercases, replaces every non-alphanumeric character with a space and
/// trims the ends. Inner whitespace runs are left as they are.
pub fn default_process(raw: &str) -> String {
    let blanked: String = raw
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    blanked.trim().to_string()
}

/// How an ad-hoc lookup query is cleaned before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryProcessor {
    /// The game-title cleaner used to build the candidate set
    #[default]
    GameName,
    /// The generic cleaner ([`default_process`])
    Default,
}

impl QueryProcessor {
    /// Clean a raw query
    pub fn apply(self, raw: &str) -> String {
        match self {
            QueryProcessor::GameName => normalize_game_name(raw),
            QueryProcessor::Default => default_process(raw),
        }
    }

    /// Short label for reports
    pub fn label(self) -> &'static str {
        match self {
            QueryProcessor::GameName => "game-name",
            QueryProcessor::Default => "default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_goty() {
        assert_eq!(
            normalize_game_name("The Elder Scrolls V: Skyrim - Game of the Year Edition"),
            "the elder scrolls v skyrim goty"
        );
    }

    #[test]
    fn test_normalize_hyphens() {
        assert_eq!(normalize_game_name("Half-Life 2"), "half life 2");
        assert_eq!(normalize_game_name("Portal - Still Alive"), "portal still alive");
    }

    #[test]
    fn test_normalize_editions() {
        assert_eq!(
            normalize_game_name("Deus Ex Human Revolution - Directors Cut"),
            "deus ex human revolution directorscut"
        );
        assert_eq!(normalize_game_name("Fallout 3 Collector's Edition"), "fallout 3 collectors");
    }

    #[test]
    fn test_normalize_reaches_fixed_point() {
        // The apostrophe only disappears after the rewrite step has run once.
        assert_eq!(
            normalize_game_name("Deus Ex: Director's Cut"),
            "deus ex directorscut"
        );
        assert_eq!(normalize_game_name("Edi.tion"), "");
    }

    #[test]
    fn test_normalize_degenerate() {
        assert_eq!(normalize_game_name(""), "");
        assert_eq!(normalize_game_name("!!! ???"), "");
        assert_eq!(normalize_game_name("  1942  "), "1942");
        assert_eq!(normalize_game_name("Tab\tSeparated"), "tabseparated");
    }

    #[test]
    fn test_default_process() {
        assert_eq!(default_process("BioShock Infinite"), "bioshock infinite");
        assert_eq!(default_process("  Half-Life 2! "), "half life 2");
        assert_eq!(default_process("a -- b"), "a    b");
    }

    #[test]
    fn test_query_processor() {
        let raw = "Skyrim - Game of the Year Edition";
        assert_eq!(QueryProcessor::GameName.apply(raw), "skyrim goty");
        assert_eq!(
            QueryProcessor::Default.apply(raw),
            "skyrim   game of the year edition"
        );
    }
}
