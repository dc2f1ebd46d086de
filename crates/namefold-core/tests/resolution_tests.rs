//! Resolution integration tests
//!
//! End-to-end runs over small play logs, the CSV boundary and the log sink.

use std::io::Write;

use namefold_core::{
    canonicalize, find_similar, load_records, normalize_game_name, token_sort_ratio,
    CandidateSet, ClusterStrategy, LogSink, NamefoldError, QueryProcessor, RawRecord, Resolver,
    ResolverConfig,
};
use rstest::rstest;
use tempfile::{tempdir, NamedTempFile};
use tracing_subscriber::EnvFilter;

fn records(names: &[&str]) -> Vec<RawRecord> {
    names.iter().map(|n| RawRecord::named(*n)).collect()
}

const SCENARIO: [&str; 4] = [
    "Skyrim",
    "Skyrim - Game of the Year Edition",
    "Bioshock Infinite",
    "BioShockInfinite",
];

// === Normalization ===

#[rstest]
#[case("The Elder Scrolls V: Skyrim - Game of the Year Edition", "the elder scrolls v skyrim goty")]
#[case("Skyrim - Game of the Year Edition", "skyrim goty")]
#[case("BioShockInfinite", "bioshockinfinite")]
#[case("Counter-Strike: Global Offensive", "counter strike global offensive")]
#[case("Deus Ex: Human Revolution - Director's Cut", "deus ex human revolution directorscut")]
#[case("Sid Meier's Civilization V", "sid meiers civilization v")]
#[case("Tom Clancy's Rainbow Six   Siege", "tom clancys rainbow six siege")]
#[case("Fallout: New Vegas Ultimate Edition", "fallout new vegas ultimate")]
#[case("---", "")]
#[case("", "")]
fn test_normalize_cases(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_game_name(raw), expected);
}

// === Literal scores for the scenario pairs ===

#[test]
fn test_scenario_pair_scores() {
    let skyrim = normalize_game_name(SCENARIO[0]);
    let skyrim_goty = normalize_game_name(SCENARIO[1]);
    let bioshock = normalize_game_name(SCENARIO[2]);
    let bioshock_joined = normalize_game_name(SCENARIO[3]);

    assert_eq!(token_sort_ratio(&skyrim, &skyrim_goty), 55);
    assert_eq!(token_sort_ratio(&bioshock, &bioshock_joined), 94);
}

// === End-to-end ===

#[test]
fn test_scenario_greedy_at_90() {
    let resolver = Resolver::new(ResolverConfig::default()).unwrap();
    let resolution = resolver.resolve(&records(&SCENARIO)).unwrap();

    // Every name's self-score of 100 beats its best rival, so each keeps its
    // own label and nothing is reported.
    for (name, canonical) in resolution.mapping.iter() {
        assert_eq!(name, canonical);
    }
    assert!(resolution.duplicates.is_empty());
    assert!(resolution.chains.is_empty());
}

#[test]
fn test_scenario_connected_at_90() {
    let resolver = Resolver::new(ResolverConfig {
        strategy: ClusterStrategy::Connected,
        ..ResolverConfig::default()
    })
    .unwrap();
    let resolution = resolver.resolve(&records(&SCENARIO)).unwrap();

    assert_eq!(resolution.duplicates.len(), 1);
    let group = &resolution.duplicates[0];
    assert_eq!(group.canonical_name, "bioshock infinite");
    assert_eq!(group.members, vec!["Bioshock Infinite", "BioShockInfinite"]);

    // 55 is below the threshold, so the Skyrim spellings stay apart.
    assert_eq!(resolution.canonical_of("Skyrim"), Some("skyrim"));
    assert_eq!(
        resolution.canonical_of("Skyrim - Game of the Year Edition"),
        Some("skyrim goty")
    );
}

#[test]
fn test_scenario_connected_at_55_groups_skyrim() {
    let resolver = Resolver::new(ResolverConfig {
        strategy: ClusterStrategy::Connected,
        canonical_threshold: 55,
        ..ResolverConfig::default()
    })
    .unwrap();
    let resolution = resolver.resolve(&records(&SCENARIO)).unwrap();

    let skyrim = resolution
        .duplicates
        .iter()
        .find(|g| g.canonical_name == "skyrim")
        .expect("skyrim group");
    assert_eq!(
        skyrim.members,
        vec!["Skyrim", "Skyrim - Game of the Year Edition"]
    );
}

#[test]
fn test_reordered_titles_group_under_first_seen() {
    let resolver = Resolver::new(ResolverConfig::default()).unwrap();
    let input = records(&[
        "The Elder Scrolls V Skyrim",
        "Portal 2",
        "Skyrim: The Elder Scrolls V",
        "portal-2",
        "Portal 2",
    ]);
    let resolution = resolver.resolve(&input).unwrap();

    assert_eq!(resolution.duplicates.len(), 2);
    assert_eq!(
        resolution.duplicates[0].canonical_name,
        "the elder scrolls v skyrim"
    );
    assert_eq!(
        resolution.duplicates[0].members,
        vec!["The Elder Scrolls V Skyrim", "Skyrim: The Elder Scrolls V"]
    );
    assert_eq!(resolution.duplicates[1].canonical_name, "portal 2");
    assert_eq!(resolution.duplicates[1].members, vec!["Portal 2", "portal-2"]);
}

#[test]
fn test_single_spelling_not_reported() {
    let resolver = Resolver::new(ResolverConfig::default()).unwrap();
    let resolution = resolver
        .resolve(&records(&["Dota 2", "Dota 2", "Dota 2"]))
        .unwrap();
    assert!(resolution.duplicates.is_empty());
}

// === Greedy chains ===

#[test]
fn test_greedy_chain_left_in_place() {
    // Long single-token names one edit apart round up to 100, two edits
    // apart round down to 99.
    let z = "a".repeat(250);
    let y = format!("{}b", "a".repeat(249));
    let x = format!("{}bb", "a".repeat(248));
    assert_eq!(token_sort_ratio(&z, &y), 100);
    assert_eq!(token_sort_ratio(&y, &x), 100);
    assert_eq!(token_sort_ratio(&z, &x), 99);

    let candidates = CandidateSet::from_names([z.clone(), y.clone(), x.clone()]);
    let greedy = canonicalize(&candidates, 90, ClusterStrategy::Greedy).unwrap();

    assert_eq!(greedy.get(&x), Some(y.as_str()));
    assert_eq!(greedy.get(&y), Some(z.as_str()));
    let chains = greedy.chains();
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].name, x);
    assert_eq!(chains[0].next, z);

    let connected = canonicalize(&candidates, 90, ClusterStrategy::Connected).unwrap();
    assert!(connected.is_idempotent());
    assert_eq!(connected.get(&x), Some(z.as_str()));
}

// === Ad-hoc lookups ===

#[test]
fn test_lookup_with_both_processors() {
    let candidates = CandidateSet::from_raw_names([
        "The Elder Scrolls V Skyrim",
        "The Elder Scrolls V: Skyrim",
        "BioShock Infinite",
    ]);

    let game_name = find_similar(
        "The Elder Scrolls V Skyrim",
        candidates.names(),
        85,
        5,
        QueryProcessor::GameName,
    )
    .unwrap();
    assert_eq!(game_name.len(), 1);
    assert_eq!(game_name[0].candidate, "the elder scrolls v skyrim");
    assert_eq!(game_name[0].score, 100);

    let default = find_similar(
        "BioShock Infinite!",
        candidates.names(),
        85,
        5,
        QueryProcessor::Default,
    )
    .unwrap();
    assert_eq!(default[0].candidate, "bioshock infinite");
}

// === CSV boundary ===

#[test]
fn test_load_records_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "151603712,\"The Elder Scrolls V Skyrim\",purchase,1.0,0").unwrap();
    writeln!(file, "151603712,\"Fallout 4\",play,87.0,0").unwrap();
    writeln!(file, "187131847,\"Fallout 4\",purchase,1.0,0").unwrap();

    let loaded = load_records(file.path()).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[1], RawRecord::new("151603712", "Fallout 4", "play", "87.0", "0"));

    let resolution = Resolver::new(ResolverConfig::default())
        .unwrap()
        .resolve(&loaded)
        .unwrap();
    assert_eq!(resolution.candidates.len(), 2);
    assert_eq!(resolution.records[2].record, loaded[2]);
}

#[test]
fn test_load_records_missing_file() {
    let dir = tempdir().unwrap();
    let err = load_records(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, NamefoldError::Dataset(_)));
}

// === Log sink ===

#[test]
fn test_file_sink_receives_run_events() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("logs").join("app.log");
    let sink = LogSink::file_with_filter(&log_path, EnvFilter::new("info")).unwrap();

    let resolver = Resolver::new(ResolverConfig::default()).unwrap();
    resolver.run(&records(&SCENARIO), &sink).unwrap();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Applied game name cleaning"));
    assert!(log.contains("Standardized mapping created"));
}

#[test]
fn test_sink_is_released_after_run() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("app.log");
    let sink = LogSink::file_with_filter(&log_path, EnvFilter::new("info")).unwrap();

    let resolver = Resolver::new(ResolverConfig::default()).unwrap();
    resolver.run(&records(&["Portal"]), &sink).unwrap();
    let after_run = std::fs::read_to_string(&log_path).unwrap();

    // Outside the run the sink is no longer the current subscriber.
    resolver.resolve(&records(&["Portal"])).unwrap();
    assert_eq!(std::fs::read_to_string(&log_path).unwrap(), after_run);
}
