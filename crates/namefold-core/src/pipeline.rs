//! End-to-end resolution of a play log
//!
//! ```text
//! raw names → normalize → CandidateSet → canonicalize → mapping
//!           → per-record canonical names → duplicate groups
//! ```
//!
//! Logging goes through an explicit [`LogSink`]. [`Resolver::run`] installs
//! the sink for the duration of the run only; nothing is registered
//! process-wide.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

use crate::canonical::{canonicalize, CandidateSet, CanonicalMapping, Chain};
use crate::config::ResolverConfig;
use crate::duplicates::{find_duplicates, DuplicateGroup};
use crate::error::Result;
use crate::extract::{find_similar, Match};
use crate::normalize::{normalize_game_name, QueryProcessor};
use crate::record::{RawRecord, ResolvedRecord};

/// Where a run's log events go
#[derive(Clone)]
pub struct LogSink {
    dispatch: Dispatch,
}

impl LogSink {
    /// Drop every event
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Use an existing subscriber
    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Append plain-text events to a file, creating parent directories
    ///
    /// The level filter comes from `RUST_LOG` and defaults to `info`.
    pub fn file(path: impl AsRef<Path>) -> io::Result<Self> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        Self::file_with_filter(path, filter)
    }

    /// Append plain-text events to a file with an explicit filter
    pub fn file_with_filter(path: impl AsRef<Path>, filter: EnvFilter) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .finish();

        Ok(Self::from_dispatch(Dispatch::new(subscriber)))
    }

    /// Run `f` with this sink as the current subscriber
    pub fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl std::fmt::Debug for LogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSink").finish_non_exhaustive()
    }
}

/// Output of one resolution run
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    #[serde(skip)]
    pub candidates: CandidateSet,
    pub mapping: CanonicalMapping,
    pub records: Vec<ResolvedRecord>,
    pub duplicates: Vec<DuplicateGroup>,
    pub chains: Vec<Chain>,
}

impl Resolution {
    /// Canonical label for a raw title seen in this run
    pub fn canonical_of(&self, raw_name: &str) -> Option<&str> {
        self.mapping.get(&normalize_game_name(raw_name))
    }
}

/// Runs the resolution pipeline with a fixed configuration
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `records` with `sink` installed for the duration of the run
    pub fn run(&self, records: &[RawRecord], sink: &LogSink) -> Result<Resolution> {
        sink.scoped(|| self.resolve(records))
    }

    /// Resolve `records` under whatever subscriber is current
    pub fn resolve(&self, records: &[RawRecord]) -> Result<Resolution> {
        let span = tracing::info_span!("resolve", records = records.len());
        let _enter = span.enter();

        let clean_names: Vec<String> = records
            .iter()
            .map(|r| normalize_game_name(&r.raw_name))
            .collect();
        tracing::info!("Applied game name cleaning");

        let candidates = CandidateSet::from_names(clean_names.iter().cloned());
        let mapping = canonicalize(
            &candidates,
            self.config.canonical_threshold,
            self.config.strategy,
        )?;

        let resolved: Vec<ResolvedRecord> = records
            .iter()
            .zip(clean_names)
            .map(|(record, clean_name)| {
                let standard_name = mapping
                    .get(&clean_name)
                    .map(str::to_string)
                    .unwrap_or_else(|| clean_name.clone());
                ResolvedRecord {
                    record: record.clone(),
                    clean_name,
                    standard_name,
                }
            })
            .collect();

        let duplicates = find_duplicates(
            resolved
                .iter()
                .map(|r| (r.record.raw_name.as_str(), r.standard_name.as_str())),
        );
        tracing::info!(groups = duplicates.len(), "Duplicate analysis complete");

        let chains = mapping.chains();
        Ok(Resolution {
            candidates,
            mapping,
            records: resolved,
            duplicates,
            chains,
        })
    }

    /// Ad-hoc lookup of a raw title against a run's candidates
    pub fn lookup(
        &self,
        raw_query: &str,
        candidates: &CandidateSet,
        processor: QueryProcessor,
    ) -> Result<Vec<Match>> {
        find_similar(
            raw_query,
            candidates.names(),
            self.config.match_cutoff,
            self.config.lookup_limit,
            processor,
        )
    }
}
