//! namefold-core: entity resolution for free-text game titles
//!
//! Play logs spell the same game many ways ("Skyrim", "The Elder Scrolls V:
//! Skyrim - Game of the Year Edition", "skyrim elder scrolls"). This crate
//! folds those spellings onto one canonical label so that counting distinct
//! games is not fragmented by punctuation, edition suffixes or word order:
//!
//! - **normalize**: deterministic title cleaning
//! - **similarity**: token-sort ratio (order-insensitive edit similarity, 0-100)
//! - **extract**: ranked candidate lookup with a score cutoff
//! - **canonical**: name → canonical-name mapping over the distinct names of a run
//! - **duplicates**: canonical labels reached from several raw spellings
//! - **pipeline**: the whole flow, with an explicitly scoped log sink
//!
//! # Example
//!
//! ```
//! use namefold_core::{RawRecord, Resolver, ResolverConfig};
//!
//! let records: Vec<RawRecord> = ["Skyrim Elder Scrolls", "Elder Scrolls: Skyrim"]
//!     .into_iter()
//!     .map(RawRecord::named)
//!     .collect();
//!
//! let resolution = Resolver::new(ResolverConfig::default())?.resolve(&records)?;
//! assert_eq!(resolution.duplicates.len(), 1);
//! assert_eq!(resolution.duplicates[0].canonical_name, "skyrim elder scrolls");
//! # Ok::<(), namefold_core::NamefoldError>(())
//! ```

pub mod canonical;
pub mod config;
#[cfg(feature = "csv")]
pub mod dataset;
pub mod duplicates;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod similarity;

pub use canonical::{canonicalize, CandidateSet, CanonicalMapping, Chain, ClusterStrategy};
pub use config::ResolverConfig;
#[cfg(feature = "csv")]
pub use dataset::{load_records, read_records};
pub use duplicates::{find_duplicates, DuplicateGroup};
pub use error::{DatasetError, NamefoldError, Result};
pub use extract::{extract, extract_top, find_similar, Match};
pub use normalize::{default_process, normalize_game_name, QueryProcessor};
pub use pipeline::{LogSink, Resolution, Resolver};
pub use record::{RawRecord, ResolvedRecord};
pub use similarity::{token_sort_ratio, token_sort_key, Score};
