//! namefold: resolve game-title spellings in a play log
//!
//! Loads a headerless `user_id, game_name, action, hours, unknown` CSV,
//! folds title spellings onto canonical labels and reports the labels that
//! were reached from more than one spelling.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use namefold_core::{
    load_records, normalize_game_name, token_sort_ratio, ClusterStrategy, LogSink, Match,
    NamefoldError, QueryProcessor, Resolution, Resolver, ResolverConfig, Score,
};
use serde::Serialize;
use thiserror::Error;

const EXAMPLE_LOOKUPS: [&str; 2] = ["The Elder Scrolls V Skyrim", "BioShock Infinite"];

#[derive(Parser)]
#[command(name = "namefold", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every title in a play log and report duplicate spellings
    Resolve {
        /// Headerless play-log CSV
        dataset: PathBuf,
        #[command(flatten)]
        options: ResolveOptions,
        /// Titles to look up against the dataset's names
        #[arg(long = "lookup", default_values = EXAMPLE_LOOKUPS)]
        lookups: Vec<String>,
        /// Rows shown in the raw and cleaned previews
        #[arg(long, default_value_t = 5)]
        preview: usize,
        /// Rows shown in the standardized-name preview
        #[arg(long, default_value_t = 20)]
        standard_rows: usize,
        /// Duplicate groups shown
        #[arg(long, default_value_t = 10)]
        duplicate_rows: usize,
        /// Emit the mapping, per-record names and duplicate report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look titles up against a play log's names
    Lookup {
        /// Headerless play-log CSV
        dataset: PathBuf,
        /// Titles to look up
        #[arg(required = true)]
        queries: Vec<String>,
        #[command(flatten)]
        options: ResolveOptions,
        /// Query cleaner: `game-name`, `default`, or `both`
        #[arg(long, default_value = "both")]
        processor: String,
    },

    /// Print the normalized form of titles
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print the token-sort similarity of two titles after normalization
    Score { a: String, b: String },
}

#[derive(clap::Args)]
struct ResolveOptions {
    /// TOML file with resolver settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Cutoff for lookups (0-100)
    #[arg(long)]
    match_cutoff: Option<Score>,
    /// Canonicalization threshold (0-100)
    #[arg(long)]
    threshold: Option<Score>,
    /// Grouping strategy: `greedy` or `connected`
    #[arg(long)]
    strategy: Option<ClusterStrategy>,
    /// Lookup result limit
    #[arg(long)]
    limit: Option<usize>,
    /// Log file
    #[arg(long, default_value = "logs/app.log")]
    log_file: PathBuf,
    /// Do not write a log file
    #[arg(long)]
    no_log: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] NamefoldError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl ResolveOptions {
    fn resolver(&self) -> Result<Resolver, CliError> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::from_toml(&std::fs::read_to_string(path)?)?,
            None => ResolverConfig::default(),
        };
        if let Some(cutoff) = self.match_cutoff {
            config.match_cutoff = cutoff;
        }
        if let Some(threshold) = self.threshold {
            config.canonical_threshold = threshold;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(limit) = self.limit {
            config.lookup_limit = limit;
        }
        Ok(Resolver::new(config)?)
    }

    fn sink(&self) -> Result<LogSink, CliError> {
        if self.no_log {
            return Ok(LogSink::disabled());
        }
        Ok(LogSink::file(&self.log_file)?)
    }
}

#[derive(Serialize)]
struct LookupReport<'a> {
    query: &'a str,
    processor: &'static str,
    matches: Vec<Match>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a ResolverConfig,
    #[serde(flatten)]
    resolution: &'a Resolution,
    lookups: Vec<LookupReport<'a>>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Resolve {
            dataset,
            options,
            lookups,
            preview,
            standard_rows,
            duplicate_rows,
            json,
        } => {
            let resolver = options.resolver()?;
            let sink = options.sink()?;
            sink.scoped(|| -> Result<(), CliError> {
                let (records, resolution) = resolve_dataset(&resolver, &dataset)?;
                let lookup_reports = run_lookups(
                    &resolver,
                    &resolution,
                    &lookups,
                    &[QueryProcessor::GameName, QueryProcessor::Default],
                )?;

                if json {
                    let report = JsonReport {
                        config: resolver.config(),
                        resolution: &resolution,
                        lookups: lookup_reports,
                    };
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report).map_err(NamefoldError::from)?
                    );
                    return Ok(());
                }

                println!("Original Data:");
                println!("{}", render::records_table(&records, preview));
                println!("\nCleaned Game Names:");
                println!("{}", render::cleaned_table(&resolution.records, preview));
                for report in &lookup_reports {
                    println!(
                        "\nSimilar games to '{}' ({} cleaner):",
                        report.query, report.processor
                    );
                    println!("{}", render::matches_table(&report.matches));
                }
                println!("\nStandardized name examples:");
                println!(
                    "{}",
                    render::standardized_table(&resolution.records, standard_rows)
                );
                println!("\nPotential duplicates to review:");
                println!(
                    "{}",
                    render::duplicates_table(&resolution.duplicates, duplicate_rows)
                );
                if !resolution.chains.is_empty() {
                    println!(
                        "\nChained labels ({}): re-run with --strategy connected to merge them",
                        resolution.chains.len()
                    );
                }
                Ok(())
            })
        }

        Commands::Lookup {
            dataset,
            queries,
            options,
            processor,
        } => {
            let processors = parse_processors(&processor)?;
            let resolver = options.resolver()?;
            let sink = options.sink()?;
            sink.scoped(|| -> Result<(), CliError> {
                let (_, resolution) = resolve_dataset(&resolver, &dataset)?;
                for report in run_lookups(&resolver, &resolution, &queries, &processors)? {
                    println!(
                        "Similar games to '{}' ({} cleaner):",
                        report.query, report.processor
                    );
                    println!("{}", render::matches_table(&report.matches));
                }
                Ok(())
            })
        }

        Commands::Normalize { names } => {
            for name in names {
                println!("{}", normalize_game_name(&name));
            }
            Ok(())
        }

        Commands::Score { a, b } => {
            println!(
                "{}",
                token_sort_ratio(&normalize_game_name(&a), &normalize_game_name(&b))
            );
            Ok(())
        }
    }
}

fn resolve_dataset(
    resolver: &Resolver,
    dataset: &Path,
) -> Result<(Vec<namefold_core::RawRecord>, Resolution), CliError> {
    tracing::info!(dataset = %dataset.display(), "Resolving play log");
    let records = load_records(dataset)?;
    let resolution = resolver.resolve(&records)?;
    Ok((records, resolution))
}

fn run_lookups<'a>(
    resolver: &Resolver,
    resolution: &Resolution,
    queries: &'a [String],
    processors: &[QueryProcessor],
) -> Result<Vec<LookupReport<'a>>, CliError> {
    let mut reports = Vec::new();
    for query in queries {
        for &processor in processors {
            reports.push(LookupReport {
                query,
                processor: processor.label(),
                matches: resolver.lookup(query, &resolution.candidates, processor)?,
            });
        }
    }
    Ok(reports)
}

fn parse_processors(value: &str) -> Result<Vec<QueryProcessor>, CliError> {
    match value {
        "game-name" => Ok(vec![QueryProcessor::GameName]),
        "default" => Ok(vec![QueryProcessor::Default]),
        "both" => Ok(vec![QueryProcessor::GameName, QueryProcessor::Default]),
        other => Err(CliError::Argument(format!(
            "unknown processor '{}', expected game-name, default or both",
            other
        ))),
    }
}
