use anyhow::{Context, Result};
use clap::Parser;
use dedupe_lib::matching::manager::{run_name_dedupe, DedupeOutcome};
use dedupe_lib::matching::name::NameNormalizer;
use dedupe_lib::utils::config::{env_config_example, DedupeConfig};
use dedupe_lib::utils::env::load_env;
use dedupe_lib::utils::name_source::load_names;
use dedupe_lib::utils::progress_bars::progress_config::ProgressConfig;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Find likely-duplicate organization names in a JSON list", long_about = None)]
struct DedupeArgs {
    /// JSON file holding an array of organization names
    input: Option<PathBuf>,

    /// Minimum token overlap (0.0-1.0) before the fuzzy score is computed
    #[arg(long)]
    jaccard_threshold: Option<f64>,

    /// Minimum blended fuzzy score (0-100) for a pair to be reported
    #[arg(long)]
    fuzzy_threshold: Option<f64>,

    /// Number of pairs to print
    #[arg(long)]
    limit: Option<usize>,

    /// Scan pairs on all cores
    #[arg(long)]
    parallel: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print the supported environment variables and exit
    #[arg(long)]
    print_env_example: bool,
}

impl DedupeArgs {
    fn apply_to(&self, config: &mut DedupeConfig) {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(jaccard) = self.jaccard_threshold {
            config.jaccard_threshold = jaccard;
        }
        if let Some(fuzzy) = self.fuzzy_threshold {
            config.fuzzy_threshold = fuzzy;
        }
        if let Some(limit) = self.limit {
            config.display_limit = limit;
        }
        if self.parallel {
            config.parallel = true;
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = DedupeArgs::parse();

    if args.print_env_example {
        print!("{}", env_config_example());
        return Ok(());
    }

    load_env();
    let mut config = DedupeConfig::from_env();
    args.apply_to(&mut config);
    config.log_config();

    let mut progress_config = ProgressConfig::from_env();
    if args.no_progress || args.json {
        progress_config.enabled = false;
    }

    let raw_names = load_names(&config.input_path)
        .with_context(|| format!("Failed to load names from {}", config.input_path.display()))?;
    info!("Loaded {} names from {}", raw_names.len(), config.input_path.display());

    let outcome = run_name_dedupe(raw_names, &NameNormalizer::default(), &config, &progress_config)
        .context("Name dedupe failed")?;

    if args.json {
        let summary = outcome.summary(config.display_limit);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize result")?
        );
    } else {
        print_pairs(&outcome, config.display_limit);
    }
    Ok(())
}

fn print_pairs(outcome: &DedupeOutcome, limit: usize) {
    let summary = outcome.summary(limit);
    println!("{}", summary.count);
    if summary.shown < summary.count {
        println!("First {} of {} related pairs:", summary.shown, summary.count);
    }
    for (name1, name2) in summary.pairs {
        println!("  {:?} <-> {:?}", name1, name2);
    }
}
