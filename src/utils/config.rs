//! Run configuration for the dedupe binary.
//! Values come from environment variables (optionally via .env) and can be
//! overridden per run from the command line.

use log::{info, warn};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::constants::{
    DEFAULT_DISPLAY_LIMIT, DEFAULT_FUZZY_THRESHOLD, DEFAULT_INPUT_PATH, DEFAULT_JACCARD_THRESHOLD,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DedupeConfig {
    pub input_path: PathBuf,
    pub jaccard_threshold: f64,
    pub fuzzy_threshold: f64,
    /// How many pairs to print; the full count is always reported.
    pub display_limit: usize,
    /// Use the rayon pool for the pair scan.
    pub parallel: bool,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            jaccard_threshold: DEFAULT_JACCARD_THRESHOLD,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            display_limit: DEFAULT_DISPLAY_LIMIT,
            parallel: false,
        }
    }
}

impl DedupeConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            input_path: lookup("DEDUPE_INPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            jaccard_threshold: parse_or(&lookup, "DEDUPE_JACCARD_THRESHOLD", defaults.jaccard_threshold),
            fuzzy_threshold: parse_or(&lookup, "DEDUPE_FUZZY_THRESHOLD", defaults.fuzzy_threshold),
            display_limit: parse_or(&lookup, "DEDUPE_DISPLAY_LIMIT", defaults.display_limit),
            parallel: parse_or(&lookup, "DEDUPE_PARALLEL", defaults.parallel),
        }
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("🔍 Dedupe configuration");
        info!("   Input: {}", self.input_path.display());
        info!(
            "   Thresholds: jaccard >= {}, fuzzy >= {}",
            self.jaccard_threshold, self.fuzzy_threshold
        );
        if self.parallel {
            info!("   Pair scan: parallel ({} CPUs available)", num_cpus::get());
        } else {
            info!("   Pair scan: sequential");
        }
    }
}

/// Parses `key` if present; unparseable values fall back to `default` with a warning.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value {:?} for {}; using {}", raw, key, default);
            default
        }),
        None => default,
    }
}

/// Environment variable reference, printed by `dedupe --print-env-example`.
pub fn env_config_example() -> String {
    format!(
        "# Dedupe configuration\n\
         # Set these environment variables (or put them in .env):\n\
         \n\
         # JSON file with an array of organization names (default: {input})\n\
         export DEDUPE_INPUT_PATH={input}\n\
         \n\
         # Token-overlap pre-filter, 0.0-1.0 (default: {jaccard})\n\
         export DEDUPE_JACCARD_THRESHOLD={jaccard}\n\
         \n\
         # Blended fuzzy score cut-off, 0-100 (default: {fuzzy})\n\
         export DEDUPE_FUZZY_THRESHOLD={fuzzy}\n\
         \n\
         # Pairs printed after the run (default: {limit})\n\
         export DEDUPE_DISPLAY_LIMIT={limit}\n\
         \n\
         # Scan pairs on all cores (default: false)\n\
         export DEDUPE_PARALLEL=false\n\
         \n\
         # Progress bar (default: true) and its refresh interval\n\
         export PROGRESS_ENABLED=true\n\
         export PROGRESS_REFRESH_RATE_MS=100\n\
         export PROGRESS_SHOW_MEMORY=true\n",
        input = DEFAULT_INPUT_PATH,
        jaccard = DEFAULT_JACCARD_THRESHOLD,
        fuzzy = DEFAULT_FUZZY_THRESHOLD,
        limit = DEFAULT_DISPLAY_LIMIT,
    )
}
