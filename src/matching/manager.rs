// src/matching/manager.rs - Runs dedupe → normalize → pair scan → materialize
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::matching::name::NameNormalizer;
use crate::matching::pairs::{extract_related_pairs, PairFinder, Thresholds};
use crate::models::{CleanedNames, NamePair, ScanStats};
use crate::utils::config::DedupeConfig;
use crate::utils::progress_bars::logging::DedupeLogger;
use crate::utils::progress_bars::progress_config::ProgressConfig;

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct DedupeOutcome {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub raw_names: usize,
    pub unique_names: usize,
    pub stats: ScanStats,
    pub related_pairs: Vec<NamePair>,
}

/// Printable view of an outcome with the pair list cut to `limit`.
#[derive(Debug, Serialize)]
pub struct DedupeSummary<'a> {
    pub run_id: &'a str,
    pub count: usize,
    pub shown: usize,
    pub stats: ScanStats,
    pub pairs: &'a [NamePair],
}

impl DedupeOutcome {
    pub fn count(&self) -> usize {
        self.related_pairs.len()
    }

    pub fn summary(&self, limit: usize) -> DedupeSummary<'_> {
        let shown = limit.min(self.related_pairs.len());
        DedupeSummary {
            run_id: &self.run_id,
            count: self.related_pairs.len(),
            shown,
            stats: self.stats,
            pairs: &self.related_pairs[..shown],
        }
    }
}

/// Finds likely-duplicate pairs in `raw_names`.
///
/// Thresholds are validated before any work is done; an out-of-range value
/// surfaces as `DedupeError::InvalidThreshold` inside the returned error.
pub fn run_name_dedupe(
    raw_names: Vec<String>,
    normalizer: &NameNormalizer,
    config: &DedupeConfig,
    progress_config: &ProgressConfig,
) -> Result<DedupeOutcome> {
    let thresholds = Thresholds::new(config.jaccard_threshold, config.fuzzy_threshold)
        .context("Invalid matching thresholds")?;

    let run_id = Uuid::new_v4().to_string();
    let started_at = Utc::now();
    let logger = DedupeLogger::new(&run_id, progress_config.should_show_memory());
    logger.log_start(thresholds.jaccard(), thresholds.fuzzy(), config.parallel);

    logger.log_phase("Preparing names", Some("dropping exact duplicates and normalizing"));
    let cleaned = CleanedNames::build(raw_names, normalizer);
    logger.log_names_prepared(cleaned.raw_count(), cleaned.len());
    logger.log_data_quality_issue("names that normalize to an empty key", cleaned.empty_key_count());

    logger.log_phase("Scanning pairs", None);
    logger.log_pair_space(cleaned.len());
    let (index_pairs, stats) = scan(&cleaned, thresholds, config.parallel, progress_config);
    logger.log_scan_results(&stats);

    logger.log_phase("Materializing pairs", None);
    let related_pairs = extract_related_pairs(&index_pairs, cleaned.unique_names());
    logger.log_debug(&format!("Materialized {} index pairs", index_pairs.len()));
    logger.log_completion(related_pairs.len());

    Ok(DedupeOutcome {
        run_id,
        started_at,
        raw_names: cleaned.raw_count(),
        unique_names: cleaned.len(),
        stats,
        related_pairs,
    })
}

fn scan(
    cleaned: &CleanedNames,
    thresholds: Thresholds,
    parallel: bool,
    progress_config: &ProgressConfig,
) -> (Vec<(usize, usize)>, ScanStats) {
    let mut finder = PairFinder::new(thresholds).parallel(parallel);
    let pb = progress_config.create_scan_bar(cleaned.len());
    if let Some(pb) = &pb {
        finder = finder.with_progress(pb.clone());
    }

    let (index_pairs, stats) = finder.scan_with_stats(cleaned.canonical_keys());

    if let Some(pb) = pb {
        pb.finish_with_message(format!("{} pairs accepted", stats.fuzzy_passed));
    }
    (index_pairs, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DedupeError;

    fn quiet_progress() -> ProgressConfig {
        ProgressConfig {
            enabled: false,
            refresh_rate_ms: 100,
            show_memory: false,
        }
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_pipeline() {
        let raw = names(&[
            "Caprice Holdings LTD",
            "THE NASHVILLE CORPORATION LIMITED",
            "OLSWANG COSEC LIMITED",
            "Caprice Holdings Limited",
            "NASSVILLE CORPORATION LTD",
            "Caprice Holdings LTD",
            "Olswang Cosec Services",
        ]);
        let outcome = run_name_dedupe(
            raw,
            &NameNormalizer::default(),
            &DedupeConfig::default(),
            &quiet_progress(),
        )
        .unwrap();

        assert_eq!(outcome.raw_names, 7);
        assert_eq!(outcome.unique_names, 6);
        assert_eq!(outcome.stats.pairs_considered, 15);
        // "nashville" and "nassville" share no token, so the Jaccard stage drops them.
        assert_eq!(
            outcome.related_pairs,
            vec![
                ("Caprice Holdings LTD".to_string(), "Caprice Holdings Limited".to_string()),
                ("OLSWANG COSEC LIMITED".to_string(), "Olswang Cosec Services".to_string()),
            ]
        );
        assert_eq!(outcome.count(), 2);
    }

    #[test]
    fn test_invalid_threshold_surfaces_typed_error() {
        let config = DedupeConfig {
            jaccard_threshold: 1.5,
            ..DedupeConfig::default()
        };
        let err = run_name_dedupe(
            names(&["a", "b"]),
            &NameNormalizer::default(),
            &config,
            &quiet_progress(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DedupeError>(),
            Some(DedupeError::InvalidThreshold { name: "jaccard_threshold", .. })
        ));
    }

    #[test]
    fn test_parallel_run_matches_sequential() {
        let raw = names(&[
            "Acme Trading Ltd",
            "ACME TRADING LIMITED",
            "Acme Trading (UK) Ltd",
            "Trading Acme Co",
            "Beta Labs Inc",
            "Labs Beta",
            "Gamma Holdings",
        ]);
        let sequential = run_name_dedupe(
            raw.clone(),
            &NameNormalizer::default(),
            &DedupeConfig::default(),
            &quiet_progress(),
        )
        .unwrap();
        let parallel = run_name_dedupe(
            raw,
            &NameNormalizer::default(),
            &DedupeConfig {
                parallel: true,
                ..DedupeConfig::default()
            },
            &quiet_progress(),
        )
        .unwrap();
        assert_eq!(sequential.related_pairs, parallel.related_pairs);
        assert_eq!(sequential.stats, parallel.stats);
        assert_ne!(sequential.run_id, parallel.run_id);
    }

    #[test]
    fn test_summary_truncates_for_display() {
        let raw = names(&["Acme Ltd", "Acme Limited", "ACME", "Acme Inc"]);
        let outcome = run_name_dedupe(
            raw,
            &NameNormalizer::default(),
            &DedupeConfig::default(),
            &quiet_progress(),
        )
        .unwrap();
        assert_eq!(outcome.count(), 6);

        let summary = outcome.summary(2);
        assert_eq!(summary.count, 6);
        assert_eq!(summary.shown, 2);
        assert_eq!(summary.pairs, &outcome.related_pairs[..2]);

        let json = serde_json::to_value(outcome.summary(20)).unwrap();
        assert_eq!(json["count"], 6);
        assert_eq!(json["pairs"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["pairs"][0][0], "Acme Ltd");
    }

    #[test]
    fn test_empty_input() {
        let outcome = run_name_dedupe(
            Vec::new(),
            &NameNormalizer::default(),
            &DedupeConfig::default(),
            &quiet_progress(),
        )
        .unwrap();
        assert_eq!(outcome.count(), 0);
        assert_eq!(outcome.stats, ScanStats::default());
    }
}
