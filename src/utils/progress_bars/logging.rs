// src/utils/progress_bars/logging.rs - Stage logging for a dedupe run
use log::{debug, info, warn};
use std::time::Instant;

use crate::models::ScanStats;
use crate::utils::get_memory_usage;

const METHOD_NAME: &str = "NAME";
const METHOD_EMOJI: &str = "👤";

#[derive(Clone)]
pub struct DedupeLogger {
    run_id: String,
    start_time: Instant,
    show_memory: bool,
}

impl DedupeLogger {
    pub fn new(run_id: &str, show_memory: bool) -> Self {
        Self {
            run_id: run_id.to_string(),
            start_time: Instant::now(),
            show_memory,
        }
    }

    pub fn log_start(&self, jaccard_threshold: f64, fuzzy_threshold: f64, parallel: bool) {
        info!(
            "[{}] {} 🚀 Starting name dedupe (run ID: {})",
            METHOD_NAME, METHOD_EMOJI, self.run_id
        );
        info!(
            "[{}] {} ⚙️  Configuration: jaccard >= {}, fuzzy >= {}, {} scan",
            METHOD_NAME,
            METHOD_EMOJI,
            jaccard_threshold,
            fuzzy_threshold,
            if parallel { "parallel" } else { "sequential" }
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed();
        let memory = if self.show_memory {
            format!(" [{} MB]", get_memory_usage())
        } else {
            String::new()
        };
        match details {
            Some(details) => info!(
                "[{}] {} 🔄 Phase: {} - {} [+{:.1}s]{}",
                METHOD_NAME, METHOD_EMOJI, phase, details, elapsed.as_secs_f32(), memory
            ),
            None => info!(
                "[{}] {} 🔄 Phase: {} [+{:.1}s]{}",
                METHOD_NAME, METHOD_EMOJI, phase, elapsed.as_secs_f32(), memory
            ),
        }
    }

    pub fn log_names_prepared(&self, raw_count: usize, unique_count: usize) {
        info!(
            "[{}] {} ✅ Prepared names: {} raw → {} unique ({} exact duplicates dropped)",
            METHOD_NAME,
            METHOD_EMOJI,
            raw_count,
            unique_count,
            raw_count - unique_count
        );
    }

    pub fn log_pair_space(&self, unique_count: usize) {
        let total_pairs = unique_count * unique_count.saturating_sub(1) / 2;
        info!(
            "[{}] {} 📈 Potential pairs to evaluate: {} (from {} unique names)",
            METHOD_NAME, METHOD_EMOJI, total_pairs, unique_count
        );
    }

    pub fn log_scan_results(&self, stats: &ScanStats) {
        info!(
            "[{}] {} 🎯 Pair filtering: {} considered → {} passed jaccard ({:.2}%) → {} passed fuzzy",
            METHOD_NAME,
            METHOD_EMOJI,
            stats.pairs_considered,
            stats.jaccard_passed,
            stats.jaccard_pass_rate(),
            stats.fuzzy_passed
        );
    }

    pub fn log_completion(&self, related_pairs: usize) {
        info!(
            "[{}] {} 🎉 COMPLETED: {} related pairs found in {:.2?}",
            METHOD_NAME,
            METHOD_EMOJI,
            related_pairs,
            self.start_time.elapsed()
        );
    }

    pub fn log_data_quality_issue(&self, issue_type: &str, count: usize) {
        if count > 0 {
            warn!(
                "[{}] {} ⚠️  Data quality: {} instances of {}",
                METHOD_NAME, METHOD_EMOJI, count, issue_type
            );
        }
    }

    pub fn log_debug(&self, message: &str) {
        debug!("[{}] {} {}", METHOD_NAME, METHOD_EMOJI, message);
    }
}
