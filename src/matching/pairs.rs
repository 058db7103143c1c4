// src/matching/pairs.rs - Exhaustive two-stage pair scan and pair materialization
use indicatif::ProgressBar;
use log::trace;
use rayon::prelude::*;

use crate::errors::{DedupeError, DedupeResult};
use crate::matching::similarity::{fuzzy_similarity, jaccard_similarity, MAX_FUZZY_SCORE};
use crate::models::{IndexPair, NamePair, ScanStats};

/// Validated similarity cut-offs. Jaccard in [0, 1], fuzzy in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    jaccard: f64,
    fuzzy: f64,
}

impl Thresholds {
    pub fn new(jaccard_threshold: f64, fuzzy_threshold: f64) -> DedupeResult<Self> {
        check_range("jaccard_threshold", jaccard_threshold, 0.0, 1.0)?;
        check_range("fuzzy_threshold", fuzzy_threshold, 0.0, MAX_FUZZY_SCORE)?;
        Ok(Self {
            jaccard: jaccard_threshold,
            fuzzy: fuzzy_threshold,
        })
    }

    pub fn jaccard(&self) -> f64 {
        self.jaccard
    }

    pub fn fuzzy(&self) -> f64 {
        self.fuzzy
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> DedupeResult<()> {
    // NaN fails `contains` and is rejected with everything else out of range.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DedupeError::InvalidThreshold {
            name,
            value,
            min,
            max,
        })
    }
}

/// Scans every unordered pair `(i, j)`, `i < j`, of canonical keys.
///
/// Jaccard runs first as a cheap filter; the edit-distance based fuzzy score is
/// only computed for pairs that clear it. The scan is O(n²) in the number of
/// keys, which is fine for tens of thousands of names. Past that, the place to
/// cut work is a blocking key (first token, length bucket) applied before the
/// inner loop, validated against the exhaustive result.
#[derive(Clone)]
pub struct PairFinder {
    thresholds: Thresholds,
    parallel: bool,
    progress: Option<ProgressBar>,
}

impl PairFinder {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            parallel: false,
            progress: None,
        }
    }

    /// Spread outer indices across the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Advance `pb` once per outer index.
    pub fn with_progress(mut self, pb: ProgressBar) -> Self {
        self.progress = Some(pb);
        self
    }

    pub fn scan<S>(&self, keys: &[S]) -> Vec<IndexPair>
    where
        S: AsRef<str> + Sync,
    {
        self.scan_with_stats(keys).0
    }

    /// Accepted pairs in ascending `(i, j)` order, plus scan counters.
    pub fn scan_with_stats<S>(&self, keys: &[S]) -> (Vec<IndexPair>, ScanStats)
    where
        S: AsRef<str> + Sync,
    {
        let rows: Vec<(Vec<IndexPair>, ScanStats)> = if self.parallel {
            (0..keys.len())
                .into_par_iter()
                .map(|i| self.scan_row(keys, i))
                .collect()
        } else {
            (0..keys.len()).map(|i| self.scan_row(keys, i)).collect()
        };

        let mut stats = ScanStats::default();
        let mut related_indices = Vec::with_capacity(rows.iter().map(|(row, _)| row.len()).sum());
        for (row, row_stats) in rows {
            related_indices.extend(row);
            stats.absorb(row_stats);
        }
        (related_indices, stats)
    }

    fn scan_row<S: AsRef<str>>(&self, keys: &[S], i: usize) -> (Vec<IndexPair>, ScanStats) {
        let mut stats = ScanStats::default();
        let mut row = Vec::new();
        let name1 = keys[i].as_ref();

        for (j, name2) in keys.iter().enumerate().skip(i + 1) {
            let name2 = name2.as_ref();
            stats.pairs_considered += 1;

            let jaccard = jaccard_similarity(name1, name2);
            if jaccard < self.thresholds.jaccard {
                continue;
            }
            stats.jaccard_passed += 1;

            let fuzzy = fuzzy_similarity(name1, name2);
            if fuzzy >= self.thresholds.fuzzy {
                stats.fuzzy_passed += 1;
                trace!(
                    "Accepted ({}, {}) {:?} ~ {:?}: jaccard={:.3}, fuzzy={:.2}",
                    i, j, name1, name2, jaccard, fuzzy
                );
                row.push((i, j));
            }
        }

        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
        (row, stats)
    }
}

/// Index pairs whose canonical keys pass both thresholds.
///
/// Fails with `InvalidThreshold` before scanning if either threshold is out of range.
pub fn find_index_pairs<S>(
    company_names: &[S],
    jaccard_threshold: f64,
    fuzzy_threshold: f64,
) -> DedupeResult<Vec<IndexPair>>
where
    S: AsRef<str> + Sync,
{
    let thresholds = Thresholds::new(jaccard_threshold, fuzzy_threshold)?;
    Ok(PairFinder::new(thresholds).scan(company_names))
}

/// Resolves index pairs to the original names, preserving order.
///
/// Indices must come from a scan over a list of the same length as
/// `company_names`; anything else is a caller bug and panics.
pub fn extract_related_pairs<S: AsRef<str>>(
    index_pairs: &[IndexPair],
    company_names: &[S],
) -> Vec<NamePair> {
    index_pairs
        .iter()
        .map(|&(i1, i2)| {
            (
                company_names[i1].as_ref().to_string(),
                company_names[i2].as_ref().to_string(),
            )
        })
        .collect()
}
