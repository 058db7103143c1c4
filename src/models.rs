// src/models.rs - Shared data types for the dedupe pipeline
use serde::Serialize;
use std::collections::HashSet;

use crate::matching::name::NameNormalizer;

/// Indices `(i, j)` into the unique name list, always with `i < j`.
pub type IndexPair = (usize, usize);

/// The original (un-normalized) names behind an accepted `IndexPair`.
pub type NamePair = (String, String);

/// Counters collected while scanning the pair space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub pairs_considered: usize,
    pub jaccard_passed: usize,
    pub fuzzy_passed: usize,
}

impl ScanStats {
    pub fn absorb(&mut self, other: ScanStats) {
        self.pairs_considered += other.pairs_considered;
        self.jaccard_passed += other.jaccard_passed;
        self.fuzzy_passed += other.fuzzy_passed;
    }

    /// Share of considered pairs that reached the fuzzy stage, in percent.
    pub fn jaccard_pass_rate(&self) -> f64 {
        if self.pairs_considered == 0 {
            0.0
        } else {
            (self.jaccard_passed as f64 / self.pairs_considered as f64) * 100.0
        }
    }
}

/// Unique raw names and their canonical keys.
///
/// `canonical_keys()[i]` is always the normalized form of `unique_names()[i]`;
/// both vectors are built together and never exposed mutably.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedNames {
    raw_count: usize,
    unique: Vec<String>,
    canonical: Vec<String>,
}

impl CleanedNames {
    /// Drops exact duplicates (first occurrence wins) and normalizes what is left.
    pub fn build(raw_names: Vec<String>, normalizer: &NameNormalizer) -> Self {
        let raw_count = raw_names.len();
        let unique = unique_in_order(raw_names);
        let canonical = unique.iter().map(|name| normalizer.normalize(name)).collect();
        Self {
            raw_count,
            unique,
            canonical,
        }
    }

    pub fn unique_names(&self) -> &[String] {
        &self.unique
    }

    pub fn canonical_keys(&self) -> &[String] {
        &self.canonical
    }

    pub fn len(&self) -> usize {
        self.unique.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unique.is_empty()
    }

    /// Number of names in the source list, duplicates included.
    pub fn raw_count(&self) -> usize {
        self.raw_count
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.raw_count - self.unique.len()
    }

    /// Unique names whose canonical key came out empty (made only of noise words).
    pub fn empty_key_count(&self) -> usize {
        self.canonical.iter().filter(|key| key.is_empty()).count()
    }
}

fn unique_in_order(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
