// src/utils/constants.rs

/// Minimum token overlap before the fuzzy score is computed. Deliberately loose:
/// it only needs to discard pairs with no shared words.
pub const DEFAULT_JACCARD_THRESHOLD: f64 = 0.1;

/// Blended fuzzy score (0-100) a pair must reach to be reported.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 70.0;

/// Number of pairs printed after a run.
pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

pub const DEFAULT_INPUT_PATH: &str = "org_names.json";
