// src/matching/similarity.rs - Token-set and edit-distance similarity between canonical keys
use std::collections::HashSet;
use strsim::normalized_levenshtein;

/// Added to each fuzzy sub-ratio so a zero in one cannot zero the harmonic mean.
pub const HARMONIC_EPSILON: f64 = 1e-9;
pub const MAX_FUZZY_SCORE: f64 = 100.0;

/// `|A ∩ B| / |A ∪ B|` over whitespace tokens. Two empty names score 0.
pub fn jaccard_similarity(name1: &str, name2: &str) -> f64 {
    let set1: HashSet<&str> = name1.split_whitespace().collect();
    let set2: HashSet<&str> = name2.split_whitespace().collect();
    let union_size = set1.union(&set2).count();
    if union_size == 0 {
        return 0.0;
    }
    set1.intersection(&set2).count() as f64 / union_size as f64
}

/// Harmonic mean of `token_sort_ratio` and `partial_ratio`, in (0, 100].
pub fn fuzzy_similarity(name1: &str, name2: &str) -> f64 {
    let m1 = token_sort_ratio(name1, name2) + HARMONIC_EPSILON;
    let m2 = partial_ratio(name1, name2) + HARMONIC_EPSILON;
    (2.0 * m1 * m2 / (m1 + m2)).min(MAX_FUZZY_SCORE)
}

/// Ratio of the two names with their tokens sorted alphabetically (0-100).
pub fn token_sort_ratio(name1: &str, name2: &str) -> f64 {
    ratio(&sorted_tokens(name1), &sorted_tokens(name2))
}

/// Best ratio between the shorter name and any equal-length window of the longer (0-100).
pub fn partial_ratio(name1: &str, name2: &str) -> f64 {
    let (len1, len2) = (name1.chars().count(), name2.chars().count());
    let (shorter, longer, window) = if len1 <= len2 {
        (name1, name2, len1)
    } else {
        (name2, name1, len2)
    };
    if window == 0 {
        return 0.0;
    }

    let longer_chars: Vec<char> = longer.chars().collect();
    let mut best = 0.0_f64;
    for start in 0..=(longer_chars.len() - window) {
        let candidate: String = longer_chars[start..start + window].iter().collect();
        let score = normalized_levenshtein(shorter, &candidate);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }
    (best * 100.0).round()
}

/// Whole-string edit-distance ratio, rounded to an integer score (0-100).
fn ratio(s1: &str, s2: &str) -> f64 {
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }
    (normalized_levenshtein(s1, s2) * 100.0).round()
}

/// Lower-cases, turns non-alphanumerics into separators, then sorts tokens.
fn sorted_tokens(name: &str) -> String {
    let processed: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    let mut tokens: Vec<&str> = processed.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::name::normalize_name;

    #[test]
    fn test_calculate_jaccard_similarity() {
        assert_eq!(jaccard_similarity("caprice", "caprice"), 1.0);
        assert_eq!(jaccard_similarity("caprice", "olswang"), 0.0);
        assert_eq!(jaccard_similarity("", ""), 0.0);
        assert_eq!(jaccard_similarity("", "caprice"), 0.0);
    }

    #[test]
    fn test_jaccard_token_sets() {
        // Duplicate tokens collapse; order is irrelevant.
        assert_eq!(jaccard_similarity("acme acme trading", "trading acme"), 1.0);
        assert!((jaccard_similarity("acme trading", "acme holdings") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(jaccard_similarity("olswang cosec", "olswang"), 0.5);
    }

    #[test]
    fn test_calculate_fuzzy_similarity() {
        assert_eq!(fuzzy_similarity("caprice", "caprice"), 100.0);
        assert!(fuzzy_similarity("caprice", "olswang") < 80.0);
        assert!(fuzzy_similarity("caprice", "le caprice") > 80.0);
    }

    #[test]
    fn test_word_order_only_ignored_by_token_sort() {
        assert_eq!(token_sort_ratio("nashville music", "music nashville"), 100.0);
        // partial_ratio compares characters in place, so swapped words score low
        // and pull the harmonic mean down: 2 * 100 * 20 / 120.
        assert_eq!(partial_ratio("nashville music", "music nashville"), 20.0);
        let score = fuzzy_similarity("nashville music", "music nashville");
        assert!((score - 100.0 / 3.0).abs() < 1e-6, "score: {}", score);
    }

    #[test]
    fn test_identity_on_keys_from_symbol_names() {
        let raw = ["A+B", "Marks + Spencer Ltd", "Price <= Value | Co", "^Caret~ Inc"];
        for name in raw {
            let key = normalize_name(name);
            assert!(!key.is_empty(), "input: {:?}", name);
            assert_eq!(fuzzy_similarity(&key, &key), 100.0, "key: {:?}", key);
        }
        assert_eq!(
            jaccard_similarity(&normalize_name("Marks + Spencer Ltd"), "marks spencer"),
            1.0
        );
    }

    #[test]
    fn test_partial_ratio_substring() {
        assert_eq!(partial_ratio("caprice", "le caprice"), 100.0);
        assert_eq!(partial_ratio("le caprice", "caprice"), 100.0);
        assert_eq!(partial_ratio("", "caprice"), 0.0);
        assert_eq!(partial_ratio("abcd", "wxyz"), 0.0);
    }

    #[test]
    fn test_fuzzy_bounds() {
        let samples = ["", "caprice", "le caprice", "olswang cosec", "nashville", "999999"];
        for a in samples {
            for b in samples {
                let score = fuzzy_similarity(a, b);
                assert!(score > 0.0 && score <= 100.0, "{:?} vs {:?} -> {}", a, b, score);
            }
        }
        // Both sub-ratios zero still leaves a positive score.
        assert!(fuzzy_similarity("", "") > 0.0);
        assert!(fuzzy_similarity("", "") < 1e-6);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let samples = [
            "",
            "caprice",
            "le caprice",
            "nashville",
            "nassville",
            "olswang cosec",
            "cosec olswang trading",
            "abc",
            "abd",
        ];
        for a in samples {
            for b in samples {
                assert_eq!(jaccard_similarity(a, b), jaccard_similarity(b, a));
                assert_eq!(fuzzy_similarity(a, b), fuzzy_similarity(b, a), "{:?} / {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_near_duplicate_spelling_scores_high() {
        assert!(fuzzy_similarity("nashville", "nassville") >= 70.0);
        assert!(fuzzy_similarity("nashville", "olswang cosec") < 70.0);
    }
}
