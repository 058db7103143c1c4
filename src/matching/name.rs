// src/matching/name.rs - Organization name canonicalization
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Legal-entity designators removed from either end of a name.
/// Entries are already lower-case and punctuation-free ("p.l.c." is matched as "plc").
pub const LEGAL_TERMS: &[&str] = &[
    "ltd", "limited", "inc", "incorporated", "corp", "corporation", "llc", "llp", "lp", "plc",
    "co", "company", "group", "gmbh", "ag", "sa", "sarl", "srl", "bv", "nv", "spa", "pty", "pte",
    "cic", "cio", "lda", "oy", "kk", "sas", "ulc", "limited liability company",
    "limited liability partnership", "public limited company", "community interest company",
    "pty ltd", "pte ltd", "co ltd", "company limited", "and co", "and company",
];

/// Low-information words deleted wherever they appear as a whole word.
pub const STOPWORDS: &[&str] = &["holdings", "the", "club", "group"];

/// Some names stack two designators ("Trading Co Ltd"). Exactly two passes are
/// made; iterating to a fixed point changes accepted outputs.
const LEGAL_TERM_PASSES: usize = 2;

/// Unicode punctuation and symbols. `\p{S}` picks up ASCII symbols such as
/// `$`, `+`, `|` and `~` that `\p{P}` alone leaves in place.
static PUNCTUATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}\p{S}]+").expect("punctuation pattern is valid"));

static DEFAULT_NORMALIZER: Lazy<NameNormalizer> = Lazy::new(NameNormalizer::default);

/// Normalize with the built-in term lists.
pub fn normalize_name(name: &str) -> String {
    DEFAULT_NORMALIZER.normalize(name)
}

/// Turns raw organization names into comparison keys.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    /// Tokenized legal terms, longest first.
    legal_terms: Vec<Vec<String>>,
    stop_words: HashSet<String>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(LEGAL_TERMS, STOPWORDS)
    }
}

impl NameNormalizer {
    pub fn new<L, S>(legal_terms: L, stop_words: S) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let mut legal_terms: Vec<Vec<String>> = legal_terms
            .into_iter()
            .map(|term| {
                term.as_ref()
                    .to_lowercase()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect();
        // Stable sort keeps list order among terms of equal length.
        legal_terms.sort_by(|a, b| b.len().cmp(&a.len()));

        let stop_words = stop_words
            .into_iter()
            .map(|word| word.as_ref().to_lowercase())
            .collect();

        Self {
            legal_terms,
            stop_words,
        }
    }

    /// Canonical key for `name`. Total over all inputs; may return "".
    pub fn normalize(&self, name: &str) -> String {
        let mut normalized = PUNCTUATION_REGEX.replace_all(name, "").to_lowercase();
        for _ in 0..LEGAL_TERM_PASSES {
            normalized = self.strip_legal_terms(&normalized);
        }
        self.remove_stop_words(&normalized).trim().to_string()
    }

    /// One stripping pass: drops the longest legal term found at the end of
    /// the name, then the longest found at the start.
    pub fn strip_legal_terms(&self, name: &str) -> String {
        let mut tokens: Vec<&str> = name.split_whitespace().collect();

        if let Some(len) = self.longest_term_at(&tokens, Anchor::End) {
            tokens.truncate(tokens.len() - len);
        }
        if let Some(len) = self.longest_term_at(&tokens, Anchor::Start) {
            tokens = tokens.split_off(len);
        }
        tokens.join(" ")
    }

    fn remove_stop_words(&self, name: &str) -> String {
        name.split_whitespace()
            .filter(|word| !self.stop_words.contains(*word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn longest_term_at(&self, tokens: &[&str], anchor: Anchor) -> Option<usize> {
        self.legal_terms
            .iter()
            .find(|term| {
                if term.len() > tokens.len() {
                    return false;
                }
                let window = match anchor {
                    Anchor::Start => &tokens[..term.len()],
                    Anchor::End => &tokens[tokens.len() - term.len()..],
                };
                window.iter().zip(term.iter()).all(|(a, b)| *a == b.as_str())
            })
            .map(Vec::len)
    }
}

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    End,
}
