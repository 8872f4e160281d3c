//! Keyword frequency analysis over answer text.
//!
//! Pure computation: free-form text in, ranked `(term, count)` pairs out.
//! Tokens split on non-letter boundaries, are lowercased, and pass a minimum
//! length and a stop-word filter before counting.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Minimum length (in characters) for a token to count as a term.
pub const MIN_TERM_LEN: usize = 3;

/// Maximum number of terms returned by [`analyze`].
pub const MAX_TERMS: usize = 10;

/// Common English function words excluded from keyword counting.
///
/// The table is public so callers and tests can enumerate it.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "nor", "for", "yet", "so", "of", "i", "you", "he",
    "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its",
    "our", "their", "mine", "yours", "hers", "ours", "theirs", "this", "that", "these", "those",
    "who", "whom", "which", "what", "whose", "is", "am", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "having", "do", "does", "did", "doing", "will", "would",
    "shall", "should", "can", "could", "may", "might", "must", "in", "on", "at", "to", "from",
    "by", "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "up", "down", "out", "off", "over", "under", "again", "further", "here",
    "there", "where", "when", "why", "how", "all", "each", "every", "both", "few", "more",
    "most", "other", "some", "any", "no", "not", "only", "own", "same", "than", "too", "very",
    "just", "also", "now", "then", "once", "always", "never", "if", "because", "as", "until",
    "while", "although", "though", "such", "per", "via",
];

lazy_static! {
    static ref DEFAULT_ANALYZER: KeywordAnalyzer = KeywordAnalyzer::new();
}

/// A counted term, ready for chart rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    /// The normalized term
    pub name: String,
    /// Number of occurrences in the analysed text
    pub count: usize,
}

/// Keyword analyser with configurable thresholds.
pub struct KeywordAnalyzer {
    min_term_len: usize,
    max_terms: usize,
    stop_words: HashSet<String>,
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordAnalyzer {
    /// Create an analyser with the default thresholds and stop-word table
    pub fn new() -> Self {
        Self::with_config(MIN_TERM_LEN, MAX_TERMS)
    }

    /// Create an analyser with custom length and result limits
    pub fn with_config(min_term_len: usize, max_terms: usize) -> Self {
        Self {
            min_term_len,
            max_terms,
            stop_words: STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the stop-word table
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    fn is_term(&self, token: &str) -> bool {
        token.chars().count() >= self.min_term_len && !self.stop_words.contains(token)
    }

    /// Count qualifying terms and return the top ones, most frequent first.
    ///
    /// Ties keep the order in which the terms first appeared in the text, so
    /// repeated calls on identical input produce identical output.
    pub fn analyze(&self, text: &str) -> Vec<KeywordCount> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut tally: Vec<KeywordCount> = Vec::new();

        // Digits and punctuation separate tokens; they never join a term.
        for raw in text.split(|c: char| !c.is_alphabetic()) {
            if raw.is_empty() {
                continue;
            }
            let token = raw.to_lowercase();
            if !self.is_term(&token) {
                continue;
            }
            match index.get(token.as_str()) {
                Some(&slot) => tally[slot].count += 1,
                None => {
                    index.insert(token.clone(), tally.len());
                    tally.push(KeywordCount {
                        name: token,
                        count: 1,
                    });
                }
            }
        }

        // Stable sort: equal counts keep first-occurrence order.
        tally.sort_by(|a, b| b.count.cmp(&a.count));
        tally.truncate(self.max_terms);
        tally
    }
}

/// Analyse text with the default configuration
pub fn analyze(text: &str) -> Vec<KeywordCount> {
    DEFAULT_ANALYZER.analyze(text)
}
