//! Keyword extraction from noisy text
//!
//! Headlines and book descriptions arrive with markup remnants, particles
//! and filler words. This module normalizes them into content keywords:
//! tokenize, strip Korean particle suffixes, drop short tokens and
//! stopwords. Extraction never fails; garbage input yields an empty set.

use std::collections::{BTreeSet, HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Filler words excluded from keyword sets (Korean news boilerplate plus
/// common English function words).
const STOP_WORDS: &[&str] = &[
    // Korean headline boilerplate
    "기자", "뉴스", "사진", "영상", "단독", "속보", "종합", "오늘", "내일", "어제", "올해",
    "이번", "지난", "관련", "통해", "위해", "대한", "대해", "때문", "그리고", "하지만",
    "그러나", "또한", "이후", "최근", "우리", "모든", "가장", "경우", "정도", "이상", "이하",
    // English function words
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "are", "was", "were", "be", "been", "it", "its", "this", "that",
    "these", "those", "not", "no", "so", "than", "too", "very", "just", "also", "now",
];

/// Trailing particles stripped from all-Hangul tokens, longest first.
const PARTICLE_SUFFIXES: &[&str] = &[
    "에서는", "으로는", "에서", "에게", "한테", "부터", "까지", "보다", "처럼", "으로",
    "이라", "라고", "은", "는", "이", "가", "을", "를", "에", "의", "도", "로", "와", "과",
    "들",
];

/// Morphological analysis seam.
///
/// The default implementation is statistical (word segmentation plus
/// particle stripping); a real morphological analyzer can be plugged in
/// without touching extraction call sites.
pub trait Analyzer: Send + Sync {
    /// Split raw text into normalized content-word candidates, in order.
    fn nouns(&self, text: &str) -> Vec<String>;
}

/// Default analyzer: Unicode word segmentation, ASCII lowercasing and
/// single-pass Korean particle stripping. Purely heuristic, so derived
/// nouns are approximate; good enough for headline keywords.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    fn is_hangul(word: &str) -> bool {
        !word.is_empty() && word.chars().all(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
    }

    fn strip_particle(word: &str) -> &str {
        // Only long-enough all-Hangul tokens carry particles worth removing
        if !Self::is_hangul(word) || word.chars().count() < 3 {
            return word;
        }
        for suffix in PARTICLE_SUFFIXES {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() >= 2 {
                    return stem;
                }
            }
        }
        word
    }
}

impl Analyzer for StatisticalAnalyzer {
    fn nouns(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
            .map(|w| Self::strip_particle(w).to_lowercase())
            .filter(|w| !w.is_empty())
            .collect()
    }
}

/// Extracts deduplicated keyword sets from batches of raw text.
pub struct KeywordExtractor {
    analyzer: Box<dyn Analyzer>,
    stop_words: HashSet<String>,
    min_chars: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create an extractor with the default analyzer and stopword set.
    pub fn new() -> Self {
        Self {
            analyzer: Box::new(StatisticalAnalyzer),
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            min_chars: 2,
        }
    }

    /// Replace the morphological analyzer.
    pub fn with_analyzer(mut self, analyzer: Box<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Add custom stop words.
    pub fn with_stop_words(mut self, words: &[&str]) -> Self {
        for word in words {
            self.stop_words.insert(word.to_lowercase());
        }
        self
    }

    /// Set the minimum keyword length, counted in characters not bytes.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Ordered, filtered content tokens for one text. Duplicates retained.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.analyzer
            .nouns(text)
            .into_iter()
            .filter(|w| w.chars().count() >= self.min_chars)
            .filter(|w| !self.stop_words.contains(w))
            .collect()
    }

    /// Extract the deduplicated keyword set for a batch of texts.
    ///
    /// Malformed or empty texts contribute nothing; the call never fails.
    /// The returned set is ordered, so extraction is deterministic.
    pub fn extract<T: AsRef<str>>(&self, texts: &[T]) -> BTreeSet<String> {
        let mut keywords = BTreeSet::new();
        for text in texts {
            for token in self.tokens(text.as_ref()) {
                keywords.insert(token);
            }
        }
        keywords
    }

    /// Convenience for a single text.
    pub fn extract_one(&self, text: &str) -> BTreeSet<String> {
        self.extract(&[text])
    }

    /// The `n` most frequent keywords across a batch, ties broken by first
    /// occurrence. This is what picks a day's representative headline
    /// keywords per category.
    pub fn top_keywords<T: AsRef<str>>(&self, texts: &[T], n: usize) -> Vec<String> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut position = 0usize;
        for text in texts {
            for token in self.tokens(text.as_ref()) {
                let entry = counts.entry(token).or_insert((0, position));
                entry.0 += 1;
                position += 1;
            }
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_b.cmp(count_a).then(first_a.cmp(first_b))
        });
        ranked.truncate(n);
        ranked.into_iter().map(|(word, _)| word).collect()
    }
}
