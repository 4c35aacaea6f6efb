//! Matcher strategies
//!
//! Three independent scorers over the same (keyword, corpus) pair, plus
//! the context scorer used by hybrid mode. Each returns at most `top_k`
//! books, sorted by score descending with ISBN as the deterministic
//! tie-break, scores in [0, 1]. Out-of-vocabulary words contribute zero
//! similarity inside every loop; no matcher ever fails on them.

use std::cmp::Ordering;

use bookmatch_core::{NewsCategory, ScoredBook};
use bookmatch_embedding::{cosine_similarity, WordEmbeddingModel};

use crate::config::{ClusterSeeds, MatchConfig};
use crate::corpus::BookCorpus;

/// Substring presence of the keyword in title or description.
///
/// A hit is maximal confidence: score exactly 1.0, ties kept in catalog
/// order. Case-insensitive by default (ASCII only; Hangul has no case).
pub fn direct_match(keyword: &str, corpus: &BookCorpus, config: &MatchConfig) -> Vec<ScoredBook> {
    let needle = if config.case_sensitive_direct {
        keyword.to_string()
    } else {
        keyword.to_lowercase()
    };
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for book in corpus.books() {
        let hit = if config.case_sensitive_direct {
            book.title.contains(&needle) || book.description.contains(&needle)
        } else {
            book.title.to_lowercase().contains(&needle)
                || book.description.to_lowercase().contains(&needle)
        };
        if hit {
            matches.push(ScoredBook::new(book.isbn.clone(), 1.0));
            if matches.len() == config.top_k {
                break;
            }
        }
    }
    matches
}

/// Best embedding similarity between the keyword and each book's keyword
/// set, thresholded.
pub fn similarity_match(
    keyword: &str,
    corpus: &BookCorpus,
    model: &WordEmbeddingModel,
    config: &MatchConfig,
) -> Vec<ScoredBook> {
    let mut matches = Vec::new();
    for book in corpus.books() {
        let words = corpus.keywords_for(&book.isbn);
        if words.is_empty() {
            continue;
        }

        let mut best = 0.0f64;
        for word in words {
            let sim = model.similarity(keyword, word);
            if sim > best {
                best = sim;
            }
        }
        if best > config.similarity_threshold {
            matches.push(ScoredBook::new(book.isbn.clone(), best));
        }
    }
    rank(matches, config.top_k)
}

/// Topical affinity through the category's seed keywords.
///
/// The keyword's affinity to the seeds and each book's affinity to the
/// seeds are averaged independently; the score is their product. Negative
/// averages clamp to zero so scores stay in [0, 1].
pub fn cluster_match(
    keyword: &str,
    category: NewsCategory,
    corpus: &BookCorpus,
    model: &WordEmbeddingModel,
    seeds: &ClusterSeeds,
    config: &MatchConfig,
) -> Vec<ScoredBook> {
    let seed_words = seeds.seeds_for(category);
    if seed_words.is_empty() {
        return Vec::new();
    }

    let keyword_affinity = seed_affinity(model, keyword, seed_words).max(0.0);
    if keyword_affinity == 0.0 {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for book in corpus.books() {
        let words = corpus.keywords_for(&book.isbn);
        if words.is_empty() {
            continue;
        }

        let sum: f64 = words
            .iter()
            .map(|word| seed_affinity(model, word, seed_words))
            .sum();
        let book_affinity = (sum / words.len() as f64).max(0.0);

        let score = keyword_affinity * book_affinity;
        if score > config.cluster_threshold {
            matches.push(ScoredBook::new(book.isbn.clone(), score));
        }
    }
    rank(matches, config.top_k)
}

/// Cosine between the embedded keyword-plus-seed context and each book's
/// precomputed embedding (hybrid mode's first method).
///
/// Requires a corpus built with [`BookCorpus::with_embeddings`]; books
/// without an embedding are skipped.
pub fn context_match(
    keyword: &str,
    category: NewsCategory,
    corpus: &BookCorpus,
    model: &WordEmbeddingModel,
    seeds: &ClusterSeeds,
    config: &MatchConfig,
) -> Vec<ScoredBook> {
    let seed_words = seeds.seeds_for(category);
    let tokens: Vec<&str> = std::iter::once(keyword)
        .chain(seed_words.iter().map(String::as_str))
        .collect();
    let query = match model.embed_tokens(&tokens) {
        Some(query) => query,
        None => return Vec::new(),
    };

    let mut matches = Vec::new();
    for book in corpus.books() {
        let embedding = match corpus.embedding_for(&book.isbn) {
            Some(embedding) => embedding,
            None => continue,
        };
        let score = cosine_similarity(&query, embedding);
        if score > config.similarity_threshold {
            matches.push(ScoredBook::new(book.isbn.clone(), score));
        }
    }
    rank(matches, config.top_k)
}

/// Sort descending by score with ISBN tie-break, keep `top_k`.
fn rank(mut matches: Vec<ScoredBook>, top_k: usize) -> Vec<ScoredBook> {
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.isbn.cmp(&b.isbn))
    });
    matches.truncate(top_k);
    matches
}

fn seed_affinity(model: &WordEmbeddingModel, word: &str, seeds: &[String]) -> f64 {
    let sum: f64 = seeds.iter().map(|seed| model.similarity(word, seed)).sum();
    sum / seeds.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmatch_core::Book;
    use bookmatch_embedding::{KeywordExtractor, TrainConfig};

    fn sample_books() -> Vec<Book> {
        vec![
            Book::new("X1", "경제 입문", "경제 위기와 금융 정책 그리고 경제 회복", "한빛"),
            Book::new("X2", "야구의 역사", "야구 선수와 구단 이야기 야구 기록", "민음사"),
            Book::new("X3", "매일의 요리", "매일 만드는 요리 레시피", "창비"),
            Book::new("X4", "빈 책", "", "창비"),
        ]
    }

    fn fixture() -> (BookCorpus, WordEmbeddingModel) {
        let extractor = KeywordExtractor::new();
        let books = sample_books();
        let sequences: Vec<Vec<String>> = books
            .iter()
            .map(|b| extractor.tokens(&b.description))
            .filter(|t| !t.is_empty())
            .collect();
        let model = WordEmbeddingModel::train(&sequences, &TrainConfig::default()).unwrap();
        let corpus = BookCorpus::from_books(books, &extractor).with_embeddings(&model);
        (corpus, model)
    }

    #[test]
    fn direct_match_scores_substring_hits_at_one() {
        let (corpus, _) = fixture();
        let config = MatchConfig::default();
        let matches = direct_match("경제", &corpus, &config);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].isbn, "X1");
        assert_eq!(matches[0].score, 1.0);
    }

    #[test]
    fn direct_match_scans_titles_even_without_description() {
        let (corpus, _) = fixture();
        let config = MatchConfig::default();
        let matches = direct_match("빈 책", &corpus, &config);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].isbn, "X4");
    }

    #[test]
    fn direct_match_is_case_insensitive_by_default() {
        let books = vec![Book::new("R1", "Rust 프로그래밍", "시스템 언어 입문", "한빛")];
        let corpus = BookCorpus::from_books(books, &KeywordExtractor::new());
        let config = MatchConfig::default();
        assert_eq!(direct_match("rust", &corpus, &config).len(), 1);

        let strict = MatchConfig {
            case_sensitive_direct: true,
            ..MatchConfig::default()
        };
        assert!(direct_match("rust", &corpus, &strict).is_empty());
    }

    #[test]
    fn direct_match_respects_top_k() {
        let books: Vec<Book> = (0..10)
            .map(|i| Book::new(format!("B{}", i), "경제", "경제 이야기", "한빛"))
            .collect();
        let corpus = BookCorpus::from_books(books, &KeywordExtractor::new());
        let config = MatchConfig::default();
        let matches = direct_match("경제", &corpus, &config);
        assert_eq!(matches.len(), config.top_k);
        // Catalog order decides which equal-scored books survive
        assert_eq!(matches[0].isbn, "B0");
    }

    #[test]
    fn similarity_match_ranks_self_keyword_book_first() {
        let (corpus, model) = fixture();
        let config = MatchConfig::default();
        let matches = similarity_match("경제", &corpus, &model, &config);
        assert!(!matches.is_empty());
        assert_eq!(matches[0].isbn, "X1");
        assert!((matches[0].score - 1.0).abs() < 1e-9);
        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn similarity_match_skips_books_without_keywords() {
        let (corpus, model) = fixture();
        let config = MatchConfig::default();
        // X4 has no description, so no keyword set; only direct matching
        // can ever surface it
        let matches = similarity_match("경제", &corpus, &model, &config);
        assert!(matches.iter().all(|m| m.isbn != "X4"));
    }

    #[test]
    fn similarity_match_returns_empty_for_oov_keyword() {
        let (corpus, model) = fixture();
        let config = MatchConfig::default();
        assert!(similarity_match("없는말", &corpus, &model, &config).is_empty());
    }

    #[test]
    fn cluster_match_keeps_topical_book_and_drops_unrelated() {
        let (corpus, model) = fixture();
        let seeds = ClusterSeeds::default();
        let config = MatchConfig::default();
        let matches = cluster_match(
            "경제",
            NewsCategory::Economic,
            &corpus,
            &model,
            &seeds,
            &config,
        );
        assert!(matches.iter().any(|m| m.isbn == "X1"), "X1 missing: {:?}", matches);
        assert!(matches.iter().all(|m| m.isbn != "X2"));
        for m in &matches {
            assert!(m.score > config.cluster_threshold && m.score <= 1.0);
        }
    }

    #[test]
    fn cluster_match_with_oov_keyword_is_empty() {
        let (corpus, model) = fixture();
        let seeds = ClusterSeeds::default();
        let config = MatchConfig::default();
        let matches = cluster_match(
            "없는말",
            NewsCategory::Economic,
            &corpus,
            &model,
            &seeds,
            &config,
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn cluster_match_without_seeds_is_empty() {
        let (corpus, model) = fixture();
        let seeds: ClusterSeeds = toml::from_str("[seeds]\npolitics = [\"정치\"]").unwrap();
        let config = MatchConfig::default();
        let matches = cluster_match(
            "경제",
            NewsCategory::Economic,
            &corpus,
            &model,
            &seeds,
            &config,
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn context_match_finds_the_economic_book() {
        let (corpus, model) = fixture();
        let seeds = ClusterSeeds::default();
        let config = MatchConfig::default();
        let matches = context_match(
            "경제",
            NewsCategory::Economic,
            &corpus,
            &model,
            &seeds,
            &config,
        );
        assert!(!matches.is_empty());
        assert_eq!(matches[0].isbn, "X1");
    }

    #[test]
    fn context_match_with_oov_query_is_empty() {
        let (corpus, model) = fixture();
        let seeds: ClusterSeeds = toml::from_str("[seeds]\npolitics = [\"정치\"]").unwrap();
        let config = MatchConfig::default();
        // No seeds for the category and an OOV keyword leaves nothing to embed
        let matches = context_match(
            "없는말",
            NewsCategory::Economic,
            &corpus,
            &model,
            &seeds,
            &config,
        );
        assert!(matches.is_empty());
    }
}
