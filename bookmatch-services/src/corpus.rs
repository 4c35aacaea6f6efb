//! In-memory book corpus for a pipeline run
//!
//! Matchers scan every book repeatedly, so keyword sets and description
//! embeddings are computed once per run and held here, read-only.

use std::collections::HashMap;

use bookmatch_core::Book;
use bookmatch_embedding::{EmbeddingVector, KeywordExtractor, WordEmbeddingModel};
use tracing::debug;

/// The book catalog plus per-book derived data, shared by all matchers.
pub struct BookCorpus {
    books: Vec<Book>,
    keywords: HashMap<String, Vec<String>>,
    embeddings: HashMap<String, EmbeddingVector>,
}

impl BookCorpus {
    /// Build from books and pre-extracted keyword sets (the persisted
    /// `book_keywords` table written at train time).
    pub fn new(books: Vec<Book>, keywords: HashMap<String, Vec<String>>) -> Self {
        Self {
            books,
            keywords,
            embeddings: HashMap::new(),
        }
    }

    /// Build by extracting keyword sets from descriptions now.
    ///
    /// Used when no persisted keyword table exists yet.
    pub fn from_books(books: Vec<Book>, extractor: &KeywordExtractor) -> Self {
        let mut keywords = HashMap::new();
        for book in &books {
            if !book.has_description() {
                continue;
            }
            let set = extractor.extract_one(&book.description);
            if !set.is_empty() {
                keywords.insert(book.isbn.clone(), set.into_iter().collect());
            }
        }
        debug!(
            "Extracted keyword sets for {}/{} books",
            keywords.len(),
            books.len()
        );
        Self {
            books,
            keywords,
            embeddings: HashMap::new(),
        }
    }

    /// Precompute per-book embeddings from keyword sets, for the context
    /// matcher. A no-op for books whose keywords are all out of vocabulary.
    pub fn with_embeddings(mut self, model: &WordEmbeddingModel) -> Self {
        for book in &self.books {
            if let Some(words) = self.keywords.get(&book.isbn) {
                if let Some(embedding) = model.embed_tokens(words) {
                    self.embeddings.insert(book.isbn.clone(), embedding);
                }
            }
        }
        debug!("Embedded {}/{} books", self.embeddings.len(), self.books.len());
        self
    }

    /// Catalog order is insertion order; matchers rely on it for
    /// deterministic tie-breaks.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn keywords_for(&self, isbn: &str) -> &[String] {
        self.keywords
            .get(isbn)
            .map(|k| k.as_slice())
            .unwrap_or(&[])
    }

    pub fn embedding_for(&self, isbn: &str) -> Option<&EmbeddingVector> {
        self.embeddings.get(isbn)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_books_skips_blank_descriptions() {
        let books = vec![
            Book::new("X1", "경제 입문", "경제 위기와 금융 정책", "한빛"),
            Book::new("X2", "빈 책", "   ", "민음사"),
        ];
        let corpus = BookCorpus::from_books(books, &KeywordExtractor::new());
        assert_eq!(corpus.len(), 2);
        assert!(!corpus.keywords_for("X1").is_empty());
        assert!(corpus.keywords_for("X2").is_empty());
        assert!(corpus.keywords_for("unknown").is_empty());
    }
}
