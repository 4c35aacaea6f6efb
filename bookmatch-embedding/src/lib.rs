//! Keyword extraction and word embeddings for book matching
//!
//! This crate provides the text side of the recommendation pipeline:
//! normalizing noisy headline/description text into content keywords,
//! training a word-embedding model over the book corpus, and computing
//! cosine similarities between keywords.
//!
//! ## Features
//! - Unicode-aware keyword extraction with stopword filtering
//! - Trainable word-embedding model persisted as a single binary artifact
//! - Cosine similarity and nearest-neighbour lookup over the vocabulary
//! - Out-of-vocabulary lookups degrade to zero similarity, never errors

pub mod error;
pub mod model;
pub mod similarity;
pub mod tokenize;

pub use error::{EmbeddingError, Result};
pub use model::{TrainConfig, WordEmbeddingModel};
pub use similarity::cosine_similarity;
pub use tokenize::{Analyzer, KeywordExtractor, StatisticalAnalyzer};

/// A fixed-length embedding vector
pub type EmbeddingVector = Vec<f32>;
