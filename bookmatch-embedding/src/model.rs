//! Trainable word-embedding model over the book corpus
//!
//! Random-indexing embeddings: every vocabulary word gets a sparse signed
//! index vector derived from a seeded hash, and a word's embedding is the
//! accumulated sum of its own and its window neighbours' index vectors
//! over the training corpus, L2-normalized. Training is deterministic for
//! identical input, and the whole model persists as one binary artifact.
//!
//! News keywords frequently fall outside the corpus vocabulary, so all
//! lookups treat OOV words as zero-similarity rather than errors.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::{EmbeddingError, Result};
use crate::similarity::{cosine_similarity, l2_normalize};
use crate::tokenize::{Analyzer, StatisticalAnalyzer};
use crate::EmbeddingVector;

/// Nonzero components per index vector.
const INDEX_COMPONENTS: usize = 8;

/// Training parameters. The defaults match the corpus this model is tuned
/// for: short Korean book descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Embedding dimension
    pub dimension: usize,
    /// Context window radius, in tokens, on each side
    pub window: usize,
    /// Seed mixed into index-vector hashing
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dimension: 100,
            window: 3,
            seed: 1,
        }
    }
}

/// On-disk form of the model.
#[derive(Serialize, Deserialize)]
struct ModelArtifact {
    dimension: usize,
    words: Vec<String>,
    vectors: Vec<f32>,
}

/// A trained word-embedding model.
///
/// Immutable after construction; safe to share read-only across workers.
#[derive(Debug)]
pub struct WordEmbeddingModel {
    dimension: usize,
    vocab: HashMap<String, usize>,
    words: Vec<String>,
    // Row-major, one unit-normalized row per vocabulary word
    vectors: Vec<f32>,
}

impl WordEmbeddingModel {
    /// Train a model over tokenized sequences (one sequence per document).
    ///
    /// Every token becomes vocabulary; deterministic for identical input
    /// and config.
    pub fn train(sequences: &[Vec<String>], config: &TrainConfig) -> Result<Self> {
        if config.dimension == 0 {
            return Err(EmbeddingError::Config(
                "embedding dimension must be at least 1".to_string(),
            ));
        }

        let mut vocab: HashMap<String, usize> = HashMap::new();
        let mut words: Vec<String> = Vec::new();
        for sequence in sequences {
            for token in sequence {
                if !vocab.contains_key(token) {
                    vocab.insert(token.clone(), words.len());
                    words.push(token.clone());
                }
            }
        }

        let index_vectors: Vec<Vec<(usize, f32)>> = words
            .iter()
            .map(|word| index_vector(word, config.seed, config.dimension))
            .collect();

        let dimension = config.dimension;
        let mut vectors = vec![0.0f32; words.len() * dimension];
        for sequence in sequences {
            let ids: Vec<usize> = sequence
                .iter()
                .filter_map(|token| vocab.get(token).copied())
                .collect();
            for (i, &id) in ids.iter().enumerate() {
                // A word always carries its own index vector, so every
                // vocabulary word has a nonzero embedding.
                add_components(&mut vectors, dimension, id, &index_vectors[id]);
                let lo = i.saturating_sub(config.window);
                let hi = (i + config.window).min(ids.len() - 1);
                for j in lo..=hi {
                    if j != i {
                        add_components(&mut vectors, dimension, id, &index_vectors[ids[j]]);
                    }
                }
            }
        }

        for row in 0..words.len() {
            l2_normalize(&mut vectors[row * dimension..(row + 1) * dimension]);
        }

        info!(
            "Trained embedding model: {} words, dimension {}",
            words.len(),
            dimension
        );

        Ok(Self {
            dimension,
            vocab,
            words,
            vectors,
        })
    }

    /// Persist the model as a single binary artifact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EmbeddingError::Io(format!("Failed to create model directory: {}", e))
            })?;
        }

        let artifact = ModelArtifact {
            dimension: self.dimension,
            words: self.words.clone(),
            vectors: self.vectors.clone(),
        };
        let bytes = bincode::serde::encode_to_vec(&artifact, bincode::config::standard())
            .map_err(|e| EmbeddingError::Serialization(e.to_string()))?;
        std::fs::write(path.as_ref(), &bytes).map_err(|e| EmbeddingError::Io(e.to_string()))?;

        info!(
            "Saved embedding model to {}: {} words, fingerprint {}",
            path.as_ref().display(),
            self.words.len(),
            fingerprint(&bytes)
        );
        Ok(())
    }

    /// Load a model persisted by [`WordEmbeddingModel::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EmbeddingError::NotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path).map_err(|e| EmbeddingError::Io(e.to_string()))?;
        let (artifact, _): (ModelArtifact, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())
                .map_err(|e| EmbeddingError::Serialization(e.to_string()))?;

        let model = Self::from_artifact(artifact)?;
        info!(
            "Loaded embedding model from {}: {} words, dimension {}, fingerprint {}",
            path.display(),
            model.words.len(),
            model.dimension,
            fingerprint(&bytes)
        );
        Ok(model)
    }

    fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let expected = artifact.words.len() * artifact.dimension;
        if artifact.vectors.len() != expected {
            return Err(EmbeddingError::InvalidDimension {
                expected,
                actual: artifact.vectors.len(),
            });
        }
        let vocab = artifact
            .words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Ok(Self {
            dimension: artifact.dimension,
            vocab,
            words: artifact.words,
            vectors: artifact.vectors,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn vocab_size(&self) -> usize {
        self.words.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vocab.contains_key(word)
    }

    /// The stored unit vector for an in-vocabulary word.
    pub fn vector(&self, word: &str) -> Option<&[f32]> {
        self.vocab.get(word).map(|&row| self.row(row))
    }

    /// Cosine similarity between two vocabulary words.
    ///
    /// Either word out of vocabulary yields 0.0; a word is always exactly
    /// 1.0 similar to itself.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match (self.vocab.get(a), self.vocab.get(b)) {
            (Some(&row_a), Some(&row_b)) => {
                if row_a == row_b {
                    1.0
                } else {
                    cosine_similarity(self.row(row_a), self.row(row_b))
                }
            }
            _ => 0.0,
        }
    }

    /// Embed a token list as the normalized mean of in-vocabulary vectors.
    ///
    /// Returns `None` when no token is in vocabulary.
    pub fn embed_tokens<T: AsRef<str>>(&self, tokens: &[T]) -> Option<EmbeddingVector> {
        let mut sum = vec![0.0f32; self.dimension];
        let mut count = 0usize;
        for token in tokens {
            if let Some(&row) = self.vocab.get(token.as_ref()) {
                for (acc, x) in sum.iter_mut().zip(self.row(row)) {
                    *acc += x;
                }
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        for x in sum.iter_mut() {
            *x /= count as f32;
        }
        l2_normalize(&mut sum);
        Some(sum)
    }

    /// Embed raw text via the default analyzer.
    pub fn embed_text(&self, text: &str) -> Option<EmbeddingVector> {
        let tokens = StatisticalAnalyzer.nouns(text);
        self.embed_tokens(&tokens)
    }

    /// The `top_k` nearest vocabulary words, descending by similarity.
    ///
    /// Out-of-vocabulary queries return an empty list.
    pub fn most_similar(&self, word: &str, top_k: usize) -> Vec<(String, f64)> {
        let row = match self.vocab.get(word) {
            Some(&row) => row,
            None => return Vec::new(),
        };
        let query = self.row(row);

        let mut scored: Vec<(String, f64)> = self
            .words
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != row)
            .map(|(i, w)| (w.clone(), cosine_similarity(query, self.row(i))))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }

    fn row(&self, index: usize) -> &[f32] {
        &self.vectors[index * self.dimension..(index + 1) * self.dimension]
    }
}

/// Sparse signed index vector for a word, derived from a seeded hash.
fn index_vector(word: &str, seed: u64, dimension: usize) -> Vec<(usize, f32)> {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(word.as_bytes());
    let digest = hasher.finalize();

    digest
        .chunks_exact(3)
        .take(INDEX_COMPONENTS)
        .map(|chunk| {
            let position = u16::from_le_bytes([chunk[0], chunk[1]]) as usize % dimension;
            let sign = if chunk[2] & 1 == 0 { 1.0 } else { -1.0 };
            (position, sign)
        })
        .collect()
}

fn add_components(vectors: &mut [f32], dimension: usize, row: usize, components: &[(usize, f32)]) {
    let base = row * dimension;
    for &(position, sign) in components {
        vectors[base + position] += sign;
    }
}

/// Short hex digest identifying a persisted artifact in logs.
fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sequences() -> Vec<Vec<String>> {
        let mut sequences = Vec::new();
        for _ in 0..5 {
            sequences.push(vec!["문화".to_string(), "예술".to_string()]);
        }
        sequences.push(vec!["문화".to_string(), "역사".to_string()]);
        sequences.push(vec!["축구".to_string(), "야구".to_string()]);
        sequences
    }

    #[test]
    fn train_is_deterministic() {
        let config = TrainConfig::default();
        let a = WordEmbeddingModel::train(&sample_sequences(), &config).unwrap();
        let b = WordEmbeddingModel::train(&sample_sequences(), &config).unwrap();
        assert_eq!(a.vectors, b.vectors);
        assert_eq!(a.words, b.words);
    }

    #[test]
    fn self_similarity_is_exactly_one() {
        let model =
            WordEmbeddingModel::train(&sample_sequences(), &TrainConfig::default()).unwrap();
        assert_eq!(model.similarity("문화", "문화"), 1.0);
        assert_eq!(model.similarity("야구", "야구"), 1.0);
    }

    #[test]
    fn oov_similarity_is_zero() {
        let model =
            WordEmbeddingModel::train(&sample_sequences(), &TrainConfig::default()).unwrap();
        assert_eq!(model.similarity("없는말", "문화"), 0.0);
        assert_eq!(model.similarity("문화", "없는말"), 0.0);
        assert_eq!(model.similarity("없는말", "다른말"), 0.0);
    }

    #[test]
    fn cooccurring_words_are_more_similar() {
        let model =
            WordEmbeddingModel::train(&sample_sequences(), &TrainConfig::default()).unwrap();
        let close = model.similarity("문화", "예술");
        let far = model.similarity("문화", "축구");
        assert!(
            close > far,
            "co-occurring pair scored {} vs unrelated {}",
            close,
            far
        );
    }

    #[test]
    fn most_similar_ranks_frequent_neighbour_first() {
        let model =
            WordEmbeddingModel::train(&sample_sequences(), &TrainConfig::default()).unwrap();
        let neighbours = model.most_similar("문화", 2);
        assert_eq!(neighbours.len(), 2);
        assert_eq!(neighbours[0].0, "예술");
        assert!(neighbours[0].1 >= neighbours[1].1);
    }

    #[test]
    fn most_similar_for_oov_is_empty() {
        let model =
            WordEmbeddingModel::train(&sample_sequences(), &TrainConfig::default()).unwrap();
        assert!(model.most_similar("없는말", 5).is_empty());
    }

    #[test]
    fn embed_tokens_ignores_oov_and_normalizes() {
        let model =
            WordEmbeddingModel::train(&sample_sequences(), &TrainConfig::default()).unwrap();
        let embedding = model.embed_tokens(&["문화", "없는말"]).unwrap();
        assert_eq!(embedding.len(), model.dimension());
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);

        assert!(model.embed_tokens(&["없는말", "다른말"]).is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let model =
            WordEmbeddingModel::train(&sample_sequences(), &TrainConfig::default()).unwrap();
        let path = std::env::temp_dir().join(format!(
            "bookmatch-model-test-{}.bin",
            std::process::id()
        ));
        model.save(&path).unwrap();

        let loaded = WordEmbeddingModel::load(&path).unwrap();
        assert_eq!(loaded.vocab_size(), model.vocab_size());
        assert_eq!(loaded.dimension(), model.dimension());
        let sim = loaded.similarity("문화", "예술");
        assert!((sim - model.similarity("문화", "예술")).abs() < 1e-9);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let result = WordEmbeddingModel::load("/nonexistent/bookmatch-model.bin");
        assert!(matches!(result, Err(EmbeddingError::NotFound(_))));
    }

    #[test]
    fn load_corrupt_file_is_serialization_error() {
        let path = std::env::temp_dir().join(format!(
            "bookmatch-model-corrupt-{}.bin",
            std::process::id()
        ));
        std::fs::write(&path, b"not a model").unwrap();
        let result = WordEmbeddingModel::load(&path);
        assert!(matches!(result, Err(EmbeddingError::Serialization(_))));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn zero_dimension_is_a_config_error() {
        let config = TrainConfig {
            dimension: 0,
            ..TrainConfig::default()
        };
        let result = WordEmbeddingModel::train(&sample_sequences(), &config);
        assert!(matches!(result, Err(EmbeddingError::Config(_))));
    }

    #[test]
    fn index_vector_is_deterministic_per_word_and_seed() {
        let a = index_vector("경제", 1, 100);
        let b = index_vector("경제", 1, 100);
        let c = index_vector("경제", 2, 100);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), INDEX_COMPONENTS);
    }
}
