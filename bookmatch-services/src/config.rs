//! Configuration for matching, the pipeline and serving
//!
//! Every tuned constant in the system lives here as a config field with
//! the reference value as its default, so thresholds and weights are
//! policy knobs rather than literals scattered through matcher code.

use bookmatch_core::NewsCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Errors raised while loading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Weights for merging the three matcher strategies per keyword.
///
/// Any monotone weighting with direct > similarity > cluster works; these
/// defaults are the tuned reference values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeWeights {
    pub direct: f64,
    pub similarity: f64,
    pub cluster: f64,
}

impl Default for MergeWeights {
    fn default() -> Self {
        Self {
            direct: 1.0,
            similarity: 0.8,
            cluster: 0.6,
        }
    }
}

/// Weights for the hybrid mode, which merges three end-to-end methods
/// instead of three matchers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridWeights {
    pub context: f64,
    pub keyword: f64,
    pub cluster: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            context: 0.5,
            keyword: 0.3,
            cluster: 0.2,
        }
    }
}

/// Matcher thresholds and ranking limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Entries kept per strategy and per merged list
    pub top_k: usize,
    /// Minimum embedding similarity for the similarity matcher
    pub similarity_threshold: f64,
    /// Minimum affinity product for the cluster matcher
    pub cluster_threshold: f64,
    /// Case sensitivity of direct substring matching (ASCII only)
    pub case_sensitive_direct: bool,
    pub merge_weights: MergeWeights,
    pub hybrid_weights: HybridWeights,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            similarity_threshold: 0.3,
            cluster_threshold: 0.1,
            case_sensitive_direct: false,
            merge_weights: MergeWeights::default(),
            hybrid_weights: HybridWeights::default(),
        }
    }
}

/// Which recommendation lists a pipeline run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Merge the three matchers with [`MergeWeights`]; rows persist as hybrid
    Merged,
    /// Merge three end-to-end methods with [`HybridWeights`]; rows persist as hybrid
    Hybrid,
    /// Single-strategy backfill, persisted under its own method label
    Direct,
    /// Single-strategy backfill, persisted under its own method label
    Similarity,
    /// Single-strategy backfill, persisted under its own method label
    Cluster,
}

impl std::str::FromStr for PipelineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merged" => Ok(PipelineMode::Merged),
            "hybrid" => Ok(PipelineMode::Hybrid),
            "direct" => Ok(PipelineMode::Direct),
            "similarity" => Ok(PipelineMode::Similarity),
            "cluster" => Ok(PipelineMode::Cluster),
            _ => Err(format!("Unknown pipeline mode: {}", s)),
        }
    }
}

/// Batch pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Representative keywords extracted per category per day
    pub keywords_per_category: usize,
    /// Duplicate-checker minimum: keywords already persisted today
    pub min_keywords: i64,
    /// Duplicate-checker minimum: recommendations already persisted today
    pub min_recommendations: i64,
    /// Concurrent category workers
    pub workers: usize,
    /// Widen in-vocabulary news keywords with their nearest corpus neighbour
    pub expand_keywords: bool,
    pub mode: PipelineMode,
    pub match_config: MatchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            keywords_per_category: 10,
            min_keywords: 10,
            min_recommendations: 50,
            workers: 3,
            expand_keywords: true,
            mode: PipelineMode::Merged,
            match_config: MatchConfig::default(),
        }
    }
}

/// Serving cache tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time to live per cached response, in seconds
    pub ttl_secs: u64,
    /// Entry cap; the entry closest to expiry is evicted when exceeded
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            max_entries: 500,
        }
    }
}

/// Hand-authored seed keywords defining each category's topical cluster.
///
/// Loaded from TOML so the mapping can be tested and extended without
/// touching matcher logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSeeds {
    seeds: HashMap<NewsCategory, Vec<String>>,
}

impl Default for ClusterSeeds {
    fn default() -> Self {
        let mut seeds = HashMap::new();
        seeds.insert(
            NewsCategory::Politics,
            korean(&["정치", "정부", "국회", "대통령"]),
        );
        seeds.insert(
            NewsCategory::Sports,
            korean(&["스포츠", "축구", "야구", "선수"]),
        );
        seeds.insert(
            NewsCategory::Economic,
            korean(&["경제", "금융", "투자", "주식"]),
        );
        seeds.insert(
            NewsCategory::Society,
            korean(&["사회", "사건", "교육", "복지"]),
        );
        seeds.insert(
            NewsCategory::World,
            korean(&["세계", "국제", "외교", "해외"]),
        );
        Self { seeds }
    }
}

fn korean(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl ClusterSeeds {
    /// Load seeds from a TOML file shaped like
    /// `[seeds]\npolitics = ["정치", ...]`.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a file when one is configured, otherwise the built-in set.
    pub fn load_or_default(path: Option<&str>) -> Self {
        match path {
            Some(path) => match Self::from_toml_file(path) {
                Ok(seeds) => seeds,
                Err(e) => {
                    warn!("Failed to load cluster seeds from {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Seed keywords for one category; unknown categories yield no seeds.
    pub fn seeds_for(&self, category: NewsCategory) -> &[String] {
        self.seeds
            .get(&category)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }
}

/// Process-level settings shared by the API server and the pipeline CLI
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// SQLite database path
    pub db_path: String,
    /// Persisted embedding model artifact
    pub model_path: String,
    /// Optional cluster-seed TOML override
    pub seeds_path: Option<String>,
    /// HTTP listen port
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: "data/bookmatch.db".to_string(),
            model_path: "data/embedding.model".to_string(),
            seeds_path: None,
            port: 8000,
        }
    }
}

impl ServiceConfig {
    /// Build from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = match std::env::var("PORT") {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    warn!("Invalid PORT value '{}', using {}", raw, defaults.port);
                    defaults.port
                }
            },
            Err(_) => defaults.port,
        };

        Self {
            db_path: std::env::var("BOOKMATCH_DB").unwrap_or(defaults.db_path),
            model_path: std::env::var("BOOKMATCH_MODEL").unwrap_or(defaults.model_path),
            seeds_path: std::env::var("BOOKMATCH_SEEDS").ok(),
            port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_match_reference_values() {
        let config = MatchConfig::default();
        assert_eq!(config.top_k, 5);
        assert!((config.similarity_threshold - 0.3).abs() < f64::EPSILON);
        assert!((config.cluster_threshold - 0.1).abs() < f64::EPSILON);
        assert!((config.merge_weights.direct - 1.0).abs() < f64::EPSILON);
        assert!((config.merge_weights.similarity - 0.8).abs() < f64::EPSILON);
        assert!((config.merge_weights.cluster - 0.6).abs() < f64::EPSILON);
        assert!((config.hybrid_weights.context - 0.5).abs() < f64::EPSILON);

        let pipeline = PipelineConfig::default();
        assert_eq!(pipeline.min_keywords, 10);
        assert_eq!(pipeline.min_recommendations, 50);
        assert_eq!(pipeline.keywords_per_category, 10);
        assert_eq!(pipeline.workers, 3);

        let cache = CacheConfig::default();
        assert_eq!(cache.ttl_secs, 3600);
    }

    #[test]
    fn default_seeds_cover_every_category() {
        let seeds = ClusterSeeds::default();
        for category in NewsCategory::ALL {
            assert!(
                !seeds.seeds_for(category).is_empty(),
                "category {} has no seeds",
                category
            );
        }
        assert!(seeds
            .seeds_for(NewsCategory::Economic)
            .contains(&"경제".to_string()));
    }

    #[test]
    fn seeds_parse_from_toml() {
        let toml_text = r#"
            [seeds]
            politics = ["정치"]
            economic = ["경제", "금융"]
        "#;
        let seeds: ClusterSeeds = toml::from_str(toml_text).unwrap();
        assert_eq!(seeds.seeds_for(NewsCategory::Economic).len(), 2);
        assert!(seeds.seeds_for(NewsCategory::Sports).is_empty());
    }

    #[test]
    fn pipeline_mode_parses_from_str() {
        assert_eq!(PipelineMode::from_str("merged"), Ok(PipelineMode::Merged));
        assert_eq!(PipelineMode::from_str("HYBRID"), Ok(PipelineMode::Hybrid));
        assert_eq!(PipelineMode::from_str("direct"), Ok(PipelineMode::Direct));
        assert!(PipelineMode::from_str("unknown").is_err());
    }

    #[test]
    fn match_config_fills_missing_fields_from_defaults() {
        let config: MatchConfig = toml::from_str("top_k = 3").unwrap();
        assert_eq!(config.top_k, 3);
        assert!((config.similarity_threshold - 0.3).abs() < f64::EPSILON);
    }
}
