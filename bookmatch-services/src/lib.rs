//! Business logic for the news-driven book recommendation service
//!
//! This crate owns the hard parts of the system: the matcher strategies,
//! the weighted recommendation merger, the duplicate-run guard, the
//! SQLite-backed recommendation store, the TTL serving cache and the
//! pipeline that wires them together.

pub mod cache;
pub mod config;
pub mod corpus;
pub mod dedup;
pub mod matchers;
pub mod merge;
pub mod pipeline;
pub mod store;

pub use cache::{CacheKey, CacheStats, CachedRecommendations, Clock, ManualClock, RecommendCache, SystemClock};
pub use config::{
    CacheConfig, ClusterSeeds, ConfigError, HybridWeights, MatchConfig, MergeWeights,
    PipelineConfig, PipelineMode, ServiceConfig,
};
pub use corpus::BookCorpus;
pub use dedup::DuplicateChecker;
pub use merge::{merge_strategies, merge_weighted};
pub use pipeline::{
    train_model, CategoryOutcome, HeadlineSource, PipelineError, RecommendationRunner, RunSummary,
};
pub use store::{RecommendStore, StoreError};
