//! Recommendation pipeline
//!
//! One run covers one calendar date: fetch headlines per category,
//! extract the day's keywords, match them against the book corpus in
//! memory, then persist the merged results. Categories are processed on
//! a bounded worker pool and a failing category never aborts the run;
//! it logs and yields an empty outcome instead.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use bookmatch_core::{MatchMethod, NewsCategory, Recommendation, ScoredBook};
use bookmatch_embedding::{EmbeddingError, KeywordExtractor, TrainConfig, WordEmbeddingModel};
use bookmatch_news::HeadlineClient;

use crate::config::{ClusterSeeds, PipelineConfig, PipelineMode};
use crate::corpus::BookCorpus;
use crate::dedup::DuplicateChecker;
use crate::matchers::{cluster_match, context_match, direct_match, similarity_match};
use crate::merge::{merge_strategies, merge_weighted};
use crate::store::{RecommendStore, StoreError};

/// Errors that abort a whole pipeline run. Per-keyword and per-category
/// failures are logged and absorbed instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Book catalog is empty, seed it before running")]
    EmptyCatalog,
}

/// Where headlines come from. The production source is the section
/// crawler; tests substitute canned headlines.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self, category: NewsCategory) -> Vec<String>;
}

#[async_trait]
impl HeadlineSource for HeadlineClient {
    async fn fetch_headlines(&self, category: NewsCategory) -> Vec<String> {
        HeadlineClient::fetch_headlines(self, category).await
    }
}

/// Per-category result of one run.
#[derive(Debug, Clone)]
pub struct CategoryOutcome {
    pub category: NewsCategory,
    pub headlines: usize,
    pub keywords: usize,
    /// Newly inserted recommendation rows; re-inserted duplicates count zero.
    pub recommendations: usize,
}

impl CategoryOutcome {
    fn empty(category: NewsCategory) -> Self {
        Self {
            category,
            headlines: 0,
            keywords: 0,
            recommendations: 0,
        }
    }
}

/// Aggregated result of one run across all categories.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// True when the date was already processed and nothing was done.
    pub skipped: bool,
    pub headlines: usize,
    pub keywords: usize,
    pub recommendations: usize,
    pub categories: Vec<CategoryOutcome>,
}

/// Drives one recommendation run end to end.
///
/// The runner is cheap to clone; all heavyweight state is shared. A
/// missing embedding model is not an error: the run degrades to direct
/// substring matching with a warning.
#[derive(Clone)]
pub struct RecommendationRunner {
    store: Arc<RecommendStore>,
    model: Option<Arc<WordEmbeddingModel>>,
    extractor: Arc<KeywordExtractor>,
    seeds: Arc<ClusterSeeds>,
    config: PipelineConfig,
}

impl RecommendationRunner {
    pub fn new(
        store: Arc<RecommendStore>,
        model: Option<Arc<WordEmbeddingModel>>,
        seeds: Arc<ClusterSeeds>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            model,
            extractor: Arc::new(KeywordExtractor::new()),
            seeds,
            config,
        }
    }

    /// Run the pipeline for one date.
    ///
    /// Unless `force` is set, a date that already carries enough keywords
    /// and recommendations is skipped. `force` clears the date first and
    /// reprocesses from scratch.
    pub async fn run(
        &self,
        source: Arc<dyn HeadlineSource>,
        date: NaiveDate,
        force: bool,
    ) -> Result<RunSummary, PipelineError> {
        let checker = DuplicateChecker::new(Arc::clone(&self.store));
        if force {
            checker.force_reprocess(date);
        } else if checker.should_skip(
            date,
            self.config.min_keywords,
            self.config.min_recommendations,
        ) {
            info!("Already processed {}, skipping run", date);
            return Ok(RunSummary {
                skipped: true,
                ..RunSummary::default()
            });
        }

        let books = self.store.all_books()?;
        if books.is_empty() {
            return Err(PipelineError::EmptyCatalog);
        }

        let stored_keywords = self.store.book_keywords()?;
        let mut corpus = if stored_keywords.is_empty() {
            warn!("No stored book keywords, extracting from descriptions");
            BookCorpus::from_books(books, &self.extractor)
        } else {
            BookCorpus::new(books, stored_keywords)
        };
        if self.config.mode == PipelineMode::Hybrid {
            if let Some(model) = &self.model {
                corpus = corpus.with_embeddings(model);
            }
        }
        if self.model.is_none() {
            warn!("Embedding model unavailable, falling back to direct matching only");
        }
        let corpus = Arc::new(corpus);

        info!(
            "Starting recommendation run for {} over {} books in {:?} mode",
            date,
            corpus.len(),
            self.config.mode
        );

        let outcomes: Vec<CategoryOutcome> = stream::iter(NewsCategory::ALL)
            .map(|category| {
                let runner = self.clone();
                let source = Arc::clone(&source);
                let corpus = Arc::clone(&corpus);
                async move {
                    runner
                        .process_category(source.as_ref(), &corpus, category, date)
                        .await
                }
            })
            .buffer_unordered(self.config.workers.max(1))
            .collect()
            .await;

        let mut summary = RunSummary::default();
        for outcome in outcomes {
            info!(
                "Processed {}: {} headlines, {} keywords, {} new recommendations",
                outcome.category, outcome.headlines, outcome.keywords, outcome.recommendations
            );
            summary.headlines += outcome.headlines;
            summary.keywords += outcome.keywords;
            summary.recommendations += outcome.recommendations;
            summary.categories.push(outcome);
        }
        summary.categories.sort_by_key(|o| o.category.as_str());

        info!(
            "Run for {} complete: {} keywords, {} new recommendations",
            date, summary.keywords, summary.recommendations
        );
        Ok(summary)
    }

    /// Process one category: headlines to keywords to persisted rows.
    ///
    /// Infallible on purpose; every failure inside is per-unit, logged and
    /// skipped so the other keywords still land.
    async fn process_category(
        &self,
        source: &dyn HeadlineSource,
        corpus: &BookCorpus,
        category: NewsCategory,
        date: NaiveDate,
    ) -> CategoryOutcome {
        let headlines = source.fetch_headlines(category).await;
        if headlines.is_empty() {
            warn!("No headlines fetched for {}", category);
            return CategoryOutcome::empty(category);
        }

        let mut keywords = self
            .extractor
            .top_keywords(&headlines, self.config.keywords_per_category);
        if self.config.expand_keywords {
            if let Some(model) = &self.model {
                keywords = expand_keywords(keywords, model);
            }
        }

        let method = self.persisted_method();
        let mut stored = 0usize;
        for keyword in &keywords {
            let news_id = match self.store.get_or_insert_news_keyword(category, date, keyword) {
                Ok(id) => id,
                Err(e) => {
                    warn!("Failed to record keyword '{}' for {}: {}", keyword, category, e);
                    continue;
                }
            };

            let matches = self.recommend_for_keyword(keyword, category, corpus);
            if matches.is_empty() {
                debug!("No matches for '{}' in {}", keyword, category);
                continue;
            }

            let records: Vec<Recommendation> = matches
                .iter()
                .map(|m| Recommendation::new(news_id, &m.isbn, m.score, method))
                .collect();
            match self.store.upsert_recommendations(&records) {
                Ok(inserted) => stored += inserted,
                Err(e) => {
                    warn!(
                        "Failed to persist matches for '{}' in {}: {}",
                        keyword, category, e
                    );
                }
            }
        }

        CategoryOutcome {
            category,
            headlines: headlines.len(),
            keywords: keywords.len(),
            recommendations: stored,
        }
    }

    /// Score one keyword against the corpus, entirely in memory.
    pub fn recommend_for_keyword(
        &self,
        keyword: &str,
        category: NewsCategory,
        corpus: &BookCorpus,
    ) -> Vec<ScoredBook> {
        let cfg = &self.config.match_config;
        match (self.config.mode, self.model.as_deref()) {
            (PipelineMode::Direct, _) | (_, None) => direct_match(keyword, corpus, cfg),
            (PipelineMode::Similarity, Some(model)) => {
                similarity_match(keyword, corpus, model, cfg)
            }
            (PipelineMode::Cluster, Some(model)) => {
                cluster_match(keyword, category, corpus, model, &self.seeds, cfg)
            }
            (PipelineMode::Merged, Some(model)) => {
                let direct = direct_match(keyword, corpus, cfg);
                let similarity = similarity_match(keyword, corpus, model, cfg);
                let cluster = cluster_match(keyword, category, corpus, model, &self.seeds, cfg);
                merge_strategies(&direct, &similarity, &cluster, &cfg.merge_weights, cfg.top_k)
            }
            (PipelineMode::Hybrid, Some(model)) => {
                let context = context_match(keyword, category, corpus, model, &self.seeds, cfg);
                let similarity = similarity_match(keyword, corpus, model, cfg);
                let cluster = cluster_match(keyword, category, corpus, model, &self.seeds, cfg);
                let weights = &cfg.hybrid_weights;
                merge_weighted(
                    &[
                        (weights.context, context.as_slice()),
                        (weights.keyword, similarity.as_slice()),
                        (weights.cluster, cluster.as_slice()),
                    ],
                    cfg.top_k,
                )
            }
        }
    }

    /// Method label stored on recommendation rows. Merging modes store one
    /// combined row set, so both persist as hybrid.
    fn persisted_method(&self) -> MatchMethod {
        match (self.config.mode, &self.model) {
            (_, None) | (PipelineMode::Direct, _) => MatchMethod::Direct,
            (PipelineMode::Similarity, _) => MatchMethod::Similarity,
            (PipelineMode::Cluster, _) => MatchMethod::Cluster,
            (PipelineMode::Merged, _) | (PipelineMode::Hybrid, _) => MatchMethod::Hybrid,
        }
    }
}

/// Widen a keyword list with each keyword's nearest in-vocabulary
/// neighbour. Out-of-vocabulary keywords expand to nothing.
fn expand_keywords(keywords: Vec<String>, model: &WordEmbeddingModel) -> Vec<String> {
    let mut expanded = keywords.clone();
    for keyword in &keywords {
        for (neighbor, score) in model.most_similar(keyword, 1) {
            if score > 0.0 && !expanded.contains(&neighbor) {
                debug!("Expanded '{}' with neighbour '{}' ({:.3})", keyword, neighbor, score);
                expanded.push(neighbor);
            }
        }
    }
    expanded
}

/// Train the embedding model from catalog descriptions and persist the
/// per-book keyword sets extracted alongside it.
///
/// Keywords and model are written together so the corpus the matchers
/// load always lines up with the vocabulary the model was trained on.
pub fn train_model(
    store: &RecommendStore,
    extractor: &KeywordExtractor,
    config: &TrainConfig,
) -> Result<WordEmbeddingModel, PipelineError> {
    let books = store.all_books()?;
    if books.is_empty() {
        return Err(PipelineError::EmptyCatalog);
    }

    let mut sequences = Vec::new();
    let mut keywords: HashMap<String, Vec<String>> = HashMap::new();
    for book in &books {
        if !book.has_description() {
            continue;
        }
        let tokens = extractor.tokens(&book.description);
        if tokens.is_empty() {
            continue;
        }
        keywords.insert(
            book.isbn.clone(),
            extractor.extract_one(&book.description).into_iter().collect(),
        );
        sequences.push(tokens);
    }

    let model = WordEmbeddingModel::train(&sequences, config)?;
    store.replace_book_keywords(&keywords)?;
    info!(
        "Trained embedding model over {} descriptions, vocabulary size {}",
        sequences.len(),
        model.vocab_size()
    );
    Ok(model)
}
