//! Bookmatch pipeline CLI
//!
//! Offline counterpart of the API server: seeds the book catalog, trains
//! the embedding model and runs the daily recommendation pipeline. All
//! commands read the same environment configuration as the server, so
//! results land in the database the API serves from.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bookmatch_core::Book;
use bookmatch_embedding::{KeywordExtractor, TrainConfig, WordEmbeddingModel};
use bookmatch_news::HeadlineClient;
use bookmatch_services::{
    train_model, ClusterSeeds, HeadlineSource, PipelineConfig, PipelineMode,
    RecommendStore, RecommendationRunner, ServiceConfig,
};

#[derive(Parser)]
#[command(name = "bookmatch-pipeline")]
#[command(version, about = "Offline pipeline for news-driven book recommendations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a books JSON file into the catalog
    Seed {
        /// Path to a JSON array of books
        file: PathBuf,
    },

    /// Train the embedding model from catalog descriptions
    Train {
        /// Embedding dimension
        #[arg(long, default_value = "100")]
        dimension: usize,

        /// Context window radius, in tokens
        #[arg(long, default_value = "3")]
        window: usize,
    },

    /// Fetch headlines and persist recommendations for one date
    Run {
        /// Reprocess the date even if it already carries results
        #[arg(long)]
        force: bool,

        /// Pipeline mode: merged, hybrid, direct, similarity or cluster
        #[arg(long)]
        method: Option<PipelineMode>,

        /// Date to process instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local, then .env
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for command output
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = ServiceConfig::from_env();
    let store = Arc::new(
        RecommendStore::new(&config.db_path)
            .with_context(|| format!("Failed to open database at {}", config.db_path))?,
    );

    match cli.command {
        Commands::Seed { file } => seed(&store, &file),
        Commands::Train { dimension, window } => train(&store, &config, dimension, window),
        Commands::Run {
            force,
            method,
            date,
        } => run(store, &config, force, method, date).await,
    }
}

fn seed(store: &RecommendStore, file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let books: Vec<Book> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} as a book array", file.display()))?;
    if books.is_empty() {
        anyhow::bail!("{} contains no books", file.display());
    }

    let inserted = store.insert_books(&books)?;
    println!("✓ Seeded {} books", inserted);
    println!("  Catalog now holds {} books", store.book_count()?);
    Ok(())
}

fn train(
    store: &RecommendStore,
    config: &ServiceConfig,
    dimension: usize,
    window: usize,
) -> anyhow::Result<()> {
    let train_config = TrainConfig {
        dimension,
        window,
        ..TrainConfig::default()
    };
    let model = train_model(store, &KeywordExtractor::new(), &train_config)?;
    model.save(&config.model_path)?;

    println!(
        "✓ Trained embedding model: {} words, dimension {}",
        model.vocab_size(),
        model.dimension()
    );
    println!("  Saved to {}", config.model_path);
    Ok(())
}

async fn run(
    store: Arc<RecommendStore>,
    config: &ServiceConfig,
    force: bool,
    method: Option<PipelineMode>,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    // A missing model is not fatal; the runner degrades to direct matching
    let model = match WordEmbeddingModel::load(&config.model_path) {
        Ok(model) => Some(Arc::new(model)),
        Err(e) => {
            warn!(
                "No usable embedding model at {}: {}, matching directly only",
                config.model_path, e
            );
            None
        }
    };

    let mut pipeline_config = PipelineConfig::default();
    if let Some(mode) = method {
        pipeline_config.mode = mode;
    }
    let seeds = Arc::new(ClusterSeeds::load_or_default(config.seeds_path.as_deref()));
    let runner = RecommendationRunner::new(store, model, seeds, pipeline_config);

    let source: Arc<dyn HeadlineSource> = Arc::new(HeadlineClient::new());
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let summary = runner.run(source, date, force).await?;

    if summary.skipped {
        println!("Already processed {}; pass --force to reprocess", date);
        return Ok(());
    }

    println!("✓ Run complete for {}", date);
    println!("  Headlines fetched: {}", summary.headlines);
    println!("  Keywords recorded: {}", summary.keywords);
    println!("  New recommendations: {}", summary.recommendations);
    for outcome in &summary.categories {
        println!(
            "    {}: {} headlines, {} keywords, {} recommendations",
            outcome.category, outcome.headlines, outcome.keywords, outcome.recommendations
        );
    }
    Ok(())
}
