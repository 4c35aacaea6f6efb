//! Core types for the news-driven book recommendation service
//!
//! This crate defines the shared data structures used across the pipeline
//! and the serving API: news categories, book records, extracted keywords,
//! and scored recommendations.

pub mod book;
pub mod category;
pub mod error;
pub mod recommendation;

pub use book::{Book, RecommendedBook, ScoredBook};
pub use category::{MatchMethod, NewsCategory};
pub use error::{BookmatchError, BookmatchResult};
pub use recommendation::{NewsKeyword, Recommendation};
