//! Book catalog and scoring types

use crate::category::{MatchMethod, NewsCategory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A catalog book (externally owned, read-only to the pipeline)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// ISBN, the unique identifier
    pub isbn: String,
    pub title: String,
    /// Back-cover description text the matchers score against
    pub description: String,
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Book {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            description: description.into(),
            publisher: publisher.into(),
            image_url: None,
        }
    }

    /// Books without a description are skipped by embedding-based matchers
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// A book with a match score, the currency of matchers and the merger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBook {
    pub isbn: String,
    pub score: f64,
}

impl ScoredBook {
    pub fn new(isbn: impl Into<String>, score: f64) -> Self {
        Self {
            isbn: isbn.into(),
            score,
        }
    }
}

/// Read-side projection served by the recommendation API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedBook {
    pub isbn: String,
    pub title: String,
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub score: f64,
    pub method: MatchMethod,
    pub category: NewsCategory,
    pub news_date: NaiveDate,
    /// The news keyword that produced this recommendation
    pub keyword: String,
}
