//! Persisted pipeline records

use crate::category::{MatchMethod, NewsCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A keyword extracted from one day's headlines for one category.
///
/// Append-only; the row id is the join key recommendations hang off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsKeyword {
    pub id: i64,
    pub category: NewsCategory,
    pub news_date: NaiveDate,
    pub keyword: String,
}

/// One scored (news keyword, book) pair produced by a pipeline run.
///
/// At most one row exists per (news_id, isbn, method); re-runs that produce
/// the same row are absorbed by insert-ignore semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub news_id: i64,
    pub isbn: String,
    pub score: f64,
    pub method: MatchMethod,
    pub created_at: DateTime<Utc>,
}

impl Recommendation {
    pub fn new(news_id: i64, isbn: impl Into<String>, score: f64, method: MatchMethod) -> Self {
        Self {
            news_id,
            isbn: isbn.into(),
            score,
            method,
            created_at: Utc::now(),
        }
    }
}
