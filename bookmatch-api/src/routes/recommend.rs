//! Recommendation read endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{error, info};

use bookmatch_core::{NewsCategory, RecommendedBook};
use bookmatch_services::{CacheKey, CachedRecommendations};

use crate::routes::ErrorResponse;
use crate::AppState;

const DEFAULT_LIMIT: u32 = 5;
const MAX_LIMIT: u32 = 100;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameters for the recommend endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    /// Restrict to one news date (YYYY-MM-DD); absent spans all dates
    pub news_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// One page of recommendations
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub category: NewsCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_date: Option<NaiveDate>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
    pub cache_hit: bool,
    pub books: Vec<RecommendedBook>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<&'static str>,
}

/// Create recommendation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recommend/{category}", get(recommend))
        .route("/categories", get(categories))
}

/// Map common misspellings onto the canonical category names before
/// parsing; anything else passes through lowercased.
fn correct_category(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    match lowered.as_str() {
        "economy" => "economic".to_string(),
        "policy" | "politic" => "politics".to_string(),
        "sport" => "sports".to_string(),
        "social" => "society".to_string(),
        "global" | "international" => "world".to_string(),
        _ => lowered,
    }
}

fn parse_category(raw: &str) -> Option<NewsCategory> {
    NewsCategory::from_str(&correct_category(raw)).ok()
}

fn total_pages(total: i64, limit: u32) -> i64 {
    if total <= 0 {
        0
    } else {
        (total + limit as i64 - 1) / limit as i64
    }
}

/// Serve one page of recommendations for a category
async fn recommend(
    State(state): State<AppState>,
    Path(category_raw): Path<String>,
    Query(params): Query<RecommendQuery>,
) -> impl IntoResponse {
    let Some(category) = parse_category(&category_raw) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "unknown_category",
                format!("Unknown category: {}", category_raw),
            )),
        )
            .into_response();
    };
    if category.as_str() != category_raw.to_lowercase() {
        info!("Corrected category '{}' to '{}'", category_raw, category);
    }

    let news_date = match params.news_date.as_deref() {
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        "invalid_date",
                        format!("Invalid news_date (expected YYYY-MM-DD): {}", raw),
                    )),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let key = CacheKey {
        category,
        news_date,
        page,
        limit,
    };
    if let Some(cached) = state.cache.get(&key) {
        return (
            StatusCode::OK,
            Json(RecommendResponse {
                category,
                news_date,
                total: cached.total,
                page,
                limit,
                total_pages: total_pages(cached.total, limit),
                cache_hit: true,
                books: cached.books,
            }),
        )
            .into_response();
    }

    match state
        .store
        .fetch_for_category(category, news_date, page as usize, limit as usize)
    {
        Ok((total, books)) => {
            state.cache.set(
                key,
                CachedRecommendations {
                    total,
                    books: books.clone(),
                },
            );
            (
                StatusCode::OK,
                Json(RecommendResponse {
                    category,
                    news_date,
                    total,
                    page,
                    limit,
                    total_pages: total_pages(total, limit),
                    cache_hit: false,
                    books,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to fetch recommendations for {}: {}", category, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("store_error", e.to_string())),
            )
                .into_response()
        }
    }
}

/// List the categories the service recommends for
async fn categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: NewsCategory::ALL.iter().map(|c| c.as_str()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typo_corrections_map_onto_canonical_categories() {
        assert_eq!(parse_category("economy"), Some(NewsCategory::Economic));
        assert_eq!(parse_category("policy"), Some(NewsCategory::Politics));
        assert_eq!(parse_category("politic"), Some(NewsCategory::Politics));
        assert_eq!(parse_category("sport"), Some(NewsCategory::Sports));
        assert_eq!(parse_category("social"), Some(NewsCategory::Society));
        assert_eq!(parse_category("global"), Some(NewsCategory::World));
        assert_eq!(parse_category("international"), Some(NewsCategory::World));
    }

    #[test]
    fn canonical_names_parse_unchanged() {
        assert_eq!(parse_category("economic"), Some(NewsCategory::Economic));
        assert_eq!(parse_category("SPORTS"), Some(NewsCategory::Sports));
    }

    #[test]
    fn unknown_categories_are_rejected() {
        assert_eq!(parse_category("finance"), None);
        assert_eq!(parse_category(""), None);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(101, 100), 2);
    }
}
