//! Daily duplicate-run detection
//!
//! The pipeline runs on a schedule and must not pile up duplicate rows
//! when re-invoked on the same date. The checker inspects how much work
//! already landed for a date and tells the runner whether to skip.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::store::RecommendStore;

/// Decides whether a pipeline run for a given date is redundant.
pub struct DuplicateChecker {
    store: Arc<RecommendStore>,
}

impl DuplicateChecker {
    pub fn new(store: Arc<RecommendStore>) -> Self {
        Self { store }
    }

    /// True when the date already has at least `min_keywords` stored
    /// keywords and at least `min_recommendations` recommendations.
    ///
    /// Store errors are treated as "not yet processed" so a broken read
    /// never suppresses a run.
    pub fn should_skip(
        &self,
        date: NaiveDate,
        min_keywords: i64,
        min_recommendations: i64,
    ) -> bool {
        let keywords = match self.store.count_news_keywords_on(date) {
            Ok(count) => count,
            Err(e) => {
                warn!("Keyword count for {} failed, assuming unprocessed: {}", date, e);
                return false;
            }
        };
        let recommendations = match self.store.count_recommendations_on(date) {
            Ok(count) => count,
            Err(e) => {
                warn!(
                    "Recommendation count for {} failed, assuming unprocessed: {}",
                    date, e
                );
                return false;
            }
        };

        if let Ok(by_category) = self.store.keyword_counts_by_category(date) {
            for (category, count) in &by_category {
                debug!("Existing keywords on {} for {}: {}", date, category, count);
            }
        }

        keywords >= min_keywords && recommendations >= min_recommendations
    }

    /// Remove everything stored for the date so a forced run starts clean.
    pub fn force_reprocess(&self, date: NaiveDate) {
        match self.store.delete_for_date(date) {
            Ok((recommendations, keywords)) => {
                warn!(
                    "Forced reprocess for {}: cleared {} recommendations, {} keywords",
                    date, recommendations, keywords
                );
            }
            Err(e) => {
                warn!("Forced reprocess cleanup for {} failed: {}", date, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmatch_core::{Book, MatchMethod, NewsCategory, Recommendation};

    fn store_with_day(keywords: usize, recommendations_per_keyword: usize) -> Arc<RecommendStore> {
        let store = RecommendStore::new_in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let books: Vec<Book> = (0..recommendations_per_keyword)
            .map(|i| Book::new(format!("isbn-{i}"), format!("책 {i}"), "", "출판사"))
            .collect();
        store.insert_books(&books).unwrap();

        for k in 0..keywords {
            let news_id = store
                .get_or_insert_news_keyword(NewsCategory::Economic, date, &format!("키워드{k}"))
                .unwrap();
            let recs: Vec<Recommendation> = books
                .iter()
                .map(|b| Recommendation::new(news_id, &b.isbn, 0.9, MatchMethod::Direct))
                .collect();
            store.upsert_recommendations(&recs).unwrap();
        }
        Arc::new(store)
    }

    #[test]
    fn empty_day_is_never_skipped() {
        let checker = DuplicateChecker::new(store_with_day(0, 0));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(!checker.should_skip(date, 10, 50));
    }

    #[test]
    fn day_over_both_thresholds_is_skipped() {
        // 15 keywords, 60 recommendations
        let checker = DuplicateChecker::new(store_with_day(15, 4));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(checker.should_skip(date, 10, 50));
    }

    #[test]
    fn enough_keywords_but_few_recommendations_runs_again() {
        // 15 keywords but only 30 recommendations
        let checker = DuplicateChecker::new(store_with_day(15, 2));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(!checker.should_skip(date, 10, 50));
    }

    #[test]
    fn other_dates_do_not_count() {
        let checker = DuplicateChecker::new(store_with_day(15, 4));
        let other = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert!(!checker.should_skip(other, 10, 50));
    }

    #[test]
    fn force_reprocess_clears_the_date() {
        let store = store_with_day(15, 4);
        let checker = DuplicateChecker::new(Arc::clone(&store));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert!(checker.should_skip(date, 10, 50));
        checker.force_reprocess(date);
        assert!(!checker.should_skip(date, 10, 50));
        assert_eq!(store.count_news_keywords_on(date).unwrap(), 0);
    }
}
