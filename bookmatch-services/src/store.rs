//! Recommendation store
//!
//! SQLite-backed persistence for the book catalog, extracted news
//! keywords, per-book keyword sets and recommendation rows. Inserts of
//! recommendation rows are idempotent: re-running a method on the same
//! day is absorbed by the UNIQUE(news_id, isbn, method) constraint.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use bookmatch_core::{
    Book, MatchMethod, NewsCategory, Recommendation, RecommendedBook,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Recommendation persistence over a single reused SQLite connection.
///
/// The connection is guarded by a mutex, so access serializes; the guard
/// is released on every exit path.
pub struct RecommendStore {
    conn: Mutex<Connection>,
}

impl RecommendStore {
    /// Open (or create) the database at `db_path` and initialize tables.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!("Failed to create database directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path).map_err(StoreError::Database)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (useful for testing)
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::Database)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                isbn TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                publisher TEXT NOT NULL,
                image_url TEXT
            );

            CREATE TABLE IF NOT EXISTS news_keywords (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                news_date TEXT NOT NULL,
                keyword TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_news_keywords_category_date
            ON news_keywords(category, news_date);

            CREATE TABLE IF NOT EXISTS book_keywords (
                isbn TEXT NOT NULL,
                keyword TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_book_keywords_isbn
            ON book_keywords(isbn);

            CREATE TABLE IF NOT EXISTS recommendations (
                news_id INTEGER NOT NULL,
                isbn TEXT NOT NULL,
                score REAL NOT NULL,
                method TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                UNIQUE(news_id, isbn, method)
            );

            CREATE INDEX IF NOT EXISTS idx_recommendations_news
            ON recommendations(news_id);
            "#,
        )
        .map_err(StoreError::Database)?;

        Ok(())
    }

    /// Insert or replace a catalog book.
    pub fn insert_book(&self, book: &Book) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO books (isbn, title, description, publisher, image_url)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                book.isbn,
                book.title,
                book.description,
                book.publisher,
                book.image_url,
            ],
        )
        .map_err(StoreError::Database)?;
        Ok(())
    }

    /// Bulk-insert catalog books in one transaction.
    pub fn insert_books(&self, books: &[Book]) -> Result<usize, StoreError> {
        let mut conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let tx = conn.transaction().map_err(StoreError::Database)?;
        for book in books {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO books (isbn, title, description, publisher, image_url)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    book.isbn,
                    book.title,
                    book.description,
                    book.publisher,
                    book.image_url,
                ],
            )
            .map_err(StoreError::Database)?;
        }
        tx.commit().map_err(StoreError::Database)?;
        info!("Seeded {} books into catalog", books.len());
        Ok(books.len())
    }

    /// All catalog books in insertion order.
    pub fn all_books(&self) -> Result<Vec<Book>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let mut stmt = conn
            .prepare(
                "SELECT isbn, title, description, publisher, image_url FROM books ORDER BY rowid",
            )
            .map_err(StoreError::Database)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Book {
                    isbn: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    publisher: row.get(3)?,
                    image_url: row.get(4)?,
                })
            })
            .map_err(StoreError::Database)?;

        let mut books = Vec::new();
        for book in rows {
            books.push(book.map_err(StoreError::Database)?);
        }
        Ok(books)
    }

    pub fn book_count(&self) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .map_err(StoreError::Database)
    }

    /// Row id for a (category, date, keyword) triple, creating it once.
    ///
    /// Re-runs on the same day reuse the existing row instead of growing
    /// the keyword table.
    pub fn get_or_insert_news_keyword(
        &self,
        category: NewsCategory,
        news_date: NaiveDate,
        keyword: &str,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let date_str = news_date.format(DATE_FORMAT).to_string();

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM news_keywords WHERE category = ?1 AND news_date = ?2 AND keyword = ?3",
                params![category.as_str(), date_str, keyword],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::Database)?;

        if let Some(id) = existing {
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO news_keywords (category, news_date, keyword) VALUES (?1, ?2, ?3)",
            params![category.as_str(), date_str, keyword],
        )
        .map_err(StoreError::Database)?;

        Ok(conn.last_insert_rowid())
    }

    /// Keywords persisted for one calendar date, across categories.
    pub fn count_news_keywords_on(&self, news_date: NaiveDate) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        conn.query_row(
            "SELECT COUNT(*) FROM news_keywords WHERE news_date = ?1",
            params![news_date.format(DATE_FORMAT).to_string()],
            |row| row.get(0),
        )
        .map_err(StoreError::Database)
    }

    /// Recommendations joined to one calendar date's keywords.
    pub fn count_recommendations_on(&self, news_date: NaiveDate) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM recommendations r
            JOIN news_keywords n ON n.id = r.news_id
            WHERE n.news_date = ?1
            "#,
            params![news_date.format(DATE_FORMAT).to_string()],
            |row| row.get(0),
        )
        .map_err(StoreError::Database)
    }

    /// Per-category keyword counts for one date, for run logging.
    pub fn keyword_counts_by_category(
        &self,
        news_date: NaiveDate,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let mut stmt = conn
            .prepare(
                r#"
                SELECT category, COUNT(*)
                FROM news_keywords
                WHERE news_date = ?1
                GROUP BY category
                ORDER BY category
                "#,
            )
            .map_err(StoreError::Database)?;

        let rows = stmt
            .query_map(
                params![news_date.format(DATE_FORMAT).to_string()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .map_err(StoreError::Database)?;

        let mut counts = Vec::new();
        for row in rows {
            counts.push(row.map_err(StoreError::Database)?);
        }
        Ok(counts)
    }

    /// Replace the whole derived book-keyword table in one transaction.
    ///
    /// Always bulk: partial patches would leave keyword sets inconsistent
    /// with the embedding model they were extracted alongside.
    pub fn replace_book_keywords(
        &self,
        keywords: &HashMap<String, Vec<String>>,
    ) -> Result<usize, StoreError> {
        let mut conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let tx = conn.transaction().map_err(StoreError::Database)?;

        tx.execute("DELETE FROM book_keywords", [])
            .map_err(StoreError::Database)?;

        let mut inserted = 0usize;
        for (isbn, words) in keywords {
            for word in words {
                tx.execute(
                    "INSERT INTO book_keywords (isbn, keyword) VALUES (?1, ?2)",
                    params![isbn, word],
                )
                .map_err(StoreError::Database)?;
                inserted += 1;
            }
        }

        tx.commit().map_err(StoreError::Database)?;
        info!("Replaced book keywords: {} rows", inserted);
        Ok(inserted)
    }

    /// All persisted book keyword sets, keyed by ISBN.
    pub fn book_keywords(&self) -> Result<HashMap<String, Vec<String>>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let mut stmt = conn
            .prepare("SELECT isbn, keyword FROM book_keywords ORDER BY isbn, keyword")
            .map_err(StoreError::Database)?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(StoreError::Database)?;

        let mut keywords: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let (isbn, keyword) = row.map_err(StoreError::Database)?;
            keywords.entry(isbn).or_default().push(keyword);
        }
        Ok(keywords)
    }

    /// Insert recommendation rows, ignoring duplicates.
    ///
    /// Returns how many rows were actually inserted; re-inserting the same
    /// (news_id, isbn, method) is expected and counts as zero.
    pub fn upsert_recommendations(
        &self,
        records: &[Recommendation],
    ) -> Result<usize, StoreError> {
        let mut conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let tx = conn.transaction().map_err(StoreError::Database)?;

        let mut inserted = 0usize;
        for record in records {
            inserted += tx
                .execute(
                    r#"
                    INSERT OR IGNORE INTO recommendations (news_id, isbn, score, method, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        record.news_id,
                        record.isbn,
                        record.score,
                        record.method.as_str(),
                        record.created_at.timestamp(),
                    ],
                )
                .map_err(StoreError::Database)?;
        }

        tx.commit().map_err(StoreError::Database)?;
        Ok(inserted)
    }

    /// Paginated recommendations for a category, newest and best first.
    ///
    /// `news_date` of `None` spans all dates. Returns the total row count
    /// alongside one page, ordered score descending then date descending,
    /// with ISBN as the deterministic tie-break.
    pub fn fetch_for_category(
        &self,
        category: NewsCategory,
        news_date: Option<NaiveDate>,
        page: usize,
        limit: usize,
    ) -> Result<(i64, Vec<RecommendedBook>), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let date_str = news_date.map(|d| d.format(DATE_FORMAT).to_string());
        let page = page.max(1);
        let offset = (page - 1) * limit;

        let total: i64 = conn
            .query_row(
                r#"
                SELECT COUNT(*)
                FROM recommendations r
                JOIN news_keywords n ON n.id = r.news_id
                JOIN books b ON b.isbn = r.isbn
                WHERE n.category = ?1 AND (?2 IS NULL OR n.news_date = ?2)
                "#,
                params![category.as_str(), date_str],
                |row| row.get(0),
            )
            .map_err(StoreError::Database)?;

        let mut stmt = conn
            .prepare(
                r#"
                SELECT b.isbn, b.title, b.publisher, b.image_url,
                       r.score, r.method, n.category, n.news_date, n.keyword
                FROM recommendations r
                JOIN news_keywords n ON n.id = r.news_id
                JOIN books b ON b.isbn = r.isbn
                WHERE n.category = ?1 AND (?2 IS NULL OR n.news_date = ?2)
                ORDER BY r.score DESC, n.news_date DESC, b.isbn ASC
                LIMIT ?3 OFFSET ?4
                "#,
            )
            .map_err(StoreError::Database)?;

        let rows = stmt
            .query_map(
                params![category.as_str(), date_str, limit as i64, offset as i64],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, f64>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, String>(7)?,
                        row.get::<_, String>(8)?,
                    ))
                },
            )
            .map_err(StoreError::Database)?;

        let mut books = Vec::new();
        for row in rows {
            let (isbn, title, publisher, image_url, score, method, category, date, keyword) =
                row.map_err(StoreError::Database)?;
            books.push(RecommendedBook {
                isbn,
                title,
                publisher,
                image_url,
                score,
                method: MatchMethod::from_str(&method).map_err(StoreError::Parse)?,
                category: NewsCategory::from_str(&category).map_err(StoreError::Parse)?,
                news_date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
                    .map_err(|e| StoreError::Parse(e.to_string()))?,
                keyword,
            });
        }

        Ok((total, books))
    }

    /// Delete one date's recommendations and keywords, in that order.
    ///
    /// Destructive, operator-invoked escape hatch for forced reprocessing.
    pub fn delete_for_date(&self, news_date: NaiveDate) -> Result<(usize, usize), StoreError> {
        let mut conn = self.conn.lock().map_err(|_| StoreError::LockError)?;
        let tx = conn.transaction().map_err(StoreError::Database)?;
        let date_str = news_date.format(DATE_FORMAT).to_string();

        let recommendations = tx
            .execute(
                r#"
                DELETE FROM recommendations
                WHERE news_id IN (SELECT id FROM news_keywords WHERE news_date = ?1)
                "#,
                params![date_str],
            )
            .map_err(StoreError::Database)?;

        let keywords = tx
            .execute(
                "DELETE FROM news_keywords WHERE news_date = ?1",
                params![date_str],
            )
            .map_err(StoreError::Database)?;

        tx.commit().map_err(StoreError::Database)?;
        Ok((recommendations, keywords))
    }
}

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to acquire lock")]
    LockError,

    #[error("Corrupt row: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmatch_core::Recommendation;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn sample_books() -> Vec<Book> {
        vec![
            Book::new("X1", "경제 입문", "경제 위기와 금융 정책", "한빛"),
            Book::new("X2", "야구의 역사", "한국 야구와 선수 이야기", "민음사"),
            Book::new("X3", "세계사 산책", "국제 정세와 외교의 흐름", "창비"),
        ]
    }

    fn store_with_books() -> RecommendStore {
        let store = RecommendStore::new_in_memory().unwrap();
        store.insert_books(&sample_books()).unwrap();
        store
    }

    #[test]
    fn books_round_trip_in_insertion_order() {
        let store = store_with_books();
        let books = store.all_books().unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].isbn, "X1");
        assert_eq!(books[2].isbn, "X3");
        assert_eq!(store.book_count().unwrap(), 3);
    }

    #[test]
    fn news_keyword_is_created_once_per_triple() {
        let store = store_with_books();
        let day = date("2025-08-25");
        let first = store
            .get_or_insert_news_keyword(NewsCategory::Economic, day, "경제")
            .unwrap();
        let second = store
            .get_or_insert_news_keyword(NewsCategory::Economic, day, "경제")
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(store.count_news_keywords_on(day).unwrap(), 1);

        // Same keyword under a different category is a distinct row
        let other = store
            .get_or_insert_news_keyword(NewsCategory::Society, day, "경제")
            .unwrap();
        assert_ne!(first, other);
        assert_eq!(store.count_news_keywords_on(day).unwrap(), 2);
    }

    #[test]
    fn duplicate_recommendation_inserts_are_absorbed() {
        let store = store_with_books();
        let day = date("2025-08-25");
        let news_id = store
            .get_or_insert_news_keyword(NewsCategory::Economic, day, "경제")
            .unwrap();

        let record = Recommendation::new(news_id, "X1", 1.0, MatchMethod::Hybrid);
        assert_eq!(store.upsert_recommendations(&[record.clone()]).unwrap(), 1);
        assert_eq!(store.upsert_recommendations(&[record]).unwrap(), 0);
        assert_eq!(store.count_recommendations_on(day).unwrap(), 1);
    }

    #[test]
    fn same_pair_under_different_method_is_a_new_row() {
        let store = store_with_books();
        let day = date("2025-08-25");
        let news_id = store
            .get_or_insert_news_keyword(NewsCategory::Economic, day, "경제")
            .unwrap();

        let hybrid = Recommendation::new(news_id, "X1", 1.0, MatchMethod::Hybrid);
        let direct = Recommendation::new(news_id, "X1", 1.0, MatchMethod::Direct);
        assert_eq!(store.upsert_recommendations(&[hybrid, direct]).unwrap(), 2);
        assert_eq!(store.count_recommendations_on(day).unwrap(), 2);
    }

    #[test]
    fn fetch_orders_by_score_then_date_and_paginates() {
        let store = store_with_books();
        let day = date("2025-08-25");
        let news_id = store
            .get_or_insert_news_keyword(NewsCategory::Economic, day, "경제")
            .unwrap();

        let records = vec![
            Recommendation::new(news_id, "X1", 0.9, MatchMethod::Hybrid),
            Recommendation::new(news_id, "X2", 0.5, MatchMethod::Hybrid),
            Recommendation::new(news_id, "X3", 0.7, MatchMethod::Hybrid),
        ];
        store.upsert_recommendations(&records).unwrap();

        let (total, page_one) = store
            .fetch_for_category(NewsCategory::Economic, Some(day), 1, 2)
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(page_one.len(), 2);
        assert_eq!(page_one[0].isbn, "X1");
        assert_eq!(page_one[1].isbn, "X3");

        let (_, page_two) = store
            .fetch_for_category(NewsCategory::Economic, Some(day), 2, 2)
            .unwrap();
        assert_eq!(page_two.len(), 1);
        assert_eq!(page_two[0].isbn, "X2");
    }

    #[test]
    fn fetch_filters_by_date_and_category() {
        let store = store_with_books();
        let monday = date("2025-08-25");
        let tuesday = date("2025-08-26");

        let id_monday = store
            .get_or_insert_news_keyword(NewsCategory::Economic, monday, "경제")
            .unwrap();
        let id_tuesday = store
            .get_or_insert_news_keyword(NewsCategory::Economic, tuesday, "금리")
            .unwrap();
        let id_sports = store
            .get_or_insert_news_keyword(NewsCategory::Sports, monday, "야구")
            .unwrap();

        store
            .upsert_recommendations(&[
                Recommendation::new(id_monday, "X1", 0.9, MatchMethod::Hybrid),
                Recommendation::new(id_tuesday, "X1", 0.8, MatchMethod::Hybrid),
                Recommendation::new(id_sports, "X2", 0.7, MatchMethod::Hybrid),
            ])
            .unwrap();

        let (total_monday, rows) = store
            .fetch_for_category(NewsCategory::Economic, Some(monday), 1, 10)
            .unwrap();
        assert_eq!(total_monday, 1);
        assert_eq!(rows[0].keyword, "경제");

        let (total_all, _) = store
            .fetch_for_category(NewsCategory::Economic, None, 1, 10)
            .unwrap();
        assert_eq!(total_all, 2);

        let (total_world, rows) = store
            .fetch_for_category(NewsCategory::World, Some(monday), 1, 10)
            .unwrap();
        assert_eq!(total_world, 0);
        assert!(rows.is_empty());
    }

    #[test]
    fn fetch_projects_book_fields() {
        let store = store_with_books();
        let day = date("2025-08-25");
        let news_id = store
            .get_or_insert_news_keyword(NewsCategory::Economic, day, "경제")
            .unwrap();
        store
            .upsert_recommendations(&[Recommendation::new(
                news_id,
                "X1",
                1.0,
                MatchMethod::Direct,
            )])
            .unwrap();

        let (_, rows) = store
            .fetch_for_category(NewsCategory::Economic, Some(day), 1, 10)
            .unwrap();
        let row = &rows[0];
        assert_eq!(row.title, "경제 입문");
        assert_eq!(row.publisher, "한빛");
        assert_eq!(row.method, MatchMethod::Direct);
        assert_eq!(row.category, NewsCategory::Economic);
        assert_eq!(row.news_date, day);
    }

    #[test]
    fn delete_for_date_only_touches_that_date() {
        let store = store_with_books();
        let monday = date("2025-08-25");
        let tuesday = date("2025-08-26");

        let id_monday = store
            .get_or_insert_news_keyword(NewsCategory::Economic, monday, "경제")
            .unwrap();
        let id_tuesday = store
            .get_or_insert_news_keyword(NewsCategory::Economic, tuesday, "금리")
            .unwrap();
        store
            .upsert_recommendations(&[
                Recommendation::new(id_monday, "X1", 0.9, MatchMethod::Hybrid),
                Recommendation::new(id_tuesday, "X2", 0.8, MatchMethod::Hybrid),
            ])
            .unwrap();

        let (recommendations, keywords) = store.delete_for_date(monday).unwrap();
        assert_eq!(recommendations, 1);
        assert_eq!(keywords, 1);

        assert_eq!(store.count_news_keywords_on(monday).unwrap(), 0);
        assert_eq!(store.count_recommendations_on(monday).unwrap(), 0);
        assert_eq!(store.count_news_keywords_on(tuesday).unwrap(), 1);
        assert_eq!(store.count_recommendations_on(tuesday).unwrap(), 1);
    }

    #[test]
    fn book_keywords_are_replaced_in_bulk() {
        let store = store_with_books();
        let mut first = HashMap::new();
        first.insert("X1".to_string(), vec!["경제".to_string(), "금융".to_string()]);
        assert_eq!(store.replace_book_keywords(&first).unwrap(), 2);

        let mut second = HashMap::new();
        second.insert("X2".to_string(), vec!["야구".to_string()]);
        assert_eq!(store.replace_book_keywords(&second).unwrap(), 1);

        let loaded = store.book_keywords().unwrap();
        assert!(!loaded.contains_key("X1"));
        assert_eq!(loaded.get("X2").unwrap(), &vec!["야구".to_string()]);
    }

    #[test]
    fn keyword_counts_group_by_category() {
        let store = store_with_books();
        let day = date("2025-08-25");
        store
            .get_or_insert_news_keyword(NewsCategory::Economic, day, "경제")
            .unwrap();
        store
            .get_or_insert_news_keyword(NewsCategory::Economic, day, "금리")
            .unwrap();
        store
            .get_or_insert_news_keyword(NewsCategory::Sports, day, "야구")
            .unwrap();

        let counts = store.keyword_counts_by_category(day).unwrap();
        assert_eq!(
            counts,
            vec![("economic".to_string(), 2), ("sports".to_string(), 1)]
        );
    }
}
