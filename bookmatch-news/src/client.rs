//! Headline client
//!
//! Fetches section pages and pulls headline text out of `<h2>` nodes.

use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, warn};

use bookmatch_core::{BookmatchError, NewsCategory};

use crate::sections::{section_feeds, SectionFeed};

/// Pages crawled per section.
const PAGES_PER_SECTION: u32 = 3;

/// Crawls news sections and extracts headline strings
pub struct HeadlineClient {
    client: Client,
    feeds: Vec<SectionFeed>,
    pages: u32,
}

impl HeadlineClient {
    /// Create a client over the curated section list
    pub fn new() -> Self {
        Self::with_feeds(section_feeds())
    }

    /// Create with custom sections
    pub fn with_feeds(feeds: Vec<SectionFeed>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .user_agent("Mozilla/5.0 (compatible; Bookmatch/1.0)")
                .build()
                .unwrap_or_else(|_| Client::new()),
            feeds,
            pages: PAGES_PER_SECTION,
        }
    }

    /// Fetch deduplicated headlines for one category.
    ///
    /// Failed pages are logged and skipped; a category with no reachable
    /// pages yields an empty list, never an error.
    pub async fn fetch_headlines(&self, category: NewsCategory) -> Vec<String> {
        let feed = match self.feeds.iter().find(|f| f.category == category) {
            Some(feed) => feed,
            None => {
                warn!("No section configured for category {}", category);
                return Vec::new();
            }
        };

        let mut headlines = Vec::new();
        let mut seen = HashSet::new();
        for page in 1..=self.pages {
            let url = feed.page_url(page);
            match self.fetch_page(&url).await {
                Ok(html) => {
                    for headline in extract_headlines(&html) {
                        if seen.insert(headline.clone()) {
                            headlines.push(headline);
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to fetch {} page {}: {}", category, page, e);
                }
            }
        }

        debug!("Fetched {} headlines for {}", headlines.len(), category);
        headlines
    }

    async fn fetch_page(&self, url: &str) -> Result<String, BookmatchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BookmatchError::network(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(BookmatchError::network(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| BookmatchError::network(format!("Failed to read {}: {}", url, e)))
    }
}

impl Default for HeadlineClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract whitespace-collapsed `<h2>` text from a section page.
pub fn extract_headlines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("h2") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|node| {
            node.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect()
}
