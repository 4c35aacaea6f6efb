//! News section registry

use bookmatch_core::NewsCategory;

/// A crawlable news section
#[derive(Debug, Clone)]
pub struct SectionFeed {
    /// Category this section maps to
    pub category: NewsCategory,
    /// Section URL without the page parameter
    pub url: String,
}

impl SectionFeed {
    pub fn new(category: NewsCategory, url: &str) -> Self {
        Self {
            category,
            url: url.to_string(),
        }
    }

    /// URL for one paginated section page (pages start at 1)
    pub fn page_url(&self, page: u32) -> String {
        format!("{}?page={}", self.url, page)
    }
}

/// Curated list of crawled news sections, one per category.
///
/// The "money" section feeds the economic category.
pub fn section_feeds() -> Vec<SectionFeed> {
    vec![
        SectionFeed::new(
            NewsCategory::Politics,
            "https://www.joongang.co.kr/politics",
        ),
        SectionFeed::new(NewsCategory::Sports, "https://www.joongang.co.kr/sports"),
        SectionFeed::new(NewsCategory::Economic, "https://www.joongang.co.kr/money"),
        SectionFeed::new(NewsCategory::Society, "https://www.joongang.co.kr/society"),
        SectionFeed::new(NewsCategory::World, "https://www.joongang.co.kr/world"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_exactly_one_section() {
        let feeds = section_feeds();
        for category in NewsCategory::ALL {
            let count = feeds.iter().filter(|f| f.category == category).count();
            assert_eq!(count, 1, "category {} should have one section", category);
        }
    }

    #[test]
    fn page_url_appends_page_parameter() {
        let feed = SectionFeed::new(NewsCategory::Politics, "https://example.com/politics");
        assert_eq!(feed.page_url(2), "https://example.com/politics?page=2");
    }
}
