//! News category and match method definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// News sections the pipeline crawls and recommends against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    /// Politics and government
    Politics,
    /// Sports
    Sports,
    /// Economy and finance
    Economic,
    /// Society and culture
    Society,
    /// World and international affairs
    World,
}

impl NewsCategory {
    /// All categories, in crawl order
    pub const ALL: [NewsCategory; 5] = [
        NewsCategory::Politics,
        NewsCategory::Sports,
        NewsCategory::Economic,
        NewsCategory::Society,
        NewsCategory::World,
    ];

    /// Canonical lowercase identifier (matches the persisted column value)
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Politics => "politics",
            NewsCategory::Sports => "sports",
            NewsCategory::Economic => "economic",
            NewsCategory::Society => "society",
            NewsCategory::World => "world",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NewsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "politics" => Ok(NewsCategory::Politics),
            "sports" => Ok(NewsCategory::Sports),
            "economic" => Ok(NewsCategory::Economic),
            "society" => Ok(NewsCategory::Society),
            "world" => Ok(NewsCategory::World),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// How a recommendation row was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// Substring presence in title or description
    Direct,
    /// Embedding cosine similarity against book keywords
    Similarity,
    /// Category seed-keyword topical affinity
    Cluster,
    /// Weighted merge of the individual strategies
    Hybrid,
}

impl MatchMethod {
    /// Canonical lowercase identifier (matches the persisted column value)
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Direct => "direct",
            MatchMethod::Similarity => "similarity",
            MatchMethod::Cluster => "cluster",
            MatchMethod::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MatchMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(MatchMethod::Direct),
            "similarity" => Ok(MatchMethod::Similarity),
            "cluster" => Ok(MatchMethod::Cluster),
            "hybrid" => Ok(MatchMethod::Hybrid),
            _ => Err(format!("Unknown match method: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_round_trips_through_str() {
        for category in NewsCategory::ALL {
            let parsed = NewsCategory::from_str(category.as_str());
            assert_eq!(parsed, Ok(category));
        }
    }

    #[test]
    fn category_rejects_unknown_names() {
        assert!(NewsCategory::from_str("finance").is_err());
        assert!(NewsCategory::from_str("").is_err());
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&NewsCategory::Economic).unwrap();
        assert_eq!(json, "\"economic\"");
    }

    #[test]
    fn method_round_trips_through_str() {
        for method in [
            MatchMethod::Direct,
            MatchMethod::Similarity,
            MatchMethod::Cluster,
            MatchMethod::Hybrid,
        ] {
            assert_eq!(MatchMethod::from_str(method.as_str()), Ok(method));
        }
    }
}
