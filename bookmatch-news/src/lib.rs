//! Headline crawling for the recommendation pipeline
//!
//! Fetches news section pages and extracts headline text. The crawler is
//! deliberately tolerant: a failed page or section yields fewer headlines,
//! never a failed pipeline run.

pub mod client;
pub mod sections;

pub use client::HeadlineClient;
pub use sections::{section_feeds, SectionFeed};
