//! Recommendation response cache
//!
//! In-memory TTL cache keyed by the full query shape (category, date,
//! page, limit). Expiry is lazy: entries are dropped when a lookup or
//! insert touches them, never by a background task. Time comes from an
//! injected clock so expiry is testable without sleeping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bookmatch_core::{NewsCategory, RecommendedBook};
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::config::CacheConfig;

/// Time source for the cache.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time, the production clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for tests; starts at construction time and only
/// moves when advanced.
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Full query shape; any parameter change is a different cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub category: NewsCategory,
    pub news_date: Option<NaiveDate>,
    pub page: u32,
    pub limit: u32,
}

/// The cached payload: one page of recommendations plus the unpaged total.
#[derive(Debug, Clone, Serialize)]
pub struct CachedRecommendations {
    pub total: i64,
    pub books: Vec<RecommendedBook>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: CachedRecommendations,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache health snapshot served by the cache status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub live: usize,
    pub expired: usize,
    pub ttl_secs: u64,
}

/// TTL cache over recommendation query results.
pub struct RecommendCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
}

impl RecommendCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(config.ttl_secs),
            max_entries: config.max_entries,
            clock,
        }
    }

    /// Look up a query result. An expired entry is removed here and
    /// reported as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<CachedRecommendations> {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.data.clone()),
            None => None,
        }
    }

    /// Store a query result with a fresh TTL. When the cache is full the
    /// entry closest to expiry makes room.
    pub fn set(&self, key: CacheKey, data: CachedRecommendations) {
        let now = self.clock.now();
        let mut entries = self.entries.write();

        entries.retain(|_, entry| !entry.is_expired(now));

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(k, _)| k.clone());
            if let Some(k) = oldest {
                entries.remove(&k);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                data,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Drop every entry; returns how many were held.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write();
        let count = entries.len();
        entries.clear();
        count
    }

    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired(now)).count();
        CacheStats {
            entries: entries.len(),
            live: entries.len() - expired,
            expired,
            ttl_secs: self.ttl.as_secs(),
        }
    }
}
