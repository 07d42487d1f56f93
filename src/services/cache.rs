use crate::error::DataError;
use crate::sources::MarketDataProvider;
use crate::types::{Bar, Fundamentals, Period, SymbolMatch};
use async_trait::async_trait;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// A thread-safe cache with TTL support.
pub struct Cache<K, V> {
    data: DashMap<K, CacheEntry<V>>,
    default_ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    /// Create a new cache with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            default_ttl,
        }
    }

    /// Get a value from the cache.
    pub fn get(&self, key: &K) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    /// Set a value in the cache with the default TTL.
    pub fn set(&self, key: K, value: V) {
        self.data.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.default_ttl,
            },
        );
    }

    /// Check if a key exists and is not expired.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove all expired entries from the cache.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Get the number of entries in the cache (including expired).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

type HistoryKey = (String, Period);

/// Provider wrapper that caches price histories by (symbol, period).
///
/// Fundamentals and search are passed through; failures are never cached.
pub struct CachedProvider {
    inner: Arc<dyn MarketDataProvider>,
    history: Cache<HistoryKey, Vec<Bar>>,
}

impl CachedProvider {
    pub fn new(inner: Arc<dyn MarketDataProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            history: Cache::new(ttl),
        }
    }

    fn key(symbol: &str, period: Period) -> HistoryKey {
        (symbol.trim().to_uppercase(), period)
    }

    /// Drop expired histories.
    pub fn cleanup(&self) {
        self.history.cleanup();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[async_trait]
impl MarketDataProvider for CachedProvider {
    async fn history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, DataError> {
        let key = Self::key(symbol, period);
        if let Some(bars) = self.history.get(&key) {
            debug!("History cache hit for {} ({})", key.0, period);
            return Ok(bars);
        }

        let bars = self.inner.history(symbol, period).await?;
        self.history.set(key, bars.clone());
        Ok(bars)
    }

    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataError> {
        self.inner.fundamentals(symbol).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, DataError> {
        self.inner.search(query).await
    }

    fn is_cached(&self, symbol: &str, period: Period) -> bool {
        self.history.contains(&Self::key(symbol, period))
    }
}
