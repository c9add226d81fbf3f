//! Keyed response cache with TTL, request deduplication and an in-flight guard.

use crate::config::CacheConfig;
use crate::error::{Result, WorldiaError};
use lru::LruCache;
use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Tunables of a [`FetchCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCacheConfig {
    /// How long a stored value is served without hitting the network.
    pub ttl: Duration,
    /// Window after a network fetch during which deduped fetches are skipped.
    pub deduping_interval: Duration,
    /// Whether [`Resource::revalidate_on_focus`](super::Resource::revalidate_on_focus) fetches.
    pub revalidate_on_focus: bool,
    /// Upper bound on stored entries. The least recently used one is evicted.
    pub max_entries: u64,
}

impl Default for FetchCacheConfig {
    fn default() -> Self {
        Self {
            ttl: CacheConfig::TTL,
            deduping_interval: CacheConfig::DEDUPING_INTERVAL,
            revalidate_on_focus: true,
            max_entries: CacheConfig::MAX_ENTRIES,
        }
    }
}

/// Whether a fetch honors the dedupe interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Deduped,
    /// Skip the dedupe check. The in-flight guard and TTL still apply.
    Revalidate,
}

/// Result of a single fetch attempt.
#[derive(Debug, Clone)]
pub enum FetchOutcome<T> {
    /// Served from a cache entry younger than the TTL.
    Fresh(T),
    /// Skipped: the network was hit for this key within the dedupe interval.
    Deduped,
    /// Skipped: another fetch for this key is outstanding.
    InFlight,
    /// The fetcher ran and succeeded.
    Completed(T),
    /// The fetcher ran and failed.
    Failed(Arc<WorldiaError>),
}

impl<T> FetchOutcome<T> {
    /// The value carried by the outcome, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            FetchOutcome::Fresh(v) | FetchOutcome::Completed(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            FetchOutcome::Fresh(v) | FetchOutcome::Completed(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the fetcher was actually invoked.
    pub fn hit_network(&self) -> bool {
        matches!(self, FetchOutcome::Completed(_) | FetchOutcome::Failed(_))
    }
}

#[derive(Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

#[derive(Debug, Default)]
struct KeyState {
    last_fetch: Option<Instant>,
    in_flight: bool,
}

/// Shared cache of fetched values keyed by request path.
///
/// Construct one per consumer group and share it behind an `Arc`; every
/// [`Resource`](super::Resource) bound to the same cache and key observes the
/// same dedupe window and in-flight guard.
pub struct FetchCache<T: Clone + Send + Sync + 'static> {
    config: FetchCacheConfig,
    entries: Mutex<LruCache<String, CacheEntry<T>>>,
    keys: Mutex<HashMap<String, KeyState>>,
}

impl<T: Clone + Send + Sync + 'static> FetchCache<T> {
    pub fn new() -> Self {
        Self::with_config(FetchCacheConfig::default())
    }

    pub fn with_config(config: FetchCacheConfig) -> Self {
        let capacity = usize::try_from(config.max_entries)
            .ok()
            .and_then(NonZeroUsize::new)
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            keys: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &FetchCacheConfig {
        &self.config
    }

    fn lock_keys(&self) -> MutexGuard<'_, HashMap<String, KeyState>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_entries(&self) -> MutexGuard<'_, LruCache<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A stored value younger than the TTL. Expired entries are dropped.
    pub fn get_fresh(&self, key: &str) -> Option<T> {
        let mut entries = self.lock_entries();
        let found = entries
            .get(key)
            .map(|entry| (entry.stored_at.elapsed() < self.config.ttl).then(|| entry.value.clone()));
        match found {
            Some(Some(value)) => Some(value),
            Some(None) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    /// Store a value with a fresh timestamp, evicting the least recently
    /// used entry when full.
    pub fn insert(&self, key: &str, value: T) {
        let evicted = self.lock_entries().push(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
        if let Some((old_key, _)) = evicted.filter(|(old_key, _)| old_key != key) {
            debug!("Evicted {} from cache", old_key);
        }
    }

    pub fn invalidate(&self, key: &str) {
        self.lock_entries().pop(key);
    }

    /// Drop every entry and all per-key bookkeeping.
    pub fn clear(&self) {
        self.lock_entries().clear();
        self.lock_keys().retain(|_, state| state.in_flight);
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> u64 {
        self.lock_entries().len() as u64
    }

    /// Serve a fresh entry or run `fetcher` and store its value.
    ///
    /// Unlike [`fetch_with`](Self::fetch_with) this ignores dedupe and
    /// in-flight bookkeeping and always yields a value or an error.
    pub async fn preload<F, Fut>(&self, key: &str, fetcher: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.get_fresh(key) {
            debug!("Preload hit for {}", key);
            return Ok(value);
        }
        let value = fetcher().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Run the dedupe, in-flight and TTL checks, in that order, and invoke
    /// `fetcher` only when all three let the request through.
    pub async fn fetch_with<F, Fut>(&self, key: &str, mode: FetchMode, fetcher: F) -> FetchOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        {
            let now = Instant::now();
            let mut keys = self.lock_keys();
            self.prune(&mut keys, now);
            let state = keys.entry(key.to_string()).or_default();

            if mode == FetchMode::Deduped {
                if let Some(last) = state.last_fetch {
                    if now.duration_since(last) < self.config.deduping_interval {
                        debug!("Fetch for {} deduped", key);
                        return FetchOutcome::Deduped;
                    }
                }
            }

            if state.in_flight {
                debug!("Fetch for {} already in flight", key);
                return FetchOutcome::InFlight;
            }

            if let Some(value) = self.get_fresh(key) {
                debug!("Serving {} from cache", key);
                return FetchOutcome::Fresh(value);
            }

            state.last_fetch = Some(now);
            state.in_flight = true;
        }

        let _guard = InFlightGuard { cache: self, key };
        debug!("Fetching {}", key);

        match fetcher().await {
            Ok(value) => {
                self.insert(key, value.clone());
                FetchOutcome::Completed(value)
            }
            Err(e) => {
                debug!("Fetch for {} failed: {}", key, e);
                FetchOutcome::Failed(Arc::new(e))
            }
        }
    }

    /// Forget idle keys once bookkeeping outgrows the entry bound.
    fn prune(&self, keys: &mut HashMap<String, KeyState>, now: Instant) {
        if keys.len() as u64 <= self.config.max_entries {
            return;
        }
        let interval = self.config.deduping_interval;
        keys.retain(|_, state| {
            state.in_flight
                || state
                    .last_fetch
                    .is_some_and(|last| now.duration_since(last) < interval)
        });
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.lock_keys().len()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for FetchCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the in-flight flag even if the fetch future is dropped or panics.
struct InFlightGuard<'a, T: Clone + Send + Sync + 'static> {
    cache: &'a FetchCache<T>,
    key: &'a str,
}

impl<T: Clone + Send + Sync + 'static> Drop for InFlightGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(state) = self.cache.lock_keys().get_mut(self.key) {
            state.in_flight = false;
        }
    }
}
