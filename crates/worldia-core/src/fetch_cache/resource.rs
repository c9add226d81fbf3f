//! Per-consumer handle over a shared [`FetchCache`].

use super::store::{FetchCache, FetchMode, FetchOutcome};
use crate::error::{Result, WorldiaError};
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Snapshot of a resource.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub error: Option<Arc<WorldiaError>>,
    /// No data yet and a fetch has not finished.
    pub is_loading: bool,
    /// A network fetch is running.
    pub is_validating: bool,
}

/// A key bound to a fetcher and a shared cache.
///
/// Failures keep the last known data and only set `error`.
pub struct Resource<T: Clone + Send + Sync + 'static> {
    key: String,
    cache: Arc<FetchCache<T>>,
    fetcher: Fetcher<T>,
    state: Mutex<ResourceState<T>>,
}

impl<T: Clone + Send + Sync + 'static> Resource<T> {
    pub fn new<F, Fut>(key: impl Into<String>, cache: Arc<FetchCache<T>>, fetcher: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            key: key.into(),
            cache,
            fetcher: Arc::new(move || Box::pin(fetcher())),
            state: Mutex::new(ResourceState {
                data: None,
                error: None,
                is_loading: true,
                is_validating: false,
            }),
        }
    }

    /// Seed the handle with data to show before the first fetch.
    pub fn with_initial_data(self, data: T) -> Self {
        {
            let mut state = self.lock_state();
            state.data = Some(data);
            state.is_loading = false;
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn lock_state(&self) -> MutexGuard<'_, ResourceState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ResourceState<T> {
        self.lock_state().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock_state().data.clone()
    }

    /// Deduped fetch.
    pub async fn fetch(&self) -> FetchOutcome<T> {
        self.run(FetchMode::Deduped).await
    }

    /// Fetch ignoring the dedupe interval.
    pub async fn refetch(&self) -> FetchOutcome<T> {
        self.run(FetchMode::Revalidate).await
    }

    /// Revalidate after the consumer regains focus. `None` when disabled.
    pub async fn revalidate_on_focus(&self) -> Option<FetchOutcome<T>> {
        if !self.cache.config().revalidate_on_focus {
            return None;
        }
        Some(self.run(FetchMode::Revalidate).await)
    }

    /// Replace local data and the cache entry.
    pub fn mutate(&self, value: T) {
        self.cache.insert(&self.key, value.clone());
        let mut state = self.lock_state();
        state.data = Some(value);
        state.is_loading = false;
    }

    /// Derive new data from the current data, then store it like [`mutate`](Self::mutate).
    pub fn mutate_with(&self, update: impl FnOnce(Option<&T>) -> T) -> T {
        let mut state = self.lock_state();
        let value = update(state.data.as_ref());
        self.cache.insert(&self.key, value.clone());
        state.data = Some(value.clone());
        state.is_loading = false;
        value
    }

    async fn run(&self, mode: FetchMode) -> FetchOutcome<T> {
        let fetcher = Arc::clone(&self.fetcher);
        let outcome = self
            .cache
            .fetch_with(&self.key, mode, || async move {
                self.lock_state().is_validating = true;
                let _validating = ValidatingGuard(self);
                fetcher().await
            })
            .await;

        let mut state = self.lock_state();
        match &outcome {
            FetchOutcome::Fresh(value) | FetchOutcome::Completed(value) => {
                state.data = Some(value.clone());
                state.error = None;
                state.is_loading = false;
            }
            FetchOutcome::Failed(e) => {
                warn!("Fetching {} failed: {}", self.key, e);
                state.error = Some(Arc::clone(e));
                state.is_loading = false;
            }
            FetchOutcome::Deduped => {
                if let Some(value) = self.cache.get_fresh(&self.key) {
                    state.data = Some(value);
                    state.is_loading = false;
                }
            }
            FetchOutcome::InFlight => {}
        }
        outcome
    }
}

/// Clears `is_validating` when the network fetch ends or is dropped.
struct ValidatingGuard<'a, T: Clone + Send + Sync + 'static>(&'a Resource<T>);

impl<T: Clone + Send + Sync + 'static> Drop for ValidatingGuard<'_, T> {
    fn drop(&mut self) {
        self.0.lock_state().is_validating = false;
    }
}
