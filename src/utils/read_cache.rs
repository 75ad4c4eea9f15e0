use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, error};

/// Single-entry read-through cache with a freshness window.
///
/// Owned by whoever needs it and handed in through a constructor; writers call
/// [`ReadCache::invalidate`] after every successful write.
pub struct ReadCache<V> {
    inner: Cache<(), V>,
}

impl<V> ReadCache<V>
where
    V: Clone + Default + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder().time_to_live(ttl).build(),
        }
    }

    /// Returns the cached value, or runs `load` and caches its result.
    /// A failed load is logged and `V::default()` is cached in its place.
    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Display,
    {
        self.inner
            .get_with((), async move {
                debug!("Read cache miss, loading");
                match load().await {
                    Ok(value) => value,
                    Err(e) => {
                        error!(error = %e, "Failed to load data, caching empty result");
                        V::default()
                    }
                }
            })
            .await
    }

    pub async fn invalidate(&self) {
        self.inner.invalidate(&()).await;
    }
}
