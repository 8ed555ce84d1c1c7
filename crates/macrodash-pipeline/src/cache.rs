//! Single-slot TTL cache with single-flight recomputation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
struct CacheEntry<T> {
    value: Arc<T>,
    computed_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.computed_at.elapsed() < ttl
    }
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            computed_at: self.computed_at,
        }
    }
}

/// Memoizes the result of one expensive computation for a time-to-live.
///
/// Fresh entries are served under a read lock. A stale or missing entry is
/// recomputed by exactly one caller while the others wait on the refresh
/// lock and then reuse its result. A failed recomputation leaves the
/// previous entry in place.
#[derive(Debug)]
pub struct TtlCache<T> {
    slot: RwLock<Option<CacheEntry<T>>>,
    refresh: Mutex<()>,
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TtlCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    async fn fresh(&self, ttl: Duration) -> Option<Arc<T>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|entry| entry.is_fresh(ttl))
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Returns the cached value if it is younger than `ttl`, otherwise
    /// awaits `compute` and stores its result.
    ///
    /// # Errors
    ///
    /// Returns the error of `compute`. The previous entry, if any, is kept.
    pub async fn get_or_compute<F, Fut, E>(&self, ttl: Duration, compute: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.fresh(ttl).await {
            debug!("cache hit");
            return Ok(value);
        }

        let _guard = self.refresh.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(value) = self.fresh(ttl).await {
            debug!("cache filled by concurrent refresh");
            return Ok(value);
        }

        debug!("cache miss, recomputing");
        let value = Arc::new(compute().await?);
        *self.slot.write().await = Some(CacheEntry {
            value: Arc::clone(&value),
            computed_at: Instant::now(),
        });
        Ok(value)
    }

    /// Drops the cached entry so the next call recomputes.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
        debug!("cache invalidated");
    }

    /// Returns the last stored value regardless of its age.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Returns the age of the stored value.
    pub async fn age(&self) -> Option<Duration> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|entry| entry.computed_at.elapsed())
    }

    /// Returns true if a value younger than `ttl` is stored.
    pub async fn is_fresh(&self, ttl: Duration) -> bool {
        self.fresh(ttl).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(3600);

    async fn counted(cache: &TtlCache<usize>, calls: &AtomicUsize) -> Result<Arc<usize>, String> {
        cache
            .get_or_compute(TTL, || async {
                Ok(calls.fetch_add(1, Ordering::SeqCst) + 1)
            })
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        assert_eq!(*counted(&cache, &calls).await.unwrap(), 1);
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(*counted(&cache, &calls).await.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recompute_after_expiry() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        counted(&cache, &calls).await.unwrap();
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        assert!(!cache.is_fresh(TTL).await);
        assert_eq!(*counted(&cache, &calls).await.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_recompute_after_invalidate() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        counted(&cache, &calls).await.unwrap();
        cache.invalidate().await;
        assert!(cache.peek().await.is_none());
        counted(&cache, &calls).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_entry() {
        let cache = TtlCache::new();
        cache
            .get_or_compute(TTL, || async { Ok::<_, String>(7) })
            .await
            .unwrap();
        tokio::time::advance(TTL * 2).await;

        let err = cache
            .get_or_compute(TTL, || async { Err::<usize, _>("provider down".to_string()) })
            .await
            .unwrap_err();
        assert_eq!(err, "provider down");
        assert_eq!(cache.peek().await.as_deref(), Some(&7));
        assert!(!cache.is_fresh(TTL).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_computation() {
        let cache = Arc::new(TtlCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_compute(TTL, || async {
                            tokio::time::sleep(Duration::from_secs(5)).await;
                            Ok::<_, String>(calls.fetch_add(1, Ordering::SeqCst))
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(*task.await.unwrap().unwrap(), 0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_age_tracks_clock() {
        let cache = TtlCache::new();
        assert!(cache.age().await.is_none());
        cache
            .get_or_compute(TTL, || async { Ok::<_, String>(()) })
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(90)).await;
        assert_eq!(cache.age().await, Some(Duration::from_secs(90)));
    }
}
