use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, warn};

use crate::utils::metrics::METRICS;

/// Client-side cache of GET responses, keyed by path and query.
///
/// Values are the raw JSON bodies so one cache serves every response type.
/// Every invalidation bumps `generation`; a fetch that started before it must
/// not repopulate the cache.
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<String, String>,
    generation: Arc<AtomicU64>,
}

impl QueryCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();

        Self {
            inner,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn key(path: &str, query: &[(&str, String)]) -> String {
        if query.is_empty() {
            return path.to_string();
        }
        let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}?{}", path, pairs.join("&"))
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        match self.inner.get(key).await {
            Some(body) => {
                METRICS.cache_hits.inc();
                debug!(key, "Query cache hit");
                Some(body)
            }
            None => {
                METRICS.cache_misses.inc();
                None
            }
        }
    }

    pub async fn insert(&self, key: String, body: String) {
        self.inner.insert(key, body).await;
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Insert a body fetched when the cache was at `generation`. Dropped if any
    /// invalidation happened since.
    pub async fn insert_if_current(&self, key: String, body: String, generation: u64) -> bool {
        if self.generation() != generation {
            debug!(key = %key, "Discarding response fetched before invalidation");
            return false;
        }
        self.insert(key.clone(), body).await;

        // an invalidation may have landed between the check and the insert
        if self.generation() != generation {
            self.inner.invalidate(&key).await;
            return false;
        }
        true
    }

    /// Drop every entry under a resource path, e.g. `/v1/wallets`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let prefix = prefix.to_string();
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |k, _| k.starts_with(&prefix))
        {
            warn!(error = %e, "Prefix invalidation rejected, clearing cache");
            self.inner.invalidate_all();
        }
    }

    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_includes_query_in_order() {
        assert_eq!(QueryCache::key("/v1/coupons", &[]), "/v1/coupons");
        assert_eq!(
            QueryCache::key(
                "/v1/customers",
                &[("limit", "10".to_string()), ("offset", "20".to_string())]
            ),
            "/v1/customers?limit=10&offset=20"
        );
    }

    #[tokio::test]
    async fn stores_and_clears() {
        let cache = QueryCache::new(Duration::from_secs(60), 100);
        cache.insert("/v1/plans".into(), "[]".into()).await;
        assert_eq!(cache.get("/v1/plans").await.as_deref(), Some("[]"));

        cache.inner.run_pending_tasks().await;
        cache.clear();
        assert!(cache.get("/v1/plans").await.is_none());
    }

    #[tokio::test]
    async fn prefix_invalidation_keeps_other_resources() {
        let cache = QueryCache::new(Duration::from_secs(60), 100);
        cache
            .insert("/v1/wallets?customer_id=c1".into(), "{}".into())
            .await;
        cache.insert("/v1/plans".into(), "{}".into()).await;
        cache.inner.run_pending_tasks().await;

        cache.invalidate_prefix("/v1/wallets");

        assert!(cache.get("/v1/wallets?customer_id=c1").await.is_none());
        assert!(cache.get("/v1/plans").await.is_some());
    }

    #[tokio::test]
    async fn fetch_started_before_invalidation_is_not_cached() {
        let cache = QueryCache::new(Duration::from_secs(60), 100);

        let stale = cache.generation();
        cache.invalidate_prefix("/v1/coupons");
        assert!(
            !cache
                .insert_if_current("/v1/coupons".into(), "old".into(), stale)
                .await
        );
        assert!(cache.get("/v1/coupons").await.is_none());

        let fresh = cache.generation();
        assert!(
            cache
                .insert_if_current("/v1/coupons".into(), "new".into(), fresh)
                .await
        );
        assert_eq!(cache.get("/v1/coupons").await.as_deref(), Some("new"));
    }
}
