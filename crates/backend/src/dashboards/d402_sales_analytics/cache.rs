use contracts::dashboards::d402_sales_analytics::{Granularity, RankingMetric, SalesAnalyticsResponse};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::AnalyticsError;
use super::period_order::PeriodOrdering;

/// Every parameter that changes the computed response
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub dataset_version: String,
    pub granularity: Granularity,
    pub limit: usize,
    pub worst_performing: bool,
    pub metric: RankingMetric,
    pub ordering: PeriodOrdering,
    pub offset_seconds: i32,
}

/// Bounded memoization of analytics responses, oldest entry evicted first
pub struct AnalyticsCache {
    inner: Option<Mutex<LruCache<CacheKey, Arc<SalesAnalyticsResponse>>>>,
}

impl AnalyticsCache {
    /// Capacity 0 disables caching
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|size| Mutex::new(LruCache::new(size))),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| lock(inner).len())
    }

    /// Return the cached response for `key`, computing and storing it on a miss.
    ///
    /// Errors are returned as-is and never cached. Hits are read with `peek`,
    /// so eviction follows insertion order rather than recency of use.
    pub fn get_or_try_insert_with<F>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> Result<Arc<SalesAnalyticsResponse>, AnalyticsError>
    where
        F: FnOnce() -> Result<SalesAnalyticsResponse, AnalyticsError>,
    {
        let Some(inner) = self.inner.as_ref() else {
            return compute().map(Arc::new);
        };

        if let Some(hit) = lock(inner).peek(&key) {
            tracing::debug!("Analytics cache hit for dataset {}", key.dataset_version);
            return Ok(Arc::clone(hit));
        }

        tracing::debug!("Analytics cache miss for dataset {}", key.dataset_version);
        // Computed outside the lock; a concurrent miss for the same key just recomputes
        let value = Arc::new(compute()?);

        let mut guard = lock(inner);
        if !guard.contains(&key) {
            guard.put(key, Arc::clone(&value));
        }

        Ok(value)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d402_sales_analytics::{ChartKind, ChartSeries, SalesTotals};
    use std::cell::Cell;

    fn key(version: &str, limit: usize) -> CacheKey {
        CacheKey {
            dataset_version: version.to_string(),
            granularity: Granularity::Month,
            limit,
            worst_performing: false,
            metric: RankingMetric::Revenue,
            ordering: PeriodOrdering::Canonical,
            offset_seconds: 0,
        }
    }

    fn response(limit: usize) -> SalesAnalyticsResponse {
        let empty = ChartSeries {
            kind: ChartKind::Bar,
            labels: vec![],
            datasets: vec![],
        };
        SalesAnalyticsResponse {
            granularity: Granularity::Month,
            metric: RankingMetric::Revenue,
            limit,
            worst_performing: false,
            periods: vec![],
            trend: empty.clone(),
            totals: SalesTotals {
                revenue: 0.0,
                profit: 0.0,
                quantity: 0,
                order_quantity: 0,
                average_order_value: 0.0,
                revenue_display: "0".to_string(),
                profit_display: "0".to_string(),
                average_order_value_display: "0".to_string(),
            },
            brand_share: vec![],
            category_share: vec![],
            brand_chart: empty.clone(),
            category_chart: empty.clone(),
            top_products: empty,
        }
    }

    #[test]
    fn test_hit_skips_recompute() {
        let cache = AnalyticsCache::new(4);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            Ok(response(5))
        };

        let first = cache.get_or_try_insert_with(key("v1", 5), compute).unwrap();
        let second = cache
            .get_or_try_insert_with(key("v1", 5), || {
                calls.set(calls.get() + 1);
                Ok(response(5))
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_any_parameter_change_is_a_miss() {
        let cache = AnalyticsCache::new(8);
        cache.get_or_try_insert_with(key("v1", 5), || Ok(response(5))).unwrap();

        let other_limit = cache.get_or_try_insert_with(key("v1", 3), || Ok(response(3))).unwrap();
        assert_eq!(other_limit.limit, 3);

        let mut toggled = key("v1", 5);
        toggled.worst_performing = true;
        let mut computed = false;
        cache
            .get_or_try_insert_with(toggled, || {
                computed = true;
                Ok(response(5))
            })
            .unwrap();
        assert!(computed);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_oldest_entry_evicted() {
        let cache = AnalyticsCache::new(2);
        cache.get_or_try_insert_with(key("v1", 5), || Ok(response(5))).unwrap();
        cache.get_or_try_insert_with(key("v2", 5), || Ok(response(5))).unwrap();
        cache.get_or_try_insert_with(key("v3", 5), || Ok(response(5))).unwrap();
        assert_eq!(cache.len(), 2);

        let mut recomputed = false;
        cache
            .get_or_try_insert_with(key("v1", 5), || {
                recomputed = true;
                Ok(response(5))
            })
            .unwrap();
        assert!(recomputed);
    }

    #[test]
    fn test_hit_does_not_delay_eviction() {
        let cache = AnalyticsCache::new(2);
        cache.get_or_try_insert_with(key("v1", 5), || Ok(response(5))).unwrap();
        cache.get_or_try_insert_with(key("v2", 5), || Ok(response(5))).unwrap();
        // v1 is read again but stays the oldest entry
        cache.get_or_try_insert_with(key("v1", 5), || Ok(response(5))).unwrap();
        cache.get_or_try_insert_with(key("v3", 5), || Ok(response(5))).unwrap();

        let mut recomputed = false;
        cache
            .get_or_try_insert_with(key("v1", 5), || {
                recomputed = true;
                Ok(response(5))
            })
            .unwrap();
        assert!(recomputed);
    }

    #[test]
    fn test_errors_not_cached_and_zero_capacity() {
        let cache = AnalyticsCache::new(2);
        let err = cache.get_or_try_insert_with(key("v1", 5), || {
            Err(AnalyticsError::UnknownGranularity("decade".to_string()))
        });
        assert!(err.is_err());
        assert_eq!(cache.len(), 0);

        let disabled = AnalyticsCache::new(0);
        disabled.get_or_try_insert_with(key("v1", 5), || Ok(response(5))).unwrap();
        assert_eq!(disabled.len(), 0);
    }
}
