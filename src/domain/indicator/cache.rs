//! Indicator memoization keyed on series identity.
//!
//! The cache holds a clone of the series `Arc` it computed from, so the
//! pointer cannot be freed and reused by a different series while cached.
//! Viewport and hover changes never reach this type.

use std::sync::Arc;

use tracing::debug;

use crate::domain::indicator::{IndicatorParams, IndicatorSet};
use crate::domain::price::Series;

#[derive(Debug, Default)]
pub struct IndicatorCache {
    entry: Option<CacheEntry>,
    computations: usize,
}

#[derive(Debug)]
struct CacheEntry {
    series: Series,
    params: IndicatorParams,
    set: Arc<IndicatorSet>,
}

impl IndicatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the indicator set for `series`, recomputing only when the
    /// series reference or the parameters changed.
    pub fn get_or_compute(
        &mut self,
        series: &Series,
        params: &IndicatorParams,
    ) -> Arc<IndicatorSet> {
        if let Some(entry) = &self.entry {
            if Arc::ptr_eq(&entry.series, series) && entry.params == *params {
                debug!(len = series.len(), "indicator cache hit");
                return Arc::clone(&entry.set);
            }
        }

        debug!(len = series.len(), "indicator cache miss, computing");
        let set = Arc::new(IndicatorSet::compute(series, params));
        self.computations += 1;
        self.entry = Some(CacheEntry {
            series: Arc::clone(series),
            params: params.clone(),
            set: Arc::clone(&set),
        });
        set
    }

    /// Number of full recomputations performed so far.
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PricePoint;

    fn series(n: usize) -> Series {
        (0..n)
            .map(|i| {
                let c = 10.0 + i as f64;
                PricePoint::new(format!("2024-01-{:02}", i + 1), c, c, c, c, 1.0)
            })
            .collect()
    }

    #[test]
    fn same_reference_hits() {
        let s = series(10);
        let params = IndicatorParams::default();
        let mut cache = IndicatorCache::new();

        let a = cache.get_or_compute(&s, &params);
        let b = cache.get_or_compute(&Arc::clone(&s), &params);

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.computations(), 1);
    }

    #[test]
    fn equal_content_new_reference_recomputes() {
        let params = IndicatorParams::default();
        let mut cache = IndicatorCache::new();

        cache.get_or_compute(&series(10), &params);
        cache.get_or_compute(&series(10), &params);

        assert_eq!(cache.computations(), 2);
    }

    #[test]
    fn param_change_recomputes() {
        let s = series(30);
        let mut cache = IndicatorCache::new();
        cache.get_or_compute(&s, &IndicatorParams::default());

        let params = IndicatorParams {
            rsi_period: 7,
            ..IndicatorParams::default()
        };
        let set = cache.get_or_compute(&s, &params);

        assert_eq!(cache.computations(), 2);
        assert_eq!(set.rsi.indicator_type.to_string(), "RSI(7)");
    }

    #[test]
    fn invalidate_forces_recompute() {
        let s = series(5);
        let params = IndicatorParams::default();
        let mut cache = IndicatorCache::new();
        cache.get_or_compute(&s, &params);
        cache.invalidate();
        cache.get_or_compute(&s, &params);
        assert_eq!(cache.computations(), 2);
    }
}
