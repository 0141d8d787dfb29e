//! OHLCV price point and series helpers.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::error::ChartError;

/// One sampled trading period. Immutable once produced by a data source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A caller-owned, shared, chronologically ordered price series.
///
/// Identity of the `Arc` is what the indicator cache keys on.
pub type Series = Arc<[PricePoint]>;

impl PricePoint {
    pub fn new(
        date: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date: date.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// close >= open
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    /// Parse the ISO-ish date, accepting a bare date or a date-time.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.date.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    fn chrono_cmp(&self, other: &PricePoint) -> Ordering {
        match (self.timestamp(), other.timestamp()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.date.cmp(&other.date),
        }
    }
}

/// Closing prices in series order.
pub fn closes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.close).collect()
}

/// Every date must be strictly later than the one before it.
pub fn validate_chronological(points: &[PricePoint]) -> Result<(), ChartError> {
    for (i, pair) in points.windows(2).enumerate() {
        if pair[0].chrono_cmp(&pair[1]) != Ordering::Less {
            return Err(ChartError::Unordered {
                index: i + 1,
                date: pair[1].date.clone(),
            });
        }
    }
    Ok(())
}
