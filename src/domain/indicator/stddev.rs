//! Rolling population standard deviation.
//!
//! STDDEV(n)[i] = sqrt(sum((C[i-j] - MA(n)[i])^2 for j in 0..n-1) / n)
//! Warmup: first (n-1) samples are `None`.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn stddev(closes: &[f64], period: usize) -> IndicatorSeries {
    let indicator_type = IndicatorType::Stddev(period);
    if period == 0 {
        return IndicatorSeries::empty(indicator_type, closes.len());
    }

    let values = (0..closes.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &closes[i + 1 - period..=i];
            let (_, sd) = mean_and_stddev(window);
            Some(sd)
        })
        .collect();

    IndicatorSeries::new(indicator_type, values)
}

/// Mean and population standard deviation of a non-empty window.
pub(crate) fn mean_and_stddev(window: &[f64]) -> (f64, f64) {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}
