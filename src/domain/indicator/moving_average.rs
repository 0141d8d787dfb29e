//! Simple moving average.
//!
//! MA(n)[i] = mean(C[i-n+1..=i])
//! Warmup: first (n-1) samples are `None`.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn moving_average(closes: &[f64], period: usize) -> IndicatorSeries {
    let indicator_type = IndicatorType::Ma(period);
    if period == 0 {
        return IndicatorSeries::empty(indicator_type, closes.len());
    }

    let values = (0..closes.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                let window = &closes[i + 1 - period..=i];
                Some(window.iter().sum::<f64>() / period as f64)
            }
        })
        .collect();

    IndicatorSeries::new(indicator_type, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ma_known_values() {
        let series = moving_average(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_eq!(series.values, vec![None, None, Some(11.0), Some(12.0), Some(13.0)]);
    }

    #[test]
    fn ma_period_1_is_identity() {
        let series = moving_average(&[3.0, 7.0, 5.0], 1);
        assert_eq!(series.values, vec![Some(3.0), Some(7.0), Some(5.0)]);
    }

    #[test]
    fn ma_shorter_than_period() {
        let series = moving_average(&[1.0, 2.0], 5);
        assert_eq!(series.values, vec![None, None]);
    }

    #[test]
    fn ma_empty() {
        assert!(moving_average(&[], 5).is_empty());
    }

    #[test]
    fn ma_single_element() {
        assert_eq!(moving_average(&[42.0], 5).values, vec![None]);
    }

    #[test]
    fn ma_zero_period() {
        let series = moving_average(&[1.0, 2.0, 3.0], 0);
        assert_eq!(series.values, vec![None, None, None]);
    }

    #[test]
    fn ma_indicator_type() {
        assert_eq!(moving_average(&[1.0], 60).indicator_type, IndicatorType::Ma(60));
    }
}
