//! RSI (Relative Strength Index) with Wilder's smoothing.
//!
//! - Position 0 is seeded to 50 (no prior change exists)
//! - Positions 1..n-1 accumulate raw gains/losses and are `None`
//! - Position n: avg = simple mean of the first n gains/losses
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + RS))
//! If avg_loss == 0: RS is clamped to 100, so a pure uptrend tops out at
//! 100 - 100/101 ≈ 99.0099 rather than 100. The clamp is one-sided: a pure
//! downtrend has RS = 0 and reads exactly 0. A window with no gains and no
//! losses at all reads as neutral 50.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub const DEFAULT_PERIOD: usize = 14;

/// RS used when there were no losses in the smoothing window.
pub const RS_CLAMP: f64 = 100.0;

/// Neutral reading for the first sample and for perfectly flat windows.
pub const NEUTRAL: f64 = 50.0;

pub fn rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    let indicator_type = IndicatorType::Rsi(period);
    if period == 0 || closes.len() < 2 {
        return IndicatorSeries::empty(indicator_type, closes.len());
    }

    let mut values = Vec::with_capacity(closes.len());
    values.push(Some(NEUTRAL));

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if i < period {
            gain_sum += gain;
            loss_sum += loss;
            values.push(None);
        } else if i == period {
            gain_sum += gain;
            loss_sum += loss;
            avg_gain = gain_sum / period as f64;
            avg_loss = loss_sum / period as f64;
            values.push(Some(rsi_value(avg_gain, avg_loss)));
        } else {
            avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
            values.push(Some(rsi_value(avg_gain, avg_loss)));
        }
    }

    IndicatorSeries::new(indicator_type, values)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return NEUTRAL;
    }
    let rs = if avg_loss == 0.0 {
        RS_CLAMP
    } else {
        avg_gain / avg_loss
    };
    100.0 - (100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPTREND_CEILING: f64 = 100.0 - 100.0 / 101.0;

    #[test]
    fn rsi_empty() {
        assert!(rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_single_value() {
        assert_eq!(rsi(&[100.0], 14).values, vec![None]);
    }

    #[test]
    fn rsi_zero_period() {
        let series = rsi(&[100.0, 101.0, 102.0], 0);
        assert_eq!(series.values, vec![None, None, None]);
    }

    #[test]
    fn rsi_seed_and_warmup() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + (i % 5) as f64 * 2.0).collect();
        let series = rsi(&closes, 14);

        assert_eq!(series.len(), 15);
        assert_eq!(series.values[0], Some(NEUTRAL));
        for i in 1..14 {
            assert!(series.values[i].is_none(), "index {} should be None", i);
        }
        assert!(series.values[14].is_some());
    }

    #[test]
    fn rsi_shorter_than_period() {
        let series = rsi(&[1.0, 2.0, 3.0], 14);
        assert_eq!(series.values, vec![Some(NEUTRAL), None, None]);
    }

    #[test]
    fn rsi_all_gains_hits_clamp_ceiling() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let series = rsi(&closes, 14);

        for i in 14..30 {
            let v = series.values[i].unwrap();
            assert!((v - UPTREND_CEILING).abs() < 1e-12, "index {} was {}", i, v);
            assert!(v < 100.0);
        }
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let series = rsi(&closes, 14);
        assert!(series.values[14].unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_flat_is_neutral() {
        let series = rsi(&[100.0; 20], 14);
        for v in series.values.iter().skip(14) {
            assert_eq!(*v, Some(NEUTRAL));
        }
    }

    #[test]
    fn rsi_wilder_smoothing_step() {
        // period 2: changes +2, -1, +3
        let series = rsi(&[10.0, 12.0, 11.0, 14.0], 2);
        let (g, l) = (1.0, 0.5);
        let seed = 100.0 - 100.0 / (1.0 + g / l);
        assert!((series.values[2].unwrap() - seed).abs() < 1e-12);

        let (g, l) = ((g + 3.0) / 2.0, (l + 0.0) / 2.0);
        let next = 100.0 - 100.0 / (1.0 + g / l);
        assert!((series.values[3].unwrap() - next).abs() < 1e-12);
    }

    #[test]
    fn rsi_in_range() {
        let closes: Vec<f64> = (1..=40)
            .map(|i| 100.0 + ((i % 7) as f64 - 3.0) * 2.0)
            .collect();
        for v in rsi(&closes, 14).values.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI {} out of range", v);
        }
    }
}
