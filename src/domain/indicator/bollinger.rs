//! Bollinger Bands.
//!
//! - Middle: moving average over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the population standard deviation (divides by N, not N-1).
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) samples are `None` in all three bands.

use crate::domain::indicator::stddev::mean_and_stddev;
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerResult {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

impl BollingerResult {
    pub fn indicator_type(&self) -> IndicatorType {
        self.middle.indicator_type
    }
}

pub fn bollinger(closes: &[f64], period: usize, multiplier: f64) -> BollingerResult {
    let indicator_type = IndicatorType::Bollinger {
        period,
        stddev_mult_x100: (multiplier * 100.0).round().max(0.0) as u32,
    };

    let mut upper = Vec::with_capacity(closes.len());
    let mut middle = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        if period == 0 || i + 1 < period {
            upper.push(None);
            middle.push(None);
            lower.push(None);
            continue;
        }
        let (mean, sd) = mean_and_stddev(&closes[i + 1 - period..=i]);
        upper.push(Some(mean + multiplier * sd));
        middle.push(Some(mean));
        lower.push(Some(mean - multiplier * sd));
    }

    BollingerResult {
        upper: IndicatorSeries::new(indicator_type, upper),
        middle: IndicatorSeries::new(indicator_type, middle),
        lower: IndicatorSeries::new(indicator_type, lower),
    }
}
