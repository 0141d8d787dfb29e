//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow), both EMAs seeded at the first close
//! Signal Line = EMA(signal) of the MACD line, seeded at its first value
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: all three series are `None` before index slow-1.

use crate::domain::indicator::ema::{ema_seeded, smoothing_factor};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdResult {
    pub line: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

impl MacdResult {
    fn empty(indicator_type: IndicatorType, len: usize) -> Self {
        Self {
            line: IndicatorSeries::empty(indicator_type, len),
            signal: IndicatorSeries::empty(indicator_type, len),
            histogram: IndicatorSeries::empty(indicator_type, len),
        }
    }

    pub fn indicator_type(&self) -> IndicatorType {
        self.line.indicator_type
    }
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdResult {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    if fast == 0 || slow == 0 || signal_period == 0 || closes.len() < slow.max(2) {
        return MacdResult::empty(indicator_type, closes.len());
    }

    let ema_fast = ema_seeded(closes, fast);
    let ema_slow = ema_seeded(closes, slow);
    let warmup = slow - 1;
    let k = smoothing_factor(signal_period);

    let mut line = vec![None; closes.len()];
    let mut signal = vec![None; closes.len()];
    let mut histogram = vec![None; closes.len()];

    let mut signal_ema = ema_fast[warmup] - ema_slow[warmup];
    for i in warmup..closes.len() {
        let value = ema_fast[i] - ema_slow[i];
        if i > warmup {
            signal_ema = value * k + signal_ema * (1.0 - k);
        }
        line[i] = Some(value);
        signal[i] = Some(signal_ema);
        histogram[i] = Some(value - signal_ema);
    }

    MacdResult {
        line: IndicatorSeries::new(indicator_type, line),
        signal: IndicatorSeries::new(indicator_type, signal),
        histogram: IndicatorSeries::new(indicator_type, histogram),
    }
}

pub fn macd_default(closes: &[f64]) -> MacdResult {
    macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
