//! Technical indicator engine.
//!
//! Every indicator is a pure function of a closing-price slice and returns
//! series the same length as its input. Positions without enough lookback
//! history hold `None`, never a sentinel value:
//! - `IndicatorType`: indicator identity + parameters (legend label, map key)
//! - `IndicatorSeries`: one `Option<f64>` per input sample
//! - `MacdResult` / `BollingerResult`: parallel triples sharing a warmup
//! - `IndicatorSet`: everything the chart needs for one data snapshot

pub mod bollinger;
pub mod cache;
pub mod ema;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod stddev;

pub use bollinger::{bollinger, BollingerResult};
pub use cache::IndicatorCache;
pub use ema::ema_seeded;
pub use macd::{macd, MacdResult};
pub use moving_average::moving_average;
pub use rsi::rsi;
pub use stddev::stddev;

use std::fmt;
use std::ops::Range;

use crate::domain::price::{closes, PricePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Ma(usize),
    Rsi(usize),
    Stddev(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Ma(period) => write!(f, "MA{}", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLL({},{})", period, mult)
            }
        }
    }
}

/// One optional value per input sample.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(indicator_type: IndicatorType, values: Vec<Option<f64>>) -> Self {
        Self {
            indicator_type,
            values,
        }
    }

    /// An all-`None` series of length `len`.
    pub fn empty(indicator_type: IndicatorType, len: usize) -> Self {
        Self::new(indicator_type, vec![None; len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Values inside `range`, clipped to the series length.
    pub fn window(&self, range: Range<usize>) -> &[Option<f64>] {
        let end = range.end.min(self.values.len());
        let start = range.start.min(end);
        &self.values[start..end]
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    pub fn view(&self, range: Range<usize>) -> SeriesWindow<'_> {
        SeriesWindow {
            indicator_type: self.indicator_type,
            values: self.window(range),
        }
    }
}

/// Borrowed slice of one indicator series over a viewport window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesWindow<'a> {
    pub indicator_type: IndicatorType,
    pub values: &'a [Option<f64>],
}

impl SeriesWindow<'_> {
    pub fn defined(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }
}

/// Every indicator of a set, sliced to the same window.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorWindow<'a> {
    pub moving_averages: Vec<SeriesWindow<'a>>,
    pub rsi: SeriesWindow<'a>,
    pub macd_line: SeriesWindow<'a>,
    pub macd_signal: SeriesWindow<'a>,
    pub macd_histogram: SeriesWindow<'a>,
    pub bollinger_upper: SeriesWindow<'a>,
    pub bollinger_middle: SeriesWindow<'a>,
    pub bollinger_lower: SeriesWindow<'a>,
}

/// Parameters for every indicator the chart computes.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorParams {
    pub ma_periods: Vec<usize>,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
}

pub const DEFAULT_MA_PERIODS: [usize; 4] = [5, 10, 20, 60];

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_periods: DEFAULT_MA_PERIODS.to_vec(),
            rsi_period: rsi::DEFAULT_PERIOD,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
            bollinger_period: bollinger::DEFAULT_PERIOD,
            bollinger_multiplier: bollinger::DEFAULT_MULTIPLIER,
        }
    }
}

/// All indicator output for one series snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub moving_averages: Vec<IndicatorSeries>,
    pub rsi: IndicatorSeries,
    pub macd: MacdResult,
    pub bollinger: BollingerResult,
}

impl IndicatorSet {
    pub fn compute(points: &[PricePoint], params: &IndicatorParams) -> Self {
        let closes = closes(points);
        Self {
            moving_averages: params
                .ma_periods
                .iter()
                .map(|&p| moving_average(&closes, p))
                .collect(),
            rsi: rsi(&closes, params.rsi_period),
            macd: macd(
                &closes,
                params.macd_fast,
                params.macd_slow,
                params.macd_signal,
            ),
            bollinger: bollinger(
                &closes,
                params.bollinger_period,
                params.bollinger_multiplier,
            ),
        }
    }

    /// Length shared by every series in the set.
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }

    pub fn window(&self, range: Range<usize>) -> IndicatorWindow<'_> {
        IndicatorWindow {
            moving_averages: self
                .moving_averages
                .iter()
                .map(|ma| ma.view(range.clone()))
                .collect(),
            rsi: self.rsi.view(range.clone()),
            macd_line: self.macd.line.view(range.clone()),
            macd_signal: self.macd.signal.view(range.clone()),
            macd_histogram: self.macd.histogram.view(range.clone()),
            bollinger_upper: self.bollinger.upper.view(range.clone()),
            bollinger_middle: self.bollinger.middle.view(range.clone()),
            bollinger_lower: self.bollinger.lower.view(range),
        }
    }
}
