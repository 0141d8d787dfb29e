//! Visible window over the full series.
//!
//! `ViewportManager` is the only writer of `ViewRange`. Every mutation is
//! clamped so that `0 <= start < end <= series_len` and
//! `end - start >= MIN_WINDOW`; out-of-range requests are never errors.
//! A series shorter than `MIN_WINDOW` is always shown whole.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use tracing::debug;

/// A chart never renders fewer candles than this.
pub const MIN_WINDOW: usize = 20;

/// Candles added or removed per wheel tick.
pub const ZOOM_STEP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRange {
    pub start: usize,
    pub end: usize,
}

impl ViewRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Translate a window-relative index into a series index.
    pub fn absolute(&self, offset: usize) -> Option<usize> {
        let index = self.start + offset;
        (index < self.end).then_some(index)
    }
}

/// Fixed-period range buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    OneMonth,
    ThreeMonths,
    SixMonths,
    All,
}

impl RangePreset {
    pub const ALL_PRESETS: [RangePreset; 4] = [
        RangePreset::OneMonth,
        RangePreset::ThreeMonths,
        RangePreset::SixMonths,
        RangePreset::All,
    ];

    /// Number of candles the preset asks for; `None` means the whole series.
    pub fn candles(self) -> Option<usize> {
        match self {
            RangePreset::OneMonth => Some(30),
            RangePreset::ThreeMonths => Some(60),
            RangePreset::SixMonths => Some(120),
            RangePreset::All => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RangePreset::OneMonth => "1M",
            RangePreset::ThreeMonths => "3M",
            RangePreset::SixMonths => "6M",
            RangePreset::All => "All",
        }
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RangePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RangePreset::ALL_PRESETS
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "unknown range preset '{}' (expected 1m, 3m, 6m or all)",
                    wanted.to_lowercase()
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportManager {
    series_len: usize,
    range: ViewRange,
}

impl ViewportManager {
    /// Show the whole series.
    pub fn new(series_len: usize) -> Self {
        Self {
            series_len,
            range: ViewRange {
                start: 0,
                end: series_len,
            },
        }
    }

    /// Start from an explicit window, clamped into bounds.
    pub fn with_range(series_len: usize, start: usize, end: usize) -> Self {
        let mut vm = Self::new(series_len);
        vm.apply(start, end);
        vm
    }

    pub fn range(&self) -> ViewRange {
        self.range
    }

    pub fn series_len(&self) -> usize {
        self.series_len
    }

    /// Move the right edge by `delta_candles`; the left edge stays anchored.
    /// Negative narrows, positive widens.
    pub fn zoom(&mut self, delta_candles: i64) {
        if self.series_len <= MIN_WINDOW {
            return;
        }
        let start = self.range.start;
        let lo = (start + MIN_WINDOW) as i64;
        let hi = self.series_len as i64;
        let requested = (self.range.end as i64).saturating_add(delta_candles);
        let end = requested.clamp(lo, hi);
        if end != requested {
            debug!(requested, end, "zoom clamped");
        }
        self.range.end = end as usize;
    }

    /// Shift the whole window by `delta_candles`, preserving its width.
    pub fn pan(&mut self, delta_candles: i64) {
        let width = self.range.len() as i64;
        let max_start = self.series_len as i64 - width;
        let requested = (self.range.start as i64).saturating_add(delta_candles);
        let start = requested.clamp(0, max_start.max(0));
        if start != requested {
            debug!(requested, start, "pan clamped");
        }
        self.range = ViewRange {
            start: start as usize,
            end: (start + width) as usize,
        };
    }

    pub fn set_range(&mut self, preset: RangePreset) {
        let end = preset
            .candles()
            .map_or(self.series_len, |n| n.min(self.series_len));
        self.apply(0, end);
    }

    /// Adopt a new series length, keeping the window where possible.
    pub fn resize(&mut self, series_len: usize) {
        self.series_len = series_len;
        let ViewRange { start, end } = self.range;
        self.apply(start, end);
    }

    fn apply(&mut self, start: usize, end: usize) {
        let len = self.series_len;
        if len <= MIN_WINDOW {
            self.range = ViewRange { start: 0, end: len };
            return;
        }
        let end = end.clamp(MIN_WINDOW, len);
        let start = start.min(end - MIN_WINDOW);
        self.range = ViewRange { start, end };
    }
}
