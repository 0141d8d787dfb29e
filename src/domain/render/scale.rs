//! Linear coordinate mappings between data space and pixels.

use crate::domain::price::PricePoint;

/// Fractional padding applied below the visible low and above the high.
pub const PRICE_PADDING: f64 = 0.005;

/// Added on both sides when the padded range still has no width.
pub const NOMINAL_PAD: f64 = 1.0;

/// Even spacing of `count` candle slots across `[left, left + width)`.
/// Each candle sits at the centre of its slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XScale {
    pub left: f64,
    pub width: f64,
    pub count: usize,
}

impl XScale {
    pub fn new(left: f64, width: f64, count: usize) -> Self {
        Self { left, width, count }
    }

    pub fn spacing(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.width / self.count as f64
        }
    }

    pub fn x(&self, index: usize) -> f64 {
        self.left + (index as f64 + 0.5) * self.spacing()
    }

    /// Nearest slot under pixel `px`, or `None` outside the plot.
    pub fn index_at(&self, px: f64) -> Option<usize> {
        if self.count == 0 || !px.is_finite() || px < self.left || px >= self.left + self.width {
            return None;
        }
        let slot = ((px - self.left) / self.spacing()).floor() as usize;
        Some(slot.min(self.count - 1))
    }
}

/// Maps `[min, max]` onto `[top + height, top]` (larger values higher up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YScale {
    pub top: f64,
    pub height: f64,
    pub min: f64,
    pub max: f64,
}

impl YScale {
    pub fn new(top: f64, height: f64, min: f64, max: f64) -> Self {
        Self {
            top,
            height,
            min,
            max,
        }
    }

    pub fn y(&self, value: f64) -> f64 {
        let span = (self.max - self.min).max(1e-9);
        self.top + (self.max - value) / span * self.height
    }
}

/// `[min(low) * 0.995, max(high) * 1.005]` over `points`, widened by
/// `NOMINAL_PAD` when it would otherwise be zero-width.
pub fn price_range(points: &[PricePoint]) -> (f64, f64) {
    let low = points.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);
    let high = points.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);
    if !low.is_finite() || !high.is_finite() {
        return (0.0, NOMINAL_PAD);
    }

    let lo = low * (1.0 - PRICE_PADDING);
    let hi = high * (1.0 + PRICE_PADDING);
    if hi - lo <= f64::EPSILON {
        let mid = (lo + hi) / 2.0;
        (mid - NOMINAL_PAD, mid + NOMINAL_PAD)
    } else {
        (lo, hi)
    }
}
