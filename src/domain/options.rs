//! Chart display options.

use crate::domain::indicator::IndicatorParams;
use crate::domain::viewport::RangePreset;

pub const DEFAULT_WIDTH: f64 = 960.0;
pub const DEFAULT_HEIGHT: f64 = 640.0;

/// Which overlays and stacked bands are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayToggles {
    pub show_volume: bool,
    pub show_ma: bool,
    pub show_macd: bool,
    pub show_rsi: bool,
    pub show_bollinger: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            show_volume: true,
            show_ma: true,
            show_macd: false,
            show_rsi: false,
            show_bollinger: false,
        }
    }
}

/// Colours as SVG paint values. Red marks a rising candle.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub up: String,
    pub down: String,
    pub background: String,
    pub grid: String,
    pub text: String,
    pub ma: Vec<String>,
    pub bollinger: String,
    pub macd: String,
    pub signal: String,
    pub rsi: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            up: "#e03131".into(),
            down: "#2f9e44".into(),
            background: "#ffffff".into(),
            grid: "#e9ecef".into(),
            text: "#495057".into(),
            ma: vec![
                "#f59f00".into(),
                "#1c7ed6".into(),
                "#ae3ec9".into(),
                "#0ca678".into(),
            ],
            bollinger: "#868e96".into(),
            macd: "#1c7ed6".into(),
            signal: "#f59f00".into(),
            rsi: "#7048e8".into(),
        }
    }
}

impl Palette {
    pub fn candle(&self, up: bool) -> &str {
        if up { &self.up } else { &self.down }
    }

    /// Colour of the `n`th moving average, cycling when there are more
    /// averages than colours.
    pub fn ma_color(&self, n: usize) -> &str {
        if self.ma.is_empty() {
            &self.text
        } else {
            &self.ma[n % self.ma.len()]
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub toggles: OverlayToggles,
    pub palette: Palette,
    pub params: IndicatorParams,
    pub preset: RangePreset,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: String::new(),
            toggles: OverlayToggles::default(),
            palette: Palette::default(),
            params: IndicatorParams::default(),
            preset: RangePreset::All,
        }
    }
}
