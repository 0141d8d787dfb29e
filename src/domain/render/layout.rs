//! Vertical band layout shared by rendering and pointer hit-testing.

use crate::domain::options::OverlayToggles;
use crate::domain::render::scale::XScale;

pub const MARGIN_TOP: f64 = 32.0;
pub const MARGIN_BOTTOM: f64 = 24.0;
pub const MARGIN_LEFT: f64 = 8.0;
pub const MARGIN_RIGHT: f64 = 64.0;
pub const BAND_GAP: f64 = 8.0;

const VOLUME_SHARE: f64 = 0.18;
const OSCILLATOR_SHARE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub top: f64,
    pub height: f64,
}

impl Band {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Price band on top, then volume, MACD and RSI bands stacked beneath it
/// in that order when enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub plot_left: f64,
    pub plot_width: f64,
    pub price: Band,
    pub volume: Option<Band>,
    pub macd: Option<Band>,
    pub rsi: Option<Band>,
}

impl Layout {
    pub fn new(width: f64, height: f64, toggles: &OverlayToggles) -> Self {
        let plot_left = MARGIN_LEFT;
        let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let inner = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

        let shares = [
            (toggles.show_volume, VOLUME_SHARE),
            (toggles.show_macd, OSCILLATOR_SHARE),
            (toggles.show_rsi, OSCILLATOR_SHARE),
        ];
        let secondary: f64 = shares
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, share)| inner * share + BAND_GAP)
            .sum();

        let price = Band {
            top: MARGIN_TOP,
            height: (inner - secondary).max(1.0),
        };

        let mut cursor = price.bottom();
        let mut next_band = |on: bool, share: f64| {
            on.then(|| {
                let band = Band {
                    top: cursor + BAND_GAP,
                    height: inner * share,
                };
                cursor = band.bottom();
                band
            })
        };
        let volume = next_band(toggles.show_volume, VOLUME_SHARE);
        let macd = next_band(toggles.show_macd, OSCILLATOR_SHARE);
        let rsi = next_band(toggles.show_rsi, OSCILLATOR_SHARE);

        Self {
            plot_left,
            plot_width,
            price,
            volume,
            macd,
            rsi,
        }
    }

    pub fn plot_right(&self) -> f64 {
        self.plot_left + self.plot_width
    }

    pub fn x_scale(&self, count: usize) -> XScale {
        XScale::new(self.plot_left, self.plot_width, count)
    }

    /// Lowest pixel used by any band.
    pub fn plot_bottom(&self) -> f64 {
        [self.volume, self.macd, self.rsi]
            .iter()
            .flatten()
            .map(Band::bottom)
            .fold(self.price.bottom(), f64::max)
    }
}
