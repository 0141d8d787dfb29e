//! Pointer and wheel handling.
//!
//! Hover resolution is an O(1) inverse of the render pipeline's evenly
//! spaced x mapping. Wheel and drag gestures are turned into viewport
//! zoom/pan calls; nothing here touches indicator computation.

use crate::domain::indicator::{IndicatorSet, IndicatorType};
use crate::domain::price::PricePoint;
use crate::domain::render::XScale;
use crate::domain::viewport::{RangePreset, ViewportManager, ZOOM_STEP};

/// Wheel delta treated as one notch.
pub const WHEEL_TICK: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
    Down { x: f64, y: f64 },
    Up,
    /// Negative `delta_y` (scroll up) narrows the window, positive widens.
    Wheel { delta_y: f64 },
    Preset(RangePreset),
}

/// The candle under the pointer with its paired indicator values.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    /// Index into the full series.
    pub index: usize,
    pub point: PricePoint,
    pub moving_averages: Vec<(IndicatorType, Option<f64>)>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

impl HoverInfo {
    pub fn resolve(index: usize, series: &[PricePoint], indicators: &IndicatorSet) -> Option<Self> {
        let point = series.get(index)?.clone();
        Some(Self {
            index,
            point,
            moving_averages: indicators
                .moving_averages
                .iter()
                .map(|ma| (ma.indicator_type, ma.get(index)))
                .collect(),
            rsi: indicators.rsi.get(index),
            macd: indicators.macd.line.get(index),
            macd_signal: indicators.macd.signal.get(index),
            macd_histogram: indicators.macd.histogram.get(index),
            bollinger_upper: indicators.bollinger.upper.get(index),
            bollinger_middle: indicators.bollinger.middle.get(index),
            bollinger_lower: indicators.bollinger.lower.get(index),
        })
    }
}

/// What an event did. `prevent_default` tells the host to suppress its own
/// handling (page scroll for wheel events over the chart).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub redraw: bool,
    pub hover_changed: bool,
    pub prevent_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    last_x: f64,
    carry_px: f64,
}

/// Everything an event needs to read besides the handler's own state.
pub struct InteractionContext<'a> {
    pub series: &'a [PricePoint],
    pub indicators: &'a IndicatorSet,
    /// X mapping of the frame currently on screen.
    pub x_scale: XScale,
}

#[derive(Debug, Default)]
pub struct InteractionHandler {
    hover: Option<HoverInfo>,
    drag: Option<Drag>,
}

impl InteractionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover(&self) -> Option<&HoverInfo> {
        self.hover.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        viewport: &mut ViewportManager,
        ctx: &InteractionContext<'_>,
    ) -> EventOutcome {
        match event {
            PointerEvent::Move { x, .. } => {
                let redraw = self.drag_to(x, viewport, ctx);
                let hover_changed = self.hover_at(x, viewport, ctx);
                EventOutcome {
                    redraw,
                    hover_changed,
                    prevent_default: false,
                }
            }
            PointerEvent::Leave => {
                self.drag = None;
                EventOutcome {
                    hover_changed: self.set_hover(None),
                    ..EventOutcome::default()
                }
            }
            PointerEvent::Down { x, .. } => {
                self.drag = Some(Drag {
                    last_x: x,
                    carry_px: 0.0,
                });
                EventOutcome::default()
            }
            PointerEvent::Up => {
                self.drag = None;
                EventOutcome::default()
            }
            PointerEvent::Wheel { delta_y } => {
                let before = viewport.range();
                let delta = wheel_delta(delta_y);
                if delta != 0 {
                    viewport.zoom(delta);
                }
                let redraw = viewport.range() != before;
                let hover_changed = redraw && self.drop_hover_outside(viewport);
                EventOutcome {
                    redraw,
                    hover_changed,
                    prevent_default: true,
                }
            }
            PointerEvent::Preset(preset) => {
                let before = viewport.range();
                viewport.set_range(preset);
                let redraw = viewport.range() != before;
                let hover_changed = redraw && self.drop_hover_outside(viewport);
                EventOutcome {
                    redraw,
                    hover_changed,
                    prevent_default: false,
                }
            }
        }
    }

    /// Pan while a drag is active. Dragging right reveals earlier candles.
    fn drag_to(
        &mut self,
        x: f64,
        viewport: &mut ViewportManager,
        ctx: &InteractionContext<'_>,
    ) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let spacing = ctx.x_scale.spacing();
        if spacing <= 0.0 || !x.is_finite() {
            return false;
        }

        let total = drag.carry_px + (x - drag.last_x);
        if !total.is_finite() {
            drag.carry_px = 0.0;
            drag.last_x = x;
            return false;
        }
        let candles = (total / spacing).trunc();
        drag.carry_px = total - candles * spacing;
        drag.last_x = x;
        if candles == 0.0 {
            return false;
        }

        let before = viewport.range();
        // `as` saturates at the i64 bounds
        viewport.pan((candles as i64).saturating_neg());
        viewport.range() != before
    }

    fn hover_at(
        &mut self,
        x: f64,
        viewport: &ViewportManager,
        ctx: &InteractionContext<'_>,
    ) -> bool {
        let hover = ctx
            .x_scale
            .index_at(x)
            .and_then(|offset| viewport.range().absolute(offset))
            .and_then(|index| HoverInfo::resolve(index, ctx.series, ctx.indicators));
        self.set_hover(hover)
    }

    fn drop_hover_outside(&mut self, viewport: &ViewportManager) -> bool {
        let range = viewport.range().as_range();
        let outside = self
            .hover
            .as_ref()
            .is_some_and(|h| !range.contains(&h.index));
        outside && self.set_hover(None)
    }

    fn set_hover(&mut self, hover: Option<HoverInfo>) -> bool {
        let changed = match (&self.hover, &hover) {
            (Some(a), Some(b)) => a.index != b.index,
            (None, None) => false,
            _ => true,
        };
        self.hover = hover;
        changed
    }
}

/// Candles to add (positive) or remove (negative) for a wheel delta:
/// `ZOOM_STEP` per notch, at least one notch for any non-zero delta.
pub fn wheel_delta(delta_y: f64) -> i64 {
    if delta_y == 0.0 || !delta_y.is_finite() {
        return 0;
    }
    let ticks = (delta_y.abs() / WHEEL_TICK).round().max(1.0) as i64;
    let candles = ticks.saturating_mul(ZOOM_STEP as i64);
    if delta_y < 0.0 {
        -candles
    } else {
        candles
    }
}
