//! Chart session: one series snapshot plus its transient UI state.
//!
//! Owns the shared series, the indicator cache, the viewport and the
//! interaction handler. Indicators are recomputed only when `load` receives
//! a different series reference; pointer and viewport events reuse them.

use std::sync::Arc;

use tracing::info;

use crate::domain::indicator::{IndicatorCache, IndicatorSet};
use crate::domain::interaction::{
    EventOutcome, HoverInfo, InteractionContext, InteractionHandler, PointerEvent,
};
use crate::domain::options::ChartOptions;
use crate::domain::render::{render, Frame, Layout, RenderInput, XScale};
use crate::domain::price::Series;
use crate::domain::viewport::{ViewRange, ViewportManager};
use crate::ports::surface_port::HoverSink;

pub struct ChartSession {
    options: ChartOptions,
    series: Series,
    cache: IndicatorCache,
    indicators: Arc<IndicatorSet>,
    viewport: ViewportManager,
    interaction: InteractionHandler,
}

impl ChartSession {
    pub fn new(series: Series, options: ChartOptions) -> Self {
        let mut cache = IndicatorCache::new();
        let indicators = cache.get_or_compute(&series, &options.params);
        let mut viewport = ViewportManager::new(series.len());
        viewport.set_range(options.preset);
        info!(candles = series.len(), range = ?viewport.range(), "chart session created");
        Self {
            options,
            series,
            cache,
            indicators,
            viewport,
            interaction: InteractionHandler::new(),
        }
    }

    /// Swap in a data refresh. The viewport keeps its window where the new
    /// length allows; hover is dropped.
    pub fn load(&mut self, series: Series) {
        self.indicators = self.cache.get_or_compute(&series, &self.options.params);
        self.viewport.resize(series.len());
        self.series = series;
        self.interaction = InteractionHandler::new();
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn range(&self) -> ViewRange {
        self.viewport.range()
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportManager {
        &mut self.viewport
    }

    pub fn hover(&self) -> Option<&HoverInfo> {
        self.interaction.hover()
    }

    /// Number of indicator recomputations so far.
    pub fn computations(&self) -> usize {
        self.cache.computations()
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.options.width, self.options.height, &self.options.toggles)
    }

    /// X mapping of the frame `render` would produce now.
    pub fn x_scale(&self) -> XScale {
        self.layout().x_scale(self.viewport.range().len())
    }

    pub fn render(&self) -> Frame {
        render(&RenderInput::from_full(
            &self.series,
            &self.indicators,
            self.viewport.range(),
            &self.options,
        ))
    }

    pub fn handle(&mut self, event: PointerEvent) -> EventOutcome {
        let ctx = InteractionContext {
            series: &self.series,
            indicators: &self.indicators,
            x_scale: self.x_scale(),
        };
        self.interaction.handle(event, &mut self.viewport, &ctx)
    }

    /// `handle`, then notify `sink` if the hovered candle changed.
    pub fn dispatch(&mut self, event: PointerEvent, sink: &mut dyn HoverSink) -> EventOutcome {
        let outcome = self.handle(event);
        if outcome.hover_changed {
            sink.on_hover(self.interaction.hover());
        }
        outcome
    }
}
