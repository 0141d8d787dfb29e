//! Render pipeline: visible slice + indicator window -> ordered primitives.
//!
//! `render` is a pure function of `(slice, indicators, viewport, options)`.
//! It never reads ambient state and never mutates the viewport.

pub mod layout;
pub mod primitive;
pub mod scale;

pub use layout::{Band, Layout};
pub use primitive::{DrawCommand, Frame, Layer, Primitive, TextAnchor};
pub use scale::{price_range, XScale, YScale};

use tracing::warn;

use crate::domain::indicator::{IndicatorSet, IndicatorWindow, SeriesWindow};
use crate::domain::options::ChartOptions;
use crate::domain::price::PricePoint;
use crate::domain::viewport::ViewRange;

/// Horizontal price grid levels, including both range edges.
pub const GRID_LEVELS: usize = 5;

/// Share of a candle slot covered by the body.
const BODY_RATIO: f64 = 0.7;

/// Bodies never collapse below this height, even when open == close.
pub const MIN_BODY_HEIGHT: f64 = 1.0;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

const LABEL_SIZE: f64 = 11.0;
const TITLE_SIZE: f64 = 16.0;
const DATE_LABELS: usize = 5;

pub const PLACEHOLDER_TEXT: &str = "No data";

pub struct RenderInput<'a> {
    /// `Series[range.start..range.end]`
    pub points: &'a [PricePoint],
    pub indicators: IndicatorWindow<'a>,
    pub range: ViewRange,
    pub options: &'a ChartOptions,
}

impl<'a> RenderInput<'a> {
    /// Slice a full series and its indicator set down to `range`.
    pub fn from_full(
        series: &'a [PricePoint],
        indicators: &'a IndicatorSet,
        range: ViewRange,
        options: &'a ChartOptions,
    ) -> Self {
        let end = range.end.min(series.len());
        let start = range.start.min(end);
        Self {
            points: &series[start..end],
            indicators: indicators.window(start..end),
            range,
            options,
        }
    }
}

pub fn render(input: &RenderInput<'_>) -> Frame {
    let opts = input.options;
    let mut frame = Frame::new(opts.width, opts.height);
    frame.push(
        Layer::Background,
        DrawCommand::Rect {
            x: 0.0,
            y: 0.0,
            width: opts.width,
            height: opts.height,
            fill: opts.palette.background.clone(),
        },
    );

    if input.points.len() < 2 {
        warn!(visible = input.points.len(), "not enough data to chart");
        draw_placeholder(&mut frame, opts);
        return frame;
    }

    let layout = Layout::new(opts.width, opts.height, &opts.toggles);
    let xs = layout.x_scale(input.points.len());
    let (lo, hi) = price_range(input.points);
    let ys = YScale::new(layout.price.top, layout.price.height, lo, hi);

    draw_grid(&mut frame, opts, &layout, &ys);
    draw_date_labels(&mut frame, input, &layout, &xs);
    draw_candles(&mut frame, input, &xs, &ys);

    if opts.toggles.show_ma {
        for (n, ma) in input.indicators.moving_averages.iter().enumerate() {
            draw_series(&mut frame, Layer::Overlay, ma, &xs, &ys, opts.palette.ma_color(n), false);
        }
    }
    if opts.toggles.show_bollinger {
        let color = &opts.palette.bollinger;
        for band in [&input.indicators.bollinger_upper, &input.indicators.bollinger_lower] {
            draw_series(&mut frame, Layer::Overlay, band, &xs, &ys, color, true);
        }
    }
    if let Some(band) = layout.volume {
        draw_volume(&mut frame, input, &xs, band);
    }
    if let Some(band) = layout.macd {
        draw_macd(&mut frame, input, &layout, &xs, band);
    }
    if let Some(band) = layout.rsi {
        draw_rsi(&mut frame, input, &layout, &xs, band);
    }

    draw_legend(&mut frame, input, &layout);
    draw_title(&mut frame, input, &layout);
    frame
}

fn draw_placeholder(frame: &mut Frame, opts: &ChartOptions) {
    frame.placeholder = true;
    frame.push(
        Layer::Placeholder,
        DrawCommand::Text {
            x: opts.width / 2.0,
            y: opts.height / 2.0,
            text: PLACEHOLDER_TEXT.to_string(),
            size: TITLE_SIZE,
            fill: opts.palette.text.clone(),
            anchor: TextAnchor::Middle,
        },
    );
}

fn draw_grid(frame: &mut Frame, opts: &ChartOptions, layout: &Layout, ys: &YScale) {
    for level in 0..GRID_LEVELS {
        let price = ys.min + (ys.max - ys.min) * level as f64 / (GRID_LEVELS - 1) as f64;
        let y = ys.y(price);
        frame.push(
            Layer::Grid,
            DrawCommand::Line {
                x1: layout.plot_left,
                y1: y,
                x2: layout.plot_right(),
                y2: y,
                stroke: opts.palette.grid.clone(),
                width: 1.0,
                dashed: false,
            },
        );
        frame.push(
            Layer::Grid,
            DrawCommand::Text {
                x: layout.plot_right() + 4.0,
                y: y + LABEL_SIZE / 3.0,
                text: format!("{:.2}", price),
                size: LABEL_SIZE,
                fill: opts.palette.text.clone(),
                anchor: TextAnchor::Start,
            },
        );
    }
}

fn draw_date_labels(frame: &mut Frame, input: &RenderInput<'_>, layout: &Layout, xs: &XScale) {
    let n = input.points.len();
    let labels = DATE_LABELS.min(n);
    let mut last = None;
    for k in 0..labels {
        let i = if labels == 1 { 0 } else { k * (n - 1) / (labels - 1) };
        if last == Some(i) {
            continue;
        }
        last = Some(i);
        frame.push(
            Layer::Grid,
            DrawCommand::Text {
                x: xs.x(i),
                y: layout.plot_bottom() + LABEL_SIZE + 4.0,
                text: input.points[i].date.clone(),
                size: LABEL_SIZE,
                fill: input.options.palette.text.clone(),
                anchor: TextAnchor::Middle,
            },
        );
    }
}

fn body_width(xs: &XScale) -> f64 {
    (xs.spacing() * BODY_RATIO).max(1.0)
}

fn draw_candles(frame: &mut Frame, input: &RenderInput<'_>, xs: &XScale, ys: &YScale) {
    let bw = body_width(xs);
    for (i, p) in input.points.iter().enumerate() {
        let color = input.options.palette.candle(p.is_up()).to_string();
        let x = xs.x(i);
        frame.push(
            Layer::Candle,
            DrawCommand::Line {
                x1: x,
                y1: ys.y(p.high),
                x2: x,
                y2: ys.y(p.low),
                stroke: color.clone(),
                width: 1.0,
                dashed: false,
            },
        );
        let (y_open, y_close) = (ys.y(p.open), ys.y(p.close));
        frame.push(
            Layer::Candle,
            DrawCommand::Rect {
                x: x - bw / 2.0,
                y: y_open.min(y_close),
                width: bw,
                height: (y_open - y_close).abs().max(MIN_BODY_HEIGHT),
                fill: color,
            },
        );
    }
}

/// Split a window into runs of consecutive defined values. Gaps end a run;
/// nothing is interpolated across them.
pub fn defined_runs(values: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(v) if v.is_finite() => current.push((i, *v)),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn draw_series(
    frame: &mut Frame,
    layer: Layer,
    series: &SeriesWindow<'_>,
    xs: &XScale,
    ys: &YScale,
    color: &str,
    dashed: bool,
) {
    for run in defined_runs(series.values) {
        if run.len() < 2 {
            continue;
        }
        frame.push(
            layer,
            DrawCommand::Polyline {
                points: run.iter().map(|&(i, v)| (xs.x(i), ys.y(v))).collect(),
                stroke: color.to_string(),
                width: 1.2,
                dashed,
            },
        );
    }
}

fn band_label(
    frame: &mut Frame,
    layer: Layer,
    layout: &Layout,
    band: Band,
    text: String,
    color: &str,
) {
    frame.push(
        layer,
        DrawCommand::Text {
            x: layout.plot_left + 4.0,
            y: band.top + LABEL_SIZE,
            text,
            size: LABEL_SIZE,
            fill: color.to_string(),
            anchor: TextAnchor::Start,
        },
    );
}

fn draw_volume(frame: &mut Frame, input: &RenderInput<'_>, xs: &XScale, band: Band) {
    let max_volume = input.points.iter().map(|p| p.volume).fold(0.0, f64::max);
    if max_volume <= 0.0 {
        return;
    }
    let bw = body_width(xs);
    for (i, p) in input.points.iter().enumerate() {
        let h = (p.volume.max(0.0) / max_volume) * band.height;
        frame.push(
            Layer::Volume,
            DrawCommand::Rect {
                x: xs.x(i) - bw / 2.0,
                y: band.bottom() - h,
                width: bw,
                height: h,
                fill: input.options.palette.candle(p.is_up()).to_string(),
            },
        );
    }
}

fn draw_macd(frame: &mut Frame, input: &RenderInput<'_>, layout: &Layout, xs: &XScale, band: Band) {
    let ind = &input.indicators;
    let palette = &input.options.palette;
    let extent = ind
        .macd_line
        .defined()
        .chain(ind.macd_signal.defined())
        .chain(ind.macd_histogram.defined())
        .map(f64::abs)
        .fold(0.0, f64::max);
    let extent = if extent > 0.0 { extent } else { 1.0 };
    let ys = YScale::new(band.top, band.height, -extent, extent);
    let zero = ys.y(0.0);

    frame.push(
        Layer::Macd,
        DrawCommand::Line {
            x1: layout.plot_left,
            y1: zero,
            x2: layout.plot_right(),
            y2: zero,
            stroke: palette.grid.clone(),
            width: 1.0,
            dashed: false,
        },
    );

    let bw = body_width(xs);
    for (i, v) in ind.macd_histogram.values.iter().enumerate() {
        let Some(v) = v else { continue };
        let y = ys.y(*v);
        frame.push(
            Layer::Macd,
            DrawCommand::Rect {
                x: xs.x(i) - bw / 2.0,
                y: y.min(zero),
                width: bw,
                height: (y - zero).abs(),
                fill: palette.candle(*v >= 0.0).to_string(),
            },
        );
    }

    draw_series(frame, Layer::Macd, &ind.macd_line, xs, &ys, &palette.macd, false);
    draw_series(frame, Layer::Macd, &ind.macd_signal, xs, &ys, &palette.signal, false);
    let label = ind.macd_line.indicator_type.to_string();
    band_label(frame, Layer::Macd, layout, band, label, &palette.text);
}

fn draw_rsi(frame: &mut Frame, input: &RenderInput<'_>, layout: &Layout, xs: &XScale, band: Band) {
    let palette = &input.options.palette;
    let ys = YScale::new(band.top, band.height, 0.0, 100.0);

    for level in [RSI_OVERSOLD, RSI_OVERBOUGHT] {
        let y = ys.y(level);
        frame.push(
            Layer::Rsi,
            DrawCommand::Line {
                x1: layout.plot_left,
                y1: y,
                x2: layout.plot_right(),
                y2: y,
                stroke: palette.grid.clone(),
                width: 1.0,
                dashed: true,
            },
        );
        frame.push(
            Layer::Rsi,
            DrawCommand::Text {
                x: layout.plot_right() + 4.0,
                y: y + LABEL_SIZE / 3.0,
                text: format!("{:.0}", level),
                size: LABEL_SIZE,
                fill: palette.text.clone(),
                anchor: TextAnchor::Start,
            },
        );
    }

    draw_series(frame, Layer::Rsi, &input.indicators.rsi, xs, &ys, &palette.rsi, false);
    band_label(
        frame,
        Layer::Rsi,
        layout,
        band,
        input.indicators.rsi.indicator_type.to_string(),
        &palette.text,
    );
}

fn draw_legend(frame: &mut Frame, input: &RenderInput<'_>, layout: &Layout) {
    let opts = input.options;
    let mut entries: Vec<(String, String)> = Vec::new();
    if opts.toggles.show_ma {
        for (n, ma) in input.indicators.moving_averages.iter().enumerate() {
            entries.push((ma.indicator_type.to_string(), opts.palette.ma_color(n).to_string()));
        }
    }
    if opts.toggles.show_bollinger {
        entries.push((
            input.indicators.bollinger_middle.indicator_type.to_string(),
            opts.palette.bollinger.clone(),
        ));
    }

    let mut x = layout.plot_left + 4.0;
    let y = layout.price.top + LABEL_SIZE + 2.0;
    for (label, color) in entries {
        let advance = label.chars().count() as f64 * LABEL_SIZE * 0.6 + 12.0;
        frame.push(
            Layer::Legend,
            DrawCommand::Text {
                x,
                y,
                text: label,
                size: LABEL_SIZE,
                fill: color,
                anchor: TextAnchor::Start,
            },
        );
        x += advance;
    }
}

fn draw_title(frame: &mut Frame, input: &RenderInput<'_>, layout: &Layout) {
    let (first, last) = match (input.points.first(), input.points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return,
    };
    let span = format!("{} ~ {}", first.date, last.date);
    let text = if input.options.title.is_empty() {
        span
    } else {
        format!("{}  {}", input.options.title, span)
    };
    frame.push(
        Layer::Title,
        DrawCommand::Text {
            x: layout.plot_left,
            y: TITLE_SIZE + 4.0,
            text,
            size: TITLE_SIZE,
            fill: input.options.palette.text.clone(),
            anchor: TextAnchor::Start,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::IndicatorParams;
    use crate::domain::options::OverlayToggles;

    fn points(n: usize) -> Vec<PricePoint> {
        (0..n)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.5).sin() * 4.0;
                let (open, close) = if i % 2 == 0 {
                    (base, base + 1.0)
                } else {
                    (base + 1.0, base)
                };
                PricePoint::new(
                    format!("2024-01-{:02}", i % 28 + 1),
                    open,
                    base + 2.0,
                    base - 2.0,
                    close,
                    1_000.0 + i as f64,
                )
            })
            .collect()
    }

    fn frame_for(series: &[PricePoint], range: ViewRange, options: &ChartOptions) -> Frame {
        let set = IndicatorSet::compute(series, &options.params);
        render(&RenderInput::from_full(series, &set, range, options))
    }

    #[test]
    fn empty_slice_renders_placeholder() {
        let frame = frame_for(&[], ViewRange { start: 0, end: 0 }, &ChartOptions::default());
        assert!(frame.placeholder);
        assert_eq!(frame.texts(), vec![PLACEHOLDER_TEXT]);
        assert_eq!(frame.count(Layer::Candle), 0);
    }

    #[test]
    fn single_point_renders_placeholder() {
        let frame = frame_for(&points(1), ViewRange { start: 0, end: 1 }, &ChartOptions::default());
        assert!(frame.placeholder);
    }

    #[test]
    fn one_wick_and_body_per_candle() {
        let series = points(30);
        let frame = frame_for(&series, ViewRange { start: 5, end: 30 }, &ChartOptions::default());
        assert!(!frame.placeholder);
        assert_eq!(frame.count(Layer::Candle), 25 * 2);
        assert_eq!(frame.count(Layer::Volume), 25);
    }

    #[test]
    fn candle_colors_follow_direction() {
        let series = points(4);
        let options = ChartOptions::default();
        let frame = frame_for(&series, ViewRange { start: 0, end: 4 }, &options);
        let fills: Vec<&str> = frame
            .layer(Layer::Candle)
            .filter_map(|c| match c {
                DrawCommand::Rect { fill, .. } => Some(fill.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec!["#e03131", "#2f9e44", "#e03131", "#2f9e44"]);
    }

    #[test]
    fn doji_body_has_minimum_height() {
        let series = vec![
            PricePoint::new("2024-01-01", 10.0, 11.0, 9.0, 10.0, 5.0),
            PricePoint::new("2024-01-02", 10.0, 12.0, 9.5, 11.0, 5.0),
        ];
        let frame = frame_for(&series, ViewRange { start: 0, end: 2 }, &ChartOptions::default());
        let heights: Vec<f64> = frame
            .layer(Layer::Candle)
            .filter_map(|c| match c {
                DrawCommand::Rect { height, .. } => Some(*height),
                _ => None,
            })
            .collect();
        assert!((heights[0] - MIN_BODY_HEIGHT).abs() < f64::EPSILON);
        assert!(heights[1] > MIN_BODY_HEIGHT);
    }

    #[test]
    fn flat_prices_do_not_break_coordinates() {
        let series: Vec<PricePoint> = (0..5)
            .map(|i| PricePoint::new(format!("2024-01-0{}", i + 1), 0.0, 0.0, 0.0, 0.0, 0.0))
            .collect();
        let frame = frame_for(&series, ViewRange { start: 0, end: 5 }, &ChartOptions::default());
        for p in &frame.primitives {
            if let DrawCommand::Rect { y, height, .. } = p.command {
                assert!(y.is_finite() && height.is_finite());
            }
        }
        assert_eq!(frame.count(Layer::Volume), 0);
    }

    #[test]
    fn five_grid_levels_with_labels() {
        let series = points(25);
        let frame = frame_for(&series, ViewRange { start: 0, end: 25 }, &ChartOptions::default());
        let lines = frame
            .layer(Layer::Grid)
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, GRID_LEVELS);
    }

    #[test]
    fn moving_average_skips_warmup() {
        let series = points(30);
        let options = ChartOptions {
            params: IndicatorParams {
                ma_periods: vec![10],
                ..IndicatorParams::default()
            },
            ..ChartOptions::default()
        };
        let frame = frame_for(&series, ViewRange { start: 0, end: 30 }, &options);
        let lines: Vec<&Vec<(f64, f64)>> = frame
            .layer(Layer::Overlay)
            .filter_map(|c| match c {
                DrawCommand::Polyline { points, .. } => Some(points),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 21);

        let xs = Layout::new(options.width, options.height, &options.toggles).x_scale(30);
        assert!((lines[0][0].0 - xs.x(9)).abs() < 1e-9);
    }

    #[test]
    fn overlays_respect_toggles() {
        let series = points(60);
        let options = ChartOptions {
            toggles: OverlayToggles {
                show_volume: false,
                show_ma: false,
                show_macd: true,
                show_rsi: true,
                show_bollinger: true,
            },
            ..ChartOptions::default()
        };
        let frame = frame_for(&series, ViewRange { start: 0, end: 60 }, &options);

        assert_eq!(frame.count(Layer::Volume), 0);
        let dashed = frame
            .layer(Layer::Overlay)
            .filter(|c| matches!(c, DrawCommand::Polyline { dashed: true, .. }))
            .count();
        assert_eq!(dashed, 2);
        assert!(frame.count(Layer::Macd) > 0);
        assert!(frame.texts().contains(&"RSI(14)"));
        assert!(frame.texts().contains(&"30"));
        assert!(frame.texts().contains(&"70"));
        assert!(frame.texts().contains(&"BOLL(20,2)"));
        assert!(!frame.texts().contains(&"MA5"));
    }

    #[test]
    fn legend_and_title_painted_last() {
        let series = points(30);
        let options = ChartOptions {
            title: "ACME".into(),
            ..ChartOptions::default()
        };
        let frame = frame_for(&series, ViewRange { start: 0, end: 30 }, &options);
        let layers: Vec<Layer> = frame.primitives.iter().map(|p| p.layer).collect();
        let first_legend = layers.iter().position(|l| *l == Layer::Legend).unwrap();
        assert!(layers[first_legend..]
            .iter()
            .all(|l| matches!(l, Layer::Legend | Layer::Title)));
        assert_eq!(*layers.last().unwrap(), Layer::Title);
        assert!(frame.texts().last().unwrap().starts_with("ACME"));
    }

    #[test]
    fn runs_break_on_gaps() {
        let values = [None, Some(1.0), Some(2.0), None, Some(3.0), Some(f64::NAN), Some(4.0)];
        let runs = defined_runs(&values);
        assert_eq!(runs, vec![vec![(1, 1.0), (2, 2.0)], vec![(4, 3.0)], vec![(6, 4.0)]]);
    }
}
