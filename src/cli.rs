//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_surface::SvgSurface;
use crate::domain::chart_config::build_chart_options;
use crate::domain::indicator::{IndicatorCache, IndicatorSet};
use crate::domain::interaction::{HoverInfo, PointerEvent, WHEEL_TICK};
use crate::domain::options::ChartOptions;
use crate::domain::price::{PricePoint, Series};
use crate::domain::session::ChartSession;
use crate::domain::viewport::{RangePreset, ZOOM_STEP};
use crate::ports::data_port::PriceSource;
use crate::ports::surface_port::RenderSurface;

#[derive(Parser, Debug)]
#[command(name = "candlechart", about = "Candlestick charts with technical indicators")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a chart to SVG
    Render {
        /// Directory holding <SYMBOL>.csv files
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// SVG output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// 1m, 3m, 6m or all
        #[arg(long)]
        preset: Option<RangePreset>,
        /// Wheel notches; positive zooms in, negative zooms out
        #[arg(long, allow_negative_numbers = true)]
        zoom: Option<i64>,
        /// Candles to shift the window by; negative moves back in time
        #[arg(long, allow_negative_numbers = true)]
        pan: Option<i64>,
        /// Report the candle under this x pixel
        #[arg(long)]
        hover_x: Option<f64>,
    },
    /// Print indicator values for the most recent rows
    Indicators {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 20)]
        last: usize,
    },
    /// Validate a chart configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Viewport operations for `render`, applied in field order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ViewOps {
    pub preset: Option<RangePreset>,
    pub zoom: Option<i64>,
    pub pan: Option<i64>,
    pub hover_x: Option<f64>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Render {
            data,
            symbol,
            config,
            output,
            preset,
            zoom,
            pan,
            hover_x,
        } => {
            let ops = ViewOps {
                preset,
                zoom,
                pan,
                hover_x,
            };
            run_render(&data, &symbol, config.as_ref(), output, &ops)
        }
        Command::Indicators {
            data,
            symbol,
            config,
            last,
        } => run_indicators(&data, &symbol, config.as_ref(), last),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn load_options(config_path: Option<&PathBuf>) -> Result<ChartOptions, ExitCode> {
    let Some(path) = config_path else {
        return Ok(ChartOptions::default());
    };
    let adapter = load_config(path)?;
    build_chart_options(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn load_series(data_dir: &PathBuf, symbol: &str) -> Result<Series, ExitCode> {
    let source = CsvAdapter::new(data_dir.clone());
    source
        .fetch_series(symbol)
        .map(Series::from)
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        })
}

/// Replay viewport operations on a session the way a user would trigger
/// them: preset button, wheel notches, then a drag-equivalent pan.
pub fn apply_view_ops(session: &mut ChartSession, ops: &ViewOps) {
    if let Some(preset) = ops.preset {
        session.handle(PointerEvent::Preset(preset));
    }
    if let Some(ticks) = ops.zoom {
        // past this many notches the window is pinned at a limit
        let max_notches = (session.series().len() / ZOOM_STEP + 1) as u64;
        for _ in 0..ticks.unsigned_abs().min(max_notches) {
            let delta_y = if ticks > 0 { -WHEEL_TICK } else { WHEEL_TICK };
            session.handle(PointerEvent::Wheel { delta_y });
        }
    }
    if let Some(candles) = ops.pan {
        session.viewport_mut().pan(candles);
    }
    if let Some(x) = ops.hover_x {
        session.handle(PointerEvent::Move { x, y: 0.0 });
    }
}

fn run_render(
    data_dir: &PathBuf,
    symbol: &str,
    config_path: Option<&PathBuf>,
    output_path: Option<PathBuf>,
    ops: &ViewOps,
) -> ExitCode {
    let mut options = match load_options(config_path) {
        Ok(o) => o,
        Err(code) => return code,
    };
    if options.title.is_empty() {
        options.title = symbol.to_string();
    }
    let series = match load_series(data_dir, symbol) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let mut session = ChartSession::new(series, options);
    apply_view_ops(&mut session, ops);
    let range = session.range();
    info!(start = range.start, end = range.end, "viewport ready");

    if ops.hover_x.is_some() {
        match session.hover() {
            Some(hover) => println!("{}", format_hover(hover)),
            None => println!("no candle under pointer"),
        }
    }

    let frame = session.render();
    let to_stdout = output_path.is_none();
    let mut surface = match output_path {
        Some(path) => SvgSurface::to_file(path),
        None => SvgSurface::in_memory(),
    };
    if let Err(e) = surface.present(&frame) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if to_stdout {
        if let Some(svg) = surface.svg() {
            print!("{svg}");
        }
    }
    ExitCode::SUCCESS
}

fn run_indicators(
    data_dir: &PathBuf,
    symbol: &str,
    config_path: Option<&PathBuf>,
    last: usize,
) -> ExitCode {
    let options = match load_options(config_path) {
        Ok(o) => o,
        Err(code) => return code,
    };
    let series = match load_series(data_dir, symbol) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let mut cache = IndicatorCache::new();
    let set = cache.get_or_compute(&series, &options.params);
    print!("{}", format_indicator_table(&series, &set, last));
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match build_chart_options(&adapter) {
        Ok(options) => {
            eprintln!("  size:       {}x{}", options.width, options.height);
            eprintln!("  preset:     {}", options.preset);
            eprintln!("  ma periods: {:?}", options.params.ma_periods);
            eprintln!(
                "  macd:       {},{},{}",
                options.params.macd_fast, options.params.macd_slow, options.params.macd_signal
            );
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

pub fn format_hover(hover: &HoverInfo) -> String {
    let p = &hover.point;
    let mut parts = vec![
        format!("#{} {}", hover.index, p.date),
        format!(
            "O {:.2} H {:.2} L {:.2} C {:.2} V {:.0}",
            p.open, p.high, p.low, p.close, p.volume
        ),
    ];
    for (kind, value) in &hover.moving_averages {
        parts.push(format!("{} {}", kind, cell(*value)));
    }
    parts.push(format!("RSI {}", cell(hover.rsi)));
    parts.push(format!(
        "MACD {} / {} / {}",
        cell(hover.macd),
        cell(hover.macd_signal),
        cell(hover.macd_histogram)
    ));
    parts.push(format!(
        "BOLL {} / {} / {}",
        cell(hover.bollinger_upper),
        cell(hover.bollinger_middle),
        cell(hover.bollinger_lower)
    ));
    parts.join("  ")
}

/// Fixed-width table of the last `last` rows; `-` marks warm-up positions.
pub fn format_indicator_table(points: &[PricePoint], set: &IndicatorSet, last: usize) -> String {
    let start = points.len().saturating_sub(last);

    let mut header = vec![format!("{:<20}", "date"), format!("{:>10}", "close")];
    for ma in &set.moving_averages {
        header.push(format!("{:>10}", ma.indicator_type.to_string()));
    }
    for name in ["RSI", "MACD", "SIGNAL", "HIST", "BB_UP", "BB_MID", "BB_LOW"] {
        header.push(format!("{:>10}", name));
    }

    let mut out = header.join(" ");
    out.push('\n');

    for (i, point) in points.iter().enumerate().skip(start) {
        let mut row = vec![
            format!("{:<20}", point.date),
            format!("{:>10.2}", point.close),
        ];
        for ma in &set.moving_averages {
            row.push(format!("{:>10}", cell(ma.get(i))));
        }
        for value in [
            set.rsi.get(i),
            set.macd.line.get(i),
            set.macd.signal.get(i),
            set.macd.histogram.get(i),
            set.bollinger.upper.get(i),
            set.bollinger.middle.get(i),
            set.bollinger.lower.get(i),
        ] {
            row.push(format!("{:>10}", cell(value)));
        }
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}
