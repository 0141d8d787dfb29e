//! Chart options from configuration, with validation.
//!
//! Every key is optional; missing keys fall back to the defaults in
//! [`ChartOptions::default`]. Present-but-invalid values are errors.

use crate::domain::error::ChartError;
use crate::domain::indicator::IndicatorParams;
use crate::domain::options::{ChartOptions, OverlayToggles, Palette};
use crate::domain::viewport::RangePreset;
use crate::ports::config_port::ConfigPort;

pub const MIN_DIMENSION: f64 = 100.0;

pub fn build_chart_options(config: &dyn ConfigPort) -> Result<ChartOptions, ChartError> {
    let defaults = ChartOptions::default();

    let width = config.get_double("chart", "width", defaults.width);
    let height = config.get_double("chart", "height", defaults.height);
    validate_dimension("width", width)?;
    validate_dimension("height", height)?;

    let preset = match config.get_string("chart", "preset") {
        Some(raw) => raw
            .parse::<RangePreset>()
            .map_err(|reason| ChartError::invalid("chart", "preset", reason))?,
        None => defaults.preset,
    };

    Ok(ChartOptions {
        width,
        height,
        title: config.get_string("chart", "title").unwrap_or_default(),
        toggles: build_toggles(config),
        palette: build_palette(config),
        params: build_indicator_params(config)?,
        preset,
    })
}

fn build_toggles(config: &dyn ConfigPort) -> OverlayToggles {
    let d = OverlayToggles::default();
    OverlayToggles {
        show_volume: config.get_bool("chart", "show_volume", d.show_volume),
        show_ma: config.get_bool("chart", "show_ma", d.show_ma),
        show_macd: config.get_bool("chart", "show_macd", d.show_macd),
        show_rsi: config.get_bool("chart", "show_rsi", d.show_rsi),
        show_bollinger: config.get_bool("chart", "show_bollinger", d.show_bollinger),
    }
}

fn build_palette(config: &dyn ConfigPort) -> Palette {
    let d = Palette::default();
    let color = |key: &str, default: String| config.get_string("colors", key).unwrap_or(default);
    Palette {
        up: color("up", d.up),
        down: color("down", d.down),
        background: color("background", d.background),
        grid: color("grid", d.grid),
        text: color("text", d.text),
        ma: config.get_list("colors", "ma").unwrap_or(d.ma),
        bollinger: color("bollinger", d.bollinger),
        macd: color("macd", d.macd),
        signal: color("signal", d.signal),
        rsi: color("rsi", d.rsi),
    }
}

pub fn build_indicator_params(config: &dyn ConfigPort) -> Result<IndicatorParams, ChartError> {
    let d = IndicatorParams::default();

    let ma_periods = match config.get_list("indicators", "ma_periods") {
        Some(raw) => raw
            .iter()
            .map(|p| {
                p.parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| {
                        ChartError::invalid(
                            "indicators",
                            "ma_periods",
                            format!("'{}' is not a positive integer", p),
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => d.ma_periods,
    };

    let params = IndicatorParams {
        ma_periods,
        rsi_period: period(config, "rsi_period", d.rsi_period)?,
        macd_fast: period(config, "macd_fast", d.macd_fast)?,
        macd_slow: period(config, "macd_slow", d.macd_slow)?,
        macd_signal: period(config, "macd_signal", d.macd_signal)?,
        bollinger_period: period(config, "bollinger_period", d.bollinger_period)?,
        bollinger_multiplier: config.get_double(
            "indicators",
            "bollinger_multiplier",
            d.bollinger_multiplier,
        ),
    };

    if params.macd_fast >= params.macd_slow {
        return Err(ChartError::invalid(
            "indicators",
            "macd_fast",
            "macd_fast must be less than macd_slow",
        ));
    }
    if !(params.bollinger_multiplier > 0.0) {
        return Err(ChartError::invalid(
            "indicators",
            "bollinger_multiplier",
            "bollinger_multiplier must be positive",
        ));
    }
    Ok(params)
}

fn period(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, ChartError> {
    let value = config.get_usize("indicators", key, default)?;
    if value < 1 {
        return Err(ChartError::invalid(
            "indicators",
            key,
            format!("{} must be at least 1", key),
        ));
    }
    Ok(value)
}

fn validate_dimension(key: &str, value: f64) -> Result<(), ChartError> {
    if !value.is_finite() || value < MIN_DIMENSION {
        return Err(ChartError::invalid(
            "chart",
            key,
            format!("{} must be at least {}", key, MIN_DIMENSION),
        ));
    }
    Ok(())
}
