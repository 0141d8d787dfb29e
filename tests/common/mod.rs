#![allow(dead_code)]

use candlechart::domain::error::ChartError;
use candlechart::domain::price::{PricePoint, Series};
use candlechart::ports::data_port::PriceSource;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::process::ExitCode;

pub struct MockPriceSource {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_points(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PriceSource for MockPriceSource {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<PricePoint>, ChartError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ChartError::Data {
                reason: reason.clone(),
            });
        }
        self.data.get(symbol).cloned().ok_or_else(|| ChartError::Data {
            reason: format!("unknown symbol {}", symbol),
        })
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(offset_days: i64) -> String {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (base + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}

/// A candle whose open/high/low sit just around `close`.
pub fn make_point(day: i64, close: f64) -> PricePoint {
    PricePoint::new(date(day), close - 0.5, close + 1.0, close - 1.0, close, 1_000.0)
}

pub fn points_from_closes(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_point(i as i64, c))
        .collect()
}

pub fn series_from_closes(closes: &[f64]) -> Series {
    Series::from(points_from_closes(closes))
}

/// Deterministic wavy series of `n` candles around 100.
pub fn generate_series(n: usize) -> Series {
    let closes: Vec<f64> = (0..n)
        .map(|i| 100.0 + (i as f64 * 0.2).sin() * 8.0 + i as f64 * 0.05)
        .collect();
    series_from_closes(&closes)
}

pub fn to_csv(points: &[PricePoint]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for p in points {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            p.date, p.open, p.high, p.low, p.close, p.volume
        ));
    }
    out
}

pub fn same_exit(a: ExitCode, b: ExitCode) -> bool {
    format!("{:?}", a) == format!("{:?}", b)
}
