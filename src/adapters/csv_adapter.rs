//! CSV file price source.
//!
//! One file per symbol, `<base>/<SYMBOL>.csv`, with a
//! `date,open,high,low,close,volume` header.

use crate::domain::error::ChartError;
use crate::domain::price::{validate_chronological, PricePoint};
use crate::ports::data_port::PriceSource;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const EXTENSION: &str = ".csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}{}", symbol, EXTENSION))
    }
}

/// Header is line 1, so record `n` (0-based) sits on line `n + 2`.
fn record_line(index: usize) -> u64 {
    index as u64 + 2
}

fn check_point(point: &PricePoint) -> Result<(), String> {
    let prices = [
        ("open", point.open),
        ("high", point.high),
        ("low", point.low),
        ("close", point.close),
    ];
    if let Some((name, value)) = prices.iter().find(|(_, v)| !v.is_finite()) {
        return Err(format!("{} is not a finite number ({})", name, value));
    }
    if point.low > point.high {
        return Err(format!("low {} above high {}", point.low, point.high));
    }
    if !point.volume.is_finite() || point.volume < 0.0 {
        return Err(format!("volume {} must be non-negative", point.volume));
    }
    Ok(())
}

impl PriceSource for CsvAdapter {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<PricePoint>, ChartError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| ChartError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut points = Vec::new();

        for (i, result) in rdr.deserialize::<PricePoint>().enumerate() {
            let point = result.map_err(|e| ChartError::InvalidRecord {
                line: e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or_else(|| record_line(i)),
                reason: e.to_string(),
            })?;
            check_point(&point).map_err(|reason| ChartError::InvalidRecord {
                line: record_line(i),
                reason,
            })?;
            points.push(point);
        }

        validate_chronological(&points)?;
        info!(symbol, rows = points.len(), path = %path.display(), "loaded price series");
        Ok(points)
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| ChartError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| ChartError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(EXTENSION) {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
