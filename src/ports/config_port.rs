//! Configuration access port trait.

use crate::domain::error::ChartError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Comma-separated values, trimmed, empty entries dropped. `None` when
    /// the key is absent.
    fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        self.get_string(section, key).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    /// A candle count or period. Absent keys give `default`; a value that is
    /// present but not a non-negative integer is an error rather than a
    /// silent fallback.
    fn get_usize(&self, section: &str, key: &str, default: usize) -> Result<usize, ChartError> {
        match self.get_string(section, key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ChartError::invalid(
                    section,
                    key,
                    format!("'{}' is not a non-negative integer", raw.trim()),
                )
            }),
        }
    }
}
