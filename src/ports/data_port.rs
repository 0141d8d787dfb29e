//! Price data port trait.
//!
//! The chart engine never fetches data itself; whoever hosts it supplies a
//! series through this port and may cache it however it likes.

use crate::domain::error::ChartError;
use crate::domain::price::PricePoint;

pub trait PriceSource {
    /// Full chronological series for `symbol`.
    fn fetch_series(&self, symbol: &str) -> Result<Vec<PricePoint>, ChartError>;

    fn list_symbols(&self) -> Result<Vec<String>, ChartError>;
}
