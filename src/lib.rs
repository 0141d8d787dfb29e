//! candlechart — interactive OHLCV price-chart engine.
//!
//! Hexagonal architecture: the chart engine lives in [`domain`], port traits
//! in [`ports`], concrete implementations (CSV data, INI config, SVG output)
//! in [`adapters`], and the command-line front end in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
