//! Core chart engine: indicators, viewport, rendering and interaction.

pub mod chart_config;
pub mod error;
pub mod indicator;
pub mod interaction;
pub mod options;
pub mod price;
pub mod render;
pub mod session;
pub mod viewport;
