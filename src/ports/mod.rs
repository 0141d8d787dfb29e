//! Port traits between the chart engine and its host.

pub mod config_port;
pub mod data_port;
pub mod surface_port;
