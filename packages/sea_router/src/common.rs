//! Data structures and configuration shared across the package

pub mod bbox;
pub mod config;
pub mod graph_data;
pub mod logging;
