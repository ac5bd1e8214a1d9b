//! Indicator engine: configuration, factory and the batch runner.
//!
//! The engine takes one in-memory time series and returns every configured
//! output aligned to it. It never reads or writes files.

pub mod config;
pub mod factory;
pub mod precompute;

pub use config::{EngineConfig, IndicatorConfig};
pub use factory::{build_indicator, build_indicators};
pub use precompute::{compute_warmup, Engine};
