//! CoinLab Core: technical indicator engine for daily crypto market data.
//!
//! This crate turns one ordered time series into a catalogue of aligned
//! indicator series:
//! - Domain types (samples, fields, the validated time series)
//! - Series kernels: sliding windows, recursive smoothing, WMA, time shifts
//! - The `Indicator` trait and one implementation per catalogue entry
//! - Stateful scans for the Kalman smoother and the SuperTrend machine
//! - TOML engine configuration, factory and a parallel batch runner

pub mod domain;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod indicators;
pub mod series;

pub use domain::{Field, Sample, TimeSeries};
pub use engine::{Engine, EngineConfig, IndicatorConfig};
pub use error::EngineError;
pub use indicator::{Indicator, IndicatorOutput, IndicatorValues};
pub use series::Series;
