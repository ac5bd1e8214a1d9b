//! Concrete indicator implementations.
//!
//! Every catalogue entry implements the `Indicator` trait from `crate::indicator`.
//! Multi-series indicators (MACD, Bollinger, Keltner, Ichimoku, SuperTrend)
//! return all of their co-indexed outputs from a single `compute` call so the
//! bands share one alignment.

pub mod atr;
pub mod bollinger;
pub mod chop;
pub mod coppock;
pub mod ema;
pub mod hull;
pub mod ichimoku;
pub mod kalman;
pub mod keltner;
pub mod macd;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod supertrend;
pub mod volatility;
pub mod zscore;

pub use atr::Atr;
pub use bollinger::Bollinger;
pub use chop::Chop;
pub use coppock::Coppock;
pub use ema::Ema;
pub use hull::Hull;
pub use ichimoku::Ichimoku;
pub use kalman::{Kalman, KalmanSmoother};
pub use keltner::Keltner;
pub use macd::Macd;
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;
pub use supertrend::{Supertrend, SupertrendEngine, SupertrendState, Trend};
pub use volatility::HistoricalVolatility;
pub use zscore::ZScore;

/// Build a price-only time series for testing, one sample per day.
///
/// Price and close carry the value; high/low are close ± 1.0.
#[cfg(test)]
pub fn make_series(prices: &[f64]) -> crate::domain::TimeSeries {
    make_ohlc_series(
        &prices
            .iter()
            .map(|&p| (p + 1.0, p - 1.0, p))
            .collect::<Vec<_>>(),
    )
}

/// Build a time series from `(high, low, close)` triples; price mirrors close.
#[cfg(test)]
pub fn make_ohlc_series(data: &[(f64, f64, f64)]) -> crate::domain::TimeSeries {
    use crate::domain::{Sample, TimeSeries};
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let samples = data
        .iter()
        .enumerate()
        .map(|(i, &(high, low, close))| {
            Sample::hlc(base + chrono::Duration::days(i as i64), high, low, close)
        })
        .collect();
    TimeSeries::new(samples).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
