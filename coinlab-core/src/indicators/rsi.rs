//! Relative Strength Index (RSI).
//!
//! Wilder smoothing (alpha = 1/window) of the gain and loss streams, seeded with
//! the first price change. RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: window (the first change exists at index 1).
//! Edge cases: avg_loss == 0 → 100; avg_gain == avg_loss == 0 → undefined.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::{combine, wilder, Series};

const NAME: &str = "rsi";

#[derive(Debug, Clone)]
pub struct Rsi {
    window: usize,
    source: Field,
}

impl Rsi {
    pub fn new(window: usize, source: Field) -> Self {
        Self { window, source }
    }
}

/// Split first differences into gain and loss streams; index 0 is undefined.
pub fn gains_and_losses(values: &[Option<f64>]) -> (Series, Series) {
    let n = values.len();
    let mut gains = vec![None; n];
    let mut losses = vec![None; n];
    for i in 1..n {
        if let (Some(prev), Some(curr)) = (values[i - 1], values[i]) {
            let delta = curr - prev;
            gains[i] = Some(delta.max(0.0));
            losses[i] = Some((-delta).max(0.0));
        }
    }
    (gains, losses)
}

/// RSI of an arbitrary series.
pub fn rsi(values: &[Option<f64>], window: usize) -> Series {
    let (gains, losses) = gains_and_losses(values);
    let avg_gain = wilder(&gains, window, window);
    let avg_loss = wilder(&losses, window, window);
    combine(&avg_gain, &avg_loss, rsi_from_averages)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            None // flat market: 0/0
        } else {
            Some(100.0)
        }
    } else {
        Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![NAME.to_string()]
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "window", self.window, 1, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;
        Ok(vec![IndicatorOutput::new(NAME, rsi(&values, self.window))])
    }
}
