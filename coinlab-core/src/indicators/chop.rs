//! Choppiness Index (CHOP).
//!
//! CHOP = 100 * log10(sum(TR, n) / (max_high(n) - min_low(n))) / log10(n)
//!
//! A zero high-low range is undefined rather than a division by zero.
//! The window must be at least 2 (log10(1) = 0).
//! Lookback: window - 1.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::indicators::atr::{hlc, true_range, HLC};
use crate::series::{combine, rolling_max, rolling_min, rolling_sum};

const NAME: &str = "chop";

#[derive(Debug, Clone)]
pub struct Chop {
    window: usize,
}

impl Chop {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Indicator for Chop {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![NAME.to_string()]
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        HLC.to_vec()
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "window", self.window, 2, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let (high, low, close) = hlc(series, NAME)?;

        let tr_sum = rolling_sum(&true_range(&high, &low, &close), self.window);
        let range = combine(
            &rolling_max(&high, self.window),
            &rolling_min(&low, self.window),
            |h, l| Some(h - l),
        );
        let log_n = (self.window as f64).log10();
        let chop = combine(&tr_sum, &range, |sum, range| {
            if range <= 0.0 || sum <= 0.0 {
                return None;
            }
            Some(100.0 * (sum / range).log10() / log_n)
        });

        Ok(vec![IndicatorOutput::new(NAME, chop)])
    }
}
