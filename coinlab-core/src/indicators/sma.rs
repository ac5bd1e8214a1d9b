//! Simple Moving Average (SMA).
//!
//! Rolling mean of the source field over a window.
//! Lookback: window - 1 (first valid value at index window-1).

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::rolling_mean;

const NAME: &str = "sma";

#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
    source: Field,
    output: String,
}

impl Sma {
    pub fn new(window: usize, source: Field) -> Self {
        Self {
            window,
            source,
            output: format!("sma{window}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![self.output.clone()]
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
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
        Ok(vec![IndicatorOutput::new(
            self.output.as_str(),
            rolling_mean(&values, self.window),
        )])
    }
}
