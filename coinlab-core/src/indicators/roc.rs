//! Rate of Change (ROC).
//!
//! Percentage change over N samples.
//! ROC[t] = (x[t] - x[t-period]) / x[t-period] * 100
//! Lookback: period. A zero base value is undefined.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::Series;

const NAME: &str = "roc";

/// ROC of an arbitrary series. Used by Coppock.
pub fn rate_of_change(values: &[Option<f64>], period: usize) -> Series {
    let n = values.len();
    let mut result = vec![None; n];

    for i in period..n {
        if let (Some(prev), Some(curr)) = (values[i - period], values[i]) {
            if prev != 0.0 {
                result[i] = Some((curr - prev) / prev * 100.0);
            }
        }
    }

    result
}

#[derive(Debug, Clone)]
pub struct Roc {
    period: usize,
    source: Field,
}

impl Roc {
    pub fn new(period: usize, source: Field) -> Self {
        Self { period, source }
    }
}

impl Indicator for Roc {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![NAME.to_string()]
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "period", self.period, 1, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;
        Ok(vec![IndicatorOutput::new(
            NAME,
            rate_of_change(&values, self.period),
        )])
    }
}
