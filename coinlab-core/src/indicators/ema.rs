//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2/(span+1).
//! Seed: EMA[0] = x[0].
//! Lookback: 0 (defined from the first sample, unlike the windowed averages).

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::ema;

const NAME: &str = "ema";

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    source: Field,
    output: String,
}

impl Ema {
    pub fn new(span: usize, source: Field) -> Self {
        Self {
            span,
            source,
            output: format!("ema{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![self.output.clone()]
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "span", self.span, 1, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;
        Ok(vec![IndicatorOutput::new(
            self.output.as_str(),
            ema(&values, self.span),
        )])
    }
}
