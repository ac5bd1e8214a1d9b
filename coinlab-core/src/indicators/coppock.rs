//! Coppock Curve.
//!
//! WMA(ROC(long) + ROC(short), wma_window).
//! Lookback: max(long, short) + wma_window - 1.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::indicators::roc::rate_of_change;
use crate::series::{combine, wma};

const NAME: &str = "coppock";

#[derive(Debug, Clone)]
pub struct Coppock {
    long_roc: usize,
    short_roc: usize,
    wma_window: usize,
    source: Field,
}

impl Coppock {
    pub fn new(long_roc: usize, short_roc: usize, wma_window: usize, source: Field) -> Self {
        Self {
            long_roc,
            short_roc,
            wma_window,
            source,
        }
    }
}

impl Indicator for Coppock {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![NAME.to_string()]
    }

    fn lookback(&self) -> usize {
        self.long_roc.max(self.short_roc) + self.wma_window.saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "long_roc", self.long_roc, 1, len)?;
        check_window(NAME, "short_roc", self.short_roc, 1, len)?;
        check_window(NAME, "wma", self.wma_window, 1, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;
        let roc_sum = combine(
            &rate_of_change(&values, self.long_roc),
            &rate_of_change(&values, self.short_roc),
            |a, b| Some(a + b),
        );
        Ok(vec![IndicatorOutput::new(
            NAME,
            wma(&roc_sum, self.wma_window),
        )])
    }
}
