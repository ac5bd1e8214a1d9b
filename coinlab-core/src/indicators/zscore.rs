//! Rolling Z-score.
//!
//! z[i] = (x[i] - mean(window)) / std(window), sample std.
//! A zero std (flat window) is undefined. Lookback: window - 1.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::{combine, rolling_mean, rolling_std, Series};

const NAME: &str = "zscore";

pub fn zscore(values: &[Option<f64>], window: usize) -> Series {
    let deviation = combine(values, &rolling_mean(values, window), |x, m| Some(x - m));
    combine(&deviation, &rolling_std(values, window), |d, sd| {
        (sd > 0.0).then(|| d / sd)
    })
}

#[derive(Debug, Clone)]
pub struct ZScore {
    window: usize,
    source: Field,
}

impl ZScore {
    pub fn new(window: usize, source: Field) -> Self {
        Self { window, source }
    }
}

impl Indicator for ZScore {
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
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "window", self.window, 2, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;
        Ok(vec![IndicatorOutput::new(NAME, zscore(&values, self.window))])
    }
}
