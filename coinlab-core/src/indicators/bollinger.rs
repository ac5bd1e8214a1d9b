//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(x, window)
//! - Upper: middle + num_std * std(x, window)
//! - Lower: middle - num_std * std(x, window)
//!
//! Uses sample stddev (divide by N-1), so the window must hold at least 2 values.
//! Lookback: window - 1.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_non_negative, check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::{combine, rolling_mean, rolling_std};

const NAME: &str = "bollinger";

#[derive(Debug, Clone)]
pub struct Bollinger {
    window: usize,
    num_std: f64,
    source: Field,
}

impl Bollinger {
    pub fn new(window: usize, num_std: f64, source: Field) -> Self {
        Self {
            window,
            num_std,
            source,
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![
            "bollinger_middle".to_string(),
            "bollinger_upper".to_string(),
            "bollinger_lower".to_string(),
        ]
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_non_negative(NAME, "num_std", self.num_std)?;
        check_window(NAME, "window", self.window, 2, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;

        let middle = rolling_mean(&values, self.window);
        let std = rolling_std(&values, self.window);
        let k = self.num_std;
        let upper = combine(&middle, &std, |m, s| Some(m + k * s));
        let lower = combine(&middle, &std, |m, s| Some(m - k * s));

        Ok(vec![
            IndicatorOutput::new("bollinger_middle", middle),
            IndicatorOutput::new("bollinger_upper", upper),
            IndicatorOutput::new("bollinger_lower", lower),
        ])
    }
}
