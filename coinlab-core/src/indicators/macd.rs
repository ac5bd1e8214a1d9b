//! Moving Average Convergence Divergence (MACD).
//!
//! macd_line   = EMA(x, fast) - EMA(x, slow)
//! signal_line = EMA(macd_line, signal)
//! macd_hist   = macd_line - signal_line
//! All three are defined from index 0 and share one alignment.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::{combine, ema};

const NAME: &str = "macd";

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    source: Field,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, source: Field) -> Self {
        Self {
            fast,
            slow,
            signal,
            source,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![
            "macd_line".to_string(),
            "signal_line".to_string(),
            "macd_hist".to_string(),
        ]
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "fast", self.fast, 1, len)?;
        check_window(NAME, "slow", self.slow, 1, len)?;
        check_window(NAME, "signal", self.signal, 1, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;

        let fast = ema(&values, self.fast);
        let slow = ema(&values, self.slow);
        let line = combine(&fast, &slow, |f, s| Some(f - s));
        let signal = ema(&line, self.signal);
        let hist = combine(&line, &signal, |l, s| Some(l - s));

        Ok(vec![
            IndicatorOutput::new("macd_line", line),
            IndicatorOutput::new("signal_line", signal),
            IndicatorOutput::new("macd_hist", hist),
        ])
    }
}
