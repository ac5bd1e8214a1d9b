//! Keltner Channel: EMA +/- ATR multiplier.
//!
//! - Middle: EMA(close, window)
//! - Upper: middle + multiplier * ATR(window)
//! - Lower: middle - multiplier * ATR(window)
//!
//! Lookback: window - 1 (the ATR warm-up; the middle line is defined from 0).

use crate::domain::{Field, TimeSeries};
use crate::error::{check_non_negative, check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::indicators::atr::{average_true_range, hlc, HLC};
use crate::series::{combine, ema};

const NAME: &str = "keltner";

#[derive(Debug, Clone)]
pub struct Keltner {
    window: usize,
    multiplier: f64,
}

impl Keltner {
    pub fn new(window: usize, multiplier: f64) -> Self {
        Self { window, multiplier }
    }
}

impl Indicator for Keltner {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![
            "keltner_middle".to_string(),
            "keltner_upper".to_string(),
            "keltner_lower".to_string(),
        ]
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        HLC.to_vec()
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_non_negative(NAME, "multiplier", self.multiplier)?;
        check_window(NAME, "window", self.window, 1, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let (high, low, close) = hlc(series, NAME)?;

        let middle = ema(&close, self.window);
        let atr = average_true_range(&high, &low, &close, self.window);
        let k = self.multiplier;
        let upper = combine(&middle, &atr, |m, a| Some(m + k * a));
        let lower = combine(&middle, &atr, |m, a| Some(m - k * a));

        Ok(vec![
            IndicatorOutput::new("keltner_middle", middle),
            IndicatorOutput::new("keltner_upper", upper),
            IndicatorOutput::new("keltner_lower", lower),
        ])
    }
}
