//! Hull Moving Average (HMA).
//!
//! raw = 2 * WMA(x, period / 2) - WMA(x, period)
//! HMA = WMA(raw, floor(sqrt(period)))
//! Lookback: period - 1 + floor(sqrt(period)) - 1.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::{combine, wma, Series};

const NAME: &str = "hma";

pub fn hull(values: &[Option<f64>], period: usize) -> Series {
    let raw = combine(&wma(values, period / 2), &wma(values, period), |half, full| {
        Some(2.0 * half - full)
    });
    wma(&raw, sqrt_period(period))
}

fn sqrt_period(period: usize) -> usize {
    (period as f64).sqrt().floor() as usize
}

#[derive(Debug, Clone)]
pub struct Hull {
    period: usize,
    source: Field,
    output: String,
}

impl Hull {
    pub fn new(period: usize, source: Field) -> Self {
        Self {
            period,
            source,
            output: format!("hma{period}"),
        }
    }
}

impl Indicator for Hull {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![self.output.clone()]
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1) + sqrt_period(self.period).saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        // half period must be at least 1
        check_window(NAME, "period", self.period, 2, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;
        Ok(vec![IndicatorOutput::new(
            self.output.as_str(),
            hull(&values, self.period),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_series;
    use crate::series::{defined, leading_undefined};

    #[test]
    fn hma_4_tracks_a_linear_series() {
        // WMA lags a line by (p-1)/3; with p = 4 the lags cancel exactly.
        let prices: Vec<f64> = (0..12).map(|i| 10.0 + 2.0 * i as f64).collect();
        let h = hull(&defined(&prices), 4);
        assert_eq!(leading_undefined(&h), 4);
        for i in 4..12 {
            let v = h[i].unwrap();
            assert!((v - prices[i]).abs() < 1e-9, "index {i}: {v} vs {}", prices[i]);
        }
    }

    #[test]
    fn default_lookback() {
        // 8 + 3 - 1
        assert_eq!(Hull::new(9, Field::Price).lookback(), 10);
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let out = Hull::new(9, Field::Price).compute(&make_series(&prices)).unwrap();
        assert_eq!(out[0].name, "hma9");
        assert_eq!(leading_undefined(&out[0].values), 10);
    }

    #[test]
    fn period_one_rejected() {
        assert!(Hull::new(1, Field::Price).validate(10).is_err());
    }
}
