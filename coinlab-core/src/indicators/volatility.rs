//! Historical (realized) volatility.
//!
//! Sample std of log returns ln(x[i] / x[i-1]) over `window`, annualized with
//! the 365-day calendar of a market that never closes, in percent.
//! Lookback: window (the first return exists at index 1).

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::{map, rolling_std, Series};

const NAME: &str = "hist_vol";

/// Trading periods per year for daily crypto data.
pub const PERIODS_PER_YEAR: f64 = 365.0;

/// Log returns; index 0 and any non-positive price are undefined.
pub fn log_returns(values: &[Option<f64>]) -> Series {
    let n = values.len();
    let mut result = vec![None; n];
    for i in 1..n {
        if let (Some(prev), Some(curr)) = (values[i - 1], values[i]) {
            if prev > 0.0 && curr > 0.0 {
                result[i] = Some((curr / prev).ln());
            }
        }
    }
    result
}

pub fn historical_volatility(values: &[Option<f64>], window: usize) -> Series {
    let annualize = PERIODS_PER_YEAR.sqrt() * 100.0;
    map(&rolling_std(&log_returns(values), window), |sd| {
        Some(sd * annualize)
    })
}

#[derive(Debug, Clone)]
pub struct HistoricalVolatility {
    window: usize,
    source: Field,
}

impl HistoricalVolatility {
    pub fn new(window: usize, source: Field) -> Self {
        Self { window, source }
    }
}

impl Indicator for HistoricalVolatility {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![NAME.to_string()]
    }

    fn lookback(&self) -> usize {
        self.window
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
        Ok(vec![IndicatorOutput::new(
            NAME,
            historical_volatility(&values, self.window),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series};
    use crate::series::defined;

    #[test]
    fn constant_growth_has_zero_volatility() {
        let series = make_series(&[1.0, 2.0, 4.0, 8.0, 16.0]);
        let out = HistoricalVolatility::new(3, Field::Price)
            .compute(&series)
            .unwrap();
        let v = &out[0].values;
        assert!(v[..3].iter().all(Option::is_none));
        assert_eq!(v[3], Some(0.0));
        assert_eq!(v[4], Some(0.0));
    }

    #[test]
    fn annualized_sample_std_of_log_returns() {
        let prices: [f64; 4] = [100.0, 110.0, 99.0, 108.9];
        let r: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
        let mean = r.iter().sum::<f64>() / 3.0;
        let var = r.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 2.0;
        let expected = var.sqrt() * 365.0_f64.sqrt() * 100.0;

        let v = historical_volatility(&defined(&prices), 3);
        assert_approx(v[3].unwrap(), expected, 1e-9);
    }

    #[test]
    fn non_positive_price_is_undefined() {
        let r = log_returns(&defined(&[1.0, 0.0, 2.0]));
        assert_eq!(r, vec![None, None, None]);
    }

    #[test]
    fn lookback_counts_the_missing_first_return() {
        assert_eq!(HistoricalVolatility::new(30, Field::Price).lookback(), 30);
    }
}
