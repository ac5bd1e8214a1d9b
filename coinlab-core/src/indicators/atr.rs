//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), TR[0] = high-low.
//! ATR is the Wilder smoothing (alpha = 1/period) of TR, seeded with TR[0].
//! Lookback: period - 1 (masked until `period` TR values were consumed).

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::{wilder, Series};

const NAME: &str = "atr";

/// High, low and close read together by every range-based indicator.
pub(crate) const HLC: [Field; 3] = [Field::High, Field::Low, Field::Close];

/// Compute the True Range series.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(high: &[Option<f64>], low: &[Option<f64>], close: &[Option<f64>]) -> Series {
    let n = high.len();
    let mut tr = vec![None; n];

    if n == 0 {
        return tr;
    }

    if let (Some(h), Some(l)) = (high[0], low[0]) {
        tr[0] = Some(h - l);
    }

    for i in 1..n {
        if let (Some(h), Some(l), Some(pc)) = (high[i], low[i], close[i - 1]) {
            tr[i] = Some((h - l).max((h - pc).abs()).max((l - pc).abs()));
        }
    }

    tr
}

/// ATR over explicit high/low/close series.
pub fn average_true_range(
    high: &[Option<f64>],
    low: &[Option<f64>],
    close: &[Option<f64>],
    period: usize,
) -> Series {
    wilder(&true_range(high, low, close), period, period)
}

/// Read high, low and close for `indicator`, failing on the first absent field.
pub(crate) fn hlc(
    series: &TimeSeries,
    indicator: &str,
) -> Result<(Series, Series, Series), EngineError> {
    Ok((
        series.field(indicator, Field::High)?,
        series.field(indicator, Field::Low)?,
        series.field(indicator, Field::Close)?,
    ))
}

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![NAME.to_string()]
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        HLC.to_vec()
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "period", self.period, 1, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let (high, low, close) = hlc(series, NAME)?;
        Ok(vec![IndicatorOutput::new(
            NAME,
            average_true_range(&high, &low, &close, self.period),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_series, DEFAULT_EPSILON};

    fn tr_of(data: &[(f64, f64, f64)]) -> Series {
        let series = make_ohlc_series(data);
        let (h, l, c) = hlc(&series, NAME).unwrap();
        true_range(&h, &l, &c)
    }

    #[test]
    fn true_range_basic() {
        let tr = tr_of(&[
            (105.0, 95.0, 102.0),  // TR = 105-95 = 10
            (108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        assert_approx(tr[0].unwrap(), 10.0, DEFAULT_EPSILON);
        assert_approx(tr[1].unwrap(), 8.0, DEFAULT_EPSILON);
        assert_approx(tr[2].unwrap(), 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        // prev close 100, bar 115/108: TR = max(7, 15, 8) = 15
        let tr = tr_of(&[(102.0, 97.0, 100.0), (115.0, 108.0, 112.0)]);
        assert_approx(tr[1].unwrap(), 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_period_3() {
        let series = make_ohlc_series(&[
            (105.0, 95.0, 102.0),  // TR = 10
            (108.0, 100.0, 106.0), // TR = 8
            (107.0, 98.0, 99.0),   // TR = 9
            (103.0, 97.0, 101.0),  // TR = 6
        ]);
        let result = &Atr::new(3).compute(&series).unwrap()[0].values;

        // seed 10, alpha 1/3
        // s[1] = 10 + (8-10)/3 = 28/3
        // s[2] = 28/3 + (9 - 28/3)/3 = 83/9
        // s[3] = 83/9 + (6 - 83/9)/3 = 220/27
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert_approx(result[2].unwrap(), 83.0 / 9.0, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 220.0 / 27.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_requires_ohlc_fields() {
        use crate::domain::Sample;
        use chrono::TimeZone;
        let ts = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let series = TimeSeries::new(vec![Sample::price(ts, 10.0)]).unwrap();
        let err = Atr::new(1).compute(&series).unwrap_err();
        assert!(matches!(err, EngineError::MissingField { field: Field::High, .. }));
    }

    #[test]
    fn atr_lookback() {
        assert_eq!(Atr::new(14).lookback(), 13);
    }
}
