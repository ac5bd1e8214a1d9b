//! Ichimoku Cloud.
//!
//! - Tenkan (conversion): midpoint of rolling high/low over `tenkan`
//! - Kijun (base): midpoint over `kijun`
//! - Span A: (tenkan + kijun) / 2, delayed by `displacement`
//! - Span B: midpoint over `senkou_b`, delayed by `displacement`
//! - Chikou (lagging): close advanced by `displacement`
//!
//! Span A/B at index i equal the un-shifted values at i - displacement. Chikou
//! reads the future by construction and ends in `displacement` undefined entries.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::indicators::atr::{hlc, HLC};
use crate::series::{combine, rolling_max, rolling_min, shift, Series};

const NAME: &str = "ichimoku";

/// Midpoint of the rolling high and rolling low over `window`.
pub fn midpoint(high: &[Option<f64>], low: &[Option<f64>], window: usize) -> Series {
    combine(
        &rolling_max(high, window),
        &rolling_min(low, window),
        |h, l| Some((h + l) / 2.0),
    )
}

#[derive(Debug, Clone)]
pub struct Ichimoku {
    tenkan: usize,
    kijun: usize,
    senkou_b: usize,
    displacement: usize,
}

impl Ichimoku {
    pub fn new(tenkan: usize, kijun: usize, senkou_b: usize, displacement: usize) -> Self {
        Self {
            tenkan,
            kijun,
            senkou_b,
            displacement,
        }
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new(9, 26, 52, 26)
    }
}

impl Indicator for Ichimoku {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        [
            "ichimoku_tenkan",
            "ichimoku_kijun",
            "ichimoku_span_a",
            "ichimoku_span_b",
            "ichimoku_chikou",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn lookback(&self) -> usize {
        self.tenkan.max(self.kijun).max(self.senkou_b).saturating_sub(1) + self.displacement
    }

    fn required_fields(&self) -> Vec<Field> {
        HLC.to_vec()
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "tenkan", self.tenkan, 1, len)?;
        check_window(NAME, "kijun", self.kijun, 1, len)?;
        check_window(NAME, "senkou_b", self.senkou_b, 1, len)?;
        check_window(NAME, "displacement", self.displacement, 1, len)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let (high, low, close) = hlc(series, NAME)?;
        let k = self.displacement as isize;

        let tenkan = midpoint(&high, &low, self.tenkan);
        let kijun = midpoint(&high, &low, self.kijun);
        let span_a = shift(&combine(&tenkan, &kijun, |t, kj| Some((t + kj) / 2.0)), k);
        let span_b = shift(&midpoint(&high, &low, self.senkou_b), k);
        let chikou = shift(&close, -k);

        Ok(vec![
            IndicatorOutput::new("ichimoku_tenkan", tenkan),
            IndicatorOutput::new("ichimoku_kijun", kijun),
            IndicatorOutput::new("ichimoku_span_a", span_a),
            IndicatorOutput::new("ichimoku_span_b", span_b),
            IndicatorOutput::new("ichimoku_chikou", chikou),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};
    use crate::series::leading_undefined;

    fn wave(n: usize) -> TimeSeries {
        let prices: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin() * 10.0).collect();
        make_series(&prices)
    }

    #[test]
    fn spans_are_shifted_midpoints() {
        let series = wave(120);
        let out = Ichimoku::default().compute(&series).unwrap();
        let (high, low, _) = hlc(&series, NAME).unwrap();
        let tenkan = midpoint(&high, &low, 9);
        let kijun = midpoint(&high, &low, 26);
        let mid_52 = midpoint(&high, &low, 52);

        let span_a = &out[2].values;
        let span_b = &out[3].values;
        for i in 0..26 {
            assert!(span_a[i].is_none());
            assert!(span_b[i].is_none());
        }
        for i in 26..120 {
            let expected_a = match (tenkan[i - 26], kijun[i - 26]) {
                (Some(t), Some(k)) => Some((t + k) / 2.0),
                _ => None,
            };
            assert_eq!(span_a[i], expected_a, "span A mismatch at {i}");
            assert_eq!(span_b[i], mid_52[i - 26], "span B mismatch at {i}");
        }
    }

    #[test]
    fn warmup_lengths() {
        let out = Ichimoku::default().compute(&wave(120)).unwrap();
        assert_eq!(leading_undefined(&out[0].values), 8);
        assert_eq!(leading_undefined(&out[1].values), 25);
        assert_eq!(leading_undefined(&out[2].values), 25 + 26);
        assert_eq!(leading_undefined(&out[3].values), 51 + 26);
        assert_eq!(Ichimoku::default().lookback(), 77);
    }

    #[test]
    fn chikou_is_close_advanced() {
        let series = wave(60);
        let out = Ichimoku::default().compute(&series).unwrap();
        let chikou = &out[4].values;
        for i in 0..34 {
            let close = series.samples()[i + 26].close.unwrap();
            assert_approx(chikou[i].unwrap(), close, DEFAULT_EPSILON);
        }
        assert!(chikou[34..].iter().all(Option::is_none));
    }

    #[test]
    fn tenkan_midpoint_value() {
        // make_series: high = p + 1, low = p - 1
        let series = make_series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let out = Ichimoku::new(9, 9, 9, 1).compute(&series).unwrap();
        // window 0..=8: max high 10, min low 0 -> 5
        assert_approx(out[0].values[8].unwrap(), 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn requires_history_for_slowest_window() {
        let err = Ichimoku::default().compute(&wave(40)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientHistory {
                parameter: "senkou_b",
                ..
            }
        ));
    }
}
