//! SuperTrend.
//!
//! Basic bands around the bar midpoint: (high + low) / 2 ± multiplier * ATR(period).
//! Final bands ratchet: the upper band only moves down (and the lower band only up)
//! unless the previous close broke through it. The trend flips down when the close
//! falls below the final lower band and back up when it rises above the final
//! upper band. The line is the lower band in an uptrend, the upper band in a
//! downtrend.
//!
//! The state starts at the first defined ATR with final bands equal to the basic
//! bands and an uptrend. Lookback: period - 1.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_non_negative, check_window, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::indicators::atr::{average_true_range, hlc, HLC};
use crate::series::Series;

const NAME: &str = "supertrend";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// +1 for up, -1 for down.
    pub fn direction(self) -> f64 {
        match self {
            Trend::Up => 1.0,
            Trend::Down => -1.0,
        }
    }
}

/// Finalized bands and trend at one index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupertrendState {
    pub upper: f64,
    pub lower: f64,
    pub trend: Trend,
}

impl SupertrendState {
    pub fn value(&self) -> f64 {
        match self.trend {
            Trend::Up => self.lower,
            Trend::Down => self.upper,
        }
    }
}

/// Left-to-right band/trend state machine.
#[derive(Debug, Clone)]
pub struct SupertrendEngine {
    multiplier: f64,
    state: Option<SupertrendState>,
    prev_close: Option<f64>,
}

impl SupertrendEngine {
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier,
            state: None,
            prev_close: None,
        }
    }

    pub fn state(&self) -> Option<SupertrendState> {
        self.state
    }

    /// Advance one bar. Returns `None` while the ATR is undefined.
    pub fn step(&mut self, high: f64, low: f64, close: f64, atr: Option<f64>) -> Option<SupertrendState> {
        let prev_close = self.prev_close.replace(close);
        let atr = atr?;

        let mid = (high + low) / 2.0;
        let basic_upper = mid + self.multiplier * atr;
        let basic_lower = mid - self.multiplier * atr;

        let next = match (self.state, prev_close) {
            (Some(prev), Some(pc)) => {
                let upper = if basic_upper < prev.upper || pc > prev.upper {
                    basic_upper
                } else {
                    prev.upper
                };
                let lower = if basic_lower > prev.lower || pc < prev.lower {
                    basic_lower
                } else {
                    prev.lower
                };
                let trend = match prev.trend {
                    Trend::Up if close < lower => Trend::Down,
                    Trend::Down if close > upper => Trend::Up,
                    held => held,
                };
                SupertrendState { upper, lower, trend }
            }
            _ => SupertrendState {
                upper: basic_upper,
                lower: basic_lower,
                trend: Trend::Up,
            },
        };

        self.state = Some(next);
        Some(next)
    }

    /// Run over aligned high/low/close/ATR series.
    pub fn scan(
        &mut self,
        high: &[Option<f64>],
        low: &[Option<f64>],
        close: &[Option<f64>],
        atr: &[Option<f64>],
    ) -> Vec<Option<SupertrendState>> {
        (0..high.len())
            .map(|i| match (high[i], low[i], close[i]) {
                (Some(h), Some(l), Some(c)) => self.step(h, l, c, atr[i]),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
}

impl Supertrend {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self { period, multiplier }
    }
}

impl Default for Supertrend {
    fn default() -> Self {
        Self::new(10, 3.0)
    }
}

impl Indicator for Supertrend {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![NAME.to_string(), "supertrend_trend".to_string()]
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn required_fields(&self) -> Vec<Field> {
        HLC.to_vec()
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_window(NAME, "period", self.period, 1, len)?;
        check_non_negative(NAME, "multiplier", self.multiplier)
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let (high, low, close) = hlc(series, NAME)?;
        let atr = average_true_range(&high, &low, &close, self.period);

        let states = SupertrendEngine::new(self.multiplier).scan(&high, &low, &close, &atr);
        let line: Series = states.iter().map(|s| s.map(|s| s.value())).collect();
        let trend: Series = states
            .iter()
            .map(|s| s.map(|s| s.trend.direction()))
            .collect();

        Ok(vec![
            IndicatorOutput::new(NAME, line),
            IndicatorOutput::new("supertrend_trend", trend),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_ohlc_series, make_series};
    use crate::series::leading_undefined;

    #[test]
    fn engine_ratchets_and_flips() {
        let mut engine = SupertrendEngine::new(1.0);

        // seed: mid 10, bands 11 / 9, up
        let s0 = engine.step(11.0, 9.0, 10.0, Some(1.0)).unwrap();
        assert_eq!((s0.upper, s0.lower, s0.trend), (11.0, 9.0, Trend::Up));
        assert_eq!(s0.value(), 9.0);

        // basic 13 / 11: upper held at 11, lower ratchets up to 11
        let s1 = engine.step(13.0, 11.0, 12.0, Some(1.0)).unwrap();
        assert_eq!((s1.upper, s1.lower, s1.trend), (11.0, 11.0, Trend::Up));

        // basic 9 / 7: upper drops to 9, lower held; close 8 < 11 flips down
        let s2 = engine.step(9.0, 7.0, 8.0, Some(1.0)).unwrap();
        assert_eq!((s2.upper, s2.lower, s2.trend), (9.0, 11.0, Trend::Down));
        assert_eq!(s2.value(), 9.0);

        // basic 11 / 9: upper held at 9; previous close 8 broke the lower band so
        // it resets to 9; close 10 > 9 flips back up
        let s3 = engine.step(11.0, 9.0, 10.0, Some(1.0)).unwrap();
        assert_eq!((s3.upper, s3.lower, s3.trend), (9.0, 9.0, Trend::Up));
        assert_eq!(s3.value(), 9.0);
    }

    #[test]
    fn undefined_atr_defers_the_seed() {
        let mut engine = SupertrendEngine::new(2.0);
        assert!(engine.step(11.0, 9.0, 10.0, None).is_none());
        assert!(engine.state().is_none());
        let s = engine.step(12.0, 10.0, 11.0, Some(1.0)).unwrap();
        assert_eq!((s.upper, s.lower, s.trend), (13.0, 9.0, Trend::Up));
    }

    #[test]
    fn warmup_and_outputs() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.4).sin() * 8.0).collect();
        let indicator = Supertrend::default();
        let out = indicator.compute(&make_series(&prices)).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].name, "supertrend_trend");
        assert_eq!(leading_undefined(&out[0].values), 9);
        assert_eq!(leading_undefined(&out[1].values), 9);
        assert!(out[1].values[9..]
            .iter()
            .all(|t| matches!(t, Some(d) if *d == 1.0 || *d == -1.0)));
    }

    #[test]
    fn steady_uptrend_stays_up() {
        let bars: Vec<(f64, f64, f64)> = (0..30)
            .map(|i| {
                let c = 100.0 + i as f64;
                (c + 0.5, c - 0.5, c)
            })
            .collect();
        let out = Supertrend::new(5, 2.0).compute(&make_ohlc_series(&bars)).unwrap();
        assert!(out[1].values[4..].iter().all(|t| *t == Some(1.0)));
        for i in 4..30 {
            assert!(out[0].values[i].unwrap() < bars[i].2);
        }
    }

    #[test]
    fn negative_multiplier_rejected() {
        assert!(Supertrend::new(10, -1.0).validate(20).is_err());
    }
}
