//! Recursive exponential smoothing (plain EMA and Wilder's variant).
//!
//! s[i] = alpha * x[i] + (1 - alpha) * s[i-1], seeded with the first defined
//! input. Plain EMA uses alpha = 2 / (span + 1); Wilder uses alpha = 1 / period.
//!
//! The recurrence is strictly sequential and is exposed as a small stateful
//! accumulator. `min_periods` masks the output until that many defined inputs
//! have been consumed; the state itself always starts at the seed.

use super::Series;

/// Decay constant derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    Ema { span: usize },
    Wilder { period: usize },
}

impl Smoothing {
    pub fn alpha(self) -> f64 {
        match self {
            Smoothing::Ema { span } => 2.0 / (span as f64 + 1.0),
            Smoothing::Wilder { period } => 1.0 / period as f64,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecursiveSmoother {
    alpha: f64,
    min_periods: usize,
    seen: usize,
    state: Option<f64>,
}

impl RecursiveSmoother {
    pub fn new(smoothing: Smoothing) -> Self {
        Self {
            alpha: smoothing.alpha(),
            min_periods: 1,
            seen: 0,
            state: None,
        }
    }

    /// Mask outputs until `min_periods` defined inputs have been seen.
    pub fn with_min_periods(mut self, min_periods: usize) -> Self {
        self.min_periods = min_periods.max(1);
        self
    }

    /// Current smoothed value, regardless of warm-up masking.
    pub fn state(&self) -> Option<f64> {
        self.state
    }

    /// Feed one input and return the (possibly masked) output at that index.
    ///
    /// An undefined input leaves the state untouched and yields undefined.
    pub fn update(&mut self, x: Option<f64>) -> Option<f64> {
        let x = x?;
        let next = match self.state {
            None => x,
            // s = s' + alpha * (x - s')
            Some(prev) => prev + self.alpha * (x - prev),
        };
        self.state = Some(next);
        self.seen += 1;
        (self.seen >= self.min_periods).then_some(next)
    }

    /// Run the recurrence over a whole series, left to right.
    pub fn scan(&mut self, values: &[Option<f64>]) -> Series {
        values.iter().map(|&x| self.update(x)).collect()
    }
}

/// Plain EMA, defined from the first defined input.
pub fn ema(values: &[Option<f64>], span: usize) -> Series {
    RecursiveSmoother::new(Smoothing::Ema { span }).scan(values)
}

/// Wilder smoothing, masked until `min_periods` defined inputs were consumed.
pub fn wilder(values: &[Option<f64>], period: usize, min_periods: usize) -> Series {
    RecursiveSmoother::new(Smoothing::Wilder { period })
        .with_min_periods(min_periods)
        .scan(values)
}
