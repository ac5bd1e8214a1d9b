//! Aligned numeric series and the kernels every indicator is built from.
//!
//! A [`Series`] has one entry per input sample. `None` marks an index where the
//! value is undefined (warm-up, zero denominator, undefined operand); it is
//! never replaced by zero or NaN.

pub mod shift;
pub mod smoothing;
pub mod wma;
pub mod window;

pub use shift::shift;
pub use smoothing::{ema, wilder, RecursiveSmoother, Smoothing};
pub use wma::wma;
pub use window::{rolling_max, rolling_mean, rolling_min, rolling_std, rolling_sum};
pub use window::{Aggregate, WindowAggregator};

/// One value per sample; `None` is undefined.
pub type Series = Vec<Option<f64>>;

/// Lift a fully defined slice into a series.
pub fn defined(values: &[f64]) -> Series {
    values.iter().map(|&v| Some(v)).collect()
}

/// Apply `f` to every defined entry.
pub fn map(values: &[Option<f64>], f: impl Fn(f64) -> Option<f64>) -> Series {
    values.iter().map(|v| v.and_then(&f)).collect()
}

/// Combine two aligned series; the result is undefined wherever either input is.
pub fn combine(
    a: &[Option<f64>],
    b: &[Option<f64>],
    f: impl Fn(f64, f64) -> Option<f64>,
) -> Series {
    debug_assert_eq!(a.len(), b.len(), "combine: series not aligned");
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => f(*x, *y),
            _ => None,
        })
        .collect()
}

/// Number of leading undefined entries.
pub fn leading_undefined(values: &[Option<f64>]) -> usize {
    values.iter().take_while(|v| v.is_none()).count()
}
