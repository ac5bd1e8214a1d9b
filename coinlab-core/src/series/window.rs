//! Fixed-width sliding window aggregations.
//!
//! Output index `i` aggregates the `window` most recent values ending at `i`.
//! Indices `i < window - 1` are undefined, as is any window containing an
//! undefined value.

use super::Series;

/// Aggregation applied to each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Mean,
    Sum,
    Max,
    Min,
    /// Sample standard deviation (Bessel's correction, divisor `w - 1`).
    StdDev,
}

#[derive(Debug, Clone, Copy)]
pub struct WindowAggregator {
    window: usize,
    aggregate: Aggregate,
}

impl WindowAggregator {
    pub fn new(window: usize, aggregate: Aggregate) -> Self {
        Self { window, aggregate }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn apply(&self, values: &[Option<f64>]) -> Series {
        let n = values.len();
        let w = self.window;
        let mut result = vec![None; n];

        if w == 0 || n < w {
            return result;
        }

        let mut buf = Vec::with_capacity(w);
        for i in (w - 1)..n {
            buf.clear();
            for v in &values[i + 1 - w..=i] {
                match v {
                    Some(x) => buf.push(*x),
                    None => break,
                }
            }
            if buf.len() == w {
                result[i] = aggregate(&buf, self.aggregate);
            }
        }

        result
    }
}

fn aggregate(window: &[f64], kind: Aggregate) -> Option<f64> {
    let w = window.len() as f64;
    match kind {
        Aggregate::Sum => Some(window.iter().sum()),
        Aggregate::Mean => Some(window.iter().sum::<f64>() / w),
        Aggregate::Max => window.iter().copied().reduce(f64::max),
        Aggregate::Min => window.iter().copied().reduce(f64::min),
        Aggregate::StdDev => sample_std(window),
    }
}

fn sample_std(window: &[f64]) -> Option<f64> {
    if window.len() < 2 {
        return None;
    }
    let first = window[0];
    if window.iter().all(|&v| v == first) {
        // Identical values: exactly zero, free of summation rounding.
        return Some(0.0);
    }
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let ss: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some((ss / (n - 1.0)).sqrt())
}

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Series {
    WindowAggregator::new(window, Aggregate::Mean).apply(values)
}

pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Series {
    WindowAggregator::new(window, Aggregate::Sum).apply(values)
}

pub fn rolling_max(values: &[Option<f64>], window: usize) -> Series {
    WindowAggregator::new(window, Aggregate::Max).apply(values)
}

pub fn rolling_min(values: &[Option<f64>], window: usize) -> Series {
    WindowAggregator::new(window, Aggregate::Min).apply(values)
}

pub fn rolling_std(values: &[Option<f64>], window: usize) -> Series {
    WindowAggregator::new(window, Aggregate::StdDev).apply(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use crate::series::defined;

    #[test]
    fn mean_warmup_and_values() {
        let s = defined(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let result = rolling_mean(&s, 5);
        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().enumerate().take(4) {
            assert!(v.is_none(), "expected undefined at index {i}");
        }
        assert_approx(result[4].unwrap(), 12.0, DEFAULT_EPSILON);
        assert_approx(result[5].unwrap(), 13.0, DEFAULT_EPSILON);
        assert_approx(result[6].unwrap(), 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn window_one_is_identity_for_mean() {
        let s = defined(&[100.0, 200.0, 300.0]);
        assert_eq!(rolling_mean(&s, 1), s);
    }

    #[test]
    fn sum_max_min() {
        let s = defined(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0]);
        let sum = rolling_sum(&s, 3);
        let max = rolling_max(&s, 3);
        let min = rolling_min(&s, 3);
        assert_eq!(sum[2], Some(8.0));
        assert_eq!(max[2], Some(4.0));
        assert_eq!(min[2], Some(1.0));
        assert_eq!(max[5], Some(9.0));
        assert_eq!(min[6], Some(2.0));
    }

    #[test]
    fn sample_std_uses_bessel_correction() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, sum of squares 32, /7
        let s = defined(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let result = rolling_std(&s, 8);
        assert_approx(result[7].unwrap(), (32.0_f64 / 7.0).sqrt(), DEFAULT_EPSILON);
    }

    #[test]
    fn constant_window_std_is_exactly_zero() {
        let s = defined(&[0.1, 0.1, 0.1, 0.1, 0.1]);
        let result = rolling_std(&s, 3);
        for v in &result[2..] {
            assert_eq!(*v, Some(0.0));
        }
    }

    #[test]
    fn std_of_single_value_window_is_undefined() {
        let s = defined(&[1.0, 2.0]);
        assert_eq!(rolling_std(&s, 1), vec![None, None]);
    }

    #[test]
    fn undefined_member_poisons_window() {
        let s = vec![Some(10.0), Some(11.0), None, Some(13.0), Some(14.0), Some(15.0)];
        let result = rolling_mean(&s, 3);
        assert!(result[2].is_none());
        assert!(result[3].is_none());
        assert!(result[4].is_none());
        assert_approx(result[5].unwrap(), 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn too_short_input_is_all_undefined() {
        let s = defined(&[10.0, 11.0]);
        assert!(rolling_mean(&s, 5).iter().all(Option::is_none));
    }
}
