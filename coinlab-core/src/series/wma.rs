//! Linearly weighted moving average.
//!
//! WMA[i] = (x[i]*p + x[i-1]*(p-1) + ... + x[i-p+1]*1) / (p*(p+1)/2)
//! Lookback: period - 1.

use super::Series;

pub fn wma(values: &[Option<f64>], period: usize) -> Series {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 || n < period {
        return result;
    }

    let denom = (period * (period + 1)) as f64 / 2.0;

    'outer: for i in (period - 1)..n {
        let start = i + 1 - period;
        let mut acc = 0.0;
        for (offset, v) in values[start..=i].iter().enumerate() {
            match v {
                // oldest sample gets weight 1, newest gets `period`
                Some(x) => acc += x * (offset + 1) as f64,
                None => continue 'outer,
            }
        }
        result[i] = Some(acc / denom);
    }

    result
}
