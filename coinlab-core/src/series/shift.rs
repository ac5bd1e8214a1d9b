//! Time shift: re-index a series by a fixed offset.

use super::Series;

/// Shift by `k` positions.
///
/// `k > 0` delays: index `i` takes the value at `i - k`, leaving `k` leading
/// undefined entries. `k < 0` advances: index `i` takes the value at `i + |k|`,
/// leaving `|k|` trailing undefined entries.
pub fn shift(values: &[Option<f64>], k: isize) -> Series {
    let n = values.len();
    let offset = k.unsigned_abs();
    let mut result = vec![None; n];

    if offset >= n {
        return result;
    }

    if k >= 0 {
        result[offset..].copy_from_slice(&values[..n - offset]);
    } else {
        result[..n - offset].copy_from_slice(&values[offset..]);
    }

    result
}
