//! Look-ahead contamination tests for every causal catalogue output.
//!
//! No indicator value at index t may depend on samples t+1 or later.
//!
//! Method: compute on a truncated series (samples 0..100) and the full series
//! (samples 0..200). Indices 0..100 must be identical between both runs. The
//! Ichimoku lagging span reads the future by construction and is excluded.

use chrono::{Duration, TimeZone, Utc};
use coinlab_core::domain::{Field, Sample, TimeSeries};
use coinlab_core::indicator::Indicator;
use coinlab_core::indicators::*;

/// Generate N samples of synthetic OHLC data with realistic variation.
fn make_test_series(n: usize) -> TimeSeries {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let mut samples = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = price.max(10.0);

        let close = price + 0.3;
        let high = close + 2.0;
        let low = close - 2.5;

        let mut sample = Sample::hlc(base + Duration::days(i as i64), high, low, close);
        sample.volume = Some(1000.0 + i as f64 * 100.0);
        samples.push(sample);
    }

    TimeSeries::new(samples).unwrap()
}

fn truncate(series: &TimeSeries, len: usize) -> TimeSeries {
    TimeSeries::new(series.samples()[..len].to_vec()).unwrap()
}

/// Assert that every output (except `skip`) is identical on 0..truncated_len
/// whether computed on the truncated or the full series.
fn assert_no_lookahead(indicator: &dyn Indicator, full: &TimeSeries, truncated_len: usize, skip: &[&str]) {
    let truncated = truncate(full, truncated_len);
    let full_result = indicator.compute(full).unwrap();
    let truncated_result = indicator.compute(&truncated).unwrap();

    assert_eq!(full_result.len(), truncated_result.len());

    for (f, t) in full_result.iter().zip(&truncated_result) {
        assert_eq!(f.name, t.name);
        assert_eq!(t.values.len(), truncated_len, "{}: truncated length", t.name);
        assert_eq!(f.values.len(), full.len(), "{}: full length", f.name);
        if skip.contains(&f.name.as_str()) {
            continue;
        }

        for i in 0..truncated_len {
            match (t.values[i], f.values[i]) {
                (None, None) => {}
                (Some(tv), Some(fv)) => assert!(
                    (tv - fv).abs() < 1e-10,
                    "{}: look-ahead contamination at {i}: truncated={tv}, full={fv}",
                    f.name
                ),
                (tv, fv) => panic!(
                    "{}: definedness mismatch at {i} (truncated={tv:?}, full={fv:?})",
                    f.name
                ),
            }
        }
    }
}

#[test]
fn lookahead_moving_averages() {
    let series = make_test_series(200);
    assert_no_lookahead(&Sma::new(20, Field::Price), &series, 100, &[]);
    assert_no_lookahead(&Ema::new(20, Field::Price), &series, 100, &[]);
    assert_no_lookahead(&Hull::new(9, Field::Price), &series, 100, &[]);
    assert_no_lookahead(&Kalman::new(1e-5, 1e-2, Field::Price), &series, 100, &[]);
}

#[test]
fn lookahead_oscillators() {
    let series = make_test_series(200);
    assert_no_lookahead(&Rsi::new(14, Field::Price), &series, 100, &[]);
    assert_no_lookahead(&Macd::new(12, 26, 9, Field::Price), &series, 100, &[]);
    assert_no_lookahead(&Roc::new(12, Field::Price), &series, 100, &[]);
    assert_no_lookahead(&Coppock::new(14, 11, 10, Field::Price), &series, 100, &[]);
    assert_no_lookahead(&ZScore::new(20, Field::Price), &series, 100, &[]);
}

#[test]
fn lookahead_volatility() {
    let series = make_test_series(200);
    assert_no_lookahead(&Atr::new(14), &series, 100, &[]);
    assert_no_lookahead(&Bollinger::new(20, 2.0, Field::Price), &series, 100, &[]);
    assert_no_lookahead(&Keltner::new(20, 2.0), &series, 100, &[]);
    assert_no_lookahead(&Chop::new(14), &series, 100, &[]);
    assert_no_lookahead(&HistoricalVolatility::new(30, Field::Price), &series, 100, &[]);
}

#[test]
fn lookahead_volume_source() {
    let series = make_test_series(200);
    assert_no_lookahead(&Sma::new(10, Field::Volume), &series, 100, &[]);
    assert_no_lookahead(&Ema::new(10, Field::Volume), &series, 100, &[]);
}

#[test]
fn lookahead_supertrend() {
    let series = make_test_series(200);
    assert_no_lookahead(&Supertrend::new(10, 3.0), &series, 100, &[]);
    assert_no_lookahead(&Supertrend::new(7, 2.0), &series, 100, &[]);
}

#[test]
fn lookahead_ichimoku_except_lagging_span() {
    let series = make_test_series(200);
    assert_no_lookahead(
        &Ichimoku::new(9, 26, 52, 26),
        &series,
        100,
        &["ichimoku_chikou"],
    );
}

#[test]
fn lagging_span_does_read_the_future() {
    let series = make_test_series(200);
    let full = Ichimoku::new(9, 26, 52, 26).compute(&series).unwrap();
    let truncated = Ichimoku::new(9, 26, 52, 26)
        .compute(&truncate(&series, 100))
        .unwrap();
    let chikou_full = &full[4].values;
    let chikou_trunc = &truncated[4].values;
    // the last 26 truncated entries are undefined, the full run knows them
    assert!(chikou_trunc[74..].iter().all(Option::is_none));
    assert!(chikou_full[74..100].iter().all(Option::is_some));
}
