//! Indicator trait and the aligned output container.
//!
//! Indicators are pure functions: time series and fixed parameters in, one or
//! more aligned numeric series out. Nothing is cached or carried between runs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{Field, TimeSeries};
use crate::error::EngineError;
use crate::series::Series;

/// Trait for catalogue indicators.
///
/// # Look-ahead contamination guard
/// No causal output value at index t may depend on samples after t. The only
/// exception is a deliberately advanced series (Ichimoku's lagging span).
pub trait Indicator: Send + Sync {
    /// Catalogue name (e.g. "rsi", "macd").
    fn name(&self) -> &str;

    /// Names of the series `compute` returns, in order.
    fn outputs(&self) -> Vec<String>;

    /// Leading undefined entries on fully defined input; every output is
    /// defined from this index on (trailing shifts aside).
    fn lookback(&self) -> usize;

    /// Sample fields the indicator reads.
    fn required_fields(&self) -> Vec<Field>;

    /// Check parameters against the number of available samples.
    fn validate(&self, len: usize) -> Result<(), EngineError>;

    /// Compute every output over the whole series.
    ///
    /// Each returned output has exactly `series.len()` entries.
    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError>;
}

/// A named, index-aligned output series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorOutput {
    pub name: String,
    pub values: Series,
}

impl IndicatorOutput {
    pub fn new(name: impl Into<String>, values: Series) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Container of computed outputs, aligned to the input timestamps.
///
/// Names are kept sorted so iteration order is deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorValues {
    timestamps: Vec<DateTime<Utc>>,
    series: BTreeMap<String, Series>,
}

impl IndicatorValues {
    pub fn new(timestamps: Vec<DateTime<Utc>>) -> Self {
        Self {
            timestamps,
            series: BTreeMap::new(),
        }
    }

    /// Insert a named series.
    pub fn insert(&mut self, name: impl Into<String>, values: Series) {
        debug_assert_eq!(values.len(), self.timestamps.len());
        self.series.insert(name.into(), values);
    }

    /// Value of `name` at `index`: `None` if unknown or out of bounds,
    /// `Some(None)` if the value is undefined there.
    pub fn get(&self, name: &str, index: usize) -> Option<Option<f64>> {
        self.series.get(name).and_then(|v| v.get(index).copied())
    }

    pub fn get_series(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// `(timestamp, value)` pairs for `name`, undefined entries included.
    pub fn points(&self, name: &str) -> Option<Vec<(DateTime<Utc>, Option<f64>)>> {
        self.series
            .get(name)
            .map(|v| self.timestamps.iter().copied().zip(v.iter().copied()).collect())
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
