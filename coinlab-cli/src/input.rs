//! CSV sample loader.
//!
//! Expected header: `timestamp` (Unix milliseconds) plus any of `price`,
//! `volume`, `high`, `low`, `close`. Empty cells and absent columns leave the
//! field unset.

use anyhow::{anyhow, Context, Result};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use coinlab_core::domain::{Sample, TimeSeries};

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: i64,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    close: Option<f64>,
}

impl CsvRow {
    fn into_sample(self) -> Result<Sample> {
        let timestamp = Utc
            .timestamp_millis_opt(self.timestamp)
            .single()
            .ok_or_else(|| anyhow!("timestamp {} out of range", self.timestamp))?;
        Ok(Sample {
            timestamp,
            price: self.price,
            volume: self.volume,
            high: self.high,
            low: self.low,
            close: self.close,
        })
    }
}

/// Parse samples from any CSV reader.
pub fn read_samples<R: Read>(reader: R) -> Result<TimeSeries> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut samples = Vec::new();

    for (i, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("parse CSV row {}", i + 1))?;
        samples.push(row.into_sample().with_context(|| format!("CSV row {}", i + 1))?);
    }

    Ok(TimeSeries::new(samples)?)
}

/// Load a sample file.
pub fn load_samples(path: &Path) -> Result<TimeSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open sample file {}", path.display()))?;
    read_samples(file).with_context(|| format!("load samples from {}", path.display()))
}
