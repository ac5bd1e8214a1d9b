//! JSON series documents and atomic file writes.
//!
//! Every document has the shape
//! `{ "last_updated": <RFC 3339>, "data": [{ "date": "YYYY-MM-DD", ... }] }`.
//! Undefined values are dropped, not written as null.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use coinlab_core::domain::TimeSeries;
use coinlab_core::indicator::IndicatorValues;

#[derive(Debug, Serialize)]
pub struct Document<T> {
    pub last_updated: String,
    pub data: Vec<T>,
}

impl<T> Document<T> {
    fn new(last_updated: DateTime<Utc>, data: Vec<T>) -> Self {
        Self {
            last_updated: last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
            data,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ValuePoint {
    pub date: String,
    pub value: f64,
}

fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Price history of every sample that carries a price.
pub fn price_document(series: &TimeSeries, now: DateTime<Utc>) -> Document<PricePoint> {
    let data = series
        .samples()
        .iter()
        .filter_map(|s| {
            s.price.filter(|p| p.is_finite()).map(|price| PricePoint {
                date: date(&s.timestamp),
                price,
            })
        })
        .collect();
    Document::new(now, data)
}

/// One output series with undefined rows dropped.
pub fn series_document(
    points: &[(DateTime<Utc>, Option<f64>)],
    now: DateTime<Utc>,
) -> Document<ValuePoint> {
    let data = points
        .iter()
        .filter_map(|(ts, v)| {
            v.map(|value| ValuePoint {
                date: date(ts),
                value,
            })
        })
        .collect();
    Document::new(now, data)
}

/// Serialize `payload` next to `path` and rename it into place.
pub fn write_json_atomic<T: Serialize>(path: &Path, payload: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut tmp, formatter);
    payload
        .serialize(&mut ser)
        .with_context(|| format!("serialize {}", path.display()))?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .with_context(|| format!("write {}", path.display()))?;

    debug!(path = %path.display(), "wrote document");
    Ok(())
}

/// Write the price history and one document per computed output.
///
/// Files are `<prefix>.json` and `<prefix>-<output>.json` under `dir`.
pub fn write_all(
    dir: &Path,
    prefix: &str,
    series: &TimeSeries,
    values: &IndicatorValues,
    now: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(values.len() + 1);

    let price_path = dir.join(format!("{prefix}.json"));
    write_json_atomic(&price_path, &price_document(series, now))?;
    written.push(price_path);

    for name in values.names() {
        let points = values.points(name).unwrap_or_default();
        let path = dir.join(format!("{prefix}-{name}.json"));
        write_json_atomic(&path, &series_document(&points, now))?;
        written.push(path);
    }

    Ok(written)
}
