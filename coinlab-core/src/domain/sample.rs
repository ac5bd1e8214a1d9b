//! Sample: one timestamped observation of an asset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric field of a sample an indicator can read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[default]
    Price,
    Volume,
    High,
    Low,
    Close,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Price,
        Field::Volume,
        Field::High,
        Field::Low,
        Field::Close,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Price => "price",
            Field::Volume => "volume",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A daily observation as delivered by the market-data client.
///
/// Every numeric field is optional: the price chart and the OHLC feed are
/// separate upstream endpoints and a sample may carry either subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
}

impl Sample {
    /// Sample carrying only a price.
    pub fn price(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self {
            timestamp,
            price: Some(price),
            volume: None,
            high: None,
            low: None,
            close: None,
        }
    }

    /// Sample carrying high/low/close; price mirrors close.
    pub fn hlc(timestamp: DateTime<Utc>, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            price: Some(close),
            volume: None,
            high: Some(high),
            low: Some(low),
            close: Some(close),
        }
    }

    /// Value of `field`, or `None` if absent or not finite.
    pub fn get(&self, field: Field) -> Option<f64> {
        let raw = match field {
            Field::Price => self.price,
            Field::Volume => self.volume,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
        };
        raw.filter(|v| v.is_finite())
    }

    /// Basic OHLC sanity check: high >= low and close inside the range.
    ///
    /// Returns `true` when the sample carries no OHLC data at all.
    pub fn is_sane(&self) -> bool {
        match (self.get(Field::High), self.get(Field::Low), self.get(Field::Close)) {
            (Some(h), Some(l), Some(c)) => h >= l && c <= h && c >= l,
            (Some(h), Some(l), None) => h >= l,
            _ => true,
        }
    }
}
