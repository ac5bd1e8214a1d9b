//! TimeSeries: the ordered, read-only input to every indicator.

use chrono::{DateTime, Utc};

use super::sample::{Field, Sample};
use crate::error::EngineError;
use crate::series::Series;

/// Ordered samples with strictly increasing timestamps.
///
/// Gaps between timestamps are allowed. The engine never reorders samples and
/// every derived series is index-aligned to this one.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new(samples: Vec<Sample>) -> Result<Self, EngineError> {
        if let Some(index) = samples
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(EngineError::UnorderedTimestamps { index: index + 1 });
        }
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    /// Extract a fully defined field series on behalf of `indicator`.
    ///
    /// Fails with `MissingField` naming the first sample that lacks the field.
    pub fn field(&self, indicator: &str, field: Field) -> Result<Series, EngineError> {
        self.samples
            .iter()
            .enumerate()
            .map(|(index, sample)| match sample.get(field) {
                Some(v) => Ok(Some(v)),
                None => Err(EngineError::MissingField {
                    indicator: indicator.to_string(),
                    field,
                    index,
                }),
            })
            .collect()
    }

    /// Check that every sample carries all of `fields`.
    pub fn require(&self, indicator: &str, fields: &[Field]) -> Result<(), EngineError> {
        for &field in fields {
            if let Some(index) = self.samples.iter().position(|s| s.get(field).is_none()) {
                return Err(EngineError::MissingField {
                    indicator: indicator.to_string(),
                    field,
                    index,
                });
            }
        }
        Ok(())
    }
}
