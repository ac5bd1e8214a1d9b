//! Scalar Kalman smoother over a price stream.
//!
//! Random-walk state model with fixed process variance Q and measurement
//! variance R. Seeded with the first defined observation and P = 1, so the
//! output is defined from that index on.

use crate::domain::{Field, TimeSeries};
use crate::error::{check_non_negative, EngineError};
use crate::indicator::{Indicator, IndicatorOutput};
use crate::series::Series;

const NAME: &str = "kalman";

const INITIAL_ERROR_VARIANCE: f64 = 1.0;

/// Posterior estimate and error variance carried from one observation to the next.
#[derive(Debug, Clone)]
pub struct KalmanSmoother {
    process_variance: f64,
    measurement_variance: f64,
    estimate: Option<f64>,
    error_variance: f64,
}

impl KalmanSmoother {
    pub fn new(process_variance: f64, measurement_variance: f64) -> Self {
        Self {
            process_variance,
            measurement_variance,
            estimate: None,
            error_variance: INITIAL_ERROR_VARIANCE,
        }
    }

    pub fn estimate(&self) -> Option<f64> {
        self.estimate
    }

    pub fn error_variance(&self) -> f64 {
        self.error_variance
    }

    /// Gain the next update would apply.
    pub fn gain(&self) -> f64 {
        let predicted = self.error_variance + self.process_variance;
        predicted / (predicted + self.measurement_variance)
    }

    /// Fold one observation into the state. Undefined observations leave it as is.
    pub fn update(&mut self, observation: Option<f64>) -> Option<f64> {
        let z = observation?;
        let next = match self.estimate {
            None => z,
            Some(prev) => {
                let predicted = self.error_variance + self.process_variance;
                let gain = predicted / (predicted + self.measurement_variance);
                self.error_variance = (1.0 - gain) * predicted;
                prev + gain * (z - prev)
            }
        };
        self.estimate = Some(next);
        Some(next)
    }

    pub fn scan(&mut self, values: &[Option<f64>]) -> Series {
        values.iter().map(|&z| self.update(z)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Kalman {
    process_variance: f64,
    measurement_variance: f64,
    source: Field,
}

impl Kalman {
    pub fn new(process_variance: f64, measurement_variance: f64, source: Field) -> Self {
        Self {
            process_variance,
            measurement_variance,
            source,
        }
    }
}

impl Indicator for Kalman {
    fn name(&self) -> &str {
        NAME
    }

    fn outputs(&self) -> Vec<String> {
        vec![NAME.to_string()]
    }

    fn lookback(&self) -> usize {
        0
    }

    fn required_fields(&self) -> Vec<Field> {
        vec![self.source]
    }

    fn validate(&self, len: usize) -> Result<(), EngineError> {
        check_non_negative(NAME, "process_variance", self.process_variance)?;
        check_non_negative(NAME, "measurement_variance", self.measurement_variance)?;
        if self.process_variance == 0.0 && self.measurement_variance == 0.0 {
            return Err(EngineError::invalid(
                NAME,
                "measurement_variance",
                "process and measurement variance cannot both be zero",
            ));
        }
        if len == 0 {
            return Err(EngineError::InsufficientHistory {
                indicator: NAME.to_string(),
                parameter: "series",
                required: 1,
                available: 0,
            });
        }
        Ok(())
    }

    fn compute(&self, series: &TimeSeries) -> Result<Vec<IndicatorOutput>, EngineError> {
        self.validate(series.len())?;
        let values = series.field(NAME, self.source)?;
        let mut smoother = KalmanSmoother::new(self.process_variance, self.measurement_variance);
        Ok(vec![IndicatorOutput::new(NAME, smoother.scan(&values))])
    }
}
