//! Structured error types for the indicator engine.
//!
//! Only configuration problems and absent input data are errors. A value that
//! cannot be computed at a single index (warm-up, zero denominator) is `None`
//! in the output series, never an `EngineError`.

use thiserror::Error;

use crate::domain::Field;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{indicator}: invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        indicator: String,
        parameter: &'static str,
        reason: String,
    },

    #[error(
        "{indicator}: parameter '{parameter}' needs {required} samples but only {available} are available"
    )]
    InsufficientHistory {
        indicator: String,
        parameter: &'static str,
        required: usize,
        available: usize,
    },

    #[error("{indicator}: required field '{field}' is missing at sample {index}")]
    MissingField {
        indicator: String,
        field: Field,
        index: usize,
    },

    #[error("timestamps must be strictly increasing (violated at sample {index})")]
    UnorderedTimestamps { index: usize },

    #[error("output '{name}' is produced by more than one configured indicator")]
    DuplicateOutput { name: String },

    #[error("{indicator}: output '{name}' has {actual} entries, expected {expected}")]
    MisalignedOutput {
        indicator: String,
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("engine config: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn invalid(
        indicator: &str,
        parameter: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            indicator: indicator.to_string(),
            parameter,
            reason: reason.into(),
        }
    }
}

/// Check that a window-like parameter is at least `min` and fits in `available` samples.
pub(crate) fn check_window(
    indicator: &str,
    parameter: &'static str,
    value: usize,
    min: usize,
    available: usize,
) -> Result<(), EngineError> {
    if value < min {
        return Err(EngineError::invalid(
            indicator,
            parameter,
            format!("must be >= {min}, got {value}"),
        ));
    }
    if value > available {
        return Err(EngineError::InsufficientHistory {
            indicator: indicator.to_string(),
            parameter,
            required: value,
            available,
        });
    }
    Ok(())
}

/// Check that a real-valued parameter is finite and not negative.
pub(crate) fn check_non_negative(
    indicator: &str,
    parameter: &'static str,
    value: f64,
) -> Result<(), EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::invalid(
            indicator,
            parameter,
            format!("must be a finite value >= 0, got {value}"),
        ));
    }
    Ok(())
}
