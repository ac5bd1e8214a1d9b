//! Batch computation of the configured indicators over one time series.
//!
//! Every indicator is validated before any is computed. Indicators are
//! independent, so they run in parallel; each recurrence stays sequential
//! inside its own `compute`.

use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::domain::TimeSeries;
use crate::error::EngineError;
use crate::indicator::{Indicator, IndicatorOutput, IndicatorValues};

use super::config::EngineConfig;
use super::factory::build_indicators;

pub struct Engine {
    indicators: Vec<Box<dyn Indicator>>,
    parallel: bool,
}

impl Engine {
    /// Build the configured indicators, rejecting duplicate output names.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Self::from_indicators(build_indicators(&config.indicators))
    }

    pub fn from_indicators(indicators: Vec<Box<dyn Indicator>>) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for name in indicators.iter().flat_map(|i| i.outputs()) {
            if !seen.insert(name.clone()) {
                return Err(EngineError::DuplicateOutput { name });
            }
        }
        Ok(Self {
            indicators,
            parallel: true,
        })
    }

    /// Toggle parallel execution across indicators (on by default).
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn indicators(&self) -> &[Box<dyn Indicator>] {
        &self.indicators
    }

    /// Every output name, in configuration order.
    pub fn outputs(&self) -> Vec<String> {
        self.indicators.iter().flat_map(|i| i.outputs()).collect()
    }

    /// Longest warm-up among the configured indicators.
    pub fn warmup(&self) -> usize {
        compute_warmup(&self.indicators)
    }

    /// Check parameters and required fields of every indicator against `series`.
    pub fn validate(&self, series: &TimeSeries) -> Result<(), EngineError> {
        for indicator in &self.indicators {
            indicator.validate(series.len())?;
            series.require(indicator.name(), &indicator.required_fields())?;
        }
        Ok(())
    }

    /// Compute every configured indicator over `series`.
    pub fn compute(&self, series: &TimeSeries) -> Result<IndicatorValues, EngineError> {
        self.validate(series)?;

        let results: Vec<Vec<IndicatorOutput>> = if self.parallel {
            self.indicators
                .par_iter()
                .map(|indicator| run_one(indicator.as_ref(), series))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            self.indicators
                .iter()
                .map(|indicator| run_one(indicator.as_ref(), series))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut values = IndicatorValues::new(series.timestamps());
        for output in results.into_iter().flatten() {
            values.insert(output.name, output.values);
        }

        info!(
            samples = series.len(),
            indicators = self.indicators.len(),
            outputs = values.len(),
            "indicator run complete"
        );
        Ok(values)
    }
}

fn run_one(
    indicator: &dyn Indicator,
    series: &TimeSeries,
) -> Result<Vec<IndicatorOutput>, EngineError> {
    debug!(
        indicator = indicator.name(),
        lookback = indicator.lookback(),
        samples = series.len(),
        "computing indicator"
    );
    let outputs = indicator.compute(series)?;
    for output in &outputs {
        if output.values.len() != series.len() {
            return Err(EngineError::MisalignedOutput {
                indicator: indicator.name().to_string(),
                name: output.name.clone(),
                expected: series.len(),
                actual: output.values.len(),
            });
        }
    }
    Ok(outputs)
}

/// The warm-up is the maximum lookback across all indicators.
pub fn compute_warmup(indicators: &[Box<dyn Indicator>]) -> usize {
    indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
}
