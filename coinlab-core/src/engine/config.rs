//! Engine configuration: which indicators to run and with which parameters.
//!
//! Stored as TOML, one `[[indicators]]` table per entry tagged by `type`.
//! Parameters left out of a table take the catalogue defaults.
//!
//! ```toml
//! [[indicators]]
//! type = "rsi"
//! window = 14
//!
//! [[indicators]]
//! type = "bollinger"
//! source = "close"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::Field;
use crate::error::EngineError;

fn default_usize<const N: usize>() -> usize {
    N
}

fn default_band_width() -> f64 {
    2.0
}

fn default_supertrend_multiplier() -> f64 {
    3.0
}

fn default_process_variance() -> f64 {
    1e-5
}

fn default_measurement_variance() -> f64 {
    1e-2
}

/// One configured indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorConfig {
    Sma {
        #[serde(default = "default_usize::<20>")]
        window: usize,
        #[serde(default)]
        source: Field,
    },
    Ema {
        #[serde(default = "default_usize::<20>")]
        span: usize,
        #[serde(default)]
        source: Field,
    },
    Rsi {
        #[serde(default = "default_usize::<14>")]
        window: usize,
        #[serde(default)]
        source: Field,
    },
    Atr {
        #[serde(default = "default_usize::<14>")]
        period: usize,
    },
    Macd {
        #[serde(default = "default_usize::<12>")]
        fast: usize,
        #[serde(default = "default_usize::<26>")]
        slow: usize,
        #[serde(default = "default_usize::<9>")]
        signal: usize,
        #[serde(default)]
        source: Field,
    },
    Keltner {
        #[serde(default = "default_usize::<20>")]
        window: usize,
        #[serde(default = "default_band_width")]
        multiplier: f64,
    },
    Bollinger {
        #[serde(default = "default_usize::<20>")]
        window: usize,
        #[serde(default = "default_band_width")]
        num_std: f64,
        #[serde(default)]
        source: Field,
    },
    Ichimoku {
        #[serde(default = "default_usize::<9>")]
        tenkan: usize,
        #[serde(default = "default_usize::<26>")]
        kijun: usize,
        #[serde(default = "default_usize::<52>")]
        senkou_b: usize,
        #[serde(default = "default_usize::<26>")]
        displacement: usize,
    },
    Chop {
        #[serde(default = "default_usize::<14>")]
        window: usize,
    },
    Zscore {
        #[serde(default = "default_usize::<20>")]
        window: usize,
        #[serde(default)]
        source: Field,
    },
    HistVol {
        #[serde(default = "default_usize::<30>")]
        window: usize,
        #[serde(default)]
        source: Field,
    },
    Roc {
        #[serde(default = "default_usize::<12>")]
        period: usize,
        #[serde(default)]
        source: Field,
    },
    Coppock {
        #[serde(default = "default_usize::<14>")]
        long_roc: usize,
        #[serde(default = "default_usize::<11>")]
        short_roc: usize,
        #[serde(default = "default_usize::<10>")]
        wma: usize,
        #[serde(default)]
        source: Field,
    },
    Hma {
        #[serde(default = "default_usize::<9>")]
        period: usize,
        #[serde(default)]
        source: Field,
    },
    Kalman {
        #[serde(default = "default_process_variance")]
        process_variance: f64,
        #[serde(default = "default_measurement_variance")]
        measurement_variance: f64,
        #[serde(default)]
        source: Field,
    },
    Supertrend {
        #[serde(default = "default_usize::<10>")]
        period: usize,
        #[serde(default = "default_supertrend_multiplier")]
        multiplier: f64,
    },
}

impl IndicatorConfig {
    /// Every catalogue indicator with its default parameters.
    pub fn catalogue() -> Vec<IndicatorConfig> {
        let source = Field::Price;
        vec![
            IndicatorConfig::Sma { window: 20, source },
            IndicatorConfig::Ema { span: 20, source },
            IndicatorConfig::Rsi { window: 14, source },
            IndicatorConfig::Atr { period: 14 },
            IndicatorConfig::Macd {
                fast: 12,
                slow: 26,
                signal: 9,
                source,
            },
            IndicatorConfig::Keltner {
                window: 20,
                multiplier: default_band_width(),
            },
            IndicatorConfig::Bollinger {
                window: 20,
                num_std: default_band_width(),
                source,
            },
            IndicatorConfig::Ichimoku {
                tenkan: 9,
                kijun: 26,
                senkou_b: 52,
                displacement: 26,
            },
            IndicatorConfig::Chop { window: 14 },
            IndicatorConfig::Zscore { window: 20, source },
            IndicatorConfig::HistVol { window: 30, source },
            IndicatorConfig::Roc { period: 12, source },
            IndicatorConfig::Coppock {
                long_roc: 14,
                short_roc: 11,
                wma: 10,
                source,
            },
            IndicatorConfig::Hma { period: 9, source },
            IndicatorConfig::Kalman {
                process_variance: default_process_variance(),
                measurement_variance: default_measurement_variance(),
                source,
            },
            IndicatorConfig::Supertrend {
                period: 10,
                multiplier: default_supertrend_multiplier(),
            },
        ]
    }
}

/// The set of indicators one engine run computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "IndicatorConfig::catalogue")]
    pub indicators: Vec<IndicatorConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::catalogue(),
        }
    }
}

impl EngineConfig {
    pub fn new(indicators: Vec<IndicatorConfig>) -> Self {
        Self { indicators }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        toml::from_str(content).map_err(|e| EngineError::Config(format!("parse TOML: {e}")))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(format!("serialize: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_take_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [[indicators]]
            type = "rsi"

            [[indicators]]
            type = "bollinger"
            window = 10
            source = "close"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.indicators,
            vec![
                IndicatorConfig::Rsi {
                    window: 14,
                    source: Field::Price
                },
                IndicatorConfig::Bollinger {
                    window: 10,
                    num_std: 2.0,
                    source: Field::Close
                },
            ]
        );
    }

    #[test]
    fn snake_case_type_tags() {
        let config = EngineConfig::from_toml_str(
            r#"
            [[indicators]]
            type = "hist_vol"

            [[indicators]]
            type = "hma"
            period = 16
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.indicators[0],
            IndicatorConfig::HistVol { window: 30, .. }
        ));
        assert!(matches!(
            config.indicators[1],
            IndicatorConfig::Hma { period: 16, .. }
        ));
    }

    #[test]
    fn empty_document_is_full_catalogue() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.indicators.len(), 16);
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = EngineConfig::default().to_toml_string().unwrap();
        assert!(text.contains("type = \"supertrend\""));
        let back = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, EngineConfig::default());
    }

    #[test]
    fn unknown_type_is_config_error() {
        let err = EngineConfig::from_toml_str("[[indicators]]\ntype = \"vwap\"\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = EngineConfig::load(Path::new("/nonexistent/coinlab.toml")).unwrap_err();
        assert!(err.to_string().contains("coinlab.toml"));
    }
}
