//! Factory: converts `IndicatorConfig` into runtime trait objects.

use crate::indicator::Indicator;
use crate::indicators::{
    Atr, Bollinger, Chop, Coppock, Ema, HistoricalVolatility, Hull, Ichimoku, Kalman, Keltner,
    Macd, Roc, Rsi, Sma, Supertrend, ZScore,
};

use super::config::IndicatorConfig;

/// Create an indicator from its configuration.
///
/// Parameters are checked later against the series length by
/// [`Indicator::validate`], so construction itself cannot fail.
pub fn build_indicator(config: &IndicatorConfig) -> Box<dyn Indicator> {
    match *config {
        IndicatorConfig::Sma { window, source } => Box::new(Sma::new(window, source)),
        IndicatorConfig::Ema { span, source } => Box::new(Ema::new(span, source)),
        IndicatorConfig::Rsi { window, source } => Box::new(Rsi::new(window, source)),
        IndicatorConfig::Atr { period } => Box::new(Atr::new(period)),
        IndicatorConfig::Macd {
            fast,
            slow,
            signal,
            source,
        } => Box::new(Macd::new(fast, slow, signal, source)),
        IndicatorConfig::Keltner { window, multiplier } => {
            Box::new(Keltner::new(window, multiplier))
        }
        IndicatorConfig::Bollinger {
            window,
            num_std,
            source,
        } => Box::new(Bollinger::new(window, num_std, source)),
        IndicatorConfig::Ichimoku {
            tenkan,
            kijun,
            senkou_b,
            displacement,
        } => Box::new(Ichimoku::new(tenkan, kijun, senkou_b, displacement)),
        IndicatorConfig::Chop { window } => Box::new(Chop::new(window)),
        IndicatorConfig::Zscore { window, source } => Box::new(ZScore::new(window, source)),
        IndicatorConfig::HistVol { window, source } => {
            Box::new(HistoricalVolatility::new(window, source))
        }
        IndicatorConfig::Roc { period, source } => Box::new(Roc::new(period, source)),
        IndicatorConfig::Coppock {
            long_roc,
            short_roc,
            wma,
            source,
        } => Box::new(Coppock::new(long_roc, short_roc, wma, source)),
        IndicatorConfig::Hma { period, source } => Box::new(Hull::new(period, source)),
        IndicatorConfig::Kalman {
            process_variance,
            measurement_variance,
            source,
        } => Box::new(Kalman::new(process_variance, measurement_variance, source)),
        IndicatorConfig::Supertrend { period, multiplier } => {
            Box::new(Supertrend::new(period, multiplier))
        }
    }
}

/// Build every configured indicator, in configuration order.
pub fn build_indicators(configs: &[IndicatorConfig]) -> Vec<Box<dyn Indicator>> {
    configs.iter().map(build_indicator).collect()
}
