//! Strategy configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EnvelopeError, Result};

/// Moving-average family used as the envelope reference line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AverageType {
    /// Simple arithmetic mean of closes
    #[serde(rename = "SMA")]
    Sma,
    /// Linearly-weighted mean of closes, recent candles weighted higher
    #[serde(rename = "WMA")]
    Wma,
    /// Midpoint of the rolling high/low (Donchian) channel
    #[serde(rename = "DCM")]
    Dcm,
}

impl FromStr for AverageType {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SMA" => Ok(Self::Sma),
            "WMA" => Ok(Self::Wma),
            "DCM" => Ok(Self::Dcm),
            other => Err(EnvelopeError::Config(format!(
                "unsupported average type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for AverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sma => write!(f, "SMA"),
            Self::Wma => write!(f, "WMA"),
            Self::Dcm => write!(f, "DCM"),
        }
    }
}

/// Optional longer-period trend filter
///
/// When enabled, long entries are suppressed while the close is below the
/// trend average and short entries while it is above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendFilter {
    /// Whether the filter gates entries
    pub enabled: bool,
    /// SMA period of the trend line
    pub period: usize,
}

impl Default for TrendFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            period: 200,
        }
    }
}

/// Side enablement and cooldown behavior flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Behavior {
    /// Suppress new entries after a stop-loss until price reverts to the average
    pub use_cooldown_after_sl: bool,
    /// Allow long entries
    pub use_longs: bool,
    /// Allow short entries
    pub use_shorts: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            use_cooldown_after_sl: true,
            use_longs: true,
            use_shorts: true,
        }
    }
}

/// Strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Moving-average family for the reference line
    pub average_type: AverageType,
    /// Period of the reference average
    pub average_period: usize,
    /// Envelope offsets in percent, strictly positive and ascending
    /// (e.g. `[2.0, 4.0, 6.0]`)
    pub envelopes_pct: Vec<f64>,
    /// ATR period for the volatility estimate
    pub atr_period: usize,
    /// Optional trend filter
    pub trend_filter: TrendFilter,
    /// Cooldown and side enablement flags
    pub behavior: Behavior,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            average_type: AverageType::Dcm,
            average_period: 5,
            envelopes_pct: vec![5.0, 10.0, 15.0],
            atr_period: 14,
            trend_filter: TrendFilter::default(),
            behavior: Behavior::default(),
        }
    }
}

impl StrategyConfig {
    /// Validate the configuration, failing fast before any candle is processed
    pub fn validate(&self) -> Result<()> {
        if self.average_period < 1 {
            return Err(EnvelopeError::Config(
                "average_period must be at least 1".to_string(),
            ));
        }
        if self.atr_period < 1 {
            return Err(EnvelopeError::Config(
                "atr_period must be at least 1".to_string(),
            ));
        }
        if self.envelopes_pct.is_empty() {
            return Err(EnvelopeError::Config(
                "envelopes_pct must not be empty".to_string(),
            ));
        }
        for (i, &e) in self.envelopes_pct.iter().enumerate() {
            if !e.is_finite() || e <= 0.0 {
                return Err(EnvelopeError::Config(format!(
                    "envelope offset {} must be a positive percentage, got {}",
                    i + 1,
                    e
                )));
            }
            // a 100% offset would put the lower band at or below zero
            if e >= 100.0 {
                return Err(EnvelopeError::Config(format!(
                    "envelope offset {} must be below 100%, got {}",
                    i + 1,
                    e
                )));
            }
            if i > 0 && e <= self.envelopes_pct[i - 1] {
                return Err(EnvelopeError::Config(
                    "envelopes_pct must be strictly ascending".to_string(),
                ));
            }
        }
        if self.trend_filter.enabled && self.trend_filter.period < 1 {
            return Err(EnvelopeError::Config(
                "trend_filter.period must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Longest warm-up period across all configured indicators
    pub fn warmup_period(&self) -> usize {
        let mut warmup = self.average_period.max(self.atr_period);
        if self.trend_filter.enabled {
            warmup = warmup.max(self.trend_filter.period);
        }
        warmup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_type_from_str() {
        assert_eq!("SMA".parse::<AverageType>().unwrap(), AverageType::Sma);
        assert_eq!("WMA".parse::<AverageType>().unwrap(), AverageType::Wma);
        assert_eq!("DCM".parse::<AverageType>().unwrap(), AverageType::Dcm);
        assert!("EMA".parse::<AverageType>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_envelopes() {
        let mut config = StrategyConfig::default();
        assert!(config.validate().is_ok());

        config.envelopes_pct = vec![];
        assert!(config.validate().is_err());

        config.envelopes_pct = vec![5.0, 4.0];
        assert!(config.validate().is_err());

        config.envelopes_pct = vec![-1.0];
        assert!(config.validate().is_err());

        config.envelopes_pct = vec![5.0, 120.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_periods() {
        let mut config = StrategyConfig::default();
        config.average_period = 0;
        assert!(config.validate().is_err());

        let mut config = StrategyConfig::default();
        config.atr_period = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_warmup_period_includes_trend_filter() {
        let mut config = StrategyConfig {
            average_period: 5,
            atr_period: 14,
            ..StrategyConfig::default()
        };
        assert_eq!(config.warmup_period(), 14);

        config.trend_filter = TrendFilter {
            enabled: true,
            period: 200,
        };
        assert_eq!(config.warmup_period(), 200);
    }
}
