//! Envelope indicator engine
//!
//! Maps a raw candle series plus a [`StrategyConfig`] to the augmented
//! series the backtester consumes: reference average, symmetric percentage
//! bands, ATR percentage and an optional trend SMA.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AverageType, StrategyConfig};
use crate::data::{Candle, CandleSeries};
use crate::error::{EnvelopeError, Result};
use crate::indicators::{calculate_sma, calculate_wma, Indicator, ATR, DCM, SMA};

/// One pair of entry bands at a fixed percentage offset from the average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Long entry trigger price, below the average
    pub low: f64,
    /// Short entry trigger price, above the average
    pub high: f64,
}

/// Candle augmented with the envelope indicator columns
///
/// `bands` holds one pair per configured offset, innermost first, and is
/// empty while the average is warming up. `atr_pct` and `trend_sma` warm up
/// independently and may be `None` on candles where `average` is defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentedCandle {
    /// The underlying candle
    pub candle: Candle,
    /// Reference moving average
    pub average: Option<f64>,
    /// ATR as a percentage of the close
    pub atr_pct: Option<f64>,
    /// Envelope band pairs, innermost to outermost
    pub bands: Vec<Band>,
    /// Trend-filter SMA, when the filter is enabled
    pub trend_sma: Option<f64>,
}

impl AugmentedCandle {
    /// Whether the reference average (and therefore the bands) is defined
    pub fn is_ready(&self) -> bool {
        self.average.is_some()
    }
}

/// Compute the envelope indicator columns for a candle series
///
/// The output has the same length and ordering as the input, one entry per
/// candle. The first `period - 1` values of each windowed estimator are
/// `None`; skipping those candles is the backtester's responsibility.
pub fn compute_envelope_indicators(
    series: &CandleSeries,
    config: &StrategyConfig,
) -> Result<Vec<AugmentedCandle>> {
    config.validate()?;
    series.validate()?;

    let candles = series.candles();
    debug!(
        average_type = %config.average_type,
        average_period = config.average_period,
        atr_period = config.atr_period,
        envelopes = config.envelopes_pct.len(),
        warmup = config.warmup_period(),
        candles = candles.len(),
        "computing envelope indicators"
    );

    let averages: Vec<Option<f64>> = match config.average_type {
        AverageType::Sma => calculate_sma(&series.closes(), config.average_period),
        AverageType::Wma => calculate_wma(&series.closes(), config.average_period),
        AverageType::Dcm => {
            let mut dcm = DCM::new(config.average_period);
            candles
                .iter()
                .map(|c| {
                    dcm.update(c.high, c.low);
                    dcm.value()
                })
                .collect()
        }
    };

    let mut atr = ATR::new(config.atr_period);
    let mut trend = config
        .trend_filter
        .enabled
        .then(|| SMA::new(config.trend_filter.period));

    let mut augmented = Vec::with_capacity(candles.len());
    for (candle, average) in candles.iter().zip(averages) {
        atr.update(candle)?;

        if let Some(avg) = average {
            if avg <= 0.0 {
                return Err(EnvelopeError::Data(format!(
                    "non-positive average {} at {}",
                    avg, candle.timestamp
                )));
            }
        }

        let bands = match average {
            Some(avg) => config
                .envelopes_pct
                .iter()
                .map(|e| {
                    let offset = e / 100.0;
                    Band {
                        low: avg * (1.0 - offset),
                        high: avg * (1.0 + offset),
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        let trend_sma = trend.as_mut().and_then(|sma| {
            sma.update(candle.close);
            sma.value()
        });

        augmented.push(AugmentedCandle {
            candle: candle.clone(),
            average,
            atr_pct: atr.value_pct(candle.close),
            bands,
            trend_sma,
        });
    }

    Ok(augmented)
}
