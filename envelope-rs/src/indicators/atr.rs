//! ATR (Average True Range) indicator

use ta::indicators::AverageTrueRange;
use ta::{DataItem, Next};

use crate::data::Candle;
use crate::error::{EnvelopeError, Result};

/// ATR indicator wrapper
///
/// Uses the `ta` crate's exponentially smoothed true range. Consumed as a
/// percentage of the close via [`ATR::value_pct`] to scale leverage
/// inversely with volatility.
#[derive(Debug)]
pub struct ATR {
    inner: AverageTrueRange,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl ATR {
    /// Create new ATR indicator
    ///
    /// Panics on a zero period; callers validate periods through
    /// [`crate::config::StrategyConfig::validate`] first.
    pub fn new(period: usize) -> Self {
        Self {
            inner: AverageTrueRange::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    /// Get ATR period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Update with a full candle
    pub fn update(&mut self, candle: &Candle) -> Result<()> {
        let item = DataItem::builder()
            .open(candle.open)
            .high(candle.high)
            .low(candle.low)
            .close(candle.close)
            .volume(candle.volume)
            .build()
            .map_err(|e| {
                EnvelopeError::Data(format!(
                    "candle at {} rejected by true-range input: {}",
                    candle.timestamp, e
                ))
            })?;
        let atr_value = self.inner.next(&item);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(atr_value);
        }
        Ok(())
    }

    /// Get current ATR value, `None` during warm-up
    pub fn value(&self) -> Option<f64> {
        self.last_value
    }

    /// ATR as a percentage of the given close price
    pub fn value_pct(&self, close: f64) -> Option<f64> {
        self.last_value.map(|atr| atr / close * 100.0)
    }

    /// Check if the true-range window is full
    pub fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn candle(high: f64, low: f64, close: f64, minute: i64) -> Candle {
        Candle::new(
            close,
            high,
            low,
            close,
            1_000.0,
            Utc::now() + Duration::minutes(minute),
            "BTC/USDT:USDT".to_string(),
            "1h".to_string(),
        )
    }

    #[test]
    fn test_atr_warmup_and_positive_value() {
        let mut atr = ATR::new(3);
        atr.update(&candle(101.0, 99.0, 100.0, 0)).unwrap();
        assert_eq!(atr.value(), None);
        atr.update(&candle(102.0, 100.0, 101.0, 1)).unwrap();
        assert_eq!(atr.value(), None);
        atr.update(&candle(103.0, 101.0, 102.0, 2)).unwrap();
        assert!(atr.is_ready());
        let value = atr.value().unwrap();
        assert!(value > 0.0);
        let pct = atr.value_pct(102.0).unwrap();
        assert!((pct - value / 102.0 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_atr_zero_range_series() {
        let mut atr = ATR::new(2);
        for i in 0..5 {
            atr.update(&candle(100.0, 100.0, 100.0, i)).unwrap();
        }
        assert_eq!(atr.value(), Some(0.0));
    }
}
