//! DCM (Donchian Channel Midline) indicator
//!
//! Midpoint of the rolling high/low channel over the configured period.
//! Fed with high and low instead of a single close, so it does not
//! implement the close-driven [`Indicator`](crate::indicators::Indicator)
//! trait.

use ta::indicators::{Maximum, Minimum};
use ta::Next;

/// Donchian channel midline indicator
#[derive(Debug)]
pub struct DCM {
    highest: Maximum,
    lowest: Minimum,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl DCM {
    /// Create new DCM indicator
    ///
    /// Panics on a zero period; callers validate periods through
    /// [`crate::config::StrategyConfig::validate`] first.
    pub fn new(period: usize) -> Self {
        Self {
            highest: Maximum::new(period).unwrap(),
            lowest: Minimum::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    /// Get DCM period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Update with the candle's high and low
    pub fn update(&mut self, high: f64, low: f64) {
        let channel_high = self.highest.next(high);
        let channel_low = self.lowest.next(low);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some((channel_high + channel_low) / 2.0);
        }
    }

    /// Get current midline value, `None` during warm-up
    pub fn value(&self) -> Option<f64> {
        self.last_value
    }

    /// Check if the channel window is full
    pub fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}
