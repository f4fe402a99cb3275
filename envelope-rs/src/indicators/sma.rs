//! SMA (Simple Moving Average) indicator

use ta::indicators::SimpleMovingAverage;
use ta::Next;

use crate::indicators::Indicator;

/// SMA indicator wrapper
#[derive(Debug)]
pub struct SMA {
    inner: SimpleMovingAverage,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl SMA {
    /// Create new SMA indicator
    ///
    /// Panics on a zero period; callers validate periods through
    /// [`crate::config::StrategyConfig::validate`] first.
    pub fn new(period: usize) -> Self {
        Self {
            inner: SimpleMovingAverage::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        "SMA"
    }

    fn period(&self) -> usize {
        self.period
    }

    fn update(&mut self, value: f64) {
        let sma_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(sma_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Calculate SMA from a series of values
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma = SMA::new(period);
    let mut results = Vec::new();

    for &value in values {
        sma.update(value);
        results.push(sma.value());
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_warmup_and_value() {
        let values = calculate_sma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
        assert_eq!(values[2], Some(2.0));
        assert_eq!(values[3], Some(3.0));
    }
}
