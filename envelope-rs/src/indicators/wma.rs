//! WMA (Weighted Moving Average) indicator
//!
//! Linearly-weighted mean of the last `period` values, the most recent
//! value carrying weight `period`. The `ta` crate ships no WMA, so the
//! window is maintained here directly.

use std::collections::VecDeque;

use crate::indicators::Indicator;

/// WMA indicator
#[derive(Debug)]
pub struct WMA {
    period: usize,
    window: VecDeque<f64>,
    last_value: Option<f64>,
}

impl WMA {
    /// Create new WMA indicator
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "WMA period must be at least 1");
        Self {
            period,
            window: VecDeque::with_capacity(period),
            last_value: None,
        }
    }
}

impl Indicator for WMA {
    fn name(&self) -> &str {
        "WMA"
    }

    fn period(&self) -> usize {
        self.period
    }

    fn update(&mut self, value: f64) {
        self.window.push_back(value);
        if self.window.len() > self.period {
            self.window.pop_front();
        }
        if self.window.len() == self.period {
            let weight_sum = (self.period * (self.period + 1)) as f64 / 2.0;
            let weighted: f64 = self
                .window
                .iter()
                .enumerate()
                .map(|(i, v)| (i + 1) as f64 * v)
                .sum();
            self.last_value = Some(weighted / weight_sum);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.last_value.is_some()
    }
}

/// Calculate WMA from a series of values
pub fn calculate_wma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut wma = WMA::new(period);
    let mut results = Vec::new();

    for &value in values {
        wma.update(value);
        results.push(wma.value());
    }

    results
}
