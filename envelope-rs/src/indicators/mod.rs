//! Technical indicators module
//!
//! Windowed estimators used by the envelope strategy, built on the `ta`
//! crate. All wrappers report `None` until their warm-up window is full.

pub mod atr;
pub mod dcm;
pub mod sma;
pub mod wma;

pub use atr::*;
pub use dcm::*;
pub use sma::*;
pub use wma::*;

/// Indicator trait for close-driven indicators
pub trait Indicator {
    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Get the warm-up period
    fn period(&self) -> usize;

    /// Update indicator with new value
    fn update(&mut self, value: f64);

    /// Get current indicator value, `None` during warm-up
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}
