//! Envelope-RS: mean-reversion envelope/grid strategy engine
//!
//! This crate implements the core of an envelope trading strategy for
//! perpetual futures:
//!
//! - **Indicator Engine**: moving average (SMA/WMA/DCM), symmetric percentage
//!   envelopes, ATR volatility and an optional trend filter, computed over
//!   OHLCV candle series via the `ta` crate
//! - **Backtest State Machine**: candle-by-candle replay with stop-loss /
//!   take-profit exits, cooldown re-entry gating and dynamic leverage sizing
//! - **Reporting**: trade ledger, drawdown tracking and summary metrics
//!
//! Exchange connectivity, persisted bot state and parameter-search drivers
//! are deliberately outside this crate; optimizers consume [`backtest::BacktestResult`]
//! as a black-box fitness signal.
//!
//! # Example
//!
//! ```no_run
//! use envelope_rs::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let series = CandleSeries::new();
//!     let strategy = StrategyConfig::default();
//!     let risk = RiskConfig::default();
//!     let augmented = compute_envelope_indicators(&series, &strategy)?;
//!     let mut engine = BacktestEngine::new(1_000.0);
//!     let result = engine.run(&augmented, &strategy, &risk)?;
//!     println!("{}", BacktestReport::new(result).format());
//!     Ok(())
//! }
//! ```

pub mod backtest;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod portfolio;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::backtest::*;
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::indicators::*;
    pub use crate::portfolio::*;
    pub use crate::strategy::*;

    pub use crate::error::{EnvelopeError, Result};
}

pub use error::{EnvelopeError, Result};
