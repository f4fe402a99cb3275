//! Data management module
//!
//! OHLCV candle structures and series validation. Fetching and caching of
//! historical data live outside this crate; the engine only requires
//! gap-free, chronologically sorted candles.

pub mod candle;

pub use candle::*;
