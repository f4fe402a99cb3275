//! Engine error types

use thiserror::Error;

/// Errors surfaced by the indicator engine and the backtester.
///
/// Both variants are local to a single backtest invocation; optimizer layers
/// are expected to catch them and convert to a penalty fitness score.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Malformed strategy or risk configuration, raised before any candle
    /// is processed
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid market data: non-positive prices, unordered timestamps or a
    /// zero reference price at a division site
    #[error("data error: {0}")]
    Data(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EnvelopeError>;
