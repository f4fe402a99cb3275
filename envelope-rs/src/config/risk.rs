//! Risk management configuration

use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, Result};

/// Margin mode requested on the exchange
///
/// Informational to the engine; the live adapter forwards it when
/// configuring the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginMode {
    #[serde(rename = "isolated")]
    Isolated,
    #[serde(rename = "crossed")]
    Crossed,
}

/// Risk management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Stop-loss distance from the aggregated entry price, in percent
    pub stop_loss_pct: f64,
    /// Leverage before volatility scaling
    pub base_leverage: f64,
    /// ATR percentage the leverage scaling is anchored to
    pub target_atr_pct: f64,
    /// Hard leverage cap
    pub max_leverage: f64,
    /// Share of capital deployable per grid cycle, in percent
    pub balance_fraction_pct: f64,
    /// Margin mode (informational)
    pub margin_mode: MarginMode,
    /// Per-side taker fee, in percent
    pub fee_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            stop_loss_pct: 0.4,
            base_leverage: 10.0,
            target_atr_pct: 1.0,
            max_leverage: 50.0,
            balance_fraction_pct: 100.0,
            margin_mode: MarginMode::Isolated,
            fee_pct: 0.05,
        }
    }
}

impl RiskConfig {
    /// Validate the configuration, failing fast before any candle is processed
    pub fn validate(&self) -> Result<()> {
        if !self.stop_loss_pct.is_finite() || self.stop_loss_pct <= 0.0 || self.stop_loss_pct >= 100.0
        {
            return Err(EnvelopeError::Config(format!(
                "stop_loss_pct must be in (0, 100), got {}",
                self.stop_loss_pct
            )));
        }
        if !self.base_leverage.is_finite() || self.base_leverage < 1.0 {
            return Err(EnvelopeError::Config(format!(
                "base_leverage must be at least 1, got {}",
                self.base_leverage
            )));
        }
        if !self.max_leverage.is_finite() || self.max_leverage < 1.0 {
            return Err(EnvelopeError::Config(format!(
                "max_leverage must be at least 1, got {}",
                self.max_leverage
            )));
        }
        if !self.target_atr_pct.is_finite() || self.target_atr_pct <= 0.0 {
            return Err(EnvelopeError::Config(format!(
                "target_atr_pct must be positive, got {}",
                self.target_atr_pct
            )));
        }
        if !self.balance_fraction_pct.is_finite()
            || self.balance_fraction_pct <= 0.0
            || self.balance_fraction_pct > 100.0
        {
            return Err(EnvelopeError::Config(format!(
                "balance_fraction_pct must be in (0, 100], got {}",
                self.balance_fraction_pct
            )));
        }
        if !self.fee_pct.is_finite() || self.fee_pct < 0.0 || self.fee_pct >= 100.0 {
            return Err(EnvelopeError::Config(format!(
                "fee_pct must be in [0, 100), got {}",
                self.fee_pct
            )));
        }
        Ok(())
    }

    /// Stop-loss distance as a fraction
    pub fn stop_loss_fraction(&self) -> f64 {
        self.stop_loss_pct / 100.0
    }

    /// Per-side fee as a fraction
    pub fn fee_fraction(&self) -> f64 {
        self.fee_pct / 100.0
    }

    /// Deployable capital share as a fraction
    pub fn balance_fraction(&self) -> f64 {
        self.balance_fraction_pct / 100.0
    }
}
