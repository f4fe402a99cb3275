//! Leverage and order sizing
//!
//! Pure functions shared by the backtester and any live adapter, so both
//! produce identical sizing decisions for the same inputs.

use crate::config::RiskConfig;
use crate::error::{EnvelopeError, Result};

/// Leverage for the next entry cycle, scaled inversely with volatility
///
/// `leverage = base_leverage * target_atr_pct / atr_pct`, clamped into
/// `[1, max_leverage]` and rounded to a whole number (exchanges accept
/// integer leverage). An undefined or non-positive ATR falls back to the
/// unscaled base leverage; the clamp still applies.
pub fn dynamic_leverage(risk: &RiskConfig, atr_pct: Option<f64>) -> f64 {
    let mut leverage = risk.base_leverage;
    if let Some(atr) = atr_pct {
        if atr.is_finite() && atr > 0.0 {
            leverage = risk.base_leverage * (risk.target_atr_pct / atr);
        }
    }
    leverage.clamp(1.0, risk.max_leverage).round()
}

/// Unit quantity for one grid order
///
/// The deployable capital share is split evenly across the envelope levels,
/// multiplied by leverage and divided by the entry price.
pub fn grid_order_amount(
    capital: f64,
    risk: &RiskConfig,
    envelope_count: usize,
    leverage: f64,
    entry_price: f64,
) -> Result<f64> {
    if envelope_count == 0 {
        return Err(EnvelopeError::Config(
            "envelope count must be non-zero".to_string(),
        ));
    }
    if !entry_price.is_finite() || entry_price <= 0.0 {
        return Err(EnvelopeError::Data(format!(
            "entry price must be positive, got {}",
            entry_price
        )));
    }
    let capital_per_level = capital * risk.balance_fraction() / envelope_count as f64;
    Ok(capital_per_level * leverage / entry_price)
}
