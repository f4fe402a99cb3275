//! Position tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    /// Long position
    #[serde(rename = "long")]
    Long,
    /// Short position
    #[serde(rename = "short")]
    Short,
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}

/// One filled grid entry
///
/// Several positions on the same side may coexist when multiple envelope
/// levels fill; they are managed as one aggregated unit per side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Position side (Long/Short)
    pub side: PositionSide,
    /// Entry price (the touched band price)
    pub entry_price: f64,
    /// Unit quantity
    pub amount: f64,
    /// Leverage at entry
    pub leverage: f64,
}

impl Position {
    /// Create new position
    pub fn new(side: PositionSide, entry_price: f64, amount: f64, leverage: f64) -> Self {
        Self {
            side,
            entry_price,
            amount,
            leverage,
        }
    }

    /// Notional entry value
    pub fn entry_value(&self) -> f64 {
        self.entry_price * self.amount
    }
}

/// Size-weighted aggregate of co-open positions on one side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatePosition {
    /// Side shared by the aggregated positions
    pub side: PositionSide,
    /// Size-weighted average entry price
    pub entry_price: f64,
    /// Total unit quantity
    pub amount: f64,
    /// Size-weighted average leverage
    pub leverage: f64,
}

impl AggregatePosition {
    /// Aggregate all positions of `side` in the set
    ///
    /// Returns `None` when the set holds no position on that side.
    pub fn from_positions(positions: &[Position], side: PositionSide) -> Option<Self> {
        let mut amount = 0.0;
        let mut weighted_entry = 0.0;
        let mut weighted_leverage = 0.0;
        for position in positions.iter().filter(|p| p.side == side) {
            amount += position.amount;
            weighted_entry += position.entry_price * position.amount;
            weighted_leverage += position.leverage * position.amount;
        }
        if amount <= 0.0 {
            return None;
        }
        Some(Self {
            side,
            entry_price: weighted_entry / amount,
            amount,
            leverage: weighted_leverage / amount,
        })
    }

    /// Notional entry value
    pub fn entry_value(&self) -> f64 {
        self.entry_price * self.amount
    }
}
