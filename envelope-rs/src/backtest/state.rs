//! Backtest state machine primitives

use crate::portfolio::{Position, PositionSide};

/// Trading gate of the strategy state machine
///
/// Being in a position is not a separate state; it is derived from the
/// open position set in [`BotState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeGate {
    /// New entries may be evaluated
    OkToTrade,
    /// A stop-loss fired; entries stay suppressed until price reverts to
    /// the reference average
    WaitingForReentry {
        /// Side of the position the stop-loss closed
        side: PositionSide,
    },
}

/// Mutable per-run state, created at backtest start and consumed into the
/// result when the run ends
#[derive(Debug, Clone)]
pub struct BotState {
    /// Current account capital
    pub current_capital: f64,
    /// High-water mark of the capital trajectory
    pub peak_capital: f64,
    /// Largest peak-to-trough decline seen so far, as a fraction in [0, 1]
    pub max_drawdown_pct: f64,
    /// Open position set
    pub positions: Vec<Position>,
    /// Trading gate
    pub gate: TradeGate,
}

impl BotState {
    /// Create the state for a fresh run
    pub fn new(start_capital: f64) -> Self {
        Self {
            current_capital: start_capital,
            peak_capital: start_capital,
            max_drawdown_pct: 0.0,
            positions: Vec::new(),
            gate: TradeGate::OkToTrade,
        }
    }

    /// Whether no position is open on either side
    pub fn is_flat(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether the capital is exhausted (terminal condition, not an error)
    pub fn is_wiped_out(&self) -> bool {
        self.current_capital <= 0.0
    }

    /// Apply a realized PnL to the capital and refresh peak/drawdown
    ///
    /// Capital is clamped at zero; drawdown only ever ratchets up.
    pub fn apply_realized_pnl(&mut self, pnl: f64) {
        self.current_capital += pnl;
        if self.current_capital < 0.0 {
            self.current_capital = 0.0;
        }
        self.peak_capital = self.peak_capital.max(self.current_capital);
        if self.peak_capital > 0.0 {
            let drawdown = (self.peak_capital - self.current_capital) / self.peak_capital;
            self.max_drawdown_pct = self.max_drawdown_pct.max(drawdown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_clamps_at_zero() {
        let mut state = BotState::new(100.0);
        state.apply_realized_pnl(-150.0);
        assert_eq!(state.current_capital, 0.0);
        assert!(state.is_wiped_out());
        assert_eq!(state.max_drawdown_pct, 1.0);
    }

    #[test]
    fn test_drawdown_ratchets() {
        let mut state = BotState::new(100.0);
        state.apply_realized_pnl(50.0);
        assert_eq!(state.peak_capital, 150.0);
        assert_eq!(state.max_drawdown_pct, 0.0);

        state.apply_realized_pnl(-30.0);
        assert!((state.max_drawdown_pct - 0.2).abs() < 1e-12);

        // recovery must not shrink the recorded drawdown
        state.apply_realized_pnl(30.0);
        assert!((state.max_drawdown_pct - 0.2).abs() < 1e-12);
    }
}
