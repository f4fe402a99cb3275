//! Backtest performance metrics

use super::engine::TradeRecord;

/// Derived metrics over a trade ledger
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Average PnL of winning trades
    pub fn average_win(trades: &[TradeRecord]) -> f64 {
        let wins: Vec<f64> = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).collect();
        if wins.is_empty() {
            return 0.0;
        }
        wins.iter().sum::<f64>() / wins.len() as f64
    }

    /// Average PnL of losing trades (a negative number)
    pub fn average_loss(trades: &[TradeRecord]) -> f64 {
        let losses: Vec<f64> = trades.iter().filter(|t| t.pnl < 0.0).map(|t| t.pnl).collect();
        if losses.is_empty() {
            return 0.0;
        }
        losses.iter().sum::<f64>() / losses.len() as f64
    }

    /// Gross profit divided by gross loss; zero when there are no losses
    pub fn profit_factor(trades: &[TradeRecord]) -> f64 {
        let gross_profit: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
        let gross_loss: f64 = trades
            .iter()
            .filter(|t| t.pnl < 0.0)
            .map(|t| t.pnl.abs())
            .sum();
        if gross_loss == 0.0 {
            return 0.0;
        }
        gross_profit / gross_loss
    }

    /// Mean PnL per trade
    pub fn expectancy(trades: &[TradeRecord]) -> f64 {
        if trades.is_empty() {
            return 0.0;
        }
        trades.iter().map(|t| t.pnl).sum::<f64>() / trades.len() as f64
    }
}
