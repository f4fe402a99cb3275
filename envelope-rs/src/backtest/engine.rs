//! Backtesting engine
//!
//! Replays an augmented candle series through the envelope strategy state
//! machine: cooldown gate, stop-loss / take-profit management of the open
//! position unit, then grid entry evaluation. Stop-loss is always checked
//! before take-profit within a candle (the pessimistic intrabar assumption).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{RiskConfig, StrategyConfig};
use crate::error::{EnvelopeError, Result};
use crate::portfolio::{AggregatePosition, Position, PositionSide};
use crate::strategy::{dynamic_leverage, grid_order_amount, AugmentedCandle};

use super::state::{BotState, TradeGate};

/// Why a position unit was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    #[serde(rename = "stop_loss")]
    StopLoss,
    #[serde(rename = "take_profit")]
    TakeProfit,
}

/// One closed trade, appended to the ledger and never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Close time (the candle that triggered the exit)
    pub timestamp: DateTime<Utc>,
    /// Position side
    pub side: PositionSide,
    /// Size-weighted average entry price
    pub entry_price: f64,
    /// Exit fill price
    pub exit_price: f64,
    /// Unit quantity closed
    pub amount: f64,
    /// Realized PnL after round-trip fees
    pub pnl: f64,
    /// Account capital after the close
    pub balance: f64,
    /// Exit reason
    pub reason: ExitReason,
    /// Size-weighted average leverage
    pub leverage: f64,
    /// Stop price in force at the exit
    pub stop_loss_price: f64,
    /// Target price in force at the exit
    pub take_profit_price: f64,
}

/// Backtest result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Starting capital
    pub start_capital: f64,
    /// Ending capital (zero when the run wiped out)
    pub end_capital: f64,
    /// Total PnL in percent of the starting capital
    pub total_pnl_pct: f64,
    /// Number of closed trades
    pub trades_count: usize,
    /// Trades closed by take-profit
    pub wins_count: usize,
    /// Win rate in percent
    pub win_rate: f64,
    /// Maximum drawdown as a fraction in [0, 1]
    pub max_drawdown_pct: f64,
    /// Trade ledger, chronological
    pub trades: Vec<TradeRecord>,
    /// Echo of the strategy configuration
    pub strategy: StrategyConfig,
    /// Echo of the risk configuration
    pub risk: RiskConfig,
}

/// Backtesting engine
///
/// Single-threaded and deterministic: the same candles and configuration
/// produce an identical result on every run.
pub struct BacktestEngine {
    start_capital: f64,
    state: BotState,
    trades: Vec<TradeRecord>,
    wins_count: usize,
}

impl BacktestEngine {
    /// Create new backtest engine
    pub fn new(start_capital: f64) -> Self {
        Self {
            start_capital,
            state: BotState::new(start_capital),
            trades: Vec::new(),
            wins_count: 0,
        }
    }

    /// Run the backtest over an augmented candle series
    ///
    /// Candles whose reference average is still warming up are skipped, so
    /// a series shorter than the warm-up window yields a zero-trade result.
    /// The run terminates early when capital reaches zero.
    pub fn run(
        &mut self,
        candles: &[AugmentedCandle],
        strategy: &StrategyConfig,
        risk: &RiskConfig,
    ) -> Result<BacktestResult> {
        strategy.validate()?;
        risk.validate()?;
        if !self.start_capital.is_finite() || self.start_capital <= 0.0 {
            return Err(EnvelopeError::Config(format!(
                "start capital must be positive, got {}",
                self.start_capital
            )));
        }

        // reset so repeated runs on one engine stay independent
        self.state = BotState::new(self.start_capital);
        self.trades.clear();
        self.wins_count = 0;

        info!(
            candles = candles.len(),
            start_capital = self.start_capital,
            "starting envelope backtest"
        );

        for candle in candles {
            let Some(average) = candle.average else {
                continue;
            };
            if average <= 0.0 {
                return Err(EnvelopeError::Data(format!(
                    "non-positive average {} at {}",
                    average, candle.candle.timestamp
                )));
            }
            if candle.bands.len() != strategy.envelopes_pct.len() {
                return Err(EnvelopeError::Data(format!(
                    "candle at {} carries {} band pairs, strategy configures {}",
                    candle.candle.timestamp,
                    candle.bands.len(),
                    strategy.envelopes_pct.len()
                )));
            }

            // 1. cooldown gate
            if let TradeGate::WaitingForReentry { side } = self.state.gate {
                let reverted = match side {
                    PositionSide::Long => candle.candle.high >= average,
                    PositionSide::Short => candle.candle.low <= average,
                };
                if !reverted {
                    continue;
                }
                debug!(
                    timestamp = %candle.candle.timestamp,
                    %side,
                    "price reverted to average, cooldown released"
                );
                self.state.gate = TradeGate::OkToTrade;
            }

            // 2. position management; no re-entry within the exit candle
            if !self.state.is_flat() {
                self.manage_positions(candle, average, strategy, risk);
                if self.state.is_wiped_out() {
                    warn!(
                        timestamp = %candle.candle.timestamp,
                        "capital exhausted, terminating run"
                    );
                    break;
                }
                continue;
            }

            // 3. entry evaluation
            if self.state.gate == TradeGate::OkToTrade {
                self.evaluate_entries(candle, strategy, risk)?;
            }
        }

        let result = self.build_result(strategy, risk);
        info!(
            trades = result.trades_count,
            end_capital = result.end_capital,
            total_pnl_pct = result.total_pnl_pct,
            "envelope backtest finished"
        );
        Ok(result)
    }

    /// Check the aggregated position unit of each open side against its
    /// stop and target prices; long side first for determinism
    fn manage_positions(
        &mut self,
        candle: &AugmentedCandle,
        average: f64,
        strategy: &StrategyConfig,
        risk: &RiskConfig,
    ) {
        let bar = &candle.candle;
        for side in [PositionSide::Long, PositionSide::Short] {
            let Some(unit) = AggregatePosition::from_positions(&self.state.positions, side) else {
                continue;
            };

            let stop_loss_price = match side {
                PositionSide::Long => unit.entry_price * (1.0 - risk.stop_loss_fraction()),
                PositionSide::Short => unit.entry_price * (1.0 + risk.stop_loss_fraction()),
            };
            let take_profit_price = average;

            let stop_hit = match side {
                PositionSide::Long => bar.low <= stop_loss_price,
                PositionSide::Short => bar.high >= stop_loss_price,
            };
            let target_hit = match side {
                PositionSide::Long => bar.high >= take_profit_price,
                PositionSide::Short => bar.low <= take_profit_price,
            };

            // stop-loss wins when both trigger intrabar
            let (exit_price, reason) = if stop_hit {
                (stop_loss_price, ExitReason::StopLoss)
            } else if target_hit {
                (take_profit_price, ExitReason::TakeProfit)
            } else {
                continue;
            };

            let gross = match side {
                PositionSide::Long => (exit_price - unit.entry_price) * unit.amount,
                PositionSide::Short => (unit.entry_price - exit_price) * unit.amount,
            };
            let fees = risk.fee_fraction() * (unit.entry_value() + exit_price * unit.amount);
            let pnl = gross - fees;

            self.state.positions.retain(|p| p.side != side);
            self.state.apply_realized_pnl(pnl);
            if reason == ExitReason::TakeProfit {
                self.wins_count += 1;
            }

            debug!(
                timestamp = %bar.timestamp,
                %side,
                ?reason,
                entry = unit.entry_price,
                exit = exit_price,
                pnl,
                balance = self.state.current_capital,
                "position closed"
            );

            self.trades.push(TradeRecord {
                timestamp: bar.timestamp,
                side,
                entry_price: unit.entry_price,
                exit_price,
                amount: unit.amount,
                pnl,
                balance: self.state.current_capital,
                reason,
                leverage: unit.leverage,
                stop_loss_price,
                take_profit_price,
            });

            self.state.gate = match reason {
                ExitReason::StopLoss if strategy.behavior.use_cooldown_after_sl => {
                    TradeGate::WaitingForReentry { side }
                }
                _ => TradeGate::OkToTrade,
            };

            if self.state.is_wiped_out() {
                return;
            }
        }
    }

    /// Walk the band ladder innermost to outermost and open at most one
    /// position per enabled side (first match per side)
    fn evaluate_entries(
        &mut self,
        candle: &AugmentedCandle,
        strategy: &StrategyConfig,
        risk: &RiskConfig,
    ) -> Result<()> {
        let bar = &candle.candle;
        let leverage = dynamic_leverage(risk, candle.atr_pct);

        let mut allow_long = strategy.behavior.use_longs;
        let mut allow_short = strategy.behavior.use_shorts;
        if strategy.trend_filter.enabled {
            if let Some(trend) = candle.trend_sma {
                if bar.close < trend {
                    allow_long = false;
                }
                if bar.close > trend {
                    allow_short = false;
                }
            }
        }
        if !allow_long && !allow_short {
            return Ok(());
        }

        let capital = self.state.current_capital;
        let envelope_count = strategy.envelopes_pct.len();

        if allow_long {
            for band in &candle.bands {
                if bar.low <= band.low {
                    let amount =
                        grid_order_amount(capital, risk, envelope_count, leverage, band.low)?;
                    self.state
                        .positions
                        .push(Position::new(PositionSide::Long, band.low, amount, leverage));
                    debug!(
                        timestamp = %bar.timestamp,
                        entry = band.low,
                        amount,
                        leverage,
                        "long grid level filled"
                    );
                    break;
                }
            }
        }

        if allow_short {
            for band in &candle.bands {
                if bar.high >= band.high {
                    let amount =
                        grid_order_amount(capital, risk, envelope_count, leverage, band.high)?;
                    self.state.positions.push(Position::new(
                        PositionSide::Short,
                        band.high,
                        amount,
                        leverage,
                    ));
                    debug!(
                        timestamp = %bar.timestamp,
                        entry = band.high,
                        amount,
                        leverage,
                        "short grid level filled"
                    );
                    break;
                }
            }
        }

        Ok(())
    }

    /// Extract the immutable result record from the run state
    fn build_result(&self, strategy: &StrategyConfig, risk: &RiskConfig) -> BacktestResult {
        let trades_count = self.trades.len();
        let win_rate = if trades_count > 0 {
            self.wins_count as f64 / trades_count as f64 * 100.0
        } else {
            0.0
        };
        BacktestResult {
            start_capital: self.start_capital,
            end_capital: self.state.current_capital,
            total_pnl_pct: (self.state.current_capital / self.start_capital - 1.0) * 100.0,
            trades_count,
            wins_count: self.wins_count,
            win_rate,
            max_drawdown_pct: self.state.max_drawdown_pct,
            trades: self.trades.clone(),
            strategy: strategy.clone(),
            risk: risk.clone(),
        }
    }
}
