//! Example: grid search over strategy parameters
//!
//! Demonstrates the fitness-consumer contract: the optimizer mutates only
//! the configuration, treats the backtester as a black box, and applies its
//! own penalty rules (minimum trade count, per-trade loss cap) on top of
//! the result.

use chrono::{Duration, TimeZone, Utc};
use envelope_rs::backtest::{BacktestEngine, BacktestResult};
use envelope_rs::config::{AverageType, RiskConfig, StrategyConfig};
use envelope_rs::data::{Candle, CandleSeries};
use envelope_rs::strategy::compute_envelope_indicators;

const START_CAPITAL: f64 = 1_000.0;
const MINIMUM_TRADES: usize = 10;
const MAX_LOSS_PER_TRADE_PCT: f64 = 30.0;

fn create_test_candles(count: usize, base_price: f64) -> CandleSeries {
    let base_time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut series = CandleSeries::new();

    for i in 0..count {
        let anchor = base_price + 8.0 * ((i as f64) * 0.013).sin();
        let swing = 5.0 * ((i as f64) * 0.23).sin();
        let close = anchor + swing;
        let open = anchor + 5.0 * (((i as f64) - 1.0) * 0.23).sin();
        let high = open.max(close) + 1.0;
        let low = open.min(close) - 1.0;

        series.push(Candle::new(
            open,
            high,
            low,
            close,
            1_000.0,
            base_time + Duration::hours(i as i64),
            "BTC/USDT:USDT".to_string(),
            "1h".to_string(),
        ));
    }

    series
}

/// Penalized objective: higher is better, hard penalties for degenerate runs
fn score(result: &BacktestResult) -> f64 {
    if result.trades_count < MINIMUM_TRADES {
        return -1_000.0;
    }
    for trade in &result.trades {
        if trade.pnl < 0.0 && trade.pnl.abs() / START_CAPITAL * 100.0 > MAX_LOSS_PER_TRADE_PCT {
            return -1_001.0;
        }
    }
    result.total_pnl_pct
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Envelope-RS Grid Search Example ===\n");

    let series = create_test_candles(3_000, 100.0);
    let risk = RiskConfig {
        stop_loss_pct: 1.5,
        base_leverage: 5.0,
        target_atr_pct: 2.0,
        max_leverage: 20.0,
        ..RiskConfig::default()
    };

    let average_periods = [4usize, 6, 8];
    let envelope_starts = [2.0, 3.0];
    let envelope_steps = [1.0, 2.0];
    let envelope_counts = [2usize, 3];

    let mut ranked: Vec<(f64, StrategyConfig, BacktestResult)> = Vec::new();

    for &average_period in &average_periods {
        for &start in &envelope_starts {
            for &step in &envelope_steps {
                for &count in &envelope_counts {
                    let envelopes_pct: Vec<f64> =
                        (0..count).map(|i| start + i as f64 * step).collect();
                    let strategy = StrategyConfig {
                        average_type: AverageType::Sma,
                        average_period,
                        envelopes_pct,
                        atr_period: 14,
                        ..StrategyConfig::default()
                    };

                    let augmented = compute_envelope_indicators(&series, &strategy)?;
                    let result =
                        BacktestEngine::new(START_CAPITAL).run(&augmented, &strategy, &risk)?;
                    ranked.push((score(&result), strategy, result));
                }
            }
        }
    }

    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    println!("Top 5 of {} variants:\n", ranked.len());
    for (rank, (fitness, strategy, result)) in ranked.iter().take(5).enumerate() {
        println!(
            "#{} | score {:>8.2} | pnl {:>8.2}% | trades {:>3} | win rate {:>6.2}% | dd {:>5.2}% \
             | period {} | envelopes {:?}",
            rank + 1,
            fitness,
            result.total_pnl_pct,
            result.trades_count,
            result.win_rate,
            result.max_drawdown_pct * 100.0,
            strategy.average_period,
            strategy.envelopes_pct,
        );
    }

    Ok(())
}
