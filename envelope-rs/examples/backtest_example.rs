//! Example: backtesting the envelope strategy on synthetic data

use chrono::{Duration, TimeZone, Utc};
use envelope_rs::backtest::{BacktestEngine, BacktestReport};
use envelope_rs::config::{AverageType, RiskConfig, StrategyConfig};
use envelope_rs::data::{Candle, CandleSeries};
use envelope_rs::strategy::compute_envelope_indicators;

/// Mean-reverting tape: price oscillates around a slowly drifting anchor
fn create_test_candles(count: usize, base_price: f64) -> CandleSeries {
    let base_time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut series = CandleSeries::new();

    for i in 0..count {
        let anchor = base_price + (i as f64 * 0.01);
        let swing = 6.0 * ((i as f64) * 0.21).sin();
        let close = anchor + swing;
        let open = anchor + 6.0 * (((i as f64) - 1.0) * 0.21).sin();
        let high = open.max(close) + 1.5;
        let low = open.min(close) - 1.5;

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

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== Envelope-RS Backtest Example ===\n");

    println!("Creating test candle data...");
    let series = create_test_candles(2_000, 100.0);

    let strategy = StrategyConfig {
        average_type: AverageType::Dcm,
        average_period: 6,
        envelopes_pct: vec![2.0, 4.0, 6.0],
        atr_period: 14,
        ..StrategyConfig::default()
    };
    let risk = RiskConfig {
        stop_loss_pct: 1.5,
        base_leverage: 5.0,
        target_atr_pct: 2.0,
        max_leverage: 20.0,
        ..RiskConfig::default()
    };

    println!("Computing envelope indicators...");
    let augmented = compute_envelope_indicators(&series, &strategy)?;

    println!("Running backtest...\n");
    let mut engine = BacktestEngine::new(1_000.0);
    let result = engine.run(&augmented, &strategy, &risk)?;

    let report = BacktestReport::new(result);
    println!("{}", report.format());

    println!("First trades:");
    for trade in report.result().trades.iter().take(5) {
        println!(
            "  {} | {:<5} | entry {:>9.4} | exit {:>9.4} | pnl {:>+8.2} | balance {:>9.2}",
            trade.timestamp, trade.side, trade.entry_price, trade.exit_price, trade.pnl,
            trade.balance,
        );
    }

    Ok(())
}
