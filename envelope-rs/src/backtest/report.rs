//! Backtest report generation

use super::engine::BacktestResult;
use super::metrics::MetricsCalculator;

/// Backtest report
#[derive(Debug)]
pub struct BacktestReport {
    result: BacktestResult,
    profit_factor: f64,
    expectancy: f64,
    average_win: f64,
    average_loss: f64,
}

impl BacktestReport {
    /// Create new report from result
    pub fn new(result: BacktestResult) -> Self {
        let profit_factor = MetricsCalculator::profit_factor(&result.trades);
        let expectancy = MetricsCalculator::expectancy(&result.trades);
        let average_win = MetricsCalculator::average_win(&result.trades);
        let average_loss = MetricsCalculator::average_loss(&result.trades);

        Self {
            result,
            profit_factor,
            expectancy,
            average_win,
            average_loss,
        }
    }

    /// Format report as string
    pub fn format(&self) -> String {
        format!(
            r#"
Envelope Backtest Results
=========================
Start Capital:    {:.2} USDT
End Capital:      {:.2} USDT
Total PnL:        {:.2} %
Max Drawdown:     {:.2} %
Number of Trades: {}
Win Rate:         {:.2} %
Average Win:      {:.2} USDT
Average Loss:     {:.2} USDT
Profit Factor:    {:.2}
Expectancy:       {:.2} USDT
"#,
            self.result.start_capital,
            self.result.end_capital,
            self.result.total_pnl_pct,
            self.result.max_drawdown_pct * 100.0,
            self.result.trades_count,
            self.result.win_rate,
            self.average_win,
            self.average_loss,
            self.profit_factor,
            self.expectancy,
        )
    }

    /// Serialize the full result (ledger included) to pretty JSON
    ///
    /// The serde round-trip is lossless for every ledger and summary field.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.result)
    }

    /// Get result reference
    pub fn result(&self) -> &BacktestResult {
        &self.result
    }
}
