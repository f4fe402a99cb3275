//! Unit tests for envelope-rs modules

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use envelope_rs::config::{AverageType, RiskConfig, StrategyConfig};
    use envelope_rs::data::{Candle, CandleSeries};
    use envelope_rs::indicators::{Indicator, ATR, DCM, SMA, WMA};
    use envelope_rs::strategy::dynamic_leverage;

    fn test_candle(open: f64, high: f64, low: f64, close: f64, hour: i64) -> Candle {
        Candle::new(
            open,
            high,
            low,
            close,
            1_000.0,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour),
            "BTC/USDT:USDT".to_string(),
            "1h".to_string(),
        )
    }

    #[test]
    fn test_candle_creation() {
        let candle = test_candle(100.0, 110.0, 95.0, 105.0, 0);

        assert_eq!(candle.open, 100.0);
        assert_eq!(candle.high, 110.0);
        assert_eq!(candle.low, 95.0);
        assert_eq!(candle.close, 105.0);
        assert_eq!(candle.median_price(), 102.5);
        assert_eq!(candle.range(), 15.0);
        assert!(candle.validate().is_ok());
    }

    #[test]
    fn test_candle_validation_rejects_bad_prices() {
        let candle = test_candle(100.0, 110.0, -95.0, 105.0, 0);
        assert!(candle.validate().is_err());

        // close above the high
        let candle = test_candle(100.0, 104.0, 95.0, 105.0, 0);
        assert!(candle.validate().is_err());
    }

    #[test]
    fn test_series_validation_rejects_unordered_timestamps() {
        let mut series = CandleSeries::new();
        series.push(test_candle(100.0, 101.0, 99.0, 100.0, 1));
        series.push(test_candle(100.0, 101.0, 99.0, 100.0, 0));
        assert!(series.validate().is_err());

        series.sort_by_time();
        assert!(series.validate().is_ok());
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.get(0).unwrap().timestamp, series.candles()[0].timestamp);
        assert_eq!(series.last().unwrap().timestamp, series.candles()[1].timestamp);
    }

    #[test]
    fn test_sma_indicator() {
        let mut sma = SMA::new(10);
        assert_eq!(sma.name(), "SMA");
        assert_eq!(sma.period(), 10);
        assert!(!sma.is_ready());

        for i in 0..20 {
            sma.update(100.0 + (i as f64 * 0.1));
        }

        assert!(sma.is_ready());
        assert!(sma.value().is_some());
    }

    #[test]
    fn test_wma_indicator() {
        let mut wma = WMA::new(10);
        assert_eq!(wma.name(), "WMA");
        assert_eq!(wma.period(), 10);
        assert!(!wma.is_ready());

        for i in 0..20 {
            wma.update(100.0 + (i as f64 * 0.1));
        }

        assert!(wma.is_ready());
        assert!(wma.value().is_some());
    }

    #[test]
    fn test_dcm_indicator() {
        let mut dcm = DCM::new(10);
        assert_eq!(dcm.period(), 10);
        assert!(!dcm.is_ready());

        for i in 0..20 {
            let mid = 100.0 + (i as f64 * 0.1);
            dcm.update(mid + 1.0, mid - 1.0);
        }

        assert!(dcm.is_ready());
        assert!(dcm.value().is_some());
    }

    #[test]
    fn test_atr_indicator() {
        let mut atr = ATR::new(10);
        assert_eq!(atr.period(), 10);
        assert!(!atr.is_ready());

        for i in 0..20 {
            let mid = 100.0 + (i as f64 * 0.1);
            atr.update(&test_candle(mid, mid + 1.0, mid - 1.0, mid, i))
                .unwrap();
        }

        assert!(atr.is_ready());
        assert!(atr.value().unwrap() > 0.0);
    }

    #[test]
    fn test_average_type_round_trip() {
        for average_type in [AverageType::Sma, AverageType::Wma, AverageType::Dcm] {
            let parsed: AverageType = average_type.to_string().parse().unwrap();
            assert_eq!(parsed, average_type);
        }
    }

    #[test]
    fn test_default_configs_are_valid() {
        assert!(StrategyConfig::default().validate().is_ok());
        assert!(RiskConfig::default().validate().is_ok());
    }

    #[test]
    fn test_leverage_fallback_is_clamped() {
        let risk = RiskConfig {
            base_leverage: 7.0,
            max_leverage: 5.0,
            ..RiskConfig::default()
        };
        // zero ATR: base leverage unscaled, still clamped to the cap
        assert_eq!(dynamic_leverage(&risk, Some(0.0)), 5.0);
        assert_eq!(dynamic_leverage(&risk, None), 5.0);
    }
}
