//! End-to-end analysis over an in-memory provider.

mod common;

use augur::error::DataError;
use augur::services::AnalysisService;
use augur::types::{Fundamentals, Period, RecommendationAction, SignalDirection, SignalSource};
use common::*;
use std::sync::Arc;

fn service(provider: StaticProvider) -> AnalysisService {
    AnalysisService::new(Arc::new(provider), 0.0)
}

#[tokio::test]
async fn test_accelerating_uptrend_is_buy() {
    let svc = service(StaticProvider::new().with_history("UP", accelerating_up(120)));
    let result = svc.analyze("up", Period::OneYear).await.unwrap();

    assert_eq!(result.symbol, "UP");
    let ma = &result.indicators.moving_averages;
    assert!(ma.sma20.unwrap() > ma.sma50.unwrap());

    let rec = &result.recommendation;
    assert_eq!(rec.action, RecommendationAction::Buy);
    assert_eq!(rec.signals[0].source, SignalSource::MaCrossover);
    assert_eq!(rec.signals[0].direction, SignalDirection::Bullish);
    assert_eq!(rec.signals[1].direction, SignalDirection::Bullish);
    assert_eq!(rec.bull_count, 2);
    assert_eq!(rec.bear_count, 1);
    assert!((rec.confidence - 0.4).abs() < 1e-12);
}

#[tokio::test]
async fn test_accelerating_downtrend_is_sell() {
    let svc = service(StaticProvider::new().with_history("DOWN", accelerating_down(80)));
    let result = svc.analyze("DOWN", Period::OneYear).await.unwrap();

    let rec = &result.recommendation;
    assert_eq!(rec.action, RecommendationAction::Sell);
    assert_eq!(rec.signals[0].direction, SignalDirection::Bearish);
    assert_eq!(rec.signals[1].direction, SignalDirection::Bearish);
    // Every change is a loss: RSI pinned at 0 reads oversold.
    assert_eq!(result.indicators.rsi, Some(0.0));
    assert_eq!(rec.signals[2].direction, SignalDirection::Bullish);
}

#[tokio::test]
async fn test_linear_ramp_scenario() {
    let closes: Vec<f64> = (10..=70).map(|c| c as f64).collect();
    let svc = service(StaticProvider::new().with_history("RAMP", bars_from_closes(&closes)));
    let result = svc.analyze("RAMP", Period::OneYear).await.unwrap();

    let ma = &result.indicators.moving_averages;
    assert!(ma.sma20.is_some() && ma.sma50.is_some());
    assert!(ma.sma20.unwrap() > ma.sma50.unwrap());
    assert_eq!(
        result.recommendation.signals[0].direction,
        SignalDirection::Bullish
    );
    assert_eq!(result.indicators.rsi, Some(100.0));
    assert_eq!(result.risk.sortino_ratio, None);
}

#[tokio::test]
async fn test_flat_series_risk_and_bands() {
    let svc = service(StaticProvider::new().with_history("FLAT", bars_from_closes(&[100.0; 30])));
    let result = svc.analyze("FLAT", Period::OneMonth).await.unwrap();

    assert_eq!(result.risk.annualized_volatility, Some(0.0));
    assert_eq!(result.risk.sharpe_ratio, None);
    assert_eq!(result.risk.sortino_ratio, None);
    assert_eq!(result.risk.calmar_ratio, None);

    let bands = &result.indicators.bollinger;
    assert_eq!(bands.upper, Some(100.0));
    assert_eq!(bands.middle, Some(100.0));
    assert_eq!(bands.lower, Some(100.0));

    // SMA(50) and the MACD signal line lack history at 30 bars.
    let skipped: Vec<&str> = result
        .skipped_indicators
        .iter()
        .map(|s| s.indicator.as_str())
        .collect();
    assert_eq!(skipped, vec!["SMA (50)", "MACD"]);
    assert!(result.chart.indicators["sma_50"].iter().all(Option::is_none));
    assert!(result.chart.indicators["macd_signal"].iter().all(Option::is_none));

    // Three of five signals vote; a lossless series pins RSI at 100.
    let rec = &result.recommendation;
    assert_eq!(rec.valid_signals, 3);
    assert_eq!(rec.bear_count, 1);
    assert_eq!(rec.action, RecommendationAction::Sell);
    assert!((rec.confidence - 0.2).abs() < 1e-12);
}

#[tokio::test]
async fn test_single_bar_is_insufficient_history() {
    let svc = service(StaticProvider::new().with_history("ONE", bars_from_closes(&[42.0])));
    let err = svc.analyze("ONE", Period::OneDay).await.unwrap_err();
    assert!(matches!(err, DataError::InsufficientHistory { available: 1, .. }));
}

#[tokio::test]
async fn test_unknown_symbol_is_data_error() {
    let svc = service(StaticProvider::new());
    let err = svc.analyze("MISSING", Period::OneYear).await.unwrap_err();
    assert_eq!(err, DataError::SymbolNotFound("MISSING".to_string()));
}

#[tokio::test]
async fn test_fundamentals_pass_through() {
    let fundamentals = Fundamentals {
        name: Some("Wavy Corp".to_string()),
        pe_ratio: Some(18.5),
        sector: Some("Technology".to_string()),
        ..Fundamentals::default()
    };
    let provider = StaticProvider::new()
        .with_history("WAVY", wavy(250))
        .with_fundamentals("WAVY", fundamentals.clone());
    let result = service(provider).analyze("WAVY", Period::OneYear).await.unwrap();
    assert_eq!(result.fundamentals, Some(fundamentals));

    // Missing fundamentals do not fail the analysis.
    let provider = StaticProvider::new().with_history("WAVY", wavy(250));
    let result = service(provider).analyze("WAVY", Period::OneYear).await.unwrap();
    assert_eq!(result.fundamentals, None);
}

#[tokio::test]
async fn test_result_invariants_on_noisy_history() {
    let svc = service(StaticProvider::new().with_history("WAVY", wavy(250)));
    let result = svc.analyze("WAVY", Period::OneYear).await.unwrap();

    assert_eq!(result.data_points, 250);
    assert_eq!(result.chart.timestamps.len(), 250);
    for values in result.chart.indicators.values() {
        assert_eq!(values.len(), 250);
    }

    let rsi = result.indicators.rsi.unwrap();
    assert!((0.0..=100.0).contains(&rsi));
    let stoch = &result.indicators.stochastic;
    assert!((0.0..=100.0).contains(&stoch.k.unwrap()));
    assert!((0.0..=100.0).contains(&stoch.d.unwrap()));

    let rec = &result.recommendation;
    assert!((0.0..=1.0).contains(&rec.confidence));
    assert_eq!(rec.signals.len(), 5);
    assert_eq!(rec.valid_signals, 5);
    if rec.bull_count == rec.bear_count {
        assert_eq!(rec.action, RecommendationAction::Hold);
    }

    let dd = result.risk.max_drawdown.unwrap();
    assert!((0.0..=1.0).contains(&dd));
    assert!(result.risk.sortino_ratio.is_some());
    assert!(result.risk.cvar_95.unwrap() <= result.risk.var_95.unwrap());

    // SMA columns are undefined before their window fills, defined after.
    let sma20 = &result.chart.indicators["sma_20"];
    assert!(sma20[..19].iter().all(Option::is_none));
    assert!(sma20[19..].iter().all(Option::is_some));
    let ema26 = &result.chart.indicators["ema_26"];
    assert!(ema26[..25].iter().all(Option::is_none));
    assert!(ema26[25..].iter().all(Option::is_some));
}

#[tokio::test]
async fn test_concurrent_analyses_are_independent() {
    let provider = StaticProvider::new()
        .with_history("UP", accelerating_up(120))
        .with_history("DOWN", accelerating_down(80));
    let svc = Arc::new(service(provider));

    let (up, down) = tokio::join!(
        svc.analyze("UP", Period::OneYear),
        svc.analyze("DOWN", Period::OneYear)
    );
    assert_eq!(up.unwrap().recommendation.action, RecommendationAction::Buy);
    assert_eq!(down.unwrap().recommendation.action, RecommendationAction::Sell);
}
