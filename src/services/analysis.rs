//! Fetch, compute and assemble one analysis per symbol.

use crate::error::DataError;
use crate::services::indicators::IndicatorEngine;
use crate::services::recommendation::RecommendationAggregator;
use crate::services::risk::RiskMetricsCalculator;
use crate::services::series::{Column, PriceSeries};
use crate::services::signals::SignalEvaluator;
use crate::sources::MarketDataProvider;
use crate::types::{
    AnalysisResult, Bar, BollingerSnapshot, Fundamentals, IndicatorSnapshot, MacdSnapshot,
    MovingAverages, Period, SkippedIndicator, StochasticSnapshot,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fewest bars an analysis accepts; a price change needs two.
pub const MIN_BARS: usize = 2;

/// Analysis pipeline: provider fetch, indicators, signals, recommendation
/// and risk metrics.
///
/// Holds no per-request state, so one instance serves concurrent requests.
pub struct AnalysisService {
    provider: Arc<dyn MarketDataProvider>,
    engine: IndicatorEngine,
    evaluator: SignalEvaluator,
    aggregator: RecommendationAggregator,
    risk: RiskMetricsCalculator,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, risk_free_rate: f64) -> Self {
        Self {
            provider,
            engine: IndicatorEngine::default(),
            evaluator: SignalEvaluator::default(),
            aggregator: RecommendationAggregator::new(),
            risk: RiskMetricsCalculator::new(risk_free_rate),
        }
    }

    /// Whether the price history for this request is already cached.
    pub fn is_cached(&self, symbol: &str, period: Period) -> bool {
        self.provider.is_cached(&normalize_symbol(symbol), period)
    }

    /// Fetch history and fundamentals for `symbol` and analyze them.
    ///
    /// A fundamentals failure is logged and leaves `fundamentals` empty;
    /// any history failure aborts the analysis.
    pub async fn analyze(&self, symbol: &str, period: Period) -> Result<AnalysisResult, DataError> {
        let symbol = normalize_symbol(symbol);
        debug!("Analyzing {} over {}", symbol, period);

        let (history, fundamentals) = tokio::join!(
            self.provider.history(&symbol, period),
            self.provider.fundamentals(&symbol)
        );

        let bars = history?;
        let fundamentals = match fundamentals {
            Ok(f) => Some(f),
            Err(e) => {
                warn!("Fundamentals unavailable for {}: {}", symbol, e);
                None
            }
        };

        let result = self.analyze_bars(&symbol, period, bars, fundamentals)?;
        info!(
            "Analyzed {}: {} ({:.0}% confidence, {} bars)",
            result.symbol,
            result.recommendation.action.label(),
            result.recommendation.confidence * 100.0,
            result.data_points
        );
        Ok(result)
    }

    /// Analyze already-fetched bars. Deterministic apart from `last_updated`.
    pub fn analyze_bars(
        &self,
        symbol: &str,
        period: Period,
        bars: Vec<Bar>,
        fundamentals: Option<Fundamentals>,
    ) -> Result<AnalysisResult, DataError> {
        let mut series = PriceSeries::new(bars)?;
        if series.len() < MIN_BARS {
            return Err(DataError::InsufficientHistory {
                required: MIN_BARS,
                available: series.len(),
            });
        }

        let report = self.engine.run(&mut series);
        let signals = self.evaluator.evaluate(&series);
        let recommendation = self.aggregator.aggregate(signals);
        let risk = self.risk.compute(&series);

        let latest = *series.latest();
        // At least two bars, checked above.
        let previous_close = series.previous().map(|b| b.close).unwrap_or(latest.close);
        let price_change = latest.close - previous_close;

        Ok(AnalysisResult {
            symbol: symbol.to_string(),
            period,
            current_price: latest.close,
            price_change,
            price_change_pct: price_change / previous_close * 100.0,
            volume: latest.volume,
            data_points: series.len(),
            indicators: snapshot(&series),
            recommendation,
            risk,
            chart: series.chart(),
            fundamentals,
            skipped_indicators: report
                .skipped
                .into_iter()
                .map(|e| SkippedIndicator {
                    indicator: e.indicator,
                    required: e.required,
                    available: e.available,
                })
                .collect(),
            last_updated: chrono::Utc::now().timestamp_millis(),
        })
    }
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

fn snapshot(series: &PriceSeries) -> IndicatorSnapshot {
    let latest = |column| series.latest_value(column);

    IndicatorSnapshot {
        moving_averages: MovingAverages {
            sma20: latest(Column::Sma(20)),
            sma50: latest(Column::Sma(50)),
            ema12: latest(Column::Ema(12)),
            ema26: latest(Column::Ema(26)),
        },
        macd: MacdSnapshot {
            line: latest(Column::MacdLine),
            signal: latest(Column::MacdSignal),
            histogram: latest(Column::MacdHistogram),
        },
        rsi: latest(Column::Rsi),
        bollinger: BollingerSnapshot {
            upper: latest(Column::BollingerUpper),
            middle: latest(Column::BollingerMiddle),
            lower: latest(Column::BollingerLower),
        },
        stochastic: StochasticSnapshot {
            k: latest(Column::StochasticK),
            d: latest(Column::StochasticD),
        },
        volume_sma: latest(Column::VolumeSma(20)),
    }
}
