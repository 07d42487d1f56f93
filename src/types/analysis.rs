use super::{Period, Recommendation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latest moving-average values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverages {
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub ema12: Option<f64>,
    pub ema26: Option<f64>,
}

/// Latest MACD values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdSnapshot {
    pub line: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Latest Bollinger band values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerSnapshot {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
}

/// Latest stochastic oscillator values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StochasticSnapshot {
    pub k: Option<f64>,
    pub d: Option<f64>,
}

/// Every indicator's value at the latest bar. `None` where undefined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub moving_averages: MovingAverages,
    pub macd: MacdSnapshot,
    pub rsi: Option<f64>,
    pub bollinger: BollingerSnapshot,
    pub stochastic: StochasticSnapshot,
    pub volume_sma: Option<f64>,
}

/// Volatility and risk-adjusted return metrics. `None` means undefined
/// (too little history or a zero denominator).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub daily_volatility: Option<f64>,
    pub annualized_volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    pub calmar_ratio: Option<f64>,
    /// Largest peak-to-trough decline as a fraction in [0, 1].
    pub max_drawdown: Option<f64>,
    /// 5% quantile of daily returns.
    pub var_95: Option<f64>,
    /// Mean of the returns at or below `var_95`.
    pub cvar_95: Option<f64>,
    /// First-to-last close change in percent.
    pub total_return_pct: Option<f64>,
}

/// Company data passed through from the provider for display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundamentals {
    pub name: Option<String>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

/// Full price and indicator series for chart rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub timestamps: Vec<i64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    /// Derived columns keyed by column name, aligned with `timestamps`.
    pub indicators: BTreeMap<String, Vec<Option<f64>>>,
}

/// Indicator that could not be computed for lack of history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedIndicator {
    pub indicator: String,
    pub required: usize,
    pub available: usize,
}

/// Everything produced by one analysis of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub symbol: String,
    pub period: Period,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_pct: f64,
    pub volume: f64,
    pub data_points: usize,
    pub indicators: IndicatorSnapshot,
    pub recommendation: Recommendation,
    pub risk: RiskMetrics,
    pub chart: ChartSeries,
    pub fundamentals: Option<Fundamentals>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_indicators: Vec<SkippedIndicator>,
    /// Unix timestamp (milliseconds) when computed.
    pub last_updated: i64,
}
