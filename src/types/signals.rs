use serde::{Deserialize, Serialize};

/// Direction of a single indicator signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Bullish,
    Bearish,
    Neutral,
}

/// Indicator family a signal is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    MaCrossover,
    Macd,
    Rsi,
    Bollinger,
    Stochastic,
}

impl SignalSource {
    /// Evaluation order; also the order signals appear in a recommendation.
    pub const ALL: [SignalSource; 5] = [
        SignalSource::MaCrossover,
        SignalSource::Macd,
        SignalSource::Rsi,
        SignalSource::Bollinger,
        SignalSource::Stochastic,
    ];

    /// Display name used in recommendation descriptions.
    pub fn name(&self) -> &'static str {
        match self {
            SignalSource::MaCrossover => "MA Crossover",
            SignalSource::Macd => "MACD",
            SignalSource::Rsi => "RSI",
            SignalSource::Bollinger => "Bollinger Bands",
            SignalSource::Stochastic => "Stochastic",
        }
    }
}

/// Directional reading of one indicator family at the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub source: SignalSource,
    pub direction: SignalDirection,
    /// How far past its threshold the indicator sits, in [0, 1].
    /// `None` for neutral readings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    /// False when the indicator inputs were undefined at the latest bar.
    pub available: bool,
}

impl Signal {
    pub fn new(source: SignalSource, direction: SignalDirection, strength: Option<f64>) -> Self {
        Self {
            source,
            direction,
            strength: strength.map(|s| s.clamp(0.0, 1.0)),
            available: true,
        }
    }

    pub fn neutral(source: SignalSource) -> Self {
        Self::new(source, SignalDirection::Neutral, None)
    }

    /// Neutral placeholder for a rule whose inputs are missing.
    pub fn unavailable(source: SignalSource) -> Self {
        Self {
            source,
            direction: SignalDirection::Neutral,
            strength: None,
            available: false,
        }
    }
}

/// Recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationAction {
    Buy,
    Sell,
    Hold,
}

impl RecommendationAction {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationAction::Buy => "Buy",
            RecommendationAction::Sell => "Sell",
            RecommendationAction::Hold => "Hold",
        }
    }
}

/// Composite recommendation over all indicator signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: RecommendationAction,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub bull_count: u32,
    pub bear_count: u32,
    pub neutral_count: u32,
    /// Signals whose inputs were defined; the denominator for confidence.
    pub valid_signals: u32,
    pub signals: Vec<Signal>,
    pub description: String,
}
