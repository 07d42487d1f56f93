//! Majority-vote recommendation over indicator signals.

use crate::types::{Recommendation, RecommendationAction, Signal, SignalDirection, SignalSource};

/// Tallies signals into a BUY / SELL / HOLD call.
#[derive(Debug, Clone, Default)]
pub struct RecommendationAggregator;

impl RecommendationAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Combine signals into a recommendation.
    ///
    /// Only available signals vote, but confidence is measured against the
    /// full set of sources: the winning share for BUY and SELL, the balance
    /// of the vote for HOLD. No available signals gives HOLD with zero
    /// confidence.
    pub fn aggregate(&self, signals: Vec<Signal>) -> Recommendation {
        let mut bull_count = 0u32;
        let mut bear_count = 0u32;
        let mut neutral_count = 0u32;
        let mut valid_signals = 0u32;

        for signal in signals.iter().filter(|s| s.available) {
            valid_signals += 1;
            match signal.direction {
                SignalDirection::Bullish => bull_count += 1,
                SignalDirection::Bearish => bear_count += 1,
                SignalDirection::Neutral => neutral_count += 1,
            }
        }

        let action = if bull_count > bear_count {
            RecommendationAction::Buy
        } else if bear_count > bull_count {
            RecommendationAction::Sell
        } else {
            RecommendationAction::Hold
        };

        let confidence = if valid_signals == 0 {
            0.0
        } else {
            let total = SignalSource::ALL.len() as f64;
            match action {
                RecommendationAction::Hold => {
                    1.0 - (bull_count as f64 - bear_count as f64).abs() / total
                }
                _ => bull_count.max(bear_count) as f64 / total,
            }
        }
        .clamp(0.0, 1.0);

        let description = describe(action, confidence, bull_count, bear_count, &signals);

        Recommendation {
            action,
            confidence,
            bull_count,
            bear_count,
            neutral_count,
            valid_signals,
            signals,
            description,
        }
    }
}

fn describe(
    action: RecommendationAction,
    confidence: f64,
    bull_count: u32,
    bear_count: u32,
    signals: &[Signal],
) -> String {
    let missing: Vec<&str> = signals
        .iter()
        .filter(|s| !s.available)
        .map(|s| s.source.name())
        .collect();
    if missing.len() == signals.len() {
        return "Not enough history to evaluate any indicator".to_string();
    }

    let lean = match action {
        RecommendationAction::Buy => "Bullish",
        RecommendationAction::Sell => "Bearish",
        RecommendationAction::Hold => "Mixed",
    };
    let mut text = format!(
        "{} outlook: {} bullish, {} bearish of {} signals ({} at {:.0}% confidence)",
        lean,
        bull_count,
        bear_count,
        signals.len(),
        action.label(),
        confidence * 100.0
    );
    if !missing.is_empty() {
        text.push_str(&format!("; not enough history for {}", missing.join(", ")));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalSource;

    fn signals(directions: &[SignalDirection]) -> Vec<Signal> {
        SignalSource::ALL
            .iter()
            .zip(directions)
            .map(|(&source, &direction)| match direction {
                SignalDirection::Neutral => Signal::neutral(source),
                _ => Signal::new(source, direction, Some(0.5)),
            })
            .collect()
    }

    use crate::types::SignalDirection::{Bearish as Bear, Bullish as Bull, Neutral as Flat};

    #[test]
    fn test_majority_bullish_is_buy() {
        let rec = RecommendationAggregator::new().aggregate(signals(&[Bull, Bull, Bull, Bear, Flat]));
        assert_eq!(rec.action, RecommendationAction::Buy);
        assert_eq!(rec.bull_count, 3);
        assert_eq!(rec.bear_count, 1);
        assert_eq!(rec.neutral_count, 1);
        assert!((rec.confidence - 0.6).abs() < 1e-12);
        assert_eq!(rec.signals.len(), 5);
    }

    #[test]
    fn test_majority_bearish_is_sell() {
        let rec = RecommendationAggregator::new().aggregate(signals(&[Bear, Bear, Flat, Flat, Flat]));
        assert_eq!(rec.action, RecommendationAction::Sell);
        assert!((rec.confidence - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_tie_is_hold() {
        let rec = RecommendationAggregator::new().aggregate(signals(&[Bull, Bear, Flat, Flat, Flat]));
        assert_eq!(rec.action, RecommendationAction::Hold);
        assert_eq!(rec.confidence, 1.0);

        let rec = RecommendationAggregator::new().aggregate(signals(&[Bull, Bull, Bear, Bear, Flat]));
        assert_eq!(rec.action, RecommendationAction::Hold);
    }

    #[test]
    fn test_unavailable_signals_do_not_vote() {
        let mut input = signals(&[Bull, Bull, Flat, Flat, Flat]);
        input[2] = Signal::unavailable(SignalSource::Rsi);
        input[3] = Signal::unavailable(SignalSource::Bollinger);
        let rec = RecommendationAggregator::new().aggregate(input);
        assert_eq!(rec.valid_signals, 3);
        assert_eq!(rec.neutral_count, 1);
        assert_eq!(rec.action, RecommendationAction::Buy);
        // Measured against all five sources, not the three that voted.
        assert!((rec.confidence - 0.4).abs() < 1e-12);
        assert!(rec.description.contains("not enough history for RSI, Bollinger Bands"));
    }

    #[test]
    fn test_hold_confidence_counts_missing_signals() {
        let mut input = signals(&[Bull, Flat, Flat, Flat, Flat]);
        input[0] = Signal::unavailable(SignalSource::MaCrossover);
        input[1] = Signal::new(SignalSource::Macd, Bear, Some(0.2));
        input[2] = Signal::new(SignalSource::Rsi, Bull, Some(0.2));
        let rec = RecommendationAggregator::new().aggregate(input);
        assert_eq!(rec.action, RecommendationAction::Hold);
        assert_eq!(rec.confidence, 1.0);

        let mut input = signals(&[Bull, Bull, Bear, Flat, Flat]);
        input[4] = Signal::unavailable(SignalSource::Stochastic);
        let rec = RecommendationAggregator::new().aggregate(input);
        assert_eq!(rec.action, RecommendationAction::Buy);
        assert!((rec.confidence - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_no_valid_signals_is_hold_zero() {
        let input: Vec<Signal> = SignalSource::ALL.iter().map(|&s| Signal::unavailable(s)).collect();
        let rec = RecommendationAggregator::new().aggregate(input);
        assert_eq!(rec.action, RecommendationAction::Hold);
        assert_eq!(rec.confidence, 0.0);
        assert_eq!(rec.valid_signals, 0);
    }

    #[test]
    fn test_confidence_always_in_unit_range() {
        let options = [Bull, Bear, Flat];
        for a in options {
            for b in options {
                for c in options {
                    let rec = RecommendationAggregator::new().aggregate(signals(&[a, b, c, Flat, Bull]));
                    assert!((0.0..=1.0).contains(&rec.confidence));
                    if rec.bull_count == rec.bear_count {
                        assert_eq!(rec.action, RecommendationAction::Hold);
                    }
                }
            }
        }
    }

    #[test]
    fn test_description_mentions_counts() {
        let rec = RecommendationAggregator::new().aggregate(signals(&[Bull, Bull, Bull, Bear, Flat]));
        assert!(rec.description.contains("3 bullish"));
        assert!(rec.description.contains("Buy"));
        assert!(!rec.description.contains("not enough history"));
    }
}
