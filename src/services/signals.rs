//! Per-indicator directional signals at the latest bar.

use crate::services::series::{Column, PriceSeries};
use crate::types::{Signal, SignalDirection, SignalSource};
use std::cmp::Ordering;

/// Relative tolerance under which two indicator values count as equal.
const EQUALITY_TOLERANCE: f64 = 1e-9;

/// Compare two readings, treating floating-point noise as a tie.
fn compare(a: f64, b: f64) -> Ordering {
    let scale = a.abs().max(b.abs()).max(1.0);
    if (a - b).abs() <= EQUALITY_TOLERANCE * scale {
        Ordering::Equal
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Thresholds for the oscillator rules.
#[derive(Debug, Clone)]
pub struct SignalEvaluator {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub stochastic_oversold: f64,
    pub stochastic_overbought: f64,
}

impl Default for SignalEvaluator {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
        }
    }
}

impl SignalEvaluator {
    /// Evaluate every rule independently, in [`SignalSource::ALL`] order.
    ///
    /// A rule whose inputs are undefined at the latest bar yields an
    /// unavailable neutral signal instead of failing.
    pub fn evaluate(&self, series: &PriceSeries) -> Vec<Signal> {
        SignalSource::ALL
            .iter()
            .map(|&source| {
                let signal = match source {
                    SignalSource::MaCrossover => self.ma_crossover(series),
                    SignalSource::Macd => self.macd(series),
                    SignalSource::Rsi => self.rsi(series),
                    SignalSource::Bollinger => self.bollinger(series),
                    SignalSource::Stochastic => self.stochastic(series),
                };
                signal.unwrap_or_else(|| Signal::unavailable(source))
            })
            .collect()
    }

    /// SMA(20) above SMA(50) is bullish. A 5% gap is full strength.
    fn ma_crossover(&self, series: &PriceSeries) -> Option<Signal> {
        let fast = series.latest_value(Column::Sma(20))?;
        let slow = series.latest_value(Column::Sma(50))?;
        let strength = ((fast - slow).abs() / slow * 20.0).min(1.0);

        Some(match compare(fast, slow) {
            Ordering::Greater => Signal::new(SignalSource::MaCrossover, SignalDirection::Bullish, Some(strength)),
            Ordering::Less => Signal::new(SignalSource::MaCrossover, SignalDirection::Bearish, Some(strength)),
            Ordering::Equal => Signal::neutral(SignalSource::MaCrossover),
        })
    }

    /// MACD line above its signal line is bullish. A histogram of 1% of the
    /// price is full strength.
    fn macd(&self, series: &PriceSeries) -> Option<Signal> {
        let line = series.latest_value(Column::MacdLine)?;
        let signal = series.latest_value(Column::MacdSignal)?;
        let close = series.latest().close;
        let strength = ((line - signal).abs() / close * 100.0).min(1.0);

        Some(match compare(line, signal) {
            Ordering::Greater => Signal::new(SignalSource::Macd, SignalDirection::Bullish, Some(strength)),
            Ordering::Less => Signal::new(SignalSource::Macd, SignalDirection::Bearish, Some(strength)),
            Ordering::Equal => Signal::neutral(SignalSource::Macd),
        })
    }

    /// Oversold RSI is bullish, overbought is bearish.
    fn rsi(&self, series: &PriceSeries) -> Option<Signal> {
        let rsi = series.latest_value(Column::Rsi)?;

        Some(if rsi < self.rsi_oversold {
            let strength = (self.rsi_oversold - rsi) / self.rsi_oversold;
            Signal::new(SignalSource::Rsi, SignalDirection::Bullish, Some(strength))
        } else if rsi > self.rsi_overbought {
            let strength = (rsi - self.rsi_overbought) / (100.0 - self.rsi_overbought);
            Signal::new(SignalSource::Rsi, SignalDirection::Bearish, Some(strength))
        } else {
            Signal::neutral(SignalSource::Rsi)
        })
    }

    /// Close below the lower band is bullish, above the upper band bearish.
    /// Strength is the overshoot in half-band widths.
    fn bollinger(&self, series: &PriceSeries) -> Option<Signal> {
        let upper = series.latest_value(Column::BollingerUpper)?;
        let middle = series.latest_value(Column::BollingerMiddle)?;
        let lower = series.latest_value(Column::BollingerLower)?;
        let close = series.latest().close;
        let half_width = middle - lower;
        let overshoot = |distance: f64| {
            if half_width > 0.0 {
                distance / half_width
            } else {
                1.0
            }
        };

        Some(if compare(close, lower) == Ordering::Less {
            Signal::new(SignalSource::Bollinger, SignalDirection::Bullish, Some(overshoot(lower - close)))
        } else if compare(close, upper) == Ordering::Greater {
            Signal::new(SignalSource::Bollinger, SignalDirection::Bearish, Some(overshoot(close - upper)))
        } else {
            Signal::neutral(SignalSource::Bollinger)
        })
    }

    /// Oversold %K turning up through %D is bullish; overbought %K turning
    /// down through %D is bearish.
    fn stochastic(&self, series: &PriceSeries) -> Option<Signal> {
        let k = series.latest_value(Column::StochasticK)?;
        let d = series.latest_value(Column::StochasticD)?;

        Some(
            if k < self.stochastic_oversold && compare(k, d) == Ordering::Greater {
                let strength = (self.stochastic_oversold - k) / self.stochastic_oversold;
                Signal::new(SignalSource::Stochastic, SignalDirection::Bullish, Some(strength))
            } else if k > self.stochastic_overbought && compare(k, d) == Ordering::Less {
                let strength = (k - self.stochastic_overbought) / (100.0 - self.stochastic_overbought);
                Signal::new(SignalSource::Stochastic, SignalDirection::Bearish, Some(strength))
            } else {
                Signal::neutral(SignalSource::Stochastic)
            },
        )
    }
}
