//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::ema;
use super::Indicator;
use crate::error::InsufficientDataError;
use crate::services::series::{Column, PriceSeries};

/// MACD indicator.
///
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// The line is defined from index `slow - 1`, the signal and histogram from
/// `slow + signal - 2`. History shorter than `slow + signal - 1` bars is
/// insufficient, since the signal line never forms.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        debug_assert!(fast_period < slow_period);
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }
}

impl Indicator for Macd {
    fn id(&self) -> &str {
        "macd"
    }

    fn name(&self) -> &str {
        "MACD"
    }

    fn columns(&self) -> Vec<Column> {
        vec![Column::MacdLine, Column::MacdSignal, Column::MacdHistogram]
    }

    fn min_periods(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn calculate(&self, series: &PriceSeries) -> Result<Vec<Vec<f64>>, InsufficientDataError> {
        self.ensure_history(series)?;

        let closes = series.closes();
        let fast = ema(&closes, self.fast_period);
        let slow = ema(&closes, self.slow_period);

        // NaN propagates wherever the slow EMA is not yet seeded.
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema(&line, self.signal_period);
        let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

        Ok(vec![line, signal, histogram])
    }
}
