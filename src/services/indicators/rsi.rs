//! Relative Strength Index (RSI) indicator.

use super::Indicator;
use crate::error::InsufficientDataError;
use crate::services::series::{Column, PriceSeries};

/// Wilder-smoothed RSI over `closes`.
///
/// The first average gain/loss is the plain mean of the first `period`
/// changes (landing at index `period`); after that
/// `avg = (avg_prev * (period - 1) + current) / period`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    let change = |i: usize| closes[i] - closes[i - 1];
    let split = |c: f64| if c > 0.0 { (c, 0.0) } else { (0.0, -c) };

    let (mut avg_gain, mut avg_loss) = (1..=period)
        .map(|i| split(change(i)))
        .fold((0.0, 0.0), |(g, l), (cg, cl)| (g + cg, l + cl));
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    out[period] = rsi_value(avg_gain, avg_loss);

    let n = period as f64;
    for i in (period + 1)..closes.len() {
        let (gain, loss) = split(change(i));
        avg_gain = (avg_gain * (n - 1.0) + gain) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss) / n;
        out[i] = rsi_value(avg_gain, avg_loss);
    }

    out
}

/// RS is treated as infinite when there are no losses.
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// RSI (Relative Strength Index) indicator.
///
/// Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Rsi {
    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        "RSI"
    }

    fn columns(&self) -> Vec<Column> {
        vec![Column::Rsi]
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, series: &PriceSeries) -> Result<Vec<Vec<f64>>, InsufficientDataError> {
        self.ensure_history(series)?;
        Ok(vec![rsi(&series.closes(), self.period)])
    }
}
