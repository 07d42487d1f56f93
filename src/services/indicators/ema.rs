//! Exponential Moving Average (EMA) indicator.

use super::rolling::RollingWindow;
use super::Indicator;
use crate::error::InsufficientDataError;
use crate::services::series::{Column, PriceSeries};

/// Exponential moving average with `α = 2 / (period + 1)`.
///
/// Seeded with the SMA of the first `period` defined values, so the first
/// output lands at `start + period - 1` where `start` is the first defined
/// input. Leading `NaN`s (e.g. the MACD line) are skipped.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut seed = RollingWindow::new(period);
    let mut current: Option<f64> = None;

    for &v in values {
        if v.is_nan() {
            seed.clear();
            current = None;
            out.push(f64::NAN);
            continue;
        }
        match current {
            Some(prev) => {
                let next = (v - prev) * alpha + prev;
                current = Some(next);
                out.push(next);
            }
            None => {
                seed.push(v);
                if seed.is_full() {
                    let first = seed.mean();
                    current = Some(first);
                    out.push(first);
                } else {
                    out.push(f64::NAN);
                }
            }
        }
    }

    out
}

/// EMA of closing prices.
pub struct Ema {
    period: usize,
    id: String,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            id: format!("ema{}", period),
            name: format!("EMA ({})", period),
        }
    }
}

impl Indicator for Ema {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> Vec<Column> {
        vec![Column::Ema(self.period)]
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &PriceSeries) -> Result<Vec<Vec<f64>>, InsufficientDataError> {
        self.ensure_history(series)?;
        Ok(vec![ema(&series.closes(), self.period)])
    }
}
