//! Simple Moving Average (SMA) indicator.

use super::rolling::RollingWindow;
use super::Indicator;
use crate::error::InsufficientDataError;
use crate::services::series::{Column, PriceSeries};

/// Rolling arithmetic mean over `period` values.
///
/// Output is `NaN` until `period` consecutive defined inputs have been seen;
/// a `NaN` input restarts the window.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let mut window = RollingWindow::new(period);
    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                window.clear();
                return f64::NAN;
            }
            window.push(v);
            if window.is_full() {
                window.mean()
            } else {
                f64::NAN
            }
        })
        .collect()
}

/// SMA of closing prices.
pub struct Sma {
    period: usize,
    id: String,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            id: format!("sma{}", period),
            name: format!("SMA ({})", period),
        }
    }
}

impl Indicator for Sma {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> Vec<Column> {
        vec![Column::Sma(self.period)]
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &PriceSeries) -> Result<Vec<Vec<f64>>, InsufficientDataError> {
        self.ensure_history(series)?;
        Ok(vec![sma(&series.closes(), self.period)])
    }
}
