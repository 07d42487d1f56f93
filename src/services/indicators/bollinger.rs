//! Bollinger Bands indicator.

use super::rolling::RollingWindow;
use super::Indicator;
use crate::error::InsufficientDataError;
use crate::services::series::{Column, PriceSeries};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// The deviation is the population standard deviation of the same window.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Indicator for BollingerBands {
    fn id(&self) -> &str {
        "bollinger"
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }

    fn columns(&self) -> Vec<Column> {
        vec![
            Column::BollingerUpper,
            Column::BollingerMiddle,
            Column::BollingerLower,
        ]
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &PriceSeries) -> Result<Vec<Vec<f64>>, InsufficientDataError> {
        self.ensure_history(series)?;

        let len = series.len();
        let mut upper = vec![f64::NAN; len];
        let mut middle = vec![f64::NAN; len];
        let mut lower = vec![f64::NAN; len];
        let mut window = RollingWindow::new(self.period);

        for (i, bar) in series.bars().iter().enumerate() {
            window.push(bar.close);
            if !window.is_full() {
                continue;
            }
            let mean = window.mean();
            let width = self.std_dev_multiplier * window.std_dev();
            middle[i] = mean;
            upper[i] = mean + width;
            lower[i] = mean - width;
        }

        Ok(vec![upper, middle, lower])
    }
}
