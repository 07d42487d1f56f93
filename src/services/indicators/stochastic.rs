//! Stochastic Oscillator indicator.

use super::rolling::{rolling_extremum, Extremum};
use super::sma::sma;
use super::Indicator;
use crate::error::InsufficientDataError;
use crate::services::series::{Column, PriceSeries};

/// Stochastic Oscillator.
///
/// %K = (Close - Lowest Low) / (Highest High - Lowest Low) * 100, clamped to
/// [0, 100] and pinned at 50 when the range is zero. %D = SMA(3) of %K, so
/// both lines need `k + d - 1` bars.
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        Self { k_period, d_period }
    }
}

impl Indicator for Stochastic {
    fn id(&self) -> &str {
        "stochastic"
    }

    fn name(&self) -> &str {
        "Stochastic"
    }

    fn columns(&self) -> Vec<Column> {
        vec![Column::StochasticK, Column::StochasticD]
    }

    fn min_periods(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn calculate(&self, series: &PriceSeries) -> Result<Vec<Vec<f64>>, InsufficientDataError> {
        self.ensure_history(series)?;

        let highest = rolling_extremum(&series.highs(), self.k_period, Extremum::Max);
        let lowest = rolling_extremum(&series.lows(), self.k_period, Extremum::Min);

        let k: Vec<f64> = series
            .bars()
            .iter()
            .zip(highest.iter().zip(&lowest))
            .map(|(bar, (&hh, &ll))| {
                if hh.is_nan() || ll.is_nan() {
                    return f64::NAN;
                }
                let range = hh - ll;
                if range <= 0.0 {
                    50.0
                } else {
                    ((bar.close - ll) / range * 100.0).clamp(0.0, 100.0)
                }
            })
            .collect();
        let d = sma(&k, self.d_period);

        Ok(vec![k, d])
    }
}
