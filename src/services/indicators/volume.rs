//! Volume moving average.

use super::sma::sma;
use super::Indicator;
use crate::error::InsufficientDataError;
use crate::services::series::{Column, PriceSeries};

/// SMA applied to traded volume.
pub struct VolumeSma {
    period: usize,
}

impl Default for VolumeSma {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl VolumeSma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for VolumeSma {
    fn id(&self) -> &str {
        "volume_sma"
    }

    fn name(&self) -> &str {
        "Volume SMA"
    }

    fn columns(&self) -> Vec<Column> {
        vec![Column::VolumeSma(self.period)]
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &PriceSeries) -> Result<Vec<Vec<f64>>, InsufficientDataError> {
        self.ensure_history(series)?;
        Ok(vec![sma(&series.volumes(), self.period)])
    }
}
