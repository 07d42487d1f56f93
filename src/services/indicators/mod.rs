//! Technical indicator implementations.
//!
//! Each indicator turns a [`PriceSeries`] into one or more aligned derived
//! columns. All of them are causal: the value at index `i` only looks at
//! bars `0..=i`.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume;

pub use bollinger::BollingerBands;
pub use ema::Ema;
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use volume::VolumeSma;

use crate::error::InsufficientDataError;
use crate::services::series::{Column, PriceSeries};
use tracing::debug;

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Columns this indicator writes.
    fn columns(&self) -> Vec<Column>;

    /// Minimum number of bars required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate the indicator's columns, in the order of [`Indicator::columns`].
    fn calculate(&self, series: &PriceSeries) -> Result<Vec<Vec<f64>>, InsufficientDataError>;

    /// Fail with [`InsufficientDataError`] when the series is shorter than
    /// [`Indicator::min_periods`].
    fn ensure_history(&self, series: &PriceSeries) -> Result<(), InsufficientDataError> {
        if series.len() < self.min_periods() {
            return Err(InsufficientDataError {
                indicator: self.name().to_string(),
                required: self.min_periods(),
                available: series.len(),
            });
        }
        Ok(())
    }
}

/// Get the standard indicator set.
pub fn all_indicators() -> Vec<Box<dyn Indicator>> {
    vec![
        // Trend
        Box::new(Sma::new(20)),
        Box::new(Sma::new(50)),
        Box::new(Ema::new(12)),
        Box::new(Ema::new(26)),
        Box::new(Macd::default()),
        // Momentum
        Box::new(Rsi::default()),
        Box::new(Stochastic::default()),
        // Volatility
        Box::new(BollingerBands::default()),
        // Volume
        Box::new(VolumeSma::default()),
    ]
}

/// Outcome of one engine run.
#[derive(Debug, Clone, Default)]
pub struct EngineReport {
    /// Ids of the indicators that produced columns.
    pub computed: Vec<String>,
    /// Indicators that lacked history; their columns hold `NaN`.
    pub skipped: Vec<InsufficientDataError>,
}

/// Runs a set of indicators over a series and stores their columns.
pub struct IndicatorEngine {
    indicators: Vec<Box<dyn Indicator>>,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(all_indicators())
    }
}

impl IndicatorEngine {
    pub fn new(indicators: Vec<Box<dyn Indicator>>) -> Self {
        Self { indicators }
    }

    /// Populate `series` with every indicator's columns.
    ///
    /// An indicator without enough history does not abort the run: its
    /// columns are filled with `NaN` and the error is recorded in the report.
    pub fn run(&self, series: &mut PriceSeries) -> EngineReport {
        let mut report = EngineReport::default();

        for indicator in &self.indicators {
            match indicator.calculate(series) {
                Ok(values) => {
                    for (column, values) in indicator.columns().into_iter().zip(values) {
                        series.set_column(column, values);
                    }
                    report.computed.push(indicator.id().to_string());
                }
                Err(e) => {
                    debug!("Skipping {}: {}", indicator.id(), e);
                    for column in indicator.columns() {
                        series.set_column(column, vec![f64::NAN; series.len()]);
                    }
                    report.skipped.push(e);
                }
            }
        }

        report
    }
}
