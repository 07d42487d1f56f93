//! Validated OHLCV series with aligned derived columns.

use crate::error::DataError;
use crate::types::{Bar, ChartSeries};
use std::collections::BTreeMap;

/// Key of a derived column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Sma(usize),
    Ema(usize),
    MacdLine,
    MacdSignal,
    MacdHistogram,
    Rsi,
    BollingerUpper,
    BollingerMiddle,
    BollingerLower,
    StochasticK,
    StochasticD,
    VolumeSma(usize),
}

impl Column {
    /// Key used for this column in chart payloads.
    pub fn name(&self) -> String {
        match self {
            Column::Sma(n) => format!("sma_{}", n),
            Column::Ema(n) => format!("ema_{}", n),
            Column::MacdLine => "macd".to_string(),
            Column::MacdSignal => "macd_signal".to_string(),
            Column::MacdHistogram => "macd_histogram".to_string(),
            Column::Rsi => "rsi".to_string(),
            Column::BollingerUpper => "bb_upper".to_string(),
            Column::BollingerMiddle => "bb_middle".to_string(),
            Column::BollingerLower => "bb_lower".to_string(),
            Column::StochasticK => "stoch_k".to_string(),
            Column::StochasticD => "stoch_d".to_string(),
            Column::VolumeSma(n) => format!("volume_sma_{}", n),
        }
    }
}

/// Ordered bars for one symbol plus the indicator columns computed over them.
///
/// Every column has exactly one value per bar; `NaN` marks indices where the
/// indicator is undefined.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<Bar>,
    columns: BTreeMap<Column, Vec<f64>>,
}

impl PriceSeries {
    /// Build a series, rejecting empty input, non-positive prices, negative
    /// volume and duplicate or out-of-order timestamps.
    pub fn new(bars: Vec<Bar>) -> Result<Self, DataError> {
        if bars.is_empty() {
            return Err(DataError::EmptySeries);
        }

        for (index, bar) in bars.iter().enumerate() {
            let prices = [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
            ];
            for (field, value) in prices {
                if !value.is_finite() || value <= 0.0 {
                    return Err(DataError::InvalidBar {
                        index,
                        reason: format!("{} must be positive, got {}", field, value),
                    });
                }
            }
            if !bar.volume.is_finite() || bar.volume < 0.0 {
                return Err(DataError::InvalidBar {
                    index,
                    reason: format!("volume must be non-negative, got {}", bar.volume),
                });
            }
            if index > 0 && bar.time <= bars[index - 1].time {
                return Err(DataError::UnorderedTimestamps { index });
            }
        }

        Ok(Self {
            bars,
            columns: BTreeMap::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn bar(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn latest(&self) -> &Bar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    pub fn previous(&self) -> Option<&Bar> {
        self.len().checked_sub(2).and_then(|i| self.bar(i))
    }

    pub fn timestamps(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.time).collect()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Simple period-over-period returns; the first element is `NaN`.
    pub fn returns(&self) -> Vec<f64> {
        let mut returns = Vec::with_capacity(self.bars.len());
        returns.push(f64::NAN);
        for pair in self.bars.windows(2) {
            returns.push((pair[1].close - pair[0].close) / pair[0].close);
        }
        returns
    }

    /// Register a derived column, replacing any column with the same key.
    pub fn set_column(&mut self, column: Column, values: Vec<f64>) {
        debug_assert_eq!(
            values.len(),
            self.bars.len(),
            "column {:?} is not aligned with the bars",
            column
        );
        self.columns.insert(column, values);
    }

    pub fn column(&self, column: Column) -> Option<&[f64]> {
        self.columns.get(&column).map(Vec::as_slice)
    }

    /// Value of a column at the latest bar, `None` if missing or undefined.
    pub fn latest_value(&self, column: Column) -> Option<f64> {
        self.value_at(column, self.bars.len() - 1)
    }

    pub fn value_at(&self, column: Column, index: usize) -> Option<f64> {
        self.columns
            .get(&column)
            .and_then(|values| values.get(index))
            .copied()
            .filter(|v| !v.is_nan())
    }

    pub fn columns(&self) -> impl Iterator<Item = (Column, &[f64])> {
        self.columns.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Raw bars and every derived column, with `NaN` mapped to `None`.
    pub fn chart(&self) -> ChartSeries {
        let indicators = self
            .columns
            .iter()
            .map(|(column, values)| {
                let values = values
                    .iter()
                    .map(|v| if v.is_nan() { None } else { Some(*v) })
                    .collect();
                (column.name(), values)
            })
            .collect();

        ChartSeries {
            timestamps: self.timestamps(),
            open: self.opens(),
            high: self.highs(),
            low: self.lows(),
            close: self.closes(),
            volume: self.volumes(),
            indicators,
        }
    }
}
