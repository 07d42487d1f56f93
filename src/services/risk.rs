//! Volatility and risk-adjusted return metrics.

use crate::services::series::PriceSeries;
use crate::types::RiskMetrics;

/// Trading days per year used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

/// Risk metrics over the simple returns of a series.
///
/// Ratios that would divide by zero, or that need more observations than the
/// series has, are reported as `None`.
#[derive(Debug, Clone)]
pub struct RiskMetricsCalculator {
    /// Annual risk-free rate as a fraction (0.02 = 2%).
    pub risk_free_rate: f64,
    pub periods_per_year: f64,
}

impl Default for RiskMetricsCalculator {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            periods_per_year: TRADING_DAYS,
        }
    }
}

impl RiskMetricsCalculator {
    pub fn new(risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            ..Self::default()
        }
    }

    pub fn compute(&self, series: &PriceSeries) -> RiskMetrics {
        let returns: Vec<f64> = series.returns().into_iter().skip(1).collect();
        let closes = series.closes();

        let max_drawdown = max_drawdown(&closes);
        let total_return_pct = match (closes.first(), closes.last()) {
            (Some(&first), Some(&last)) => Some((last / first - 1.0) * 100.0),
            _ => None,
        };

        let daily_volatility = sample_std_dev(&returns);
        let annualization = self.periods_per_year.sqrt();
        let annualized_volatility = daily_volatility.map(|sd| sd * annualization);
        let annual_excess = mean(&returns).map(|m| m * self.periods_per_year - self.risk_free_rate);

        let sharpe_ratio = match (annual_excess, annualized_volatility) {
            (Some(excess), Some(vol)) if vol > 0.0 => Some(excess / vol),
            _ => None,
        };

        let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
        let sortino_ratio = match (annual_excess, sample_std_dev(&downside)) {
            (Some(excess), Some(dd)) if dd > 0.0 => Some(excess / (dd * annualization)),
            _ => None,
        };

        let calmar_ratio = match (mean(&returns), max_drawdown) {
            (Some(m), Some(dd)) if dd > 0.0 => Some(m * self.periods_per_year / dd.abs()),
            _ => None,
        };

        let var_95 = quantile(&returns, 0.05);
        let cvar_95 = var_95.and_then(|var| {
            let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= var).collect();
            mean(&tail)
        });

        RiskMetrics {
            daily_volatility,
            annualized_volatility,
            sharpe_ratio,
            sortino_ratio,
            calmar_ratio,
            max_drawdown,
            var_95,
            cvar_95,
            total_return_pct,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1); `None` with fewer than two values.
fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.max(0.0).sqrt())
}

/// Largest peak-to-trough decline as a fraction of the running peak.
pub fn max_drawdown(closes: &[f64]) -> Option<f64> {
    let mut iter = closes.iter().copied();
    let mut peak = iter.next()?;
    let mut max_dd = 0.0_f64;
    for value in iter {
        if value > peak {
            peak = value;
        }
        max_dd = max_dd.max((peak - value) / peak);
    }
    Some(max_dd)
}

/// Quantile with linear interpolation between closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}
