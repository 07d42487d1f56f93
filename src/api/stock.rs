//! Stock analysis endpoints.

use super::ApiResponse;
use crate::error::{DataError, Result};
use crate::types::{AnalysisResult, Period, Recommendation, RiskMetrics};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

/// Query parameters for stock endpoints.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// History window: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max
    pub period: Option<String>,
}

impl PeriodQuery {
    fn resolve(&self, default: Period) -> std::result::Result<Period, DataError> {
        match self.period.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse(),
        }
    }
}

/// Create the stock router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:symbol", get(get_analysis))
        .route("/:symbol/signals", get(get_signals))
        .route("/:symbol/risk", get(get_risk))
}

/// Analyze `symbol`, retrying with exchange suffixes when the bare ticker is
/// unknown (e.g. "TCS" -> "TCS.NS").
async fn analyze(
    state: &AppState,
    symbol: &str,
    query: &PeriodQuery,
) -> Result<(AnalysisResult, bool)> {
    let period = query.resolve(state.config.default_period)?;
    let cached = state.analysis.is_cached(symbol, period);

    match state.analysis.analyze(symbol, period).await {
        Err(DataError::SymbolNotFound(_)) if !symbol.contains('.') => {
            let resolved = state.search.resolve(symbol).await?;
            debug!("Retrying {} as {}", symbol, resolved);
            let cached = state.analysis.is_cached(&resolved, period);
            let result = state.analysis.analyze(&resolved, period).await?;
            Ok((result, cached))
        }
        result => Ok((result?, cached)),
    }
}

/// Get the full analysis for a symbol.
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<AnalysisResult>>> {
    let (result, cached) = analyze(&state, &symbol, &query).await?;
    Ok(Json(ApiResponse::with_cached(result, cached)))
}

/// Get the recommendation and its per-indicator signals.
async fn get_signals(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<Recommendation>>> {
    let (result, cached) = analyze(&state, &symbol, &query).await?;
    Ok(Json(ApiResponse::with_cached(result.recommendation, cached)))
}

/// Get risk metrics for a symbol.
async fn get_risk(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<RiskMetrics>>> {
    let (result, cached) = analyze(&state, &symbol, &query).await?;
    Ok(Json(ApiResponse::with_cached(result.risk, cached)))
}
