use super::ApiResponse;
use crate::services::global_markets;
use crate::types::{MarketCoverage, MarketOverviewEntry};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Coverage of the markets reachable through the data provider.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMarketsResponse {
    pub markets: Vec<MarketCoverage>,
    pub total_exchanges: usize,
    pub search_method: &'static str,
    pub last_updated: i64,
}

/// Create the market router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/market-overview", get(get_market_overview))
        .route("/api/global-markets", get(get_global_markets))
}

/// Condensed analysis of every watchlist symbol.
async fn get_market_overview(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<MarketOverviewEntry>>> {
    Json(ApiResponse::new(state.market.overview().await))
}

async fn get_global_markets() -> Json<ApiResponse<GlobalMarketsResponse>> {
    let markets = global_markets();
    let total_exchanges = markets.iter().map(|m| m.exchanges.len()).sum();

    Json(ApiResponse::new(GlobalMarketsResponse {
        markets,
        total_exchanges,
        search_method: "Yahoo Finance search with local directory fallback",
        last_updated: chrono::Utc::now().timestamp_millis(),
    }))
}
