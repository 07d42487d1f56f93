use super::ApiResponse;
use crate::types::SymbolMatch;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

/// Query parameters for symbol search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Create the search router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/search", get(search))
}

/// Search symbols by ticker or company name.
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<ApiResponse<Vec<SymbolMatch>>> {
    Json(ApiResponse::new(state.search.search(&query.q).await))
}
