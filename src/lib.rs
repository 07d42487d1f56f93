//! Augur - technical analysis and buy/sell recommendations for stocks

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::{AnalysisService, CachedProvider, MarketOverviewService, SearchService};
use sources::MarketDataProvider;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analysis: Arc<AnalysisService>,
    pub search: Arc<SearchService>,
    pub market: Arc<MarketOverviewService>,
    pub cache: Arc<CachedProvider>,
}

impl AppState {
    /// Wire the services around `provider`, caching its price histories for
    /// the configured TTL.
    pub fn new(config: Config, provider: Arc<dyn MarketDataProvider>) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        let cache = Arc::new(CachedProvider::new(provider, ttl));
        let provider: Arc<dyn MarketDataProvider> = cache.clone();

        let analysis = Arc::new(AnalysisService::new(provider.clone(), config.risk_free_rate));
        let search = Arc::new(SearchService::new(provider));
        let market = Arc::new(MarketOverviewService::new(
            analysis.clone(),
            config.overview_symbols.clone(),
        ));

        Self {
            config: Arc::new(config),
            analysis,
            search,
            market,
            cache,
        }
    }
}

/// Build the HTTP application with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
