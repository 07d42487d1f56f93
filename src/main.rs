use augur::config::Config;
use augur::sources::{MarketDataProvider, YahooFinanceClient};
use augur::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Interval between sweeps of expired cache entries.
const CACHE_SWEEP_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting Augur server on {}:{}", config.host, config.port);
    info!(
        "Default period {}, risk-free rate {}, cache TTL {}s, {} overview symbols",
        config.default_period,
        config.risk_free_rate,
        config.cache_ttl_secs,
        config.overview_symbols.len()
    );

    let provider: Arc<dyn MarketDataProvider> = Arc::new(YahooFinanceClient::new(&config)?);
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, provider);

    // Drop expired price histories periodically
    {
        let cache = state.cache.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(CACHE_SWEEP_SECS)).await;
                cache.cleanup();
                debug!("Swept expired cache entries");
            }
        });
    }

    let app = augur::app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Augur server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
