//! Watchlist overview and market coverage.

use crate::services::analysis::AnalysisService;
use crate::types::{MarketCoverage, MarketOverviewEntry, Period, WatchlistEntry};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Period analyzed for the overview.
pub const OVERVIEW_PERIOD: Period = Period::OneMonth;

/// Analyzes a fixed watchlist for the dashboard.
pub struct MarketOverviewService {
    analysis: Arc<AnalysisService>,
    watchlist: Vec<WatchlistEntry>,
}

impl MarketOverviewService {
    pub fn new(analysis: Arc<AnalysisService>, watchlist: Vec<WatchlistEntry>) -> Self {
        Self { analysis, watchlist }
    }

    /// Analyze every watchlist symbol concurrently.
    ///
    /// Symbols that fail are logged and left out; order follows the watchlist.
    pub async fn overview(&self) -> Vec<MarketOverviewEntry> {
        let analyses = self.watchlist.iter().map(|entry| async move {
            let result = self.analysis.analyze(&entry.symbol, OVERVIEW_PERIOD).await;
            (entry, result)
        });

        let entries: Vec<MarketOverviewEntry> = join_all(analyses)
            .await
            .into_iter()
            .filter_map(|(entry, result)| match result {
                Ok(analysis) => Some(MarketOverviewEntry {
                    symbol: entry.symbol.clone(),
                    name: entry.name.clone(),
                    market: entry.market.clone(),
                    price: analysis.current_price,
                    change_pct: analysis.price_change_pct,
                    action: analysis.recommendation.action,
                    confidence: analysis.recommendation.confidence,
                }),
                Err(e) => {
                    warn!("Market overview skipped {}: {}", entry.symbol, e);
                    None
                }
            })
            .collect();

        info!(
            "Market overview: {}/{} symbols analyzed",
            entries.len(),
            self.watchlist.len()
        );
        entries
    }
}

fn market(region: &str, name: &str, exchanges: &[&str], coverage: &str, suffixes: &[&str]) -> MarketCoverage {
    MarketCoverage {
        region: region.to_string(),
        name: name.to_string(),
        exchanges: exchanges.iter().map(|s| s.to_string()).collect(),
        coverage: coverage.to_string(),
        suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
    }
}

/// Markets reachable through the data provider.
pub fn global_markets() -> Vec<MarketCoverage> {
    vec![
        market("US", "United States", &["NYSE", "NASDAQ", "AMEX"], "US stocks, ETFs and ADRs", &[]),
        market("India", "India", &["NSE", "BSE"], "NSE and BSE listed stocks", &[".NS", ".BO"]),
        market(
            "Europe",
            "Europe",
            &["LSE", "Euronext", "Deutsche Börse", "SIX"],
            "Major European exchanges",
            &[".L", ".AS", ".PA", ".DE", ".SW"],
        ),
        market(
            "Asia",
            "Asia Pacific",
            &["TSE", "HKEX", "SSE", "SZSE", "ASX"],
            "Major Asian markets",
            &[".T", ".HK", ".SS", ".SZ", ".AX"],
        ),
        market("Canada", "Canada", &["TSX"], "Toronto Stock Exchange", &[".TO"]),
    ]
}
