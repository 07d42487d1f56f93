use super::RecommendationAction;
use serde::{Deserialize, Serialize};

/// One candidate returned by a symbol search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    /// "SYMBOL - Name", ready for an autocomplete list.
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl SymbolMatch {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, exchange: Option<String>) -> Self {
        let symbol = symbol.into();
        let name = name.into();
        Self {
            display: format!("{} - {}", symbol, name),
            symbol,
            name,
            exchange,
        }
    }
}

/// A symbol on the market overview watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub symbol: String,
    pub name: String,
    pub market: String,
}

impl WatchlistEntry {
    pub fn new(symbol: &str, name: &str, market: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            market: market.to_string(),
        }
    }
}

/// Condensed analysis of one watchlist symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverviewEntry {
    pub symbol: String,
    pub name: String,
    pub market: String,
    pub price: f64,
    pub change_pct: f64,
    pub action: RecommendationAction,
    pub confidence: f64,
}

/// Coverage description for one market region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCoverage {
    pub region: String,
    pub name: String,
    pub exchanges: Vec<String>,
    pub coverage: String,
    /// Ticker suffix used by the provider, empty for US listings.
    pub suffixes: Vec<String>,
}
