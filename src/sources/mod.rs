pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::DataError;
use crate::types::{Bar, Fundamentals, Period, SymbolMatch};
use async_trait::async_trait;

/// External source of price history, fundamentals and symbol lookup.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `symbol` over `period`, oldest first.
    async fn history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, DataError>;

    /// Fundamental snapshot for display. Fields the provider lacks are `None`.
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataError>;

    /// Free-text symbol search.
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, DataError>;

    /// Whether `history(symbol, period)` would be served without a fetch.
    fn is_cached(&self, _symbol: &str, _period: Period) -> bool {
        false
    }
}
