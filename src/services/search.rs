//! Symbol search and resolution across global exchanges.

use crate::error::DataError;
use crate::sources::yahoo::EXCHANGE_SUFFIXES;
use crate::sources::MarketDataProvider;
use crate::types::{Period, SymbolMatch};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shortest query sent to the provider.
pub const MIN_QUERY_LEN: usize = 2;
const PROVIDER_LIMIT: usize = 20;
const LOCAL_LIMIT: usize = 15;

/// Well-known tickers used when the provider search is unavailable.
const LOCAL_DIRECTORY: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("TSLA", "Tesla Inc."),
    ("META", "Meta Platforms Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("NFLX", "Netflix Inc."),
    ("AMD", "Advanced Micro Devices"),
    ("INTC", "Intel Corporation"),
    ("ORCL", "Oracle Corporation"),
    ("CRM", "Salesforce Inc."),
    ("ADBE", "Adobe Inc."),
    ("PYPL", "PayPal Holdings"),
    ("JPM", "JPMorgan Chase & Co."),
    ("BAC", "Bank of America"),
    ("WMT", "Walmart Inc."),
    ("JNJ", "Johnson & Johnson"),
    ("V", "Visa Inc."),
    ("MA", "Mastercard Inc."),
    ("DIS", "The Walt Disney Company"),
    ("KO", "The Coca-Cola Company"),
    ("PEP", "PepsiCo Inc."),
    ("IBM", "International Business Machines"),
    ("CSCO", "Cisco Systems Inc."),
    ("QCOM", "QUALCOMM Incorporated"),
    ("BA", "The Boeing Company"),
    ("GE", "General Electric Company"),
    ("SHOP", "Shopify Inc."),
    ("PLTR", "Palantir Technologies"),
    ("COIN", "Coinbase Global Inc."),
    ("TCS.NS", "Tata Consultancy Services Ltd."),
    ("INFY.NS", "Infosys Ltd."),
    ("RELIANCE.NS", "Reliance Industries Ltd."),
    ("HDFCBANK.NS", "HDFC Bank Ltd."),
    ("ICICIBANK.NS", "ICICI Bank Ltd."),
    ("ITC.NS", "ITC Ltd."),
    ("SBIN.NS", "State Bank of India"),
    ("BHARTIARTL.NS", "Bharti Airtel Ltd."),
    ("AXISBANK.NS", "Axis Bank Ltd."),
    ("KOTAKBANK.NS", "Kotak Mahindra Bank Ltd."),
    ("ASIANPAINT.NS", "Asian Paints Ltd."),
    ("MARUTI.NS", "Maruti Suzuki India Ltd."),
    ("HINDUNILVR.NS", "Hindustan Unilever Ltd."),
    ("WIPRO.NS", "Wipro Ltd."),
    ("TATAMOTORS.NS", "Tata Motors Ltd."),
    ("SUNPHARMA.NS", "Sun Pharmaceutical Industries Ltd."),
    ("TITAN.NS", "Titan Company Ltd."),
    ("GRASIM.NS", "Grasim Industries Ltd."),
];

/// Case-insensitive substring match on symbol or name.
pub fn search_local(query: &str) -> Vec<SymbolMatch> {
    let query = query.trim().to_lowercase();
    LOCAL_DIRECTORY
        .iter()
        .filter(|(symbol, name)| {
            symbol.to_lowercase().contains(&query) || name.to_lowercase().contains(&query)
        })
        .take(LOCAL_LIMIT)
        .map(|(symbol, name)| SymbolMatch::new(*symbol, *name, None))
        .collect()
}

/// Provider-backed symbol search with a local fallback.
pub struct SearchService {
    provider: Arc<dyn MarketDataProvider>,
}

impl SearchService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Search for symbols matching `query`.
    ///
    /// Queries shorter than two characters return nothing. Provider failures
    /// and empty provider results fall back to the local directory.
    pub async fn search(&self, query: &str) -> Vec<SymbolMatch> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        match self.provider.search(query).await {
            Ok(mut results) if !results.is_empty() => {
                results.truncate(PROVIDER_LIMIT);
                results
            }
            Ok(_) => {
                debug!("No provider results for '{}', using local directory", query);
                search_local(query)
            }
            Err(e) => {
                warn!("Symbol search failed for '{}': {}", query, e);
                search_local(query)
            }
        }
    }

    /// Resolve a ticker to the symbol the provider lists it under.
    ///
    /// The symbol itself is tried first, then each exchange suffix in order.
    pub async fn resolve(&self, symbol: &str) -> Result<String, DataError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(DataError::SymbolNotFound(symbol));
        }

        if self.exists(&symbol).await? {
            return Ok(symbol);
        }
        // Already carries an exchange suffix.
        if symbol.contains('.') {
            return Err(DataError::SymbolNotFound(symbol));
        }

        for suffix in EXCHANGE_SUFFIXES {
            let candidate = format!("{}{}", symbol, suffix);
            if self.exists(&candidate).await? {
                debug!("Resolved {} to {}", symbol, candidate);
                return Ok(candidate);
            }
        }

        Err(DataError::SymbolNotFound(symbol))
    }

    async fn exists(&self, symbol: &str) -> Result<bool, DataError> {
        match self.provider.history(symbol, Period::FiveDays).await {
            Ok(bars) => Ok(!bars.is_empty()),
            Err(DataError::SymbolNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bar, Fundamentals};
    use async_trait::async_trait;

    /// Lists only the given symbols; search optionally fails.
    struct Listing {
        symbols: Vec<&'static str>,
        search_fails: bool,
    }

    #[async_trait]
    impl MarketDataProvider for Listing {
        async fn history(&self, symbol: &str, _period: Period) -> Result<Vec<Bar>, DataError> {
            if self.symbols.iter().any(|s| *s == symbol) {
                Ok(vec![Bar::new(1, 10.0, 11.0, 9.0, 10.0, 5.0)])
            } else {
                Err(DataError::SymbolNotFound(symbol.to_string()))
            }
        }

        async fn fundamentals(&self, _symbol: &str) -> Result<Fundamentals, DataError> {
            Ok(Fundamentals::default())
        }

        async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, DataError> {
            if self.search_fails {
                return Err(DataError::Fetch("offline".to_string()));
            }
            Ok(self
                .symbols
                .iter()
                .filter(|s| s.starts_with(&query.to_uppercase()))
                .map(|s| SymbolMatch::new(*s, "Listed", Some("TEST".to_string())))
                .collect())
        }
    }

    fn service(symbols: Vec<&'static str>, search_fails: bool) -> SearchService {
        SearchService::new(Arc::new(Listing { symbols, search_fails }))
    }

    #[test]
    fn test_search_local_matches_symbol_and_name() {
        let by_name = search_local("tata");
        assert!(by_name.iter().any(|m| m.symbol == "TCS.NS"));
        assert!(by_name.iter().any(|m| m.symbol == "TATAMOTORS.NS"));

        let by_symbol = search_local("AAPL");
        assert_eq!(by_symbol[0].display, "AAPL - Apple Inc.");
        assert!(search_local("zzzz").is_empty());
    }

    #[test]
    fn test_search_local_is_capped() {
        assert!(search_local("in").len() <= 15);
    }

    #[tokio::test]
    async fn test_short_query_returns_nothing() {
        let svc = service(vec!["AAPL"], false);
        assert!(svc.search("a").await.is_empty());
        assert!(svc.search("  ").await.is_empty());
    }

    #[tokio::test]
    async fn test_provider_results_preferred() {
        let svc = service(vec!["AAPL", "AAPL.NE"], false);
        let results = svc.search("aapl").await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].exchange.as_deref(), Some("TEST"));
    }

    #[tokio::test]
    async fn test_falls_back_to_local_directory() {
        let svc = service(vec![], true);
        let results = svc.search("infosys").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "INFY.NS");

        let svc = service(vec![], false);
        assert_eq!(svc.search("reliance").await[0].symbol, "RELIANCE.NS");
    }

    #[tokio::test]
    async fn test_resolve_exact_symbol() {
        let svc = service(vec!["AAPL"], false);
        assert_eq!(svc.resolve("aapl").await.unwrap(), "AAPL");
    }

    #[tokio::test]
    async fn test_resolve_tries_exchange_suffixes_in_order() {
        let svc = service(vec!["TCS.BO", "TCS.NS"], false);
        assert_eq!(svc.resolve("tcs").await.unwrap(), "TCS.NS");

        let svc = service(vec!["SHOP.TO"], false);
        assert_eq!(svc.resolve("SHOP").await.unwrap(), "SHOP.TO");
    }

    #[tokio::test]
    async fn test_resolve_unknown_symbol() {
        let svc = service(vec![], false);
        assert_eq!(
            svc.resolve("nope").await.unwrap_err(),
            DataError::SymbolNotFound("NOPE".to_string())
        );
        assert!(svc.resolve("NOPE.NS").await.is_err());
    }
}
