use crate::types::{Period, WatchlistEntry};
use std::env;

/// Default market overview watchlist (US, India, Europe, Asia).
const DEFAULT_WATCHLIST: &[(&str, &str, &str)] = &[
    ("AAPL", "Apple Inc.", "US"),
    ("MSFT", "Microsoft", "US"),
    ("GOOGL", "Alphabet", "US"),
    ("AMZN", "Amazon", "US"),
    ("TSLA", "Tesla", "US"),
    ("META", "Meta", "US"),
    ("NVDA", "NVIDIA", "US"),
    ("TCS.NS", "TCS", "India"),
    ("RELIANCE.NS", "Reliance", "India"),
    ("INFY.NS", "Infosys", "India"),
    ("HDFCBANK.NS", "HDFC Bank", "India"),
    ("ICICIBANK.NS", "ICICI Bank", "India"),
    ("ASML.AS", "ASML", "Europe"),
    ("NESN.SW", "Nestle", "Europe"),
    ("0700.HK", "Tencent", "Asia"),
    ("7203.T", "Toyota", "Asia"),
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Period used when a request does not name one.
    pub default_period: Period,
    /// Annual risk-free rate for Sharpe and Sortino (0.02 = 2%).
    pub risk_free_rate: f64,
    /// Lifetime of cached price histories, in seconds.
    pub cache_ttl_secs: u64,
    /// Timeout for outbound data provider requests, in seconds.
    pub request_timeout_secs: u64,
    /// Yahoo Finance chart/quote API base URL.
    pub yahoo_base_url: String,
    /// Yahoo Finance search API base URL.
    pub yahoo_search_url: String,
    /// Symbols analyzed for the market overview.
    pub overview_symbols: Vec<WatchlistEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            default_period: Period::OneYear,
            risk_free_rate: 0.0,
            cache_ttl_secs: 300,
            request_timeout_secs: 30,
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            yahoo_search_url: "https://query2.finance.yahoo.com".to_string(),
            overview_symbols: default_watchlist(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        // Format: "SYMBOL|Name|Market,SYMBOL2|Name2|Market2"
        let overview_symbols = env::var("OVERVIEW_SYMBOLS")
            .ok()
            .map(|s| parse_watchlist(&s))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.overview_symbols);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            default_period: env::var("DEFAULT_PERIOD")
                .ok()
                .and_then(|p| p.parse::<Period>().ok())
                .unwrap_or(defaults.default_period),
            risk_free_rate: env::var("RISK_FREE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| v.is_finite())
                .unwrap_or(defaults.risk_free_rate),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_secs),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            yahoo_search_url: env::var("YAHOO_SEARCH_URL").unwrap_or(defaults.yahoo_search_url),
            overview_symbols,
        }
    }
}

fn default_watchlist() -> Vec<WatchlistEntry> {
    DEFAULT_WATCHLIST
        .iter()
        .map(|(symbol, name, market)| WatchlistEntry::new(symbol, name, market))
        .collect()
}

/// Parse `SYMBOL|Name|Market` entries; a missing market defaults to "US".
fn parse_watchlist(raw: &str) -> Vec<WatchlistEntry> {
    raw.split(',')
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.split('|').map(str::trim).collect();
            match parts.as_slice() {
                [symbol, name, market, ..] if !symbol.is_empty() => {
                    Some(WatchlistEntry::new(symbol, name, market))
                }
                [symbol, name] if !symbol.is_empty() => Some(WatchlistEntry::new(symbol, name, "US")),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.default_period, Period::OneYear);
        assert_eq!(config.risk_free_rate, 0.0);
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.yahoo_base_url.starts_with("https://"));
        assert!(!config.overview_symbols.is_empty());
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            risk_free_rate: 0.02,
            ..Config::default()
        };

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.risk_free_rate, 0.02);
    }

    #[test]
    fn test_default_watchlist_covers_markets() {
        let watchlist = default_watchlist();
        for market in ["US", "India", "Europe", "Asia"] {
            assert!(watchlist.iter().any(|e| e.market == market), "missing {}", market);
        }
    }

    #[test]
    fn test_parse_watchlist() {
        let list = parse_watchlist("AAPL|Apple|US, TCS.NS|TCS|India,MSFT|Microsoft,|Nothing|US,bad");
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], WatchlistEntry::new("AAPL", "Apple", "US"));
        assert_eq!(list[1].symbol, "TCS.NS");
        assert_eq!(list[2].market, "US");
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(cloned.port, config.port);
        assert_eq!(cloned.overview_symbols, config.overview_symbols);
    }
}
