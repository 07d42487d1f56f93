//! Yahoo Finance API client for historical stock data, fundamentals and
//! symbol search.
//!
//! Uses the unofficial Yahoo Finance endpoints (chart v8, quoteSummary v10,
//! search v1). No API key is required.

use super::MarketDataProvider;
use crate::config::Config;
use crate::error::DataError;
use crate::types::{Bar, Fundamentals, Period, SymbolMatch};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Exchange suffixes tried, in order, when resolving a bare ticker.
pub const EXCHANGE_SUFFIXES: [&str; 8] = [".NS", ".BO", ".L", ".TO", ".AX", ".HK", ".SS", ".SZ"];

const SEARCH_LIMIT: usize = 20;
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// quoteSummary response, reduced to the modules we request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    summary_detail: Option<SummaryDetailModule>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatisticsModule>,
    #[serde(default)]
    asset_profile: Option<AssetProfileModule>,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

fn raw(value: &Option<RawValue>) -> Option<f64> {
    value.as_ref().and_then(|v| v.raw)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    short_name: Option<String>,
    market_cap: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
    dividend_yield: Option<RawValue>,
    beta: Option<RawValue>,
    market_cap: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatisticsModule {
    price_to_book: Option<RawValue>,
    beta: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct AssetProfileModule {
    sector: Option<String>,
    industry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    quotes: Option<Vec<SearchQuote>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuote {
    symbol: String,
    #[serde(default, rename = "shortname")]
    short_name: Option<String>,
    #[serde(default, rename = "longname")]
    long_name: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
    #[serde(default)]
    quote_type: Option<String>,
}

/// Normalize symbol for Yahoo Finance API.
///
/// Yahoo uses hyphens for share classes (BRK-B, not BRK.B) but keeps dots for
/// exchange suffixes (RELIANCE.NS, 7203.T).
fn normalize_yahoo_symbol(symbol: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    match symbol.rsplit_once('.') {
        Some((base, class))
            if matches!(class, "A" | "B" | "C") && base.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            format!("{}-{}", base, class)
        }
        _ => symbol,
    }
}

/// Convert a chart payload to bars, dropping points with a missing or
/// non-positive price.
fn parse_chart(symbol: &str, data: YahooChartResponse) -> Result<Vec<Bar>, DataError> {
    if let Some(error) = data.chart.error {
        if error.code == "Not Found" {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        return Err(DataError::Fetch(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

    // A listed symbol with no trading history in the window.
    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::Fetch("No quote data in response".to_string()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();
    let at = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let bars = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &timestamp)| {
            let open = at(&opens, i)?;
            let high = at(&highs, i)?;
            let low = at(&lows, i)?;
            let close = at(&closes, i)?;
            if [open, high, low, close].iter().any(|p| *p <= 0.0) {
                return None;
            }
            let volume = at(&volumes, i).unwrap_or(0.0).max(0.0);
            Some(Bar::new(timestamp * 1000, open, high, low, close, volume))
        })
        .collect();

    Ok(bars)
}

fn parse_fundamentals(symbol: &str, data: QuoteSummaryResponse) -> Result<Fundamentals, DataError> {
    if let Some(error) = data.quote_summary.error {
        return Err(DataError::Fetch(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

    let price = result.price.as_ref();
    let detail = result.summary_detail.as_ref();
    let stats = result.default_key_statistics.as_ref();
    let profile = result.asset_profile.as_ref();

    Ok(Fundamentals {
        name: price.and_then(|p| p.long_name.clone().or_else(|| p.short_name.clone())),
        market_cap: price
            .and_then(|p| raw(&p.market_cap))
            .or_else(|| detail.and_then(|d| raw(&d.market_cap))),
        pe_ratio: detail.and_then(|d| raw(&d.trailing_pe)),
        forward_pe: detail.and_then(|d| raw(&d.forward_pe)),
        price_to_book: stats.and_then(|s| raw(&s.price_to_book)),
        dividend_yield: detail.and_then(|d| raw(&d.dividend_yield)),
        beta: detail
            .and_then(|d| raw(&d.beta))
            .or_else(|| stats.and_then(|s| raw(&s.beta))),
        sector: profile.and_then(|p| p.sector.clone()),
        industry: profile.and_then(|p| p.industry.clone()),
    })
}

fn parse_search(data: SearchResponse) -> Vec<SymbolMatch> {
    data.quotes
        .unwrap_or_default()
        .into_iter()
        .filter(|q| {
            q.quote_type
                .as_deref()
                .map(|t| matches!(t, "EQUITY" | "ETF"))
                .unwrap_or(true)
        })
        .take(SEARCH_LIMIT)
        .map(|q| {
            let name = q
                .long_name
                .or(q.short_name)
                .unwrap_or_else(|| q.symbol.clone());
            SymbolMatch::new(q.symbol, name, q.exchange)
        })
        .collect()
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
    search_url: String,
}

impl YahooFinanceClient {
    /// Create a client using the configured endpoints and timeout.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
            search_url: config.yahoo_search_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch historical data for a symbol.
    ///
    /// Arguments:
    /// - symbol: Stock/ETF symbol (e.g., "AAPL", "RELIANCE.NS")
    /// - range: Time range ("1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max")
    /// - interval: Data interval ("1m", "5m", "1h", "1d", "1wk", "1mo")
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<Bar>, DataError> {
        let yahoo_symbol = normalize_yahoo_symbol(symbol);
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            self.base_url, yahoo_symbol, range, interval
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        // Unknown symbols come back as 404 with a chart error body.
        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        if !status.is_success() {
            return Err(DataError::Fetch(format!("API error: {}", status)));
        }

        let data: YahooChartResponse = response
            .json()
            .await
            .map_err(|e| DataError::Fetch(format!("Parse error: {}", e)))?;

        parse_chart(symbol, data)
    }

    /// Fetch fundamentals via the quoteSummary endpoint.
    pub async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataError> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}",
            self.base_url,
            normalize_yahoo_symbol(symbol)
        );

        debug!("Fetching Yahoo Finance fundamentals: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("modules", "price,summaryDetail,defaultKeyStatistics,assetProfile")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        if !response.status().is_success() {
            return Err(DataError::Fetch(format!("API error: {}", response.status())));
        }

        let data: QuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| DataError::Fetch(format!("Parse error: {}", e)))?;

        parse_fundamentals(symbol, data)
    }

    /// Free-text symbol search, equities and ETFs only.
    pub async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, DataError> {
        let url = format!("{}/v1/finance/search", self.search_url);
        let limit = SEARCH_LIMIT.to_string();

        debug!("Searching Yahoo Finance: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("quotesCount", limit.as_str()), ("newsCount", "0")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Fetch(format!("API error: {}", response.status())));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| DataError::Fetch(format!("Parse error: {}", e)))?;

        Ok(parse_search(data))
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    async fn history(&self, symbol: &str, period: Period) -> Result<Vec<Bar>, DataError> {
        self.get_historical_data(symbol, period.as_str(), "1d").await
    }

    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataError> {
        self.get_fundamentals(symbol).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, DataError> {
        self.search_symbols(query).await
    }
}
