//! Shared fixtures: an in-memory provider and synthetic price histories.

#![allow(dead_code)]

use async_trait::async_trait;
use augur::error::DataError;
use augur::sources::MarketDataProvider;
use augur::types::{Bar, Fundamentals, Period, SymbolMatch};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

const DAY_MS: i64 = 86_400_000;

/// Daily bars with the given closes; high/low one unit either side.
pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            Bar::new(
                1_700_000_000_000 + i as i64 * DAY_MS,
                c,
                c + 1.0,
                (c - 1.0).max(0.01),
                c,
                1_000_000.0 + i as f64 * 10.0,
            )
        })
        .collect()
}

/// Rising with a growing slope.
pub fn accelerating_up(count: usize) -> Vec<Bar> {
    let closes: Vec<f64> = (0..count).map(|i| 100.0 + 0.05 * (i * i) as f64).collect();
    bars_from_closes(&closes)
}

/// Falling with a growing slope.
pub fn accelerating_down(count: usize) -> Vec<Bar> {
    let closes: Vec<f64> = (0..count).map(|i| 500.0 - 0.05 * (i * i) as f64).collect();
    bars_from_closes(&closes)
}

/// Deterministic noisy walk that stays positive.
pub fn wavy(count: usize) -> Vec<Bar> {
    let closes: Vec<f64> = (0..count)
        .map(|i| {
            let t = i as f64;
            150.0 + (t * 0.37).sin() * 12.0 + (t * 0.11).cos() * 6.0 + t * 0.05
        })
        .collect();
    bars_from_closes(&closes)
}

/// Provider serving fixed histories, ignoring the requested period.
#[derive(Default)]
pub struct StaticProvider {
    histories: HashMap<String, Vec<Bar>>,
    fundamentals: HashMap<String, Fundamentals>,
    matches: Vec<SymbolMatch>,
    search_fails: bool,
    history_calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.histories.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_fundamentals(mut self, symbol: &str, fundamentals: Fundamentals) -> Self {
        self.fundamentals.insert(symbol.to_string(), fundamentals);
        self
    }

    pub fn with_match(mut self, symbol: &str, name: &str) -> Self {
        self.matches.push(SymbolMatch::new(symbol, name, Some("TEST".to_string())));
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.search_fails = true;
        self
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn history(&self, symbol: &str, _period: Period) -> Result<Vec<Bar>, DataError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.histories
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataError> {
        self.fundamentals
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::Fetch("fundamentals unavailable".to_string()))
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, DataError> {
        if self.search_fails {
            return Err(DataError::Fetch("search offline".to_string()));
        }
        let query = query.to_lowercase();
        Ok(self
            .matches
            .iter()
            .filter(|m| m.symbol.to_lowercase().contains(&query) || m.name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }
}
