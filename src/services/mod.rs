pub mod analysis;
pub mod cache;
pub mod indicators;
pub mod market;
pub mod recommendation;
pub mod risk;
pub mod search;
pub mod series;
pub mod signals;

pub use analysis::AnalysisService;
pub use cache::{Cache, CachedProvider};
pub use indicators::{EngineReport, Indicator, IndicatorEngine};
pub use market::{global_markets, MarketOverviewService};
pub use recommendation::RecommendationAggregator;
pub use risk::RiskMetricsCalculator;
pub use search::SearchService;
pub use series::{Column, PriceSeries};
pub use signals::SignalEvaluator;
