//! Core data types for the A-share report system.

use serde::{Deserialize, Serialize};

/// Strategy match weight in [0, 1].
pub type Score = f64;

/// A single stock row as supplied by the caller's data source.
///
/// Every field is defaultable; missing numbers stay `None` and render as
/// `N/A` downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockRecord {
    /// Exchange code, e.g. "600519".
    pub code: String,
    /// Short name, e.g. "贵州茅台".
    pub name: String,
    /// Declared industry label from the data source.
    pub industry: String,
    /// Free-text business description.
    pub business: String,
    /// Last price (CNY).
    pub price: Option<f64>,
    /// Daily percent change.
    pub change_pct: Option<f64>,
    /// Price/earnings ratio.
    pub pe: Option<f64>,
    /// Return on equity (percent).
    pub roe: Option<f64>,
    /// Dividend yield (percent).
    pub dividend_yield: Option<f64>,
    /// Annualized volatility as a fraction.
    pub volatility: Option<f64>,
    /// Caller-supplied base score used by the three-dimensional ranking.
    pub base_score: f64,
    /// Optional analyst note shown in the per-stock writeup.
    pub recommendation: Option<String>,
}

impl StockRecord {
    /// Create a record with only code and name set.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the declared industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    /// Set the business description.
    pub fn with_business(mut self, business: impl Into<String>) -> Self {
        self.business = business.into();
        self
    }

    /// Set the base score.
    pub fn with_base_score(mut self, base_score: f64) -> Self {
        self.base_score = base_score;
        self
    }

    /// Lower-cased text scanned for concept keywords: name, industry, business.
    pub fn concept_text(&self) -> String {
        format!("{} {} {}", self.name, self.industry, self.business).to_lowercase()
    }

    /// Lower-cased text scanned for industry keywords: industry, business.
    pub fn industry_text(&self) -> String {
        format!("{} {}", self.industry, self.business).to_lowercase()
    }
}

/// Score of one stock under one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyScore {
    /// Strategy name.
    pub strategy: String,
    /// Max matched weight, 0.0 when no label matched.
    pub score: Score,
}

/// A stock augmented with its matched labels and per-strategy scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedStock {
    /// Original record.
    pub stock: StockRecord,
    /// Matched concept labels in table order.
    pub concepts: Vec<String>,
    /// Matched industry labels in table order.
    pub industries: Vec<String>,
    /// One score per strategy, in strategy table order.
    pub scores: Vec<StrategyScore>,
}

impl ClassifiedStock {
    /// Score for a strategy by name (0.0 if the strategy is not present).
    pub fn score(&self, strategy: &str) -> Score {
        self.scores
            .iter()
            .find(|s| s.strategy == strategy)
            .map(|s| s.score)
            .unwrap_or(0.0)
    }

    /// Strategies with a strictly positive score, in table order.
    pub fn nonzero_scores(&self) -> impl Iterator<Item = &StrategyScore> {
        self.scores.iter().filter(|s| s.score > 0.0)
    }

    /// Whether any label matched at all.
    pub fn is_tagged(&self) -> bool {
        !self.concepts.is_empty() || !self.industries.is_empty()
    }
}

/// The four base strategy families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseStrategy {
    Momentum,
    Value,
    Defensive,
    UsMarketMapping,
}

impl BaseStrategy {
    /// All base strategies in report order.
    pub const ALL: [BaseStrategy; 4] = [
        BaseStrategy::Momentum,
        BaseStrategy::Value,
        BaseStrategy::Defensive,
        BaseStrategy::UsMarketMapping,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            BaseStrategy::Momentum => "动量策略",
            BaseStrategy::Value => "价值策略",
            BaseStrategy::Defensive => "防御策略",
            BaseStrategy::UsMarketMapping => "美股映射",
        }
    }
}

/// Risk tier attached to a sub-strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "极低风险",
            RiskLevel::Low => "低风险",
            RiskLevel::Medium => "中风险",
            RiskLevel::High => "高风险",
        }
    }
}

/// Broad index snapshot for the market overview section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSnapshot {
    /// Shanghai Composite level.
    pub sh_index: Option<f64>,
    /// Shanghai Composite percent change.
    pub sh_change: Option<f64>,
    /// Shenzhen Component level.
    pub sz_index: Option<f64>,
    /// Shenzhen Component percent change.
    pub sz_change: Option<f64>,
    /// ChiNext level.
    pub cyb_index: Option<f64>,
    /// ChiNext percent change.
    pub cyb_change: Option<f64>,
    /// Number of advancing stocks.
    pub up_count: Option<u32>,
    /// Number of declining stocks.
    pub down_count: Option<u32>,
    /// Turnover in 100M CNY.
    pub turnover: Option<f64>,
}

/// Coarse market direction derived from the Shanghai Composite change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketTrend {
    Bullish,
    Sideways,
    Bearish,
}

impl MarketSnapshot {
    /// Classify the session: > 0.5% bullish, > -0.5% sideways, else bearish.
    /// A missing change counts as flat.
    pub fn trend(&self) -> MarketTrend {
        let change = self.sh_change.unwrap_or(0.0);
        if change > 0.5 {
            MarketTrend::Bullish
        } else if change > -0.5 {
            MarketTrend::Sideways
        } else {
            MarketTrend::Bearish
        }
    }
}
