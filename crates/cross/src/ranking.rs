//! Stock×concept×strategy ranking.

use ashare_core::{ClassifiedStock, Score};
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

/// The best `(concept, strategy)` pairing of one stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestTriple {
    pub concept: String,
    pub strategy: String,
    /// The stock's score under `strategy`.
    pub match_score: Score,
    /// `base_score × match_score`.
    pub combined_score: f64,
}

/// A ranked stock with its best pairing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStock {
    pub stock: ClassifiedStock,
    pub best: BestTriple,
}

impl RankedStock {
    /// Combined score used for ranking.
    pub fn combined_score(&self) -> f64 {
        self.best.combined_score
    }
}

/// Result of a three-dimensional ranking run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreeDAnalysis {
    pub analysis_date: NaiveDate,
    /// Stocks fed into the ranking, eligible or not.
    pub total_stocks_analyzed: usize,
    /// Ranked stocks, best first.
    pub top_stocks: Vec<RankedStock>,
}

/// Best pairing for a stock.
///
/// Pairs every matched concept with every strategy scoring above zero, in
/// concept then strategy-table order. The first pair reaching the maximum
/// combined score is kept. `None` when the stock has no concept or no
/// positive score.
pub fn best_triple(stock: &ClassifiedStock) -> Option<BestTriple> {
    let base = stock.stock.base_score;
    let mut best: Option<BestTriple> = None;

    for concept in &stock.concepts {
        for score in stock.nonzero_scores() {
            let combined = base * score.score;
            if best.as_ref().map_or(true, |b| combined > b.combined_score) {
                best = Some(BestTriple {
                    concept: concept.clone(),
                    strategy: score.strategy.clone(),
                    match_score: score.score,
                    combined_score: combined,
                });
            }
        }
    }

    best
}

/// Rank eligible stocks by combined score, descending, keeping `top_n`.
///
/// Stable: equal combined scores keep input order.
pub fn rank_stocks(stocks: &[ClassifiedStock], top_n: usize) -> Vec<RankedStock> {
    let mut ranked: Vec<RankedStock> = stocks
        .iter()
        .filter_map(|s| {
            best_triple(s).map(|best| RankedStock {
                stock: s.clone(),
                best,
            })
        })
        .collect();

    ranked.sort_by_key(|r| Reverse(OrderedFloat(r.combined_score())));
    ranked.truncate(top_n);
    ranked
}
