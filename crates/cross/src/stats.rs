//! Universe-level daily change statistics.

use ashare_core::StockRecord;
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};

/// Breadth and distribution of `change_pct` across the universe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UniverseStats {
    /// Stocks in the universe.
    pub total: usize,
    /// Stocks reporting a change.
    pub with_change: usize,
    pub advancers: usize,
    pub decliners: usize,
    pub flat: usize,
    pub mean_change: Option<f64>,
    pub median_change: Option<f64>,
    /// Sample standard deviation, needs at least two observations.
    pub std_change: Option<f64>,
}

impl UniverseStats {
    /// Compute statistics over the stocks that report `change_pct`.
    pub fn from_stocks(stocks: &[StockRecord]) -> Self {
        let changes: Vec<f64> = stocks
            .iter()
            .filter_map(|s| s.change_pct)
            .filter(|c| c.is_finite())
            .collect();

        let mut stats = Self {
            total: stocks.len(),
            with_change: changes.len(),
            ..Self::default()
        };

        for &change in &changes {
            if change > 0.0 {
                stats.advancers += 1;
            } else if change < 0.0 {
                stats.decliners += 1;
            } else {
                stats.flat += 1;
            }
        }

        if changes.is_empty() {
            return stats;
        }

        stats.mean_change = Some(changes.iter().mean());
        stats.median_change = Some(Data::new(changes.clone()).median());
        if changes.len() >= 2 {
            stats.std_change = Some(changes.iter().std_dev());
        }

        stats
    }

    /// Share of reporting stocks that rose, 0.0 when none report.
    pub fn advance_ratio(&self) -> f64 {
        if self.with_change > 0 {
            self.advancers as f64 / self.with_change as f64
        } else {
            0.0
        }
    }
}
