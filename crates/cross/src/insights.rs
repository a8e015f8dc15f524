//! Summary statistics extracted from a built matrix.

use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

use crate::matrix::{shannon_entropy, CrossMatrix};

/// One matrix cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellScore {
    /// Row label (concept or industry).
    pub label: String,
    /// Column label (strategy).
    pub strategy: String,
    /// Normalized cell value.
    pub score: f64,
}

/// A per-row or per-column statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScore {
    pub label: String,
    pub value: f64,
}

/// Insights derived from one matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatrixInsights {
    /// Highest cells, descending.
    pub strongest: Vec<CellScore>,
    /// Lowest cells, ascending.
    pub weakest: Vec<CellScore>,
    /// Row entropy, only for rows with mass, in row order.
    pub diversity: Vec<LabelScore>,
    /// Column max-share, every column, in column order.
    pub concentration: Vec<LabelScore>,
}

impl MatrixInsights {
    /// Extract insights, keeping `k` strongest and `k` weakest cells.
    ///
    /// Cells are ranked with a stable sort over the row-major flattening, so
    /// on ties the cell met first wins.
    pub fn from_matrix(matrix: &CrossMatrix, k: usize) -> Self {
        let cells: Vec<CellScore> = matrix
            .cells()
            .map(|(label, strategy, score)| CellScore {
                label: label.to_string(),
                strategy: strategy.to_string(),
                score,
            })
            .collect();

        let mut strongest = cells.clone();
        strongest.sort_by_key(|c| Reverse(OrderedFloat(c.score)));
        strongest.truncate(k);

        let mut weakest = cells;
        weakest.sort_by_key(|c| OrderedFloat(c.score));
        weakest.truncate(k);

        let diversity = matrix
            .row_labels()
            .iter()
            .enumerate()
            .filter(|(i, _)| matrix.row(*i).iter().sum::<f64>() > 0.0)
            .map(|(i, label)| LabelScore {
                label: label.clone(),
                value: shannon_entropy(matrix.row(i)),
            })
            .collect();

        let concentration = matrix
            .col_labels()
            .iter()
            .enumerate()
            .map(|(j, label)| LabelScore {
                label: label.clone(),
                value: column_concentration(&matrix.column(j)),
            })
            .collect();

        Self {
            strongest,
            weakest,
            diversity,
            concentration,
        }
    }

    /// Whether nothing was extracted (unbuilt or empty matrix).
    pub fn is_empty(&self) -> bool {
        self.strongest.is_empty()
            && self.weakest.is_empty()
            && self.diversity.is_empty()
            && self.concentration.is_empty()
    }

    /// The `n` most diverse rows, descending (stable).
    pub fn most_diverse(&self, n: usize) -> Vec<&LabelScore> {
        let mut rows: Vec<&LabelScore> = self.diversity.iter().collect();
        rows.sort_by_key(|d| Reverse(OrderedFloat(d.value)));
        rows.truncate(n);
        rows
    }
}

/// Max cell over column sum; 0.0 when the column is empty.
pub fn column_concentration(column: &[f64]) -> f64 {
    let sum: f64 = column.iter().sum();
    if sum <= 0.0 {
        return 0.0;
    }
    let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max / sum
}
