//! Label×strategy matrices.
//!
//! Cells accumulate match-score mass from classified stocks; rows are then
//! normalized so each sums to 1 (or stays all-zero when no stock fed it).

use ashare_core::ClassifiedStock;
use std::collections::HashMap;

/// Added inside the entropy logarithm so exact zeros never hit `ln(0)`.
pub const ENTROPY_EPSILON: f64 = 1e-10;

/// Divide a row by its sum in place. Zero-sum rows are left untouched.
pub fn normalize_row(row: &mut [f64]) {
    let sum: f64 = row.iter().sum();
    if sum > 0.0 {
        for v in row.iter_mut() {
            *v /= sum;
        }
    }
}

/// Shannon entropy (natural log) of a row after normalizing it.
///
/// Zero cells contribute nothing; a zero-sum row has entropy 0.
pub fn shannon_entropy(row: &[f64]) -> f64 {
    let sum: f64 = row.iter().sum();
    if sum <= 0.0 {
        return 0.0;
    }
    let h: f64 = row
        .iter()
        .map(|v| v / sum)
        .map(|p| -p * (p + ENTROPY_EPSILON).ln())
        .sum();
    h.max(0.0)
}

/// Dense row-major label×strategy matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossMatrix {
    rows: Vec<String>,
    cols: Vec<String>,
    cells: Vec<f64>,
}

impl CrossMatrix {
    /// Create an all-zero matrix.
    pub fn zeros(rows: Vec<String>, cols: Vec<String>) -> Self {
        let cells = vec![0.0; rows.len() * cols.len()];
        Self { rows, cols, cells }
    }

    /// Accumulate and row-normalize.
    ///
    /// For every stock, every label returned by `labels` that is a row of the
    /// matrix receives the full score of every strategy that is a column.
    /// Labels are not weighted against each other: a stock with k labels and
    /// m scored strategies touches up to k×m cells.
    pub fn build<F>(stocks: &[ClassifiedStock], rows: &[String], cols: &[String], labels: F) -> Self
    where
        F: Fn(&ClassifiedStock) -> &[String],
    {
        let mut matrix = Self::zeros(rows.to_vec(), cols.to_vec());
        let row_index = first_index(rows);
        let col_index = first_index(cols);

        for stock in stocks {
            for label in labels(stock) {
                let Some(&r) = row_index.get(label.as_str()) else {
                    continue;
                };
                for score in &stock.scores {
                    if let Some(&c) = col_index.get(score.strategy.as_str()) {
                        matrix.add(r, c, score.score);
                    }
                }
            }
        }

        matrix.normalize();
        matrix
    }

    /// Add `value` to a cell.
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        let width = self.cols.len();
        self.cells[row * width + col] += value;
    }

    /// Normalize every row.
    pub fn normalize(&mut self) {
        let width = self.cols.len();
        if width == 0 {
            return;
        }
        for row in self.cells.chunks_mut(width) {
            normalize_row(row);
        }
    }

    /// Row labels.
    pub fn row_labels(&self) -> &[String] {
        &self.rows
    }

    /// Column labels.
    pub fn col_labels(&self) -> &[String] {
        &self.cols
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    /// Whether the matrix has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Values of row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        let width = self.cols.len();
        &self.cells[i * width..(i + 1) * width]
    }

    /// Values of column `j`, top to bottom.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.rows.len()).map(|i| self.row(i)[j]).collect()
    }

    /// Cell by labels.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.rows.iter().position(|l| l == row)?;
        let c = self.cols.iter().position(|l| l == col)?;
        Some(self.row(r)[c])
    }

    /// Every cell as `(row, column, value)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(i, r)| {
            self.cols
                .iter()
                .enumerate()
                .map(move |(j, c)| (r.as_str(), c.as_str(), self.row(i)[j]))
        })
    }
}

fn first_index(labels: &[String]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        index.entry(label.as_str()).or_insert(i);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ashare_core::{StockRecord, StrategyScore};

    fn make_stock(code: &str, concepts: &[&str], scores: &[(&str, f64)]) -> ClassifiedStock {
        ClassifiedStock {
            stock: StockRecord::new(code, code),
            concepts: concepts.iter().map(|c| c.to_string()).collect(),
            industries: vec![],
            scores: scores
                .iter()
                .map(|(s, v)| StrategyScore {
                    strategy: s.to_string(),
                    score: *v,
                })
                .collect(),
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn assert_rows_normalized(matrix: &CrossMatrix) {
        for i in 0..matrix.shape().0 {
            let row = matrix.row(i);
            let sum: f64 = row.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9 || row.iter().all(|v| *v == 0.0),
                "row {} sums to {}",
                i,
                sum
            );
        }
    }

    #[test]
    fn test_normalize_row_all_zero() {
        let mut row = [0.0, 0.0, 0.0];
        normalize_row(&mut row);
        assert_eq!(row, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_row_single_nonzero() {
        let mut row = [0.0, 0.7, 0.0];
        normalize_row(&mut row);
        assert_eq!(row, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_normalize_row_mixed() {
        let mut row = [1.0, 3.0];
        normalize_row(&mut row);
        assert_relative_eq!(row[0], 0.25);
        assert_relative_eq!(row[1], 0.75);
    }

    #[test]
    fn test_entropy_boundaries() {
        assert_eq!(shannon_entropy(&[0.0, 0.0]), 0.0);
        assert!(shannon_entropy(&[0.0, 5.0, 0.0]).abs() < 1e-9);
        assert_relative_eq!(shannon_entropy(&[1.0, 1.0]), 2f64.ln(), epsilon = 1e-9);
        assert_relative_eq!(shannon_entropy(&[0.25; 4]), 4f64.ln(), epsilon = 1e-9);
    }

    #[test]
    fn test_build_accumulates_full_score_per_label() {
        let stocks = vec![make_stock("a", &["银行", "金融科技"], &[("红利防御", 0.72), ("强势动量", 0.62)])];
        let matrix = CrossMatrix::build(
            &stocks,
            &labels(&["金融科技", "银行"]),
            &labels(&["强势动量", "红利防御"]),
            |s| s.concepts.as_slice(),
        );

        // Both labels receive the full scores, then each row normalizes.
        assert_relative_eq!(matrix.get("银行", "红利防御").unwrap(), 0.72 / 1.34, epsilon = 1e-12);
        assert_relative_eq!(matrix.get("金融科技", "强势动量").unwrap(), 0.62 / 1.34, epsilon = 1e-12);
        assert_rows_normalized(&matrix);
    }

    #[test]
    fn test_build_disjoint_concepts_leave_zero_rows() {
        let stocks = vec![
            make_stock("a", &["银行"], &[("深度价值", 0.9)]),
            make_stock("b", &["光伏"], &[("新能源映射", 0.9)]),
            make_stock("c", &["白酒"], &[("质量价值", 0.9)]),
        ];
        let rows = labels(&["银行", "光伏", "白酒", "军工", "医药"]);
        let cols = labels(&["深度价值", "新能源映射", "质量价值"]);
        let matrix = CrossMatrix::build(&stocks, &rows, &cols, |s| s.concepts.as_slice());

        assert_eq!(matrix.row(3), &[0.0, 0.0, 0.0]);
        assert_eq!(matrix.row(4), &[0.0, 0.0, 0.0]);
        assert_eq!(matrix.get("光伏", "新能源映射"), Some(1.0));
        assert_rows_normalized(&matrix);
    }

    #[test]
    fn test_build_ignores_labels_and_strategies_off_axis() {
        let stocks = vec![make_stock("a", &["银行", "未知"], &[("深度价值", 0.9), ("未列策略", 0.5)])];
        let matrix = CrossMatrix::build(&stocks, &labels(&["银行"]), &labels(&["深度价值"]), |s| s.concepts.as_slice());

        assert_eq!(matrix.shape(), (1, 1));
        assert_eq!(matrix.get("银行", "深度价值"), Some(1.0));
    }

    #[test]
    fn test_cells_row_major() {
        let matrix = CrossMatrix::zeros(labels(&["r1", "r2"]), labels(&["c1", "c2"]));
        let order: Vec<(&str, &str)> = matrix.cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![("r1", "c1"), ("r1", "c2"), ("r2", "c1"), ("r2", "c2")]);
    }

    #[test]
    fn test_empty_axes() {
        let matrix = CrossMatrix::build(&[], &[], &labels(&["c1"]), |s| s.concepts.as_slice());
        assert!(matrix.is_empty());
        assert_eq!(matrix.cells().count(), 0);
    }
}
