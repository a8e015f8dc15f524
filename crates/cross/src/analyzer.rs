//! Stateful cross analyzer owning the built matrices and ranking.

use ashare_core::ClassifiedStock;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::insights::MatrixInsights;
use crate::matrix::CrossMatrix;
use crate::ranking::{rank_stocks, ThreeDAnalysis};

/// Builds and holds the concept×strategy matrix, the industry×strategy
/// matrix and the three-dimensional ranking.
///
/// Every build call replaces the previous result.
pub struct CrossAnalyzer {
    concepts: Vec<String>,
    industries: Vec<String>,
    strategies: Vec<String>,
    concept_matrix: Option<CrossMatrix>,
    industry_matrix: Option<CrossMatrix>,
    three_d: Option<ThreeDAnalysis>,
}

impl CrossAnalyzer {
    /// Create an analyzer over the given axes.
    pub fn new(concepts: Vec<String>, industries: Vec<String>, strategies: Vec<String>) -> Self {
        Self {
            concepts,
            industries,
            strategies,
            concept_matrix: None,
            industry_matrix: None,
            three_d: None,
        }
    }

    /// Build the concept×strategy matrix from matched concepts.
    pub fn build_concept_strategy_matrix(&mut self, stocks: &[ClassifiedStock]) -> &CrossMatrix {
        let matrix = CrossMatrix::build(stocks, &self.concepts, &self.strategies, |s| {
            s.concepts.as_slice()
        });
        let (rows, cols) = matrix.shape();
        info!(rows, cols, stocks = stocks.len(), "Concept×strategy matrix built");
        self.concept_matrix.insert(matrix)
    }

    /// Build the industry×strategy matrix from matched industries.
    pub fn build_industry_strategy_matrix(&mut self, stocks: &[ClassifiedStock]) -> &CrossMatrix {
        let matrix = CrossMatrix::build(stocks, &self.industries, &self.strategies, |s| {
            s.industries.as_slice()
        });
        let (rows, cols) = matrix.shape();
        info!(rows, cols, stocks = stocks.len(), "Industry×strategy matrix built");
        self.industry_matrix.insert(matrix)
    }

    /// Rank stocks by their best concept×strategy pairing.
    pub fn build_stock_concept_strategy_3d(
        &mut self,
        stocks: &[ClassifiedStock],
        top_n: usize,
        analysis_date: NaiveDate,
    ) -> &ThreeDAnalysis {
        let top_stocks = rank_stocks(stocks, top_n);
        info!(
            analyzed = stocks.len(),
            ranked = top_stocks.len(),
            top_n,
            "Three-dimensional ranking built"
        );
        self.three_d.insert(ThreeDAnalysis {
            analysis_date,
            total_stocks_analyzed: stocks.len(),
            top_stocks,
        })
    }

    /// Concept×strategy matrix, if built.
    pub fn concept_matrix(&self) -> Option<&CrossMatrix> {
        self.concept_matrix.as_ref()
    }

    /// Industry×strategy matrix, if built.
    pub fn industry_matrix(&self) -> Option<&CrossMatrix> {
        self.industry_matrix.as_ref()
    }

    /// Ranking, if built. Logs a warning otherwise.
    pub fn three_d(&self) -> Option<&ThreeDAnalysis> {
        if self.three_d.is_none() {
            warn!("Three-dimensional ranking not built");
        }
        self.three_d.as_ref()
    }

    /// Insights of the concept matrix; empty when it is not built.
    pub fn concept_strategy_insights(&self, k: usize) -> MatrixInsights {
        match &self.concept_matrix {
            Some(matrix) => MatrixInsights::from_matrix(matrix, k),
            None => {
                warn!("Concept×strategy matrix not built");
                MatrixInsights::default()
            }
        }
    }

    /// Insights of the industry matrix; empty when it is not built.
    pub fn industry_strategy_insights(&self, k: usize) -> MatrixInsights {
        match &self.industry_matrix {
            Some(matrix) => MatrixInsights::from_matrix(matrix, k),
            None => {
                warn!("Industry×strategy matrix not built");
                MatrixInsights::default()
            }
        }
    }

    /// Markdown summary of whatever has been built so far, `k` rows per
    /// matrix section.
    pub fn cross_analysis_markdown(&self, k: usize) -> String {
        let mut md = String::new();
        md.push_str("## 交叉分析\n\n");

        if let Some(matrix) = &self.concept_matrix {
            let insights = MatrixInsights::from_matrix(matrix, k);
            md.push_str("### 概念×策略最强组合\n\n");
            md.push_str("| 概念 | 策略 | 匹配度 |\n");
            md.push_str("|------|------|--------|\n");
            for cell in &insights.strongest {
                md.push_str(&format!("| {} | {} | {:.3} |\n", cell.label, cell.strategy, cell.score));
            }
            md.push('\n');

            md.push_str(&format!("### 概念多样性TOP{}\n\n", k));
            for (i, row) in insights.most_diverse(k).iter().enumerate() {
                md.push_str(&format!("{}. {}: 熵值 {:.3}\n", i + 1, row.label, row.value));
            }
            md.push('\n');
        }

        if let Some(matrix) = &self.industry_matrix {
            let insights = MatrixInsights::from_matrix(matrix, k);
            md.push_str("### 行业×策略最强组合\n\n");
            md.push_str("| 行业 | 策略 | 匹配度 |\n");
            md.push_str("|------|------|--------|\n");
            for cell in &insights.strongest {
                md.push_str(&format!("| {} | {} | {:.3} |\n", cell.label, cell.strategy, cell.score));
            }
            md.push('\n');
        }

        if let Some(analysis) = &self.three_d {
            md.push_str(&format!(
                "### 个股×概念×策略排名（共分析{}只）\n\n",
                analysis.total_stocks_analyzed
            ));
            md.push_str("| 排名 | 代码 | 名称 | 概念 | 策略 | 综合得分 |\n");
            md.push_str("|------|------|------|------|------|----------|\n");
            for (i, ranked) in analysis.top_stocks.iter().enumerate() {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {:.3} |\n",
                    i + 1,
                    ranked.stock.stock.code,
                    ranked.stock.stock.name,
                    ranked.best.concept,
                    ranked.best.strategy,
                    ranked.best.combined_score
                ));
            }
            md.push('\n');
        }

        if self.concept_matrix.is_none() && self.industry_matrix.is_none() && self.three_d.is_none() {
            md.push_str("暂无交叉分析数据\n\n");
        }

        md
    }
}
