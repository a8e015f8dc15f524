//! Keyword-based stock classification and strategy scoring.
//!
//! Tags a stock with every concept/industry whose keyword list hits its text
//! fields, then scores it against each strategy as the maximum weight among
//! its matched labels.

use ashare_core::{ClassifiedStock, Score, StockRecord, StrategyScore};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::{debug, info, warn};

use crate::tags::{StrategyBook, TagTable, CONCEPT_TAGS, INDUSTRY_TAGS, STRATEGY_BOOK};

/// Summary of a classification batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationStats {
    /// Stocks classified.
    pub total_stocks: usize,
    /// Stocks with at least one concept.
    pub concept_tagged: usize,
    /// Stocks with at least one industry.
    pub industry_tagged: usize,
    /// Stocks with no label at all.
    pub untagged: usize,
    /// Sum of concept matches over all stocks.
    pub concept_hits: usize,
    /// Sum of industry matches over all stocks.
    pub industry_hits: usize,
}

impl ClassificationStats {
    /// Tally a classified batch.
    pub fn from_classified(stocks: &[ClassifiedStock]) -> Self {
        let mut stats = Self {
            total_stocks: stocks.len(),
            ..Self::default()
        };
        for stock in stocks {
            if !stock.concepts.is_empty() {
                stats.concept_tagged += 1;
            }
            if !stock.industries.is_empty() {
                stats.industry_tagged += 1;
            }
            if !stock.is_tagged() {
                stats.untagged += 1;
            }
            stats.concept_hits += stock.concepts.len();
            stats.industry_hits += stock.industries.len();
        }
        stats
    }

    /// Average number of concepts per stock.
    pub fn avg_concepts(&self) -> f64 {
        if self.total_stocks > 0 {
            self.concept_hits as f64 / self.total_stocks as f64
        } else {
            0.0
        }
    }
}

/// Classifier over a fixed set of tag and strategy tables.
pub struct StockClassifier {
    concepts: &'static TagTable,
    industries: &'static TagTable,
    strategies: &'static StrategyBook,
}

impl Default for StockClassifier {
    fn default() -> Self {
        Self::new(&CONCEPT_TAGS, &INDUSTRY_TAGS, &STRATEGY_BOOK)
    }
}

impl StockClassifier {
    /// Create a classifier over the given tables.
    pub fn new(
        concepts: &'static TagTable,
        industries: &'static TagTable,
        strategies: &'static StrategyBook,
    ) -> Self {
        Self {
            concepts,
            industries,
            strategies,
        }
    }

    /// Concept table in use.
    pub fn concept_tags(&self) -> &'static TagTable {
        self.concepts
    }

    /// Industry table in use.
    pub fn industry_tags(&self) -> &'static TagTable {
        self.industries
    }

    /// Strategy table in use.
    pub fn strategies(&self) -> &'static StrategyBook {
        self.strategies
    }

    /// Concepts hit by the stock's name, industry and business text.
    pub fn classify_concepts(&self, stock: &StockRecord) -> Vec<String> {
        self.concepts.matches(&stock.concept_text())
    }

    /// Industries hit by the stock's industry and business text.
    pub fn classify_industries(&self, stock: &StockRecord) -> Vec<String> {
        self.industries.matches(&stock.industry_text())
    }

    /// Max weight among matched labels under `strategy`.
    ///
    /// Returns 0.0 for an unknown strategy or an empty intersection. Several
    /// matching labels do not add up.
    pub fn match_score(&self, concepts: &[String], industries: &[String], strategy: &str) -> Score {
        let Some(weights) = self.strategies.weights(strategy) else {
            return 0.0;
        };

        concepts
            .iter()
            .chain(industries.iter())
            .filter_map(|label| {
                weights
                    .iter()
                    .find(|(l, _)| *l == label.as_str())
                    .map(|(_, w)| *w)
            })
            .fold(0.0, f64::max)
    }

    /// Classify one stock and score it against every strategy.
    pub fn classify(&self, stock: &StockRecord) -> ClassifiedStock {
        let concepts = self.classify_concepts(stock);
        let industries = self.classify_industries(stock);

        let scores = self
            .strategies
            .names()
            .map(|strategy| StrategyScore {
                strategy: strategy.to_string(),
                score: self.match_score(&concepts, &industries, strategy),
            })
            .collect();

        debug!(
            code = %stock.code,
            concepts = concepts.len(),
            industries = industries.len(),
            "Classified stock"
        );

        ClassifiedStock {
            stock: stock.clone(),
            concepts,
            industries,
            scores,
        }
    }

    /// Classify a batch of stocks, preserving input order.
    pub fn classify_batch(&self, stocks: &[StockRecord]) -> Vec<ClassifiedStock> {
        let classified: Vec<ClassifiedStock> = stocks.iter().map(|s| self.classify(s)).collect();

        let stats = ClassificationStats::from_classified(&classified);
        info!(
            total = stats.total_stocks,
            concept_tagged = stats.concept_tagged,
            industry_tagged = stats.industry_tagged,
            untagged = stats.untagged,
            "Classification complete"
        );

        classified
    }

    /// Stocks with the highest score under `strategy`, at most `top_n`.
    ///
    /// Stable: equal scores keep input order. An unknown strategy yields an
    /// empty list.
    pub fn top_by_strategy<'a>(
        &self,
        classified: &'a [ClassifiedStock],
        strategy: &str,
        top_n: usize,
    ) -> Vec<&'a ClassifiedStock> {
        if self.strategies.weights(strategy).is_none() {
            warn!(strategy, "Strategy not found");
            return Vec::new();
        }

        let mut sorted: Vec<&ClassifiedStock> = classified.iter().collect();
        sorted.sort_by_key(|s| Reverse(OrderedFloat(s.score(strategy))));
        sorted.truncate(top_n);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_stock(code: &str, name: &str, industry: &str, business: &str) -> StockRecord {
        StockRecord::new(code, name)
            .with_industry(industry)
            .with_business(business)
    }

    fn sample_stocks() -> Vec<StockRecord> {
        vec![
            make_stock("600519", "贵州茅台", "食品饮料", "白酒生产销售"),
            make_stock("002475", "立讯精密", "电子", "消费电子、AI服务器、汽车电子"),
            make_stock("688981", "中芯国际", "半导体", "集成电路制造、AI芯片代工"),
        ]
    }

    #[test]
    fn test_moutai_example() {
        let classifier = StockClassifier::default();
        let classified = classifier.classify(&sample_stocks()[0]);

        assert!(classified.concepts.contains(&"白酒".to_string()));
        assert!(classified.industries.contains(&"食品饮料".to_string()));
        assert_relative_eq!(classified.score("质量价值"), 0.90);
        assert_relative_eq!(classified.score("合理价值"), 0.80);
        assert_relative_eq!(classified.score("强势动量"), 0.0);
    }

    #[test]
    fn test_industry_text_excludes_name() {
        let classifier = StockClassifier::default();
        // "银行" in the name must not produce an industry hit on its own.
        let stock = make_stock("000001", "平安银行", "", "");
        assert!(classifier.classify_industries(&stock).is_empty());
        assert_eq!(classifier.classify_concepts(&stock), vec!["银行"]);
    }

    #[test]
    fn test_concepts_in_table_order() {
        let classifier = StockClassifier::default();
        let classified = classifier.classify(&sample_stocks()[2]);

        assert_eq!(classified.concepts, vec!["人工智能", "AI芯片", "半导体"]);
        assert_eq!(classified.industries, vec!["电子"]);
        assert_relative_eq!(classified.score("AI芯片映射"), 0.95);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let classifier = StockClassifier::default();
        let classified = classifier.classify(&StockRecord::default());

        assert!(classified.concepts.is_empty());
        assert!(classified.industries.is_empty());
        assert_eq!(classified.scores.len(), STRATEGY_BOOK.len());
        assert!(classified.scores.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_match_score_is_max_not_sum() {
        let classifier = StockClassifier::default();
        let concepts = vec!["AI芯片".to_string(), "半导体".to_string(), "人工智能".to_string()];
        let score = classifier.match_score(&concepts, &[], "AI芯片映射");
        assert_relative_eq!(score, 0.95);
    }

    #[test]
    fn test_match_score_mixes_concepts_and_industries() {
        let classifier = StockClassifier::default();
        let score = classifier.match_score(
            &["医药".to_string()],
            &["食品饮料".to_string()],
            "抗跌防御",
        );
        assert_relative_eq!(score, 0.75);
    }

    #[test]
    fn test_unknown_strategy_scores_zero() {
        let classifier = StockClassifier::default();
        let score = classifier.match_score(&["白酒".to_string()], &[], "不存在的策略");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_classify_batch_preserves_order() {
        let classifier = StockClassifier::default();
        let classified = classifier.classify_batch(&sample_stocks());

        let codes: Vec<&str> = classified.iter().map(|c| c.stock.code.as_str()).collect();
        assert_eq!(codes, vec!["600519", "002475", "688981"]);
    }

    #[test]
    fn test_top_by_strategy() {
        let classifier = StockClassifier::default();
        let classified = classifier.classify_batch(&sample_stocks());

        let top = classifier.top_by_strategy(&classified, "AI芯片映射", 10);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].stock.code, "688981");

        let top1 = classifier.top_by_strategy(&classified, "AI芯片映射", 1);
        assert_eq!(top1.len(), 1);

        assert!(classifier.top_by_strategy(&classified, "不存在", 10).is_empty());
    }

    #[test]
    fn test_top_by_strategy_ties_keep_input_order() {
        let classifier = StockClassifier::default();
        let stocks = vec![
            make_stock("000001", "平安银行", "银行", "商业银行业务"),
            make_stock("000858", "五粮液", "食品饮料", "白酒生产销售"),
            make_stock("600519", "贵州茅台", "食品饮料", "白酒生产销售"),
        ];
        let classified = classifier.classify_batch(&stocks);
        assert_eq!(classified[1].score("质量价值"), classified[2].score("质量价值"));

        let top = classifier.top_by_strategy(&classified, "质量价值", 2);
        let codes: Vec<&str> = top.iter().map(|c| c.stock.code.as_str()).collect();
        assert_eq!(codes, vec!["000858", "600519"]);

        let reversed: Vec<ClassifiedStock> = classified.iter().rev().cloned().collect();
        let top = classifier.top_by_strategy(&reversed, "质量价值", 2);
        let codes: Vec<&str> = top.iter().map(|c| c.stock.code.as_str()).collect();
        assert_eq!(codes, vec!["600519", "000858"]);
    }

    #[test]
    fn test_stats() {
        let classifier = StockClassifier::default();
        let mut stocks = sample_stocks();
        stocks.push(StockRecord::new("000000", "无标签"));
        let classified = classifier.classify_batch(&stocks);

        let stats = ClassificationStats::from_classified(&classified);
        assert_eq!(stats.total_stocks, 4);
        assert_eq!(stats.untagged, 1);
        assert_eq!(stats.industry_tagged, 3);
    }
}
