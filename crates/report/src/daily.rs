//! The daily deep-dive report.

use ashare_classify::{ClassificationStats, StockClassifier, StrategyRefiner};
use ashare_core::config::AnalysisConfig;
use ashare_core::{BaseStrategy, ClassifiedStock, MarketSnapshot, MarketTrend};
use ashare_cross::{CrossAnalyzer, RankedStock, UniverseStats};
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::info;

use crate::format::{fmt_count, fmt_opt, fmt_rate, fmt_signed_pct, join_labels, NA};
use crate::sections::{case_study, RISK_DISCLAIMER};

/// How much of each section is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    /// Cells per cross-analysis table.
    pub insight_cells: usize,
    /// Rows of the concept×industry table.
    pub matrix_display_limit: usize,
    /// Per-stock writeups.
    pub writeup_limit: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for ReportLimits {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            insight_cells: config.insight_cells,
            matrix_display_limit: config.matrix_display_limit,
            writeup_limit: config.writeup_limit,
        }
    }
}

/// Count stocks per `(concept, industry)` pair.
///
/// Only nonzero pairs are returned, sorted by count descending. Ties keep
/// concept-then-industry axis order.
pub fn concept_industry_counts(
    stocks: &[ClassifiedStock],
    concepts: &[String],
    industries: &[String],
) -> Vec<(String, String, usize)> {
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for stock in stocks {
        for concept in &stock.concepts {
            for industry in &stock.industries {
                *counts.entry((concept.as_str(), industry.as_str())).or_insert(0) += 1;
            }
        }
    }

    let mut entries: Vec<(String, String, usize)> = concepts
        .iter()
        .flat_map(|c| industries.iter().map(move |i| (c, i)))
        .filter_map(|(c, i)| {
            counts
                .get(&(c.as_str(), i.as_str()))
                .map(|&n| (c.clone(), i.clone(), n))
        })
        .collect();

    entries.sort_by_key(|(_, _, n)| Reverse(*n));
    entries
}

/// Everything the daily report renders, borrowed from a finished pipeline run.
pub struct DailyReport<'a> {
    pub date: NaiveDate,
    pub market: &'a MarketSnapshot,
    /// Sub-strategy name -> marginal change (%).
    pub marginal_changes: &'a HashMap<String, f64>,
    pub stocks: &'a [ClassifiedStock],
    pub classifier: &'a StockClassifier,
    pub refiner: &'a StrategyRefiner,
    pub analyzer: &'a CrossAnalyzer,
    pub limits: ReportLimits,
}

impl DailyReport<'_> {
    /// Render the complete report.
    pub fn render(&self) -> String {
        let ranked: &[RankedStock] = self
            .analyzer
            .three_d()
            .map(|a| a.top_stocks.as_slice())
            .unwrap_or(&[]);

        let mut md = String::new();
        md.push_str(&self.market_overview());
        md.push_str(&self.universe_section());
        md.push_str(&self.strategy_table());
        md.push_str(&self.tag_system_summary());
        md.push_str(&self.concept_industry_table());
        md.push_str(&self.analyzer.cross_analysis_markdown(self.limits.insight_cells));
        md.push_str(&self.stock_writeups(ranked));
        if let Some(top) = ranked.first() {
            md.push_str(&case_study(top));
        }
        md.push_str(RISK_DISCLAIMER);

        info!(
            date = %self.date,
            stocks = self.stocks.len(),
            ranked = ranked.len(),
            bytes = md.len(),
            "Daily report rendered"
        );
        md
    }

    /// Title, date, index levels and the market judgment.
    pub fn market_overview(&self) -> String {
        let m = self.market;
        let mut md = String::from("# A股深度优化日报\n\n");
        md.push_str(&format!("**报告日期**: {}\n\n", self.date.format("%Y-%m-%d")));
        md.push_str("## 市场概况\n\n");
        md.push_str(&format!(
            "- **上证指数**: {} ({})\n",
            fmt_opt(m.sh_index, 2),
            fmt_signed_pct(m.sh_change)
        ));
        md.push_str(&format!(
            "- **深证成指**: {} ({})\n",
            fmt_opt(m.sz_index, 2),
            fmt_signed_pct(m.sz_change)
        ));
        md.push_str(&format!(
            "- **创业板指**: {} ({})\n",
            fmt_opt(m.cyb_index, 2),
            fmt_signed_pct(m.cyb_change)
        ));
        md.push_str(&format!("- **上涨家数**: {}\n", fmt_count(m.up_count)));
        md.push_str(&format!("- **下跌家数**: {}\n", fmt_count(m.down_count)));
        md.push_str(&format!("- **成交额**: {}亿元\n\n", fmt_opt(m.turnover, 0)));

        let judgment = match m.trend() {
            MarketTrend::Bullish => "📈 **看多** - 市场呈现强势上涨态势",
            MarketTrend::Sideways => "➡️ **震荡** - 市场处于盘整阶段",
            MarketTrend::Bearish => "📉 **看空** - 市场呈现弱势下跌态势",
        };
        md.push_str(&format!("**市场判断**: {}\n\n", judgment));
        md
    }

    /// Breadth and change distribution of the analyzed universe.
    pub fn universe_section(&self) -> String {
        let records: Vec<_> = self.stocks.iter().map(|s| s.stock.clone()).collect();
        let stats = UniverseStats::from_stocks(&records);

        let mut md = String::from("## 样本统计\n\n");
        md.push_str(&format!(
            "- **样本数量**: {} (有涨跌数据 {})\n",
            stats.total, stats.with_change
        ));
        md.push_str(&format!(
            "- **上涨/下跌/平盘**: {}/{}/{}\n",
            stats.advancers, stats.decliners, stats.flat
        ));
        md.push_str(&format!("- **平均涨跌幅**: {}\n", fmt_signed_pct(stats.mean_change)));
        md.push_str(&format!("- **涨跌幅中位数**: {}\n", fmt_signed_pct(stats.median_change)));
        md.push_str(&format!(
            "- **涨跌幅标准差**: {}\n\n",
            stats
                .std_change
                .map_or_else(|| NA.to_string(), |s| format!("{:.2}%", s))
        ));
        md
    }

    /// Sub-strategy table grouped by base strategy.
    pub fn strategy_table(&self) -> String {
        let mut md = String::from("## 策略细分分析\n\n");
        md.push_str("| 主策略 | 子策略 | 历史胜率 | 风险等级 | 当前边际变化 |\n");
        md.push_str("|--------|--------|----------|----------|--------------|\n");

        for base in BaseStrategy::ALL {
            for sub in self.refiner.sub_strategies_of(base) {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    base.label(),
                    sub.name,
                    fmt_rate(sub.win_rate),
                    sub.risk.label(),
                    fmt_signed_pct(self.marginal_changes.get(sub.name).copied())
                ));
            }
        }
        md.push('\n');
        md
    }

    /// Size of the tag tables and how much of the universe they cover.
    pub fn tag_system_summary(&self) -> String {
        let stats = ClassificationStats::from_classified(self.stocks);

        let mut md = String::from("## 标的分类系统\n\n");
        md.push_str(&format!(
            "- **概念标签系统**: {}个核心概念标签，覆盖AI、半导体、新能源等热门赛道\n",
            self.classifier.concept_tags().len()
        ));
        md.push_str(&format!(
            "- **行业标签系统**: {}个标准行业分类，精准定位个股所属行业\n",
            self.classifier.industry_tags().len()
        ));
        md.push_str(&format!(
            "- **策略匹配度**: 基于三维分析计算个股与{}个子策略的匹配度\n",
            self.classifier.strategies().len()
        ));
        md.push_str(&format!(
            "- **标注覆盖**: {}/{} 只个股命中标签，平均每只 {:.1} 个概念\n\n",
            stats.total_stocks - stats.untagged,
            stats.total_stocks,
            stats.avg_concepts()
        ));
        md
    }

    /// Most common concept×industry pairs.
    pub fn concept_industry_table(&self) -> String {
        let counts = concept_industry_counts(
            self.stocks,
            &self.classifier.concept_tags().name_list(),
            &self.classifier.industry_tags().name_list(),
        );

        let mut md = String::from("## 概念×行业矩阵分析\n\n");
        md.push_str("| 概念 | 行业 | 股票数量 |\n");
        md.push_str("|------|------|----------|\n");
        for (concept, industry, count) in counts.iter().take(self.limits.matrix_display_limit) {
            md.push_str(&format!("| {} | {} | {} |\n", concept, industry, count));
        }
        md.push('\n');
        md
    }

    /// One block per ranked stock.
    pub fn stock_writeups(&self, ranked: &[RankedStock]) -> String {
        let mut md = format!("## 个股深度分析TOP{}\n\n", self.limits.writeup_limit);
        if ranked.is_empty() {
            md.push_str("暂无符合条件的个股\n\n");
            return md;
        }

        for (i, r) in ranked.iter().take(self.limits.writeup_limit).enumerate() {
            let stock = &r.stock.stock;
            let subs: Vec<&str> = self
                .refiner
                .refine_all(stock, &r.stock.concepts)
                .iter()
                .map(|s| s.name)
                .collect();

            md.push_str(&format!("### {}. {} ({})\n\n", i + 1, stock.name, stock.code));
            md.push_str(&format!("- **当前价格**: {}元\n", fmt_opt(stock.price, 2)));
            md.push_str(&format!("- **涨跌幅**: {}\n", fmt_signed_pct(stock.change_pct)));
            md.push_str(&format!("- **概念标签**: {}\n", join_labels(&r.stock.concepts)));
            md.push_str(&format!("- **行业标签**: {}\n", join_labels(&r.stock.industries)));
            md.push_str(&format!(
                "- **最佳匹配策略**: {} ({:.0}% 匹配度)\n",
                r.best.strategy,
                r.best.match_score * 100.0
            ));
            md.push_str(&format!("- **适用子策略**: {}\n", join_labels(&subs)));
            md.push_str(&format!(
                "- **推荐理由**: {}\n\n",
                stock.recommendation.as_deref().unwrap_or(NA)
            ));
        }
        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashare_core::StockRecord;

    fn make_record(code: &str, name: &str, industry: &str, business: &str, base: f64) -> StockRecord {
        StockRecord::new(code, name)
            .with_industry(industry)
            .with_business(business)
            .with_base_score(base)
    }

    fn make_market() -> MarketSnapshot {
        MarketSnapshot {
            sh_index: Some(4082.07),
            sh_change: Some(-1.26),
            sz_index: Some(14100.19),
            sz_change: Some(-1.27),
            cyb_index: Some(3275.96),
            cyb_change: Some(-1.57),
            up_count: Some(1428),
            down_count: Some(3795),
            turnover: Some(19989.0),
        }
    }

    struct Fixture {
        classifier: StockClassifier,
        refiner: StrategyRefiner,
        analyzer: CrossAnalyzer,
        stocks: Vec<ClassifiedStock>,
        market: MarketSnapshot,
        marginal: HashMap<String, f64>,
    }

    impl Fixture {
        fn new(records: &[StockRecord]) -> Self {
            let classifier = StockClassifier::default();
            let stocks = classifier.classify_batch(records);
            let mut analyzer = CrossAnalyzer::new(
                classifier.concept_tags().name_list(),
                classifier.industry_tags().name_list(),
                classifier.strategies().name_list(),
            );
            analyzer.build_concept_strategy_matrix(&stocks);
            analyzer.build_industry_strategy_matrix(&stocks);
            analyzer.build_stock_concept_strategy_3d(&stocks, 20, make_date());

            let mut marginal = HashMap::new();
            marginal.insert("强势动量".to_string(), 2.35);

            Self {
                classifier,
                refiner: StrategyRefiner::new(),
                analyzer,
                stocks,
                market: make_market(),
                marginal,
            }
        }

        fn report(&self) -> DailyReport<'_> {
            DailyReport {
                date: make_date(),
                market: &self.market,
                marginal_changes: &self.marginal,
                stocks: &self.stocks,
                classifier: &self.classifier,
                refiner: &self.refiner,
                analyzer: &self.analyzer,
                limits: ReportLimits::default(),
            }
        }
    }

    fn make_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 14).unwrap()
    }

    fn sample_records() -> Vec<StockRecord> {
        vec![
            make_record("600519", "贵州茅台", "食品饮料", "白酒生产销售", 0.85),
            make_record("688981", "中芯国际", "半导体", "集成电路制造、AI芯片代工", 0.80),
            make_record("688031", "星环科技", "计算机", "人工智能、大数据、云计算", 0.95),
        ]
    }

    #[test]
    fn test_market_overview_bearish() {
        let fixture = Fixture::new(&sample_records());
        let md = fixture.report().market_overview();

        assert!(md.starts_with("# A股深度优化日报"));
        assert!(md.contains("**报告日期**: 2025-11-14"));
        assert!(md.contains("- **上证指数**: 4082.07 (-1.26%)"));
        assert!(md.contains("**看空**"));
    }

    #[test]
    fn test_market_overview_missing_values() {
        let mut fixture = Fixture::new(&sample_records());
        fixture.market = MarketSnapshot::default();
        let md = fixture.report().market_overview();

        assert!(md.contains("- **上证指数**: N/A (N/A)"));
        assert!(md.contains("- **成交额**: N/A亿元"));
        assert!(md.contains("**震荡**"));
    }

    #[test]
    fn test_strategy_table() {
        let fixture = Fixture::new(&sample_records());
        let md = fixture.report().strategy_table();

        assert!(md.contains("| 动量策略 | 强势动量 | 62% | 高风险 | +2.35% |"));
        assert!(md.contains("| 防御策略 | 红利防御 | 72% | 极低风险 | N/A |"));
        assert_eq!(md.lines().filter(|l| l.starts_with("| ") && l.contains('%')).count(), 14);
    }

    #[test]
    fn test_concept_industry_counts() {
        let fixture = Fixture::new(&sample_records());
        let counts = concept_industry_counts(
            &fixture.stocks,
            &fixture.classifier.concept_tags().name_list(),
            &fixture.classifier.industry_tags().name_list(),
        );

        assert!(!counts.is_empty());
        assert!(counts.iter().all(|(_, _, n)| *n > 0));
        assert!(counts.windows(2).all(|w| w[0].2 >= w[1].2));
        assert!(counts.contains(&("白酒".to_string(), "食品饮料".to_string(), 1)));
    }

    #[test]
    fn test_concept_industry_table_respects_limit() {
        let fixture = Fixture::new(&sample_records());
        let mut report = fixture.report();
        report.limits.matrix_display_limit = 2;
        let md = report.concept_industry_table();

        let rows = md.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| 概念")).count();
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_full_report_features_top_stock() {
        let fixture = Fixture::new(&sample_records());
        let md = fixture.report().render();

        assert!(md.contains("## 策略细分分析"));
        assert!(md.contains("## 标的分类系统"));
        assert!(md.contains("## 概念×行业矩阵分析"));
        assert!(md.contains("## 交叉分析"));
        assert!(md.contains("## 个股深度分析TOP20"));
        assert!(md.contains("### 1. 星环科技 (688031)"));
        assert!(md.contains("## 案例分析：星环科技"));
        assert!(md.contains("- **推荐理由**: N/A"));
        assert!(md.trim_end().ends_with("市场有风险，投资需谨慎"));
    }

    #[test]
    fn test_generic_case_study_when_top_is_other() {
        let records = vec![make_record("600519", "贵州茅台", "食品饮料", "白酒生产销售", 0.85)];
        let fixture = Fixture::new(&records);
        let md = fixture.report().render();

        assert!(md.contains("## 案例分析\n\n以今日表现最佳的 **贵州茅台** 为例"));
        assert!(!md.contains("## 案例分析：星环科技"));
    }

    #[test]
    fn test_empty_universe_renders() {
        let fixture = Fixture::new(&[]);
        let md = fixture.report().render();

        assert!(md.contains("暂无符合条件的个股"));
        assert!(md.contains("- **平均涨跌幅**: N/A"));
        assert!(!md.contains("## 案例分析"));
        assert!(md.contains("## 风险提示"));
    }
}
