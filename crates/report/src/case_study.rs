//! Standalone single-stock case study.

use ashare_classify::StrategyRefiner;
use ashare_core::{ClassifiedStock, StrategyScore};
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::{info, warn};

use crate::format::{fmt_opt, fmt_rate, fmt_signed_pct, join_labels, NA};
use crate::sections::RISK_DISCLAIMER;

/// Strategies listed in the strategy dimension.
const STRATEGY_DIMENSION_LEN: usize = 3;

/// Case study of one stock, looked up by code in the classified universe.
pub struct CaseStudyReport<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub date: NaiveDate,
    /// The stock's classification, `None` when the code is not in the universe.
    pub stock: Option<&'a ClassifiedStock>,
    pub refiner: &'a StrategyRefiner,
}

impl<'a> CaseStudyReport<'a> {
    /// Find `code` in `universe` and prepare the report.
    pub fn lookup(
        code: &'a str,
        name: &'a str,
        date: NaiveDate,
        universe: &'a [ClassifiedStock],
        refiner: &'a StrategyRefiner,
    ) -> Self {
        let stock = universe.iter().find(|s| s.stock.code == code);
        if stock.is_none() {
            warn!(code, name, "Stock not found in universe");
        }
        Self {
            code,
            name,
            date,
            stock,
            refiner,
        }
    }

    /// Render the report.
    pub fn render(&self) -> String {
        let mut md = format!("# 个股案例分析：{}（{}）\n\n", self.name, self.code);
        md.push_str(&format!("**报告日期**: {}\n\n", self.date.format("%Y-%m-%d")));

        match self.stock {
            Some(stock) => {
                md.push_str(&self.overview(stock));
                md.push_str(&self.three_dimensions(stock));
                md.push_str(&self.sub_strategies(stock));
            }
            None => md.push_str("暂无该股票的分类数据，请检查股票代码或数据源。\n\n"),
        }

        md.push_str(RISK_DISCLAIMER);
        info!(code = self.code, found = self.stock.is_some(), "Case study rendered");
        md
    }

    fn overview(&self, stock: &ClassifiedStock) -> String {
        let record = &stock.stock;
        let mut md = String::from("## 公司概况\n\n");
        md.push_str(&format!("- **公司名称**: {}\n", self.name));
        md.push_str(&format!("- **股票代码**: {}\n", self.code));
        md.push_str(&format!("- **所属行业**: {}\n", non_empty(&record.industry)));
        md.push_str(&format!("- **主营业务**: {}\n", non_empty(&record.business)));
        md.push_str(&format!("- **当前价格**: {}元\n", fmt_opt(record.price, 2)));
        md.push_str(&format!("- **涨跌幅**: {}\n", fmt_signed_pct(record.change_pct)));
        md.push_str(&format!("- **市盈率**: {}\n", fmt_opt(record.pe, 2)));
        md.push_str(&format!("- **ROE**: {}\n\n", fmt_opt(record.roe, 2)));
        md
    }

    fn three_dimensions(&self, stock: &ClassifiedStock) -> String {
        let strategies: Vec<String> = top_scores(stock, STRATEGY_DIMENSION_LEN)
            .iter()
            .map(|s| format!("{}({:.0}%匹配度)", s.strategy, s.score * 100.0))
            .collect();

        let mut md = String::from("## 三维分析\n\n");
        md.push_str("| 维度 | 分析内容 |\n");
        md.push_str("|------|----------|\n");
        md.push_str(&format!("| **概念维度** | {} |\n", join_labels(&stock.concepts)));
        md.push_str(&format!("| **行业维度** | {} |\n", join_labels(&stock.industries)));
        md.push_str(&format!("| **策略维度** | {} |\n\n", join_labels(&strategies)));
        md
    }

    fn sub_strategies(&self, stock: &ClassifiedStock) -> String {
        let subs = self.refiner.refine_all(&stock.stock, &stock.concepts);

        let mut md = String::from("## 子策略筛选\n\n");
        if subs.is_empty() {
            md.push_str("当前数据未满足任何子策略条件。\n\n");
            return md;
        }
        md.push_str("| 子策略 | 说明 | 历史胜率 | 风险等级 |\n");
        md.push_str("|--------|------|----------|----------|\n");
        for sub in subs {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                sub.name,
                sub.description,
                fmt_rate(sub.win_rate),
                sub.risk.label()
            ));
        }
        md.push('\n');
        md
    }
}

fn non_empty(s: &str) -> &str {
    if s.is_empty() {
        NA
    } else {
        s
    }
}

/// Up to `n` positive scores, highest first, ties in table order.
fn top_scores(stock: &ClassifiedStock, n: usize) -> Vec<&StrategyScore> {
    let mut scores: Vec<&StrategyScore> = stock.nonzero_scores().collect();
    scores.sort_by_key(|s| Reverse(OrderedFloat(s.score)));
    scores.truncate(n);
    scores
}
