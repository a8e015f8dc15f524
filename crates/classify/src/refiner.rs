//! Sub-strategy refinement.
//!
//! Splits the four base strategies into fourteen sub-strategies and screens a
//! stock's numeric fields against each one's criteria. Sub-strategy names
//! match the strategy table, so a refined stock can be looked up in both.

use ashare_core::{BaseStrategy, RiskLevel, StockRecord};
use serde::Serialize;

/// A refined sub-strategy with its historical statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubStrategy {
    /// Stable identifier, e.g. `strong_momentum`.
    pub key: &'static str,
    /// Display name, shared with the strategy table.
    pub name: &'static str,
    /// Parent base strategy.
    pub base: BaseStrategy,
    /// One-line description.
    pub description: &'static str,
    /// Risk tier.
    pub risk: RiskLevel,
    /// Historical win rate (0-1).
    pub win_rate: f64,
}

const fn sub(
    key: &'static str,
    name: &'static str,
    base: BaseStrategy,
    description: &'static str,
    risk: RiskLevel,
    win_rate: f64,
) -> SubStrategy {
    SubStrategy {
        key,
        name,
        base,
        description,
        risk,
        win_rate,
    }
}

/// All sub-strategies, grouped by base strategy in report order.
pub static SUB_STRATEGIES: [SubStrategy; 14] = [
    sub("strong_momentum", "强势动量", BaseStrategy::Momentum, "涨幅>7%的强势股票", RiskLevel::High, 0.62),
    sub("reversal_momentum", "反转动量", BaseStrategy::Momentum, "超跌反弹机会", RiskLevel::Medium, 0.58),
    sub("breakout_momentum", "突破动量", BaseStrategy::Momentum, "技术形态突破", RiskLevel::Medium, 0.60),
    sub("deep_value", "深度价值", BaseStrategy::Value, "PE<15的深度价值股", RiskLevel::Low, 0.65),
    sub("reasonable_value", "合理价值", BaseStrategy::Value, "PE 15-30的合理估值股", RiskLevel::Low, 0.63),
    sub("quality_value", "质量价值", BaseStrategy::Value, "ROE>15%的高质量价值股", RiskLevel::Low, 0.67),
    sub("anti_decline_defensive", "抗跌防御", BaseStrategy::Defensive, "跌幅<1%的抗跌股票", RiskLevel::VeryLow, 0.72),
    sub("stable_defensive", "稳健防御", BaseStrategy::Defensive, "低波动率稳定股", RiskLevel::Low, 0.70),
    sub("dividend_defensive", "红利防御", BaseStrategy::Defensive, "高股息率防御股", RiskLevel::VeryLow, 0.72),
    sub("defense_mapping", "军工映射", BaseStrategy::UsMarketMapping, "美股军工股对应的A股标的", RiskLevel::High, 0.55),
    sub("ai_chip_mapping", "AI芯片映射", BaseStrategy::UsMarketMapping, "美股AI芯片股对应的A股标的", RiskLevel::High, 0.58),
    sub("new_energy_mapping", "新能源映射", BaseStrategy::UsMarketMapping, "美股新能源股对应的A股标的", RiskLevel::Medium, 0.56),
    sub("consumer_electronics_mapping", "消费电子映射", BaseStrategy::UsMarketMapping, "美股消费电子股对应的A股标的", RiskLevel::Medium, 0.54),
    sub("biopharma_mapping", "生物医药映射", BaseStrategy::UsMarketMapping, "美股生物医药股对应的A股标的", RiskLevel::Medium, 0.52),
];

/// Screens stocks against the sub-strategy criteria.
pub struct StrategyRefiner {
    catalog: &'static [SubStrategy],
}

impl Default for StrategyRefiner {
    fn default() -> Self {
        Self {
            catalog: &SUB_STRATEGIES,
        }
    }
}

impl StrategyRefiner {
    /// Create a refiner over the built-in catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sub-strategy in catalog order.
    pub fn sub_strategies(&self) -> &'static [SubStrategy] {
        self.catalog
    }

    /// Sub-strategies of one base strategy.
    pub fn sub_strategies_of(&self, base: BaseStrategy) -> impl Iterator<Item = &'static SubStrategy> {
        self.catalog.iter().filter(move |s| s.base == base)
    }

    /// Look up a sub-strategy by key or display name.
    pub fn get(&self, key_or_name: &str) -> Option<&'static SubStrategy> {
        self.catalog
            .iter()
            .find(|s| s.key == key_or_name || s.name == key_or_name)
    }

    /// Sub-strategies of `base` whose criteria the stock meets.
    ///
    /// `concepts` are the stock's matched concept labels; the mapping family
    /// also reads the declared industry as the sector.
    pub fn refine(
        &self,
        base: BaseStrategy,
        stock: &StockRecord,
        concepts: &[String],
    ) -> Vec<&'static SubStrategy> {
        let keys = match base {
            BaseStrategy::Momentum => refine_momentum(stock),
            BaseStrategy::Value => refine_value(stock),
            BaseStrategy::Defensive => refine_defensive(stock),
            BaseStrategy::UsMarketMapping => refine_mapping(stock, concepts),
        };
        keys.into_iter().filter_map(|k| self.get(k)).collect()
    }

    /// Refine against every base strategy in order.
    pub fn refine_all(&self, stock: &StockRecord, concepts: &[String]) -> Vec<&'static SubStrategy> {
        BaseStrategy::ALL
            .iter()
            .flat_map(|&base| self.refine(base, stock, concepts))
            .collect()
    }
}

fn refine_momentum(stock: &StockRecord) -> Vec<&'static str> {
    let change = stock.change_pct.unwrap_or(0.0);
    if change > 7.0 {
        vec!["strong_momentum"]
    } else if change < -5.0 {
        vec!["reversal_momentum"]
    } else {
        Vec::new()
    }
}

fn refine_value(stock: &StockRecord) -> Vec<&'static str> {
    let pe = stock.pe.unwrap_or(f64::INFINITY);
    let roe = stock.roe.unwrap_or(0.0);

    if pe < 15.0 && roe >= 8.0 {
        vec!["deep_value"]
    } else if (15.0..=30.0).contains(&pe) && roe >= 10.0 {
        vec!["reasonable_value"]
    } else if roe >= 15.0 && pe >= 10.0 {
        vec!["quality_value"]
    } else {
        Vec::new()
    }
}

fn refine_defensive(stock: &StockRecord) -> Vec<&'static str> {
    let mut keys = Vec::new();
    if stock.change_pct.unwrap_or(0.0).abs() < 1.0 {
        keys.push("anti_decline_defensive");
    }
    if stock.dividend_yield.unwrap_or(0.0) >= 3.0 {
        keys.push("dividend_defensive");
    }
    if stock.volatility.unwrap_or(f64::INFINITY) <= 0.15 {
        keys.push("stable_defensive");
    }
    keys
}

fn refine_mapping(stock: &StockRecord, concepts: &[String]) -> Vec<&'static str> {
    let sector = stock.industry.as_str();
    let has = |concept: &str| concepts.iter().any(|c| c == concept);

    let mut keys = Vec::new();
    if sector.contains("国防军工") || has("军工") {
        keys.push("defense_mapping");
    }
    if sector.contains("半导体") && has("AI芯片") {
        keys.push("ai_chip_mapping");
    }
    if sector.contains("电力设备") && has("新能源") {
        keys.push("new_energy_mapping");
    }
    if sector.contains("电子") && has("消费电子") {
        keys.push("consumer_electronics_mapping");
    }
    if sector.contains("医药生物") && has("创新药") {
        keys.push("biopharma_mapping");
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::STRATEGY_BOOK;

    fn names(subs: &[&SubStrategy]) -> Vec<&'static str> {
        subs.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_catalog_names_exist_in_strategy_book() {
        let refiner = StrategyRefiner::new();
        assert_eq!(refiner.sub_strategies().len(), 14);
        for sub in refiner.sub_strategies() {
            assert!(STRATEGY_BOOK.weights(sub.name).is_some(), "{} missing", sub.name);
        }
    }

    #[test]
    fn test_momentum() {
        let refiner = StrategyRefiner::new();
        let mut stock = StockRecord::new("300750", "宁德时代");

        stock.change_pct = Some(8.5);
        assert_eq!(names(&refiner.refine(BaseStrategy::Momentum, &stock, &[])), vec!["强势动量"]);

        stock.change_pct = Some(-6.0);
        assert_eq!(names(&refiner.refine(BaseStrategy::Momentum, &stock, &[])), vec!["反转动量"]);

        stock.change_pct = None;
        assert!(refiner.refine(BaseStrategy::Momentum, &stock, &[]).is_empty());
    }

    #[test]
    fn test_value_branches_are_exclusive() {
        let refiner = StrategyRefiner::new();
        let mut stock = StockRecord::new("600036", "招商银行");

        stock.pe = Some(6.0);
        stock.roe = Some(16.0);
        assert_eq!(names(&refiner.refine(BaseStrategy::Value, &stock, &[])), vec!["深度价值"]);

        stock.pe = Some(25.0);
        stock.roe = Some(12.0);
        assert_eq!(names(&refiner.refine(BaseStrategy::Value, &stock, &[])), vec!["合理价值"]);

        stock.pe = Some(40.0);
        stock.roe = Some(20.0);
        assert_eq!(names(&refiner.refine(BaseStrategy::Value, &stock, &[])), vec!["质量价值"]);
    }

    #[test]
    fn test_value_missing_pe_is_infinite() {
        let refiner = StrategyRefiner::new();
        let mut stock = StockRecord::new("688031", "星环科技");
        stock.roe = Some(18.0);
        // No PE: neither deep nor reasonable, but quality only needs pe >= 10.
        assert_eq!(names(&refiner.refine(BaseStrategy::Value, &stock, &[])), vec!["质量价值"]);
    }

    #[test]
    fn test_defensive_checks_are_independent() {
        let refiner = StrategyRefiner::new();
        let mut stock = StockRecord::new("601088", "中国神华");
        stock.change_pct = Some(-0.3);
        stock.dividend_yield = Some(6.5);
        stock.volatility = Some(0.12);

        assert_eq!(
            names(&refiner.refine(BaseStrategy::Defensive, &stock, &[])),
            vec!["抗跌防御", "红利防御", "稳健防御"]
        );
    }

    #[test]
    fn test_defensive_missing_fields() {
        let refiner = StrategyRefiner::new();
        let stock = StockRecord::new("000000", "空");
        // Missing change counts as flat; missing volatility never qualifies.
        assert_eq!(names(&refiner.refine(BaseStrategy::Defensive, &stock, &[])), vec!["抗跌防御"]);
    }

    #[test]
    fn test_mapping_uses_sector_and_concepts() {
        let refiner = StrategyRefiner::new();
        let stock = StockRecord::new("688981", "中芯国际").with_industry("半导体");
        let concepts = vec!["AI芯片".to_string(), "军工".to_string()];

        assert_eq!(
            names(&refiner.refine(BaseStrategy::UsMarketMapping, &stock, &concepts)),
            vec!["军工映射", "AI芯片映射"]
        );
    }

    #[test]
    fn test_refine_all_and_lookup() {
        let refiner = StrategyRefiner::new();
        let mut stock = StockRecord::new("600519", "贵州茅台").with_industry("食品饮料");
        stock.change_pct = Some(0.2);
        stock.pe = Some(28.0);
        stock.roe = Some(30.0);

        assert_eq!(names(&refiner.refine_all(&stock, &[])), vec!["合理价值", "抗跌防御"]);
        assert_eq!(refiner.get("quality_value").unwrap().name, "质量价值");
        assert_eq!(refiner.get("红利防御").unwrap().risk, RiskLevel::VeryLow);
        assert!(refiner.get("unknown").is_none());
        assert_eq!(refiner.sub_strategies_of(BaseStrategy::UsMarketMapping).count(), 5);
    }
}
