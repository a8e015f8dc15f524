//! Input loading.
//!
//! Stocks come from a JSON array of records; when the configured file does
//! not exist the built-in demo universe is used instead. Market snapshot and
//! marginal changes are optional JSON files.

use anyhow::{Context, Result};
use ashare_core::{Error, MarketSnapshot, StockRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load stock records, falling back to [`demo_universe`] if `path` is absent.
pub fn load_stocks(path: &Path) -> Result<Vec<StockRecord>> {
    if !path.exists() {
        warn!(path = %path.display(), "Stocks file not found, using demo universe");
        return Ok(demo_universe());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stocks file {}", path.display()))?;
    let stocks: Vec<StockRecord> = serde_json::from_str(&contents)
        .map_err(Error::from)
        .with_context(|| format!("Failed to parse stocks file {}", path.display()))?;

    if let Some(pos) = stocks.iter().position(|s| s.code.trim().is_empty()) {
        return Err(Error::data(format!("stock record #{} has an empty code", pos)).into());
    }

    info!(path = %path.display(), count = stocks.len(), "Loaded stocks");
    Ok(stocks)
}

/// Load the market snapshot; no path means every index renders as `N/A`.
pub fn load_market(path: Option<&Path>) -> Result<MarketSnapshot> {
    let Some(path) = path else {
        return Ok(MarketSnapshot::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read market file {}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(Error::from)
        .with_context(|| format!("Failed to parse market file {}", path.display()))
}

/// Load the sub-strategy name -> marginal change (%) table.
pub fn load_marginal_changes(path: Option<&Path>) -> Result<HashMap<String, f64>> {
    let Some(path) = path else {
        return Ok(HashMap::new());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read marginal changes file {}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(Error::from)
        .with_context(|| format!("Failed to parse marginal changes file {}", path.display()))
}

struct DemoStock {
    code: &'static str,
    name: &'static str,
    industry: &'static str,
    business: &'static str,
    price: f64,
    change_pct: f64,
    pe: f64,
    roe: f64,
    dividend_yield: f64,
    base_score: f64,
    recommendation: &'static str,
}

const DEMO_STOCKS: &[DemoStock] = &[
    DemoStock {
        code: "688031",
        name: "星环科技",
        industry: "计算机",
        business: "人工智能、大数据、云计算解决方案",
        price: 89.65,
        change_pct: 7.25,
        pe: 120.0,
        roe: 3.2,
        dividend_yield: 0.0,
        base_score: 0.95,
        recommendation: "AI大模型技术领先，受益于国产替代和AI芯片产业链发展",
    },
    DemoStock {
        code: "600519",
        name: "贵州茅台",
        industry: "食品饮料",
        business: "白酒生产销售",
        price: 1520.0,
        change_pct: -0.45,
        pe: 24.5,
        roe: 31.0,
        dividend_yield: 3.1,
        base_score: 0.88,
        recommendation: "高端白酒龙头，现金流充沛",
    },
    DemoStock {
        code: "300750",
        name: "宁德时代",
        industry: "电力设备",
        business: "动力电池、储能电池研发制造",
        price: 245.3,
        change_pct: -2.1,
        pe: 22.0,
        roe: 22.5,
        dividend_yield: 1.2,
        base_score: 0.92,
        recommendation: "动力电池全球龙头，储能业务放量",
    },
    DemoStock {
        code: "688981",
        name: "中芯国际",
        industry: "半导体",
        business: "集成电路制造、AI芯片代工",
        price: 88.2,
        change_pct: 3.4,
        pe: 95.0,
        roe: 5.1,
        dividend_yield: 0.0,
        base_score: 0.82,
        recommendation: "国产晶圆代工龙头，先进制程持续突破",
    },
    DemoStock {
        code: "000001",
        name: "平安银行",
        industry: "银行",
        business: "商业银行业务",
        price: 11.2,
        change_pct: 0.36,
        pe: 4.6,
        roe: 10.5,
        dividend_yield: 5.8,
        base_score: 0.85,
        recommendation: "估值处于历史低位，股息率具备吸引力",
    },
    DemoStock {
        code: "600000",
        name: "浦发银行",
        industry: "银行",
        business: "股份制银行",
        price: 8.9,
        change_pct: -0.22,
        pe: 5.1,
        roe: 6.8,
        dividend_yield: 4.9,
        base_score: 0.78,
        recommendation: "资产质量改善，高股息防御",
    },
    DemoStock {
        code: "002475",
        name: "立讯精密",
        industry: "电子",
        business: "消费电子、AI服务器、汽车电子",
        price: 38.6,
        change_pct: 1.8,
        pe: 26.0,
        roe: 18.2,
        dividend_yield: 0.8,
        base_score: 0.80,
        recommendation: "精密制造平台，受益于AI终端换机",
    },
];

/// Small fixed universe used when no stocks file is available.
pub fn demo_universe() -> Vec<StockRecord> {
    DEMO_STOCKS
        .iter()
        .map(|d| StockRecord {
            price: Some(d.price),
            change_pct: Some(d.change_pct),
            pe: Some(d.pe),
            roe: Some(d.roe),
            dividend_yield: Some(d.dividend_yield),
            volatility: None,
            base_score: d.base_score,
            recommendation: Some(d.recommendation.to_string()),
            ..StockRecord::new(d.code, d.name)
                .with_industry(d.industry)
                .with_business(d.business)
        })
        .collect()
}
