//! Static blocks and the case-study sections.

use ashare_cross::RankedStock;

use crate::format::join_labels;

/// Name of the stock with a hand-written case study.
pub const FEATURED_STOCK: &str = "星环科技";

/// Disclaimer closing every report.
pub const RISK_DISCLAIMER: &str = "## 风险提示\n\n\
> **重要说明**:\n\
> - 本报告基于历史数据和算法模型生成，仅供参考学习\n\
> - 实际投资需结合个人风险承受能力和专业投资顾问建议\n\
> - 历史胜率不代表未来收益，市场有风险，投资需谨慎\n\n";

const FEATURED_CASE_STUDY: &str = "## 案例分析：星环科技\n\n\
### 公司概况\n\
- **公司名称**: 星环科技\n\
- **股票代码**: 688031\n\
- **主营业务**: 人工智能、大数据、云计算解决方案提供商\n\
- **核心优势**: 国内领先的大数据基础软件厂商，AI大模型技术布局完善\n\n\
### 三维分析\n\
| 维度 | 分析内容 |\n\
|------|----------|\n\
| **概念维度** | AI、大数据、云计算、信创、国产替代 |\n\
| **行业维度** | 计算机、软件服务、信息技术 |\n\
| **策略维度** | AI芯片映射(75%匹配度)、强势动量(68%匹配度)、质量价值(62%匹配度) |\n\n\
### 投资建议\n\
- **短期策略**: 关注AI芯片映射子策略，受益于国产AI芯片产业链发展\n\
- **中期策略**: 强势动量策略，技术面呈现突破态势\n\
- **长期策略**: 质量价值策略，基本面扎实，研发投入占比高\n\n";

/// Case study of the top-ranked stock.
///
/// The featured stock gets its fixed write-up; any other stock gets a
/// generic three-dimension summary built from its ranking.
pub fn case_study(top: &RankedStock) -> String {
    if top.stock.stock.name == FEATURED_STOCK {
        return FEATURED_CASE_STUDY.to_string();
    }

    let mut md = String::from("## 案例分析\n\n");
    md.push_str(&format!(
        "以今日表现最佳的 **{}** 为例进行三维分析：\n\n",
        top.stock.stock.name
    ));
    md.push_str(&format!("- **概念维度**: {}\n", join_labels(&top.stock.concepts)));
    md.push_str(&format!("- **行业维度**: {}\n", join_labels(&top.stock.industries)));
    md.push_str(&format!(
        "- **策略维度**: {} ({:.0}% 匹配度)\n\n",
        top.best.strategy,
        top.best.match_score * 100.0
    ));
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashare_core::{ClassifiedStock, StockRecord};
    use ashare_cross::BestTriple;

    fn make_ranked(name: &str) -> RankedStock {
        RankedStock {
            stock: ClassifiedStock {
                stock: StockRecord::new("000001", name),
                concepts: vec!["银行".to_string()],
                industries: vec![],
                scores: vec![],
            },
            best: BestTriple {
                concept: "银行".to_string(),
                strategy: "红利防御".to_string(),
                match_score: 0.9,
                combined_score: 0.63,
            },
        }
    }

    #[test]
    fn test_featured_case_study() {
        let md = case_study(&make_ranked(FEATURED_STOCK));
        assert!(md.starts_with("## 案例分析：星环科技"));
        assert!(md.contains("| **策略维度** | AI芯片映射(75%匹配度)"));
    }

    #[test]
    fn test_generic_case_study() {
        let md = case_study(&make_ranked("平安银行"));
        assert!(md.contains("以今日表现最佳的 **平安银行** 为例"));
        assert!(md.contains("- **行业维度**: 无"));
        assert!(md.contains("- **策略维度**: 红利防御 (90% 匹配度)"));
    }

    #[test]
    fn test_disclaimer_block() {
        assert!(RISK_DISCLAIMER.starts_with("## 风险提示"));
        assert_eq!(RISK_DISCLAIMER.matches("> - ").count(), 3);
    }
}
