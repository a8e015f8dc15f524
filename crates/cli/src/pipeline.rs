//! End-to-end report runs.

use anyhow::{Context, Result};
use ashare_classify::{StockClassifier, StrategyRefiner};
use ashare_core::{ClassifiedStock, ReportConfig};
use ashare_cross::CrossAnalyzer;
use ashare_report::{CaseStudyReport, DailyReport, ReportLimits, ReportWriter};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use crate::data::{load_marginal_changes, load_market, load_stocks};

fn classify_universe(config: &ReportConfig, classifier: &StockClassifier) -> Result<Vec<ClassifiedStock>> {
    let stocks = load_stocks(&config.paths.stocks)?;
    Ok(classifier.classify_batch(&stocks))
}

/// Generate the daily report for `date` and write it under the output directory.
pub fn run_daily(config: &ReportConfig, date: NaiveDate) -> Result<PathBuf> {
    info!(%date, "Generating daily report");

    let classifier = StockClassifier::default();
    let refiner = StrategyRefiner::new();

    info!("Step 1: loading inputs");
    let market = load_market(config.paths.market.as_deref())?;
    let marginal = load_marginal_changes(config.paths.marginal_changes.as_deref())?;

    info!("Step 2: classifying stocks");
    let classified = classify_universe(config, &classifier)?;

    info!("Step 3: cross analysis");
    let mut analyzer = CrossAnalyzer::new(
        classifier.concept_tags().name_list(),
        classifier.industry_tags().name_list(),
        classifier.strategies().name_list(),
    );
    analyzer.build_concept_strategy_matrix(&classified);
    analyzer.build_industry_strategy_matrix(&classified);
    analyzer.build_stock_concept_strategy_3d(&classified, config.analysis.top_n, date);

    info!("Step 4: rendering report");
    let content = DailyReport {
        date,
        market: &market,
        marginal_changes: &marginal,
        stocks: &classified,
        classifier: &classifier,
        refiner: &refiner,
        analyzer: &analyzer,
        limits: ReportLimits::from(&config.analysis),
    }
    .render();

    let writer = ReportWriter::new(&config.paths.output_dir);
    let path = writer
        .write_daily(date, &content)
        .with_context(|| format!("Failed to write daily report to {}", writer.output_dir().display()))?;

    info!(path = %path.display(), "Daily report complete");
    Ok(path)
}

/// Generate the case study of one stock and write it under the output directory.
pub fn run_case(config: &ReportConfig, code: &str, name: &str, date: NaiveDate) -> Result<PathBuf> {
    info!(code, name, %date, "Generating case study");

    let classifier = StockClassifier::default();
    let refiner = StrategyRefiner::new();
    let classified = classify_universe(config, &classifier)?;

    let content = CaseStudyReport::lookup(code, name, date, &classified, &refiner).render();

    let writer = ReportWriter::new(&config.paths.output_dir);
    let path = writer
        .write_case(name, date, &content)
        .with_context(|| format!("Failed to write case study to {}", writer.output_dir().display()))?;

    info!(path = %path.display(), "Case study complete");
    Ok(path)
}
