//! Markdown rendering and persistence for the A-share daily report.
//!
//! This crate handles:
//! - The full daily report (market, strategies, tags, matrices, stocks)
//! - The standalone single-stock case study
//! - Writing reports under the output directory

pub mod format;
pub mod sections;
pub mod daily;
pub mod case_study;
pub mod writer;

pub use daily::{concept_industry_counts, DailyReport, ReportLimits};
pub use case_study::CaseStudyReport;
pub use writer::ReportWriter;
