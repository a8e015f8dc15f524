//! Cross analysis for the A-share report system.
//!
//! This crate handles:
//! - Concept×strategy and industry×strategy matrices
//! - Matrix insights (strongest/weakest cells, diversity, concentration)
//! - Stock×concept×strategy ranking
//! - Universe-level change statistics

pub mod matrix;
pub mod insights;
pub mod ranking;
pub mod stats;
pub mod analyzer;

pub use matrix::{normalize_row, shannon_entropy, CrossMatrix};
pub use insights::{CellScore, LabelScore, MatrixInsights};
pub use ranking::{BestTriple, RankedStock, ThreeDAnalysis};
pub use stats::UniverseStats;
pub use analyzer::CrossAnalyzer;
