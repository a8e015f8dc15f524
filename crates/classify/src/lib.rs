//! Stock classification for the A-share report system.
//!
//! This crate handles:
//! - Static concept, industry and strategy tables
//! - Keyword-based concept/industry tagging
//! - Per-strategy match scoring
//! - Numeric sub-strategy refinement

pub mod tags;
pub mod classifier;
pub mod refiner;

pub use tags::{StrategyBook, TagTable, CONCEPT_TAGS, INDUSTRY_TAGS, STRATEGY_BOOK};
pub use classifier::{ClassificationStats, StockClassifier};
pub use refiner::{StrategyRefiner, SubStrategy};
