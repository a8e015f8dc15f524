//! Daily report driver: input loading and the end-to-end pipeline.

pub mod data;
pub mod pipeline;

pub use data::{demo_universe, load_marginal_changes, load_market, load_stocks};
pub use pipeline::{run_case, run_daily};
