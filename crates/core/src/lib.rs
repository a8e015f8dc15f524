//! Core types and configuration for the A-share daily report system.
//!
//! This crate provides shared types used across all other crates:
//! - Stock records, classified stocks and market snapshots
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigSource, LoadedConfig, ReportConfig};
pub use error::{Error, Result};
pub use types::*;
