#![forbid(unsafe_code)]

//! gastrend core: harness report parsing and per-test gas trend analysis.
//!
//! - [`parser`] turns raw report text into [`MeasurementRecord`]s
//! - [`partition`] orders records and splits them into `(test, category)` groups
//! - [`trend`] fits a least-squares line through each group
//! - [`analysis`] ties the three together into renderer-ready data

pub mod analysis;
pub mod builtins;
pub mod config;
pub mod error;
pub mod parser;
pub mod partition;
pub mod record;
pub mod report;
pub mod trend;

pub use analysis::{analyze, Analysis, Panel, Point, Series, TrendFit};
pub use config::{AnalysisConfig, OutputFormat};
pub use error::{Error, Result};
pub use parser::{parse, parse_with_diagnostics, ParseOutcome, SkipReason, SkippedEntry};
pub use partition::{groups, partition_and_order, Group};
pub use record::{BuiltinUsage, Category, MeasurementRecord};
pub use report::{load_report, read_report};
pub use trend::{fit, TrendLine};
