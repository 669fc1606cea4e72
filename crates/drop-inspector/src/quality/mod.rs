//! Data quality analysis module.
//!
//! This module provides a fixed battery of heuristic detectors for issues
//! such as missing values, duplicate rows, mixed types, malformed emails,
//! unparseable dates and numbers stored as text.

mod analyzer;
mod detectors;
pub mod heuristics;
mod sampling;

pub use analyzer::{DataQualityAnalyzer, detect_issues};
pub use sampling::Sampler;
