//! Metrics document parsing
//!
//! Turns the report of the external line counter into a normalized
//! [`ProductMetricsDocument`](crate::core::ProductMetricsDocument).

pub mod cloc;

pub use cloc::parse_metrics_document;
