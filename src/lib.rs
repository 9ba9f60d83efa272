//! Aggregate per-product cloc reports into a language detail table, per-product
//! file tables and a product-by-language LOC pivot.
//!
//! The [`aggregation`] engine is pure: it takes already-read reports as
//! [`core::ProductSource`] values and returns an [`core::AggregateReport`] or a
//! typed [`core::AggregationError`]. Reading files, configuration, logging and
//! rendering live in [`io`], [`config`], [`commands`] and [`cli`].

pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod metrics;

pub use crate::aggregation::{aggregate, pivot, AggregationRun, RunState};
pub use crate::core::{
    AggregateReport, AggregationError, FileDetailTable, LanguageDetailTable, PivotSummary,
    ProductMetricsDocument, ProductSource, RawDocument, RowRange,
};
pub use crate::errors::{ConfigError, IoError};
pub use crate::metrics::parse_metrics_document;
