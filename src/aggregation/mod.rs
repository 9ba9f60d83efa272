//! Aggregation and cross-tabulation engine
//!
//! Pure, synchronous pipeline over already-materialized reports:
//!
//! ```text
//! ProductSource* ──parse──> ProductMetricsDocument* ──build──> LanguageDetailTable
//!                                                      │              │
//!                                                      │            pivot
//!                                                      ▼              ▼
//!                                             FileDetailTable*   PivotSummary
//! ```
//!
//! Nothing in here performs I/O or logs; callers own both.

pub mod detail;
pub mod driver;
pub mod pivot;

pub use detail::{build_detail_tables, DetailTables};
pub use driver::{aggregate, AggregationRun, RunState};
pub use pivot::pivot;
