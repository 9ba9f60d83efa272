//! File system access and report rendering.
//!
//! - `traits`: the [`FileSystem`] seam
//! - `real`: the `std::fs` implementation
//! - `sources`: reads each product's cloc report into a [`crate::core::ProductSource`]
//! - `output` and `writers`: render an [`crate::core::AggregateReport`]

pub mod output;
pub mod real;
pub mod sources;
pub mod traits;
pub mod writers;

pub use output::{create_writer, OutputFormat, OutputWriter};
pub use real::RealFileSystem;
pub use sources::{load_sources, ReportLocation};
pub use traits::FileSystem;
