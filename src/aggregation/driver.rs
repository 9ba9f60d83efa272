//! Aggregation driver
//!
//! Runs parser, detail builder and pivot in a fixed order over one set of
//! product reports. A run moves `Validating -> Building -> Done`; any failure
//! lands in `Failed` and the error is returned without partial output.

use super::{build_detail_tables, pivot, DetailTables};
use crate::core::{
    AggregateReport, AggregationError, ProductSource, ProductToolHeader, RawDocument, Result,
};
use crate::metrics::parse_metrics_document;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Validating,
    Building,
    Done,
    Failed,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Building => "building",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One aggregation run. Not reusable: create a fresh run per report set.
#[derive(Debug)]
pub struct AggregationRun {
    state: RunState,
}

impl Default for AggregationRun {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationRun {
    pub fn new() -> Self {
        Self {
            state: RunState::Validating,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Validate every source, then parse, build and pivot.
    ///
    /// # Errors
    ///
    /// The first failure of any step, see [`AggregationError`]. Calling this
    /// on a run that already finished returns
    /// [`AggregationError::RunAlreadyFinished`] and leaves its state alone.
    pub fn execute(&mut self, sources: &[ProductSource]) -> Result<AggregateReport> {
        if self.state.is_terminal() {
            return Err(AggregationError::RunAlreadyFinished { state: self.state });
        }

        let outcome = validate_sources(sources).and_then(|documents| {
            self.state = RunState::Building;
            build_report(&documents)
        });

        self.state = match outcome {
            Ok(_) => RunState::Done,
            Err(_) => RunState::Failed,
        };
        outcome
    }
}

/// Aggregate one set of product reports with a fresh run.
pub fn aggregate(sources: &[ProductSource]) -> Result<AggregateReport> {
    AggregationRun::new().execute(sources)
}

/// Check the whole input before any document is parsed.
fn validate_sources(sources: &[ProductSource]) -> Result<Vec<(&str, &RawDocument)>> {
    if sources.is_empty() {
        return Err(AggregationError::EmptyProductSet);
    }

    let mut seen = HashSet::with_capacity(sources.len());
    if let Some(duplicate) = sources.iter().find(|source| !seen.insert(source.product.as_str())) {
        return Err(AggregationError::DuplicateProduct {
            product: duplicate.product.clone(),
        });
    }

    sources
        .iter()
        .map(|source| {
            source
                .document
                .as_ref()
                .map(|document| (source.product.as_str(), document))
                .ok_or_else(|| AggregationError::missing(&source.product))
        })
        .collect()
}

fn build_report(documents: &[(&str, &RawDocument)]) -> Result<AggregateReport> {
    let documents = documents
        .iter()
        .map(|(product, raw)| parse_metrics_document(raw, product))
        .collect::<Result<Vec<_>>>()?;

    let tool_headers = documents
        .iter()
        .filter_map(|document| {
            document.header.clone().map(|header| ProductToolHeader {
                product: document.product_id.clone(),
                header,
            })
        })
        .collect();

    let DetailTables {
        language_details,
        file_tables,
    } = build_detail_tables(&documents)?;
    let pivot = pivot(&language_details)?;

    Ok(AggregateReport {
        language_details,
        file_tables,
        pivot,
        tool_headers,
    })
}
