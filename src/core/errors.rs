//! Error type for the aggregation core

use crate::aggregation::RunState;
use thiserror::Error;

/// Every way an aggregation run can fail.
///
/// All of them abort the whole run; there is no partial report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// A cloc report is missing a section, an attribute, or has bad counts
    #[error("Malformed metrics document for product '{product}': {reason}")]
    MalformedMetricsDocument { product: String, reason: String },

    /// Nothing to aggregate
    #[error("No products to aggregate")]
    EmptyProductSet,

    /// The pivot step received a table without rows
    #[error("Language detail table has no rows to tabulate")]
    EmptyDetailTable,

    /// A product was named but has no report
    #[error("No metrics document found for product '{product}'")]
    MissingSourceDocument { product: String },

    /// The same product id appears twice in one run
    #[error("Product '{product}' was supplied more than once")]
    DuplicateProduct { product: String },

    /// A run instance executes exactly once
    #[error("Aggregation run already finished ({state})")]
    RunAlreadyFinished { state: RunState },
}

impl AggregationError {
    pub fn malformed(product: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedMetricsDocument {
            product: product.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(product: impl Into<String>) -> Self {
        Self::MissingSourceDocument {
            product: product.into(),
        }
    }

    /// Product the error is about, when it concerns a single product.
    pub fn product(&self) -> Option<&str> {
        match self {
            Self::MalformedMetricsDocument { product, .. }
            | Self::MissingSourceDocument { product }
            | Self::DuplicateProduct { product } => Some(product),
            Self::EmptyProductSet | Self::EmptyDetailTable | Self::RunAlreadyFinished { .. } => {
                None
            }
        }
    }
}

/// Result type alias using the aggregation error
pub type Result<T> = std::result::Result<T, AggregationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_product() {
        let err = AggregationError::missing("billing");
        assert_eq!(
            err.to_string(),
            "No metrics document found for product 'billing'"
        );
        assert_eq!(err.product(), Some("billing"));
    }

    #[test]
    fn run_level_errors_have_no_product() {
        assert_eq!(AggregationError::EmptyProductSet.product(), None);
        assert_eq!(AggregationError::EmptyDetailTable.product(), None);
    }
}
