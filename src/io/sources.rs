//! Materialize per-product cloc reports for the aggregation core.

use crate::core::{ProductSource, RawDocument};
use crate::errors::IoError;
use crate::io::traits::FileSystem;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Where one product's report is expected on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLocation {
    pub product: String,
    pub path: PathBuf,
}

impl ReportLocation {
    pub fn new(product: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            product: product.into(),
            path: path.into(),
        }
    }
}

/// Read every report, keeping the given product order.
///
/// A report that doesn't exist becomes [`ProductSource::missing`], which the
/// aggregation run turns into a missing-document error naming the product.
///
/// # Errors
///
/// Any read failure other than "not found" (permissions, a directory in
/// place of a file, ...).
pub fn load_sources<F: FileSystem + ?Sized>(
    fs: &F,
    locations: &[ReportLocation],
) -> Result<Vec<ProductSource>, IoError> {
    locations
        .iter()
        .map(|location| match fs.read_bytes(&location.path) {
            Ok(bytes) => {
                debug!(
                    product = %location.product,
                    path = %location.path.display(),
                    bytes = bytes.len(),
                    "Loaded cloc report"
                );
                let document = RawDocument::from_bytes(bytes).with_origin(&location.path);
                Ok(ProductSource::new(location.product.clone(), document))
            }
            Err(e) if e.is_not_found() => {
                warn!(
                    product = %location.product,
                    path = %location.path.display(),
                    "cloc report not found"
                );
                Ok(ProductSource::missing(location.product.clone()))
            }
            Err(e) => Err(e),
        })
        .collect()
}
