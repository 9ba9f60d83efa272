pub mod errors;
pub mod summary;
pub mod tables;

pub use errors::{AggregationError, Result};
pub use summary::{AggregateReport, PivotCell, PivotSummary, ProductToolHeader};
pub use tables::{
    FileDetailRow, FileDetailTable, LanguageDetailRow, LanguageDetailTable, ProductRange, RowRange,
};

use serde::Serialize;
use std::path::{Path, PathBuf};

/// A per-product cloc report, already materialized by the caller.
///
/// The aggregation core never touches the file system; whoever collects the
/// reports hands their bytes over in this form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    content: Vec<u8>,
    origin: Option<PathBuf>,
}

impl RawDocument {
    pub fn from_bytes(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            origin: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_bytes(text.into().into_bytes())
    }

    /// Remember where the document was read from, for diagnostics only.
    pub fn with_origin(mut self, path: impl Into<PathBuf>) -> Self {
        self.origin = Some(path.into());
        self
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One entry of the ordered product input.
///
/// A `None` document means the product was named but nothing was found for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductSource {
    pub product: String,
    pub document: Option<RawDocument>,
}

impl ProductSource {
    pub fn new(product: impl Into<String>, document: RawDocument) -> Self {
        Self {
            product: product.into(),
            document: Some(document),
        }
    }

    pub fn missing(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            document: None,
        }
    }
}

/// Per-language totals as reported by cloc.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageRow {
    pub language: String,
    pub file_count: u64,
    pub loc_count: u64,
}

impl LanguageRow {
    pub fn new(language: impl Into<String>, file_count: u64, loc_count: u64) -> Self {
        Self {
            language: language.into(),
            file_count,
            loc_count,
        }
    }
}

/// Per-file line count as reported by cloc.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileRow {
    pub file_name: String,
    pub loc_count: u64,
    pub language_tag: String,
}

impl FileRow {
    pub fn new(file_name: impl Into<String>, loc_count: u64, language_tag: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            loc_count,
            language_tag: language_tag.into(),
        }
    }
}

/// Run statistics from the `<header>` element of a cloc report.
///
/// Every field is optional: cloc versions differ in what they emit and none
/// of it feeds the aggregation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ToolHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_files: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_lines: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_per_second: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_per_second: Option<f64>,
}

/// Normalized content of one product's cloc report.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductMetricsDocument {
    pub product_id: String,
    pub language_rows: Vec<LanguageRow>,
    pub file_rows: Vec<FileRow>,
    pub header: Option<ToolHeader>,
}

impl ProductMetricsDocument {
    pub fn new(
        product_id: impl Into<String>,
        language_rows: Vec<LanguageRow>,
        file_rows: Vec<FileRow>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            language_rows,
            file_rows,
            header: None,
        }
    }
}
