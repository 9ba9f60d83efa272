//! Ordered detail tables produced by the builder.

use super::{FileRow, LanguageRow, ProductMetricsDocument};
use serde::Serialize;
use std::ops::RangeInclusive;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageDetailRow {
    pub product: String,
    pub language: String,
    pub file_count: u64,
    pub loc_count: u64,
}

/// Inclusive, 0-based row span of one product in the language detail table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "row range {start}..={end} is inverted");
        Self { start, end }
    }

    /// Number of rows covered. Never zero.
    pub fn row_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductRange {
    pub product: String,
    #[serde(flatten)]
    pub range: RowRange,
}

/// Flat table of language rows across all products.
///
/// Rows of one product are contiguous and `ranges` records where each
/// product's block sits, in insertion order. Renderers use the ranges for
/// grouping; the pivot uses the rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LanguageDetailTable {
    rows: Vec<LanguageDetailRow>,
    ranges: Vec<ProductRange>,
}

impl LanguageDetailTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize, products: usize) -> Self {
        Self {
            rows: Vec::with_capacity(rows),
            ranges: Vec::with_capacity(products),
        }
    }

    /// Append one product's language rows and record the span just written.
    ///
    /// Returns `None` and leaves the table untouched when `rows` is empty,
    /// since an empty block has no range.
    pub fn push_product(&mut self, product: &str, rows: &[LanguageRow]) -> Option<RowRange> {
        if rows.is_empty() {
            return None;
        }

        let start = self.rows.len();
        self.rows.extend(rows.iter().map(|row| LanguageDetailRow {
            product: product.to_string(),
            language: row.language.clone(),
            file_count: row.file_count,
            loc_count: row.loc_count,
        }));
        let range = RowRange::new(start, self.rows.len() - 1);

        self.ranges.push(ProductRange {
            product: product.to_string(),
            range,
        });
        Some(range)
    }

    pub fn rows(&self) -> &[LanguageDetailRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ranges(&self) -> &[ProductRange] {
        &self.ranges
    }

    pub fn product_row_range(&self, product: &str) -> Option<RowRange> {
        self.ranges
            .iter()
            .find(|entry| entry.product == product)
            .map(|entry| entry.range)
    }

    /// The contiguous block of rows belonging to `product`.
    pub fn product_rows(&self, product: &str) -> &[LanguageDetailRow] {
        self.product_row_range(product)
            .map(|range| &self.rows[range.indices()])
            .unwrap_or(&[])
    }

    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.ranges.iter().map(|entry| entry.product.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileDetailRow {
    pub file_name: String,
    pub loc_count: u64,
    pub language_tag: String,
}

impl From<&FileRow> for FileDetailRow {
    fn from(row: &FileRow) -> Self {
        Self {
            file_name: row.file_name.clone(),
            loc_count: row.loc_count,
            language_tag: row.language_tag.clone(),
        }
    }
}

/// File listing for one product, in report order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileDetailTable {
    pub product: String,
    pub rows: Vec<FileDetailRow>,
}

impl FileDetailTable {
    pub fn from_document(document: &ProductMetricsDocument) -> Self {
        Self {
            product: document.product_id.clone(),
            rows: document.file_rows.iter().map(FileDetailRow::from).collect(),
        }
    }

    pub fn total_loc(&self) -> u64 {
        self.rows.iter().map(|row| row.loc_count).sum()
    }
}
