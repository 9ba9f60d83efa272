//! Cross-tabulated summary and the composite report handed to renderers.

use super::{FileDetailTable, LanguageDetailTable, ToolHeader};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Product x language totals.
///
/// Row and column keys keep first-seen order so every renderer lays the
/// pivot out the same way. A pair that never occurred has no cell at all;
/// it is up to the renderer whether that shows as blank or zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PivotSummary {
    pub(crate) row_keys: Vec<String>,
    pub(crate) column_keys: Vec<String>,
    pub(crate) cells: HashMap<String, HashMap<String, u64>>,
}

/// One populated pivot cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PivotCell<'a> {
    pub product: &'a str,
    pub language: &'a str,
    pub loc: u64,
}

impl PivotSummary {
    pub fn row_keys(&self) -> &[String] {
        &self.row_keys
    }

    pub fn column_keys(&self) -> &[String] {
        &self.column_keys
    }

    pub fn cell(&self, product: &str, language: &str) -> Option<u64> {
        self.cells
            .get(product)
            .and_then(|row| row.get(language))
            .copied()
    }

    /// Number of populated cells.
    pub fn cell_count(&self) -> usize {
        self.cells.values().map(HashMap::len).sum()
    }

    /// Populated cells, row-major in key order.
    pub fn cells(&self) -> impl Iterator<Item = PivotCell<'_>> {
        self.row_keys.iter().flat_map(move |product| {
            self.column_keys.iter().filter_map(move |language| {
                self.cell(product, language).map(|loc| PivotCell {
                    product,
                    language,
                    loc,
                })
            })
        })
    }

    // Margins cannot overflow: `pivot` rejects tables whose grand total
    // does not fit in a u64.

    /// Right-hand margin. `None` for a product the pivot has never seen.
    pub fn row_total(&self, product: &str) -> Option<u64> {
        self.cells.get(product).map(|row| row.values().sum())
    }

    /// Bottom margin. `None` for a language the pivot has never seen.
    pub fn column_total(&self, language: &str) -> Option<u64> {
        if !self.column_keys.iter().any(|key| key == language) {
            return None;
        }
        Some(
            self.cells
                .values()
                .filter_map(|row| row.get(language))
                .sum(),
        )
    }

    pub fn grand_total(&self) -> u64 {
        self.cells.values().flat_map(HashMap::values).sum()
    }
}

#[derive(Serialize)]
struct Margin<'a> {
    key: &'a str,
    loc: u64,
}

#[derive(Serialize)]
struct PivotView<'a> {
    rows: &'a [String],
    columns: &'a [String],
    cells: Vec<PivotCell<'a>>,
    row_totals: Vec<Margin<'a>>,
    column_totals: Vec<Margin<'a>>,
    grand_total: u64,
}

// Serialized as an ordered cell list plus margins; a map keyed by
// (product, language) has no JSON representation.
impl Serialize for PivotSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let row_totals = self
            .row_keys
            .iter()
            .map(|key| Margin {
                key,
                loc: self.row_total(key).unwrap_or(0),
            })
            .collect();
        let column_totals = self
            .column_keys
            .iter()
            .map(|key| Margin {
                key,
                loc: self.column_total(key).unwrap_or(0),
            })
            .collect();

        PivotView {
            rows: &self.row_keys,
            columns: &self.column_keys,
            cells: self.cells().collect(),
            row_totals,
            column_totals,
            grand_total: self.grand_total(),
        }
        .serialize(serializer)
    }
}

/// A product's cloc run statistics, carried through for logging and output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductToolHeader {
    pub product: String,
    #[serde(flatten)]
    pub header: ToolHeader,
}

/// Everything one aggregation run produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateReport {
    pub language_details: LanguageDetailTable,
    pub file_tables: Vec<FileDetailTable>,
    pub pivot: PivotSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_headers: Vec<ProductToolHeader>,
}

impl AggregateReport {
    /// Products in the order they were supplied.
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.language_details.products()
    }

    pub fn file_table(&self, product: &str) -> Option<&FileDetailTable> {
        self.file_tables.iter().find(|table| table.product == product)
    }
}
