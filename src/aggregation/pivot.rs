use crate::core::{AggregationError, LanguageDetailTable, PivotSummary, Result};
use std::collections::HashSet;

/// Cross-tabulate LOC by product and language.
///
/// One pass over the rows. Keys are collected in first-seen order and a
/// `(product, language)` pair that appears on several rows is summed.
///
/// # Errors
///
/// Returns [`AggregationError::EmptyDetailTable`] for a table without rows,
/// and [`AggregationError::MalformedMetricsDocument`] naming the product and
/// language when the LOC total no longer fits in a `u64`.
pub fn pivot(table: &LanguageDetailTable) -> Result<PivotSummary> {
    if table.is_empty() {
        return Err(AggregationError::EmptyDetailTable);
    }

    let mut summary = PivotSummary::default();
    let mut seen_languages: HashSet<&str> = HashSet::new();
    // Every margin is bounded by the grand total, so checking it covers them all.
    let mut grand_total: u64 = 0;

    for row in table.rows() {
        if !summary.cells.contains_key(&row.product) {
            summary.row_keys.push(row.product.clone());
        }
        if seen_languages.insert(&row.language) {
            summary.column_keys.push(row.language.clone());
        }

        let overflow = || {
            AggregationError::malformed(
                &row.product,
                format!("LOC total overflows at language '{}'", row.language),
            )
        };
        grand_total = grand_total.checked_add(row.loc_count).ok_or_else(overflow)?;

        let cell = summary
            .cells
            .entry(row.product.clone())
            .or_default()
            .entry(row.language.clone())
            .or_insert(0);
        *cell = cell.checked_add(row.loc_count).ok_or_else(overflow)?;
    }

    Ok(summary)
}
