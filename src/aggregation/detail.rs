use crate::core::{
    AggregationError, FileDetailTable, LanguageDetailTable, ProductMetricsDocument, Result,
};

/// Output of the detail table builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailTables {
    pub language_details: LanguageDetailTable,
    /// One table per product, in input order
    pub file_tables: Vec<FileDetailTable>,
}

/// Build the language detail table and the per-product file tables.
///
/// Input order is kept verbatim: it decides both the display order and the
/// row range each product occupies. Ranges come from the number of rows
/// actually written.
///
/// # Errors
///
/// - [`AggregationError::EmptyProductSet`] when `documents` is empty
/// - [`AggregationError::MalformedMetricsDocument`] when a document carries no
///   language rows (the parser never produces one)
pub fn build_detail_tables(documents: &[ProductMetricsDocument]) -> Result<DetailTables> {
    if documents.is_empty() {
        return Err(AggregationError::EmptyProductSet);
    }

    let row_count = documents.iter().map(|doc| doc.language_rows.len()).sum();
    let mut language_details = LanguageDetailTable::with_capacity(row_count, documents.len());
    let mut file_tables = Vec::with_capacity(documents.len());

    for document in documents {
        language_details
            .push_product(&document.product_id, &document.language_rows)
            .ok_or_else(|| AggregationError::malformed(&document.product_id, "no language rows"))?;
        file_tables.push(FileDetailTable::from_document(document));
    }

    Ok(DetailTables {
        language_details,
        file_tables,
    })
}
