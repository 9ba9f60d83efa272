use super::headings;
use crate::core::{AggregateReport, FileDetailTable, LanguageDetailTable, PivotSummary};
use crate::io::output::OutputWriter;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AggregateReport) -> anyhow::Result<()> {
        self.write_banner()?;

        self.write_section("Product Summary")?;
        writeln!(self.writer, "{}", summary_table(&report.pivot))?;

        self.write_section("Product Details")?;
        writeln!(self.writer, "{}", detail_table(&report.language_details))?;

        for table in &report.file_tables {
            self.write_section(&format!("Files: {}", table.product))?;
            writeln!(self.writer, "{}", file_table(table))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_banner(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer, "{}", "              LOC REPORT".bold().cyan())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        Ok(())
    }

    fn write_section(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", title.bold())?;
        Ok(())
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn count_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn summary_table(pivot: &PivotSummary) -> Table {
    let mut table = new_table();

    let mut heading = vec![Cell::new(headings::PRODUCT)];
    heading.extend(pivot.column_keys().iter().map(Cell::new));
    heading.push(Cell::new(headings::TOTAL));
    table.set_header(heading);

    for product in pivot.row_keys() {
        let mut row = vec![Cell::new(product)];
        row.extend(
            pivot
                .column_keys()
                .iter()
                .map(|language| count_cell(blank_if_absent(pivot.cell(product, language)))),
        );
        row.push(count_cell(blank_if_absent(pivot.row_total(product))));
        table.add_row(row);
    }

    let mut totals = vec![Cell::new(headings::TOTAL)];
    totals.extend(
        pivot
            .column_keys()
            .iter()
            .map(|language| count_cell(blank_if_absent(pivot.column_total(language)))),
    );
    totals.push(count_cell(pivot.grand_total()));
    table.add_row(totals);
    table
}

fn detail_table(details: &LanguageDetailTable) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        headings::PRODUCT,
        headings::LANGUAGE,
        headings::FILE_COUNT,
        headings::LOC,
    ]);

    for range in details.ranges() {
        for (offset, row) in details.product_rows(&range.product).iter().enumerate() {
            let product = if offset == 0 { row.product.as_str() } else { "" };
            table.add_row(vec![
                Cell::new(product),
                Cell::new(&row.language),
                count_cell(row.file_count),
                count_cell(row.loc_count),
            ]);
        }
    }
    table
}

fn file_table(files: &FileDetailTable) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        headings::FILE,
        headings::LOC,
        headings::EXTENSION_GROUP,
    ]);
    for row in &files.rows {
        table.add_row(vec![
            Cell::new(&row.file_name),
            count_cell(row.loc_count),
            Cell::new(&row.language_tag),
        ]);
    }
    table
}

fn blank_if_absent(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
