use super::headings;
use crate::core::{AggregateReport, FileDetailTable, LanguageDetailTable, PivotSummary};
use crate::io::output::OutputWriter;
use chrono::{DateTime, Utc};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
    generated_at: DateTime<Utc>,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            generated_at: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AggregateReport) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(&report.pivot)?;
        self.write_details(&report.language_details)?;
        for table in &report.file_tables {
            self.write_files(table)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "# LOC Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, pivot: &PivotSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "## Product Summary")?;
        writeln!(self.writer)?;

        let mut heading = vec![headings::PRODUCT];
        heading.extend(pivot.column_keys().iter().map(String::as_str));
        heading.push(headings::TOTAL);
        self.write_row(&heading)?;
        self.write_rule(heading.len())?;

        for product in pivot.row_keys() {
            let mut cells = vec![product.clone()];
            cells.extend(
                pivot
                    .column_keys()
                    .iter()
                    .map(|language| optional(pivot.cell(product, language))),
            );
            cells.push(optional(pivot.row_total(product)));
            self.write_row(&cells)?;
        }

        let mut totals = vec![format!("**{}**", headings::TOTAL)];
        totals.extend(
            pivot
                .column_keys()
                .iter()
                .map(|language| optional(pivot.column_total(language))),
        );
        totals.push(format!("**{}**", pivot.grand_total()));
        self.write_row(&totals)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_details(&mut self, table: &LanguageDetailTable) -> anyhow::Result<()> {
        writeln!(self.writer, "## Product Details")?;
        writeln!(self.writer)?;
        let heading = [
            headings::PRODUCT,
            headings::LANGUAGE,
            headings::FILE_COUNT,
            headings::LOC,
        ];
        self.write_row(&heading)?;
        self.write_rule(heading.len())?;

        for range in table.ranges() {
            for (offset, row) in table.product_rows(&range.product).iter().enumerate() {
                let product = if offset == 0 { row.product.as_str() } else { "" };
                self.write_row(&[
                    product.to_string(),
                    row.language.clone(),
                    row.file_count.to_string(),
                    row.loc_count.to_string(),
                ])?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_files(&mut self, table: &FileDetailTable) -> anyhow::Result<()> {
        writeln!(self.writer, "### {}", table.product)?;
        writeln!(self.writer)?;
        let heading = [headings::FILE, headings::LOC, headings::EXTENSION_GROUP];
        self.write_row(&heading)?;
        self.write_rule(heading.len())?;
        for row in &table.rows {
            self.write_row(&[
                format!("`{}`", row.file_name),
                row.loc_count.to_string(),
                row.language_tag.clone(),
            ])?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_row<S: AsRef<str>>(&mut self, cells: &[S]) -> anyhow::Result<()> {
        let cells: Vec<String> = cells.iter().map(|cell| escape(cell.as_ref())).collect();
        writeln!(self.writer, "| {} |", cells.join(" | "))?;
        Ok(())
    }

    fn write_rule(&mut self, columns: usize) -> anyhow::Result<()> {
        writeln!(self.writer, "|{}", "---|".repeat(columns))?;
        Ok(())
    }
}

fn optional(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::core::{ProductSource, RawDocument};
    use chrono::TimeZone;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn report() -> AggregateReport {
        let a = indoc! {r#"
            <results>
              <files>
                <file name="cmd/main.go" code="120" language="Go"/>
                <file name="web/app.js" code="40" language="JavaScript"/>
              </files>
              <languages>
                <language name="Go" files_count="3" code="120"/>
                <language name="JavaScript" files_count="2" code="40"/>
              </languages>
            </results>
        "#};
        let b = indoc! {r#"
            <results>
              <files><file name="main.go" code="300" language="Go"/></files>
              <languages><language name="Go" files_count="5" code="300"/></languages>
            </results>
        "#};
        aggregate(&[
            ProductSource::new("A", RawDocument::from_text(a)),
            ProductSource::new("B", RawDocument::from_text(b)),
        ])
        .unwrap()
    }

    fn render() -> String {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .with_timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
            .write_report(&report())
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn summary_leaves_absent_pairs_blank() {
        let output = render();
        assert!(output.contains("Generated: 2024-03-01 12:00:00 UTC"));
        assert!(output.contains("| Product | Go | JavaScript | Total |"));
        assert!(output.contains("| A | 120 | 40 | 160 |"));
        assert!(output.contains("| B | 300 |  | 300 |"));
        assert!(output.contains("| **Total** | 420 | 40 | **460** |"));
    }

    #[test]
    fn details_name_each_product_once() {
        let output = render();
        let details: Vec<_> = output
            .lines()
            .skip_while(|line| *line != "## Product Details")
            .skip(4)
            .take(3)
            .collect();
        assert_eq!(
            details,
            vec![
                "| A | Go | 3 | 120 |",
                "|  | JavaScript | 2 | 40 |",
                "| B | Go | 5 | 300 |",
            ]
        );
    }

    #[test]
    fn file_tables_follow_product_order() {
        let output = render();
        let a = output.find("### A").unwrap();
        let b = output.find("### B").unwrap();
        assert!(a < b);
        assert!(output.contains("| `web/app.js` | 40 | JavaScript |"));
    }
}
