//! cloc XML report parsing
//!
//! cloc run with `--by-file-by-lang --xml` writes one document per product:
//!
//! ```xml
//! <results>
//!   <header>
//!     <cloc_version>1.80</cloc_version>
//!     <n_files>5</n_files>
//!   </header>
//!   <files>
//!     <file name="src/main.go" blank="3" comment="1" code="120" language="Go"/>
//!     <total blank="3" comment="1" code="120"/>
//!   </files>
//!   <languages>
//!     <language name="Go" files_count="5" blank="3" comment="1" code="120"/>
//!     <total sum_files="5" blank="3" comment="1" code="120"/>
//!   </languages>
//! </results>
//! ```
//!
//! The counts are taken verbatim. `<total>` rows are cloc's own sums and are
//! skipped; the header is informational and parsed leniently.

use crate::core::{
    AggregationError, FileRow, LanguageRow, ProductMetricsDocument, RawDocument, Result,
    ToolHeader,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

const HEADER: &[u8] = b"header";
const LANGUAGES: &[u8] = b"languages";
const LANGUAGE: &[u8] = b"language";
const FILES: &[u8] = b"files";
const FILE: &[u8] = b"file";

const NAME_ATTR: &str = "name";
const FILES_COUNT_ATTR: &str = "files_count";
const CODE_ATTR: &str = "code";
const LANGUAGE_ATTR: &str = "language";

/// Parse one product's cloc report.
///
/// # Errors
///
/// Returns [`AggregationError::MalformedMetricsDocument`] when the document is
/// not well-formed XML, lacks a `<languages>` or `<files>` section, either
/// section lists nothing, the document ends before every element is closed,
/// or a row is missing a required attribute or carries a count that is not a
/// non-negative integer. The reason names the report's path when the
/// document knows where it was read from.
pub fn parse_metrics_document(
    document: &RawDocument,
    product_id: &str,
) -> Result<ProductMetricsDocument> {
    ClocReportParser::new(product_id)
        .parse(document.content())
        .map_err(|err| match (err, document.origin()) {
            (AggregationError::MalformedMetricsDocument { product, reason }, Some(origin)) => {
                let reason = format!("{} ({})", reason, origin.display());
                AggregationError::malformed(product, reason)
            }
            (err, _) => err,
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Outside,
    Header,
    Languages,
    Files,
}

struct ClocReportParser<'p> {
    product: &'p str,
    section: Section,
    header_field: Option<String>,
    header: Option<ToolHeader>,
    open_elements: Vec<String>,
    saw_languages: bool,
    saw_files: bool,
    language_rows: Vec<LanguageRow>,
    file_rows: Vec<FileRow>,
}

impl<'p> ClocReportParser<'p> {
    fn new(product: &'p str) -> Self {
        Self {
            product,
            section: Section::Outside,
            header_field: None,
            header: None,
            open_elements: Vec::new(),
            saw_languages: false,
            saw_files: false,
            language_rows: Vec::new(),
            file_rows: Vec::new(),
        }
    }

    fn parse(mut self, content: &[u8]) -> Result<ProductMetricsDocument> {
        let mut reader = Reader::from_reader(content);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|e| {
                self.malformed(format!(
                    "invalid XML near byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(ref element) => {
                    self.open(element, false)?;
                    self.open_elements
                        .push(String::from_utf8_lossy(element.name().as_ref()).into_owned());
                }
                Event::Empty(ref element) => self.open(element, true)?,
                Event::End(ref element) => {
                    self.close(element.name().as_ref());
                    self.open_elements.pop();
                }
                Event::Text(ref text) if self.header_field.is_some() => {
                    let value = text
                        .unescape()
                        .map_err(|e| self.malformed(format!("bad header text: {}", e)))?;
                    self.record_header(&value);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        self.finish()
    }

    fn open(&mut self, element: &BytesStart<'_>, is_empty: bool) -> Result<()> {
        let name = element.name();
        match (self.section, name.as_ref()) {
            (Section::Outside, HEADER) => {
                self.header.get_or_insert_with(ToolHeader::default);
                if !is_empty {
                    self.section = Section::Header;
                }
            }
            (Section::Outside, LANGUAGES) => {
                self.saw_languages = true;
                if !is_empty {
                    self.section = Section::Languages;
                }
            }
            (Section::Outside, FILES) => {
                self.saw_files = true;
                if !is_empty {
                    self.section = Section::Files;
                }
            }
            (Section::Header, field) if !is_empty => {
                self.header_field = Some(String::from_utf8_lossy(field).into_owned());
            }
            (Section::Languages, LANGUAGE) => {
                let row = self.language_row(element)?;
                self.language_rows.push(row);
            }
            (Section::Files, FILE) => {
                let row = self.file_row(element)?;
                self.file_rows.push(row);
            }
            // <results>, <total> and anything cloc may add later
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match (self.section, name) {
            (Section::Header, HEADER) | (Section::Languages, LANGUAGES) | (Section::Files, FILES) => {
                self.section = Section::Outside;
            }
            (Section::Header, _) => self.header_field = None,
            _ => {}
        }
    }

    fn record_header(&mut self, value: &str) {
        if let Some(field) = self.header_field.as_deref() {
            let header = self.header.get_or_insert_with(ToolHeader::default);
            record_header_field(header, field, value);
        }
    }

    fn language_row(&self, element: &BytesStart<'_>) -> Result<LanguageRow> {
        let position = self.language_rows.len() + 1;
        let attrs = self.attributes(element, "language", position)?;
        Ok(LanguageRow {
            language: self.required(&attrs, NAME_ATTR, "language", position)?,
            file_count: self.count(&attrs, FILES_COUNT_ATTR, "language", position)?,
            loc_count: self.count(&attrs, CODE_ATTR, "language", position)?,
        })
    }

    fn file_row(&self, element: &BytesStart<'_>) -> Result<FileRow> {
        let position = self.file_rows.len() + 1;
        let attrs = self.attributes(element, "file", position)?;
        Ok(FileRow {
            file_name: self.required(&attrs, NAME_ATTR, "file", position)?,
            loc_count: self.count(&attrs, CODE_ATTR, "file", position)?,
            language_tag: self.required(&attrs, LANGUAGE_ATTR, "file", position)?,
        })
    }

    fn attributes(
        &self,
        element: &BytesStart<'_>,
        kind: &str,
        position: usize,
    ) -> Result<HashMap<String, String>> {
        element
            .attributes()
            .map(|attr| {
                let attr = attr.map_err(|e| {
                    self.malformed(format!("{} #{} has a bad attribute: {}", kind, position, e))
                })?;
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                let value = attr.unescape_value().map_err(|e| {
                    self.malformed(format!(
                        "{} #{} attribute '{}' cannot be decoded: {}",
                        kind, position, key, e
                    ))
                })?;
                Ok((key, value.into_owned()))
            })
            .collect()
    }

    fn required(
        &self,
        attrs: &HashMap<String, String>,
        key: &str,
        kind: &str,
        position: usize,
    ) -> Result<String> {
        match attrs.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value.clone()),
            _ => Err(self.malformed(format!(
                "{} #{} is missing attribute '{}'",
                kind, position, key
            ))),
        }
    }

    fn count(
        &self,
        attrs: &HashMap<String, String>,
        key: &str,
        kind: &str,
        position: usize,
    ) -> Result<u64> {
        let raw = self.required(attrs, key, kind, position)?;
        raw.trim().parse::<u64>().map_err(|_| {
            self.malformed(format!(
                "{} #{} attribute '{}' is not a count: '{}'",
                kind, position, key, raw
            ))
        })
    }

    fn finish(self) -> Result<ProductMetricsDocument> {
        if let Some(unclosed) = self.open_elements.last() {
            return Err(self.malformed(format!("document ends inside <{}>", unclosed)));
        }
        if !self.saw_languages {
            return Err(self.malformed("missing <languages> section"));
        }
        if !self.saw_files {
            return Err(self.malformed("missing <files> section"));
        }
        if self.language_rows.is_empty() {
            return Err(self.malformed("<languages> section lists no languages"));
        }
        if self.file_rows.is_empty() {
            return Err(self.malformed("<files> section lists no files"));
        }

        Ok(ProductMetricsDocument {
            product_id: self.product.to_string(),
            language_rows: self.language_rows,
            file_rows: self.file_rows,
            header: self.header,
        })
    }

    fn malformed(&self, reason: impl Into<String>) -> AggregationError {
        AggregationError::malformed(self.product, reason)
    }
}

fn record_header_field(header: &mut ToolHeader, field: &str, value: &str) {
    let value = value.trim();
    match field {
        "cloc_version" => header.tool_version = Some(value.to_string()),
        "elapsed_seconds" => header.elapsed_seconds = value.parse().ok(),
        "n_files" => header.n_files = value.parse().ok(),
        "n_lines" => header.n_lines = value.parse().ok(),
        "files_per_second" => header.files_per_second = value.parse().ok(),
        "lines_per_second" => header.lines_per_second = value.parse().ok(),
        _ => {}
    }
}
