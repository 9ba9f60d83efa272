use crate::core::AggregateReport;
use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tables for a terminal
    #[default]
    Terminal,
    /// Pretty-printed JSON
    Json,
    /// GitHub-flavored markdown tables
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Terminal => "terminal",
            Self::Json => "json",
            Self::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AggregateReport) -> anyhow::Result<()>;
}

pub fn create_writer<'w>(
    format: OutputFormat,
    destination: Box<dyn Write + 'w>,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination)),
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(destination)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::core::{ProductSource, RawDocument};

    fn report() -> AggregateReport {
        let xml = r#"<results>
            <files><file name="main.go" code="12" language="Go"/></files>
            <languages><language name="Go" files_count="1" code="12"/></languages>
        </results>"#;
        aggregate(&[ProductSource::new("api", RawDocument::from_text(xml))]).unwrap()
    }

    #[test]
    fn every_format_writes_something() {
        for format in [OutputFormat::Terminal, OutputFormat::Json, OutputFormat::Markdown] {
            let mut buffer = Vec::new();
            create_writer(format, Box::new(&mut buffer))
                .write_report(&report())
                .unwrap();
            let text = String::from_utf8(buffer).unwrap();
            assert!(text.contains("api"), "{format} output lacks the product");
        }
    }

    #[test]
    fn format_names_match_config_values() {
        let parsed: OutputFormat = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(parsed, OutputFormat::Markdown);
        assert_eq!(OutputFormat::default().to_string(), "terminal");
    }
}
