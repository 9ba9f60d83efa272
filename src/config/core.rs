use crate::errors::ConfigError;
use crate::io::{OutputFormat, ReportLocation};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name suffix cloc reports are written with, after the product name.
pub const REPORT_FILE_SUFFIX: &str = "LOCReport.xml";

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|name| name.trim().to_string())
}

/// Contents of `.locreport.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocReportConfig {
    /// Directory holding `<name>LOCReport.xml` files
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Products in display order
    #[serde(default)]
    pub products: Vec<ProductEntry>,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for LocReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            products: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductEntry {
    /// Surrounding whitespace is dropped; the name is part of the report file name
    #[serde(deserialize_with = "trimmed")]
    pub name: String,

    /// Explicit report path; `<reports_dir>/<name>LOCReport.xml` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ProductEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            report: None,
        }
    }

    pub fn with_report(mut self, report: impl Into<PathBuf>) -> Self {
        self.report = Some(report.into());
        self
    }

    /// Parse a command-line product spec: `NAME` or `NAME=PATH`.
    pub fn parse_spec(spec: &str) -> Result<Self, ConfigError> {
        let (name, report) = match spec.split_once('=') {
            Some((name, path)) => {
                let path = path.trim();
                if path.is_empty() {
                    return Err(ConfigError::ProductSpec(spec.to_string()));
                }
                (name.trim(), Some(PathBuf::from(path)))
            }
            None => (spec.trim(), None),
        };

        if name.is_empty() {
            return Err(ConfigError::ProductSpec(spec.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            report,
        })
    }

    /// Where this product's report lives, relative paths resolved against `base_dir`.
    pub fn report_path(&self, reports_dir: &Path, base_dir: &Path) -> PathBuf {
        let relative = match &self.report {
            Some(report) => report.clone(),
            None => reports_dir.join(format!("{}{}", self.name, REPORT_FILE_SUFFIX)),
        };
        base_dir.join(relative)
    }
}

impl LocReportConfig {
    /// Product names must be non-empty and unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for product in &self.products {
            let name = product.name.trim();
            if name.is_empty() {
                return Err(ConfigError::invalid("product name must not be empty"));
            }
            if !seen.insert(name) {
                return Err(ConfigError::invalid(format!(
                    "product '{}' is listed more than once",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn report_locations(&self, base_dir: &Path) -> Vec<ReportLocation> {
        self.products
            .iter()
            .map(|product| {
                ReportLocation::new(
                    product.name.clone(),
                    product.report_path(&self.reports_dir, base_dir),
                )
            })
            .collect()
    }
}
