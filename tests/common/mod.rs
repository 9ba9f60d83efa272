// Shared fixtures for locreport integration tests
#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds a cloc `--by-file-by-lang --xml` report.
#[derive(Debug, Default, Clone)]
pub struct ClocReport {
    files: Vec<(String, u64, String)>,
    languages: Vec<(String, u64, u64)>,
    version: Option<String>,
}

impl ClocReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, code: u64, language: &str) -> Self {
        self.files.push((name.to_string(), code, language.to_string()));
        self
    }

    pub fn language(mut self, name: &str, files: u64, code: u64) -> Self {
        self.languages.push((name.to_string(), files, code));
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?><results>\n");
        if let Some(version) = &self.version {
            let n_files = self.files.len();
            let n_lines: u64 = self.files.iter().map(|(_, code, _)| code).sum();
            writeln!(
                xml,
                "<header><cloc_version>{version}</cloc_version><elapsed_seconds>0.5</elapsed_seconds>\
                 <n_files>{n_files}</n_files><n_lines>{n_lines}</n_lines></header>"
            )
            .unwrap();
        }
        xml.push_str("<files>\n");
        for (name, code, language) in &self.files {
            writeln!(
                xml,
                r#"  <file name="{name}" blank="0" comment="0" code="{code}" language="{language}"/>"#
            )
            .unwrap();
        }
        let total: u64 = self.files.iter().map(|(_, code, _)| code).sum();
        writeln!(xml, r#"  <total blank="0" comment="0" code="{total}"/>"#).unwrap();
        xml.push_str("</files>\n<languages>\n");
        for (name, files, code) in &self.languages {
            writeln!(
                xml,
                r#"  <language name="{name}" files_count="{files}" blank="0" comment="0" code="{code}"/>"#
            )
            .unwrap();
        }
        xml.push_str("</languages>\n</results>\n");
        xml
    }

    /// Write as `<dir>/<product>LOCReport.xml` and return the path.
    pub fn write_for(&self, dir: &Path, product: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(format!("{product}LOCReport.xml"));
        fs::write(&path, self.to_xml()).unwrap();
        path
    }
}

/// Product A of the reference scenario: Go 3 files/120 LOC, JS 2 files/40 LOC.
pub fn product_a() -> ClocReport {
    ClocReport::new()
        .version("1.80")
        .file("cmd/main.go", 100, "Go")
        .file("pkg/util.go", 20, "Go")
        .file("web/app.js", 40, "JS")
        .language("Go", 3, 120)
        .language("JS", 2, 40)
}

/// Product B of the reference scenario: Go 5 files/300 LOC.
pub fn product_b() -> ClocReport {
    ClocReport::new()
        .file("server.go", 300, "Go")
        .language("Go", 5, 300)
}
