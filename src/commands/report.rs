use crate::aggregation::aggregate;
use crate::config::{load_config, LoadedConfig, ProductEntry};
use crate::core::{AggregateReport, ProductToolHeader};
use crate::io::{create_writer, load_sources, FileSystem, OutputFormat, RealFileSystem, ReportLocation};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, info_span};

/// Command-line overrides for `locreport report`.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub config: Option<PathBuf>,
    /// `NAME` or `NAME=PATH`; replaces the configured product list when non-empty
    pub products: Vec<String>,
    pub reports_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

pub fn handle_report(options: ReportOptions) -> Result<()> {
    let _span = info_span!("report").entered();

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let loaded = load_config(options.config.as_deref()).context("Failed to load configuration")?;
    if let Some(source) = &loaded.source {
        info!("Using configuration {}", source.display());
    }

    let report = build_report(&RealFileSystem::new(), &loaded, &options, &cwd)?;

    let format = options.format.unwrap_or(loaded.config.output.format);
    let destination = options
        .output
        .as_ref()
        .map(|path| cwd.join(path))
        .or_else(|| {
            loaded
                .config
                .output
                .path
                .as_ref()
                .map(|path| loaded.base_dir.join(path))
        });

    write_report(&report, format, destination.as_deref())
}

/// Resolve product locations, read the reports and aggregate them.
pub fn build_report<F: FileSystem + ?Sized>(
    fs: &F,
    loaded: &LoadedConfig,
    options: &ReportOptions,
    cwd: &Path,
) -> Result<AggregateReport> {
    let locations = resolve_locations(loaded, options, cwd)?;

    info!(products = locations.len(), "Loading cloc reports");
    let sources = load_sources(fs, &locations).context("Failed to read cloc reports")?;

    info!("Aggregating product metrics");
    let report = aggregate(&sources).context("Aggregation failed")?;
    info!(
        rows = report.language_details.len(),
        languages = report.pivot.column_keys().len(),
        total_loc = report.pivot.grand_total(),
        "Aggregation complete"
    );

    report.tool_headers.iter().for_each(log_execution_summary);
    Ok(report)
}

/// Command-line products and directories are relative to the working
/// directory, configured ones to the config file.
pub fn resolve_locations(
    loaded: &LoadedConfig,
    options: &ReportOptions,
    cwd: &Path,
) -> Result<Vec<ReportLocation>> {
    let mut config = loaded.config.clone();

    if let Some(dir) = &options.reports_dir {
        config.reports_dir = cwd.join(dir);
    }

    if !options.products.is_empty() {
        config.products = options
            .products
            .iter()
            .map(|spec| {
                ProductEntry::parse_spec(spec).map(|mut entry| {
                    entry.report = entry.report.map(|report| cwd.join(report));
                    entry
                })
            })
            .collect::<Result<_, _>>()?;
        config.validate()?;
    }

    Ok(config.report_locations(&loaded.base_dir))
}

fn log_execution_summary(entry: &ProductToolHeader) {
    let header = &entry.header;
    info!(
        product = %entry.product,
        cloc_version = ?header.tool_version,
        elapsed_seconds = ?header.elapsed_seconds,
        n_files = ?header.n_files,
        n_lines = ?header.n_lines,
        files_per_second = ?header.files_per_second,
        lines_per_second = ?header.lines_per_second,
        "cloc execution summary"
    );
}

fn write_report(
    report: &AggregateReport,
    format: OutputFormat,
    destination: Option<&Path>,
) -> Result<()> {
    let sink: Box<dyn Write> = match destination {
        Some(path) => {
            // colored decides from the stdout TTY; a file never wants escapes
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    create_writer(format, sink).write_report(report)?;

    if let Some(path) = destination {
        info!(format = %format, "Report written to {}", path.display());
    }
    Ok(())
}
