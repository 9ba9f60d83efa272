use crate::config::CONFIG_FILE_NAME;
use crate::io::{FileSystem, RealFileSystem};
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# locreport configuration

# Directory holding the cloc reports, one <product>LOCReport.xml per product.
# Relative paths are resolved against the directory of this file.
reports_dir = "reports"

# Products in the order they should appear in every table.
# `report` is optional and defaults to <reports_dir>/<name>LOCReport.xml.
#
# [[products]]
# name = "api"
#
# [[products]]
# name = "web"
# report = "web/cloc.xml"

[output]
format = "terminal"   # terminal | json | markdown
# path = "LOCReport.md"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_at(&RealFileSystem::new(), Path::new(CONFIG_FILE_NAME), force)
}

pub fn init_config_at<F: FileSystem + ?Sized>(fs: &F, path: &Path, force: bool) -> Result<()> {
    if fs.is_file(path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs.write(path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", path.display());

    Ok(())
}
