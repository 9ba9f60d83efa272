//! `.locreport.toml` handling.

pub mod core;
pub mod loader;

pub use self::core::{LocReportConfig, OutputConfig, ProductEntry, REPORT_FILE_SUFFIX};
pub use loader::{
    directory_ancestors, load_config, load_config_with, parse_config, LoadedConfig,
    CONFIG_FILE_NAME,
};
