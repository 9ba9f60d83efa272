//! Error types for the imperative shell.
//!
//! The aggregation core reports through [`crate::core::AggregationError`].
//! Everything that touches the file system or the configuration file uses
//! the types below; the command layer wraps all of them in `anyhow`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File system failures, always carrying the path involved.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IoError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }

    /// True when the underlying error says the file does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
        }
    }
}

/// Problems with `.locreport.toml` or with product specs given on the command line.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Read(#[from] IoError),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid product spec '{0}': expected NAME or NAME=PATH")]
    ProductSpec(String),
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = IoError::read(
            "reports/apiLOCReport.xml",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.path(), Path::new("reports/apiLOCReport.xml"));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("reports/apiLOCReport.xml"));
    }

    #[test]
    fn permission_denied_is_not_missing() {
        let err = IoError::read(
            "a.xml",
            io::Error::new(io::ErrorKind::PermissionDenied, "no"),
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn config_read_error_is_transparent() {
        let io = IoError::read("x.toml", io::Error::other("boom"));
        let expected = io.to_string();
        let err: ConfigError = io.into();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn product_spec_message_shows_the_input() {
        let err = ConfigError::ProductSpec("=oops".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid product spec '=oops': expected NAME or NAME=PATH"
        );
    }
}
