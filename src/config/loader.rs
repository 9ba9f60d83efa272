use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::LocReportConfig;
use crate::errors::{ConfigError, IoError};
use crate::io::{FileSystem, RealFileSystem};

pub const CONFIG_FILE_NAME: &str = ".locreport.toml";

/// Directories searched above the start directory
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// A configuration together with the directory its relative paths hang off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: LocReportConfig,
    pub base_dir: PathBuf,
    /// The file it came from, `None` for built-in defaults
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    fn defaults(base_dir: PathBuf) -> Self {
        Self {
            config: LocReportConfig::default(),
            base_dir,
            source: None,
        }
    }

    fn from_file(config: LocReportConfig, path: &Path) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            config,
            base_dir,
            source: Some(path.to_path_buf()),
        }
    }
}

/// Parse and validate config from TOML string
pub fn parse_config(contents: &str, path: &Path) -> Result<LocReportConfig, ConfigError> {
    let config = toml::from_str::<LocReportConfig>(contents).map_err(|source| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    config.validate()?;
    Ok(config)
}

/// Generate directory ancestors, `start` included, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth + 1)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Otherwise `.locreport.toml` is
/// searched from the current directory upwards; a discovered file that fails
/// to parse is reported and defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let current = std::env::current_dir().map_err(|e| IoError::read(".", e))?;
    load_config_with(&RealFileSystem::new(), explicit, current)
}

pub fn load_config_with<F: FileSystem + ?Sized>(
    fs: &F,
    explicit: Option<&Path>,
    start_dir: PathBuf,
) -> Result<LoadedConfig, ConfigError> {
    if let Some(path) = explicit {
        let path = start_dir.join(path);
        let contents = fs.read_to_string(&path)?;
        let config = parse_config(&contents, &path)?;
        debug!("Loaded config from {}", path.display());
        return Ok(LoadedConfig::from_file(config, &path));
    }

    let discovered = directory_ancestors(start_dir.clone(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| fs.is_file(path));

    let Some(path) = discovered else {
        debug!(
            "No {} found within {} parent directories. Using default config.",
            CONFIG_FILE_NAME, MAX_TRAVERSAL_DEPTH
        );
        return Ok(LoadedConfig::defaults(start_dir));
    };

    let contents = match fs.read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Failed to read config file {}: {}. Using defaults.", path.display(), e);
            return Ok(LoadedConfig::defaults(start_dir));
        }
    };

    match parse_config(&contents, &path) {
        Ok(config) => {
            debug!("Loaded config from {}", path.display());
            Ok(LoadedConfig::from_file(config, &path))
        }
        Err(e @ ConfigError::Parse { .. }) => {
            warn!("{}. Using defaults.", e);
            Ok(LoadedConfig::defaults(start_dir))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProductEntry;
    use crate::io::traits::memory::MemoryFileSystem;

    const CONFIG: &str = "[[products]]\nname = \"api\"\n";

    #[test]
    fn ancestors_include_start_and_stop_at_root() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b"), 10).collect();
        assert_eq!(
            dirs,
            vec![PathBuf::from("/a/b"), PathBuf::from("/a"), PathBuf::from("/")]
        );
        assert_eq!(directory_ancestors(PathBuf::from("/a/b/c"), 1).count(), 2);
    }

    #[test]
    fn finds_config_in_parent_directory() {
        let fs = MemoryFileSystem::default().with_file("/repo/.locreport.toml", CONFIG);

        let loaded = load_config_with(&fs, None, PathBuf::from("/repo/tools/sub")).unwrap();

        assert_eq!(loaded.base_dir, PathBuf::from("/repo"));
        assert_eq!(loaded.source, Some(PathBuf::from("/repo/.locreport.toml")));
        assert_eq!(loaded.config.products, vec![ProductEntry::new("api")]);
    }

    #[test]
    fn no_config_means_defaults_at_start_dir() {
        let fs = MemoryFileSystem::default();
        let loaded = load_config_with(&fs, None, PathBuf::from("/repo")).unwrap();
        assert_eq!(loaded.config, LocReportConfig::default());
        assert_eq!(loaded.base_dir, PathBuf::from("/repo"));
        assert!(loaded.source.is_none());
    }

    #[test]
    fn broken_discovered_config_falls_back_to_defaults() {
        let fs = MemoryFileSystem::default().with_file("/repo/.locreport.toml", "[[products]");
        let loaded = load_config_with(&fs, None, PathBuf::from("/repo")).unwrap();
        assert!(loaded.source.is_none());
    }

    #[test]
    fn broken_explicit_config_is_fatal() {
        let fs = MemoryFileSystem::default().with_file("/repo/custom.toml", "[[products]");
        let err = load_config_with(&fs, Some(Path::new("custom.toml")), PathBuf::from("/repo"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_explicit_config_is_fatal() {
        let fs = MemoryFileSystem::default();
        let err = load_config_with(&fs, Some(Path::new("/nope.toml")), PathBuf::from("/repo"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn invalid_discovered_config_is_fatal() {
        let fs = MemoryFileSystem::default().with_file(
            "/repo/.locreport.toml",
            "[[products]]\nname = \"api\"\n[[products]]\nname = \"api\"\n",
        );
        let err = load_config_with(&fs, None, PathBuf::from("/repo")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
