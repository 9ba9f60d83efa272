//! Production implementation of [`FileSystem`].

use crate::errors::IoError;
use crate::io::traits::FileSystem;
use std::fs;
use std::path::Path;

/// Delegates straight to `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, IoError> {
        fs::read(path).map_err(|e| IoError::read(path, e))
    }

    fn read_to_string(&self, path: &Path) -> Result<String, IoError> {
        fs::read_to_string(path).map_err(|e| IoError::read(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), IoError> {
        fs::write(path, content).map_err(|e| IoError::write(path, e))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.xml");
        let fs = RealFileSystem::new();

        fs.write(&path, "<results/>").unwrap();

        assert!(fs.is_file(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "<results/>");
        assert_eq!(fs.read_bytes(&path).unwrap(), b"<results/>");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = RealFileSystem::new()
            .read_bytes(&dir.path().join("absent.xml"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/out.json");
        assert!(matches!(
            RealFileSystem::new().write(&path, "{}"),
            Err(IoError::Write { .. })
        ));
    }
}
