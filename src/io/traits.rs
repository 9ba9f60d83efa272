//! I/O trait definitions.
//!
//! Report loading and config initialization go through [`FileSystem`] so
//! they can be tested against an in-memory implementation.

use crate::errors::IoError;
use std::path::Path;

/// File system operations used by the shell.
///
/// Implementations must be `Send + Sync`.
pub trait FileSystem: Send + Sync {
    /// Read a file's contents as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Read`] if the file doesn't exist or can't be read.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, IoError>;

    /// Read a file's contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Read`] if the file can't be read or isn't UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, IoError>;

    /// Write content to a file, creating it if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Write`] if the parent directory is missing or the
    /// write is refused.
    fn write(&self, path: &Path, content: &str) -> Result<(), IoError>;

    /// Check if a path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory file system for unit tests.

    use super::FileSystem;
    use crate::errors::IoError;
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::RwLock;

    #[derive(Debug, Default)]
    pub(crate) struct MemoryFileSystem {
        files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MemoryFileSystem {
        pub(crate) fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
            self.files
                .write()
                .unwrap()
                .insert(path.into(), content.into());
            self
        }

        pub(crate) fn contents(&self, path: &Path) -> Option<String> {
            self.files
                .read()
                .unwrap()
                .get(path)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, IoError> {
            self.files.read().unwrap().get(path).cloned().ok_or_else(|| {
                IoError::read(path, io::Error::new(io::ErrorKind::NotFound, "not found"))
            })
        }

        fn read_to_string(&self, path: &Path) -> Result<String, IoError> {
            let bytes = self.read_bytes(path)?;
            String::from_utf8(bytes)
                .map_err(|e| IoError::read(path, io::Error::new(io::ErrorKind::InvalidData, e)))
        }

        fn write(&self, path: &Path, content: &str) -> Result<(), IoError> {
            self.files
                .write()
                .unwrap()
                .insert(path.to_path_buf(), content.as_bytes().to_vec());
            Ok(())
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.read().unwrap().contains_key(path)
        }
    }
}
