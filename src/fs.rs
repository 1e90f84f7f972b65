//! File system seam
//!
//! The pipeline reads sources and writes generated files through
//! [`FileSystem`], so tests can run against [`MockFileSystem`] without
//! touching a real destination.

use std::path::{Path, PathBuf};

use crate::error::GzembedResult;

/// Abstract file system interface
pub trait FileSystem {
    /// Read file content
    fn read_to_string(&self, path: &Path) -> GzembedResult<String>;

    /// Write file content atomically, replacing any existing file
    fn write_atomic(&self, path: &Path, content: &str) -> GzembedResult<()>;

    /// Check if file exists
    fn exists(&self, path: &Path) -> bool;
}

/// Local disk implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read_to_string(&self, path: &Path) -> GzembedResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> GzembedResult<()> {
        crate::writer::atomic_write(path, content.as_bytes())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory file system for tests
///
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    pub files: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<PathBuf, String>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), content.into());
        self
    }

    /// Current content of a file, if any
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> GzembedResult<String> {
        self.get(path).ok_or_else(|| {
            crate::error::GzembedError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: file not found", path.display()),
            ))
        })
    }

    fn write_atomic(&self, path: &Path, content: &str) -> GzembedResult<()> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(path)
    }
}
