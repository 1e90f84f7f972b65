//! Atomic file writer

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::GzembedResult;

/// Write content to a file atomically
///
/// The content goes to a temp file in the destination directory, which is
/// then renamed over `path`. Readers see either the old file or the new one.
pub fn atomic_write(path: &Path, content: &[u8]) -> GzembedResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
