//! Write-back capability used by the `.txt` → `.md` include fallback

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Persists content served from a `.md` fallback under the requested `.txt` path
///
/// Failures are reported to the caller, which logs and ignores them.
pub trait IncludeWriter: Send + Sync {
    fn write_include(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Writes through to the filesystem
///
/// The file is replaced atomically, so a concurrent render sees either no
/// file or the complete content.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsIncludeWriter;

impl IncludeWriter for FsIncludeWriter {
    fn write_include(&self, path: &Path, content: &str) -> io::Result<()> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Discards every write
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIncludeWriter;

impl IncludeWriter for NoopIncludeWriter {
    fn write_include(&self, _path: &Path, _content: &str) -> io::Result<()> {
        Ok(())
    }
}

impl<W: IncludeWriter + ?Sized> IncludeWriter for &W {
    fn write_include(&self, path: &Path, content: &str) -> io::Result<()> {
        (**self).write_include(path, content)
    }
}

impl<W: IncludeWriter + ?Sized> IncludeWriter for Box<W> {
    fn write_include(&self, path: &Path, content: &str) -> io::Result<()> {
        (**self).write_include(path, content)
    }
}
