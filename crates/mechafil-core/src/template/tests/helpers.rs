//! Shared test helpers for include resolver tests

use crate::template::IncludeWriter;
use mechafil_testkit::temp_dir_in_workspace;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Create a prompt directory populated with `files` (relative path, content)
pub(super) fn prompt_dir(files: &[(&str, &str)]) -> TempDir {
    let temp = temp_dir_in_workspace();
    for (rel, content) in files {
        write_file(temp.path(), rel, content);
    }
    temp
}

pub(super) fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Writer that records calls instead of touching the disk
#[derive(Default)]
pub(super) struct RecordingWriter {
    pub(super) writes: Mutex<Vec<(PathBuf, String)>>,
}

impl IncludeWriter for RecordingWriter {
    fn write_include(&self, path: &Path, content: &str) -> io::Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}

/// Writer that always fails
pub(super) struct FailingWriter;

impl IncludeWriter for FailingWriter {
    fn write_include(&self, _path: &Path, _content: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}
