//! Fixture management for testing
//!
//! Helpers for laying out prompt template trees on disk.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::temp_dir_in_workspace;

/// Write each `(relative path, content)` pair under `root`, creating parents
///
/// # Panics
///
/// Panics if a directory or file cannot be created
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
        }
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    }
}

/// A prompt directory with a root template at `prompts/system_prompt.md`
pub struct PromptFixture {
    temp: TempDir,
}

impl PromptFixture {
    /// Root template `template`, plus extra files relative to `prompts/`
    pub fn new(template: &str, parts: &[(&str, &str)]) -> Self {
        let temp = temp_dir_in_workspace();
        let prompts = temp.path().join("prompts");
        write_files(&prompts, &[("system_prompt.md", template)]);
        write_files(&prompts, parts);
        Self { temp }
    }

    /// Workspace directory holding `prompts/`
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// `prompts/` directory
    pub fn prompts_dir(&self) -> PathBuf {
        self.temp.path().join("prompts")
    }

    /// Path of the root template
    pub fn template_path(&self) -> PathBuf {
        self.prompts_dir().join("system_prompt.md")
    }
}
