//! Template module - system prompt assembly with include directives
//!
//! A root template is loaded from disk and every `{{include:PATH}}` directive
//! is replaced by the trimmed content of `PATH`, resolved against the root
//! template's directory.
//!
//! ## Rules
//!
//! - **Single pass**: directives inside included content are NOT expanded.
//!   If any directive survives substitution the render fails with
//!   [`TemplateError::IncompleteRender`].
//! - **`.txt` → `.md` fallback**: a missing `x.txt` include is served from
//!   `x.md` when that exists, and `x.txt` is written back through the
//!   [`IncludeWriter`] so later renders find it directly.
//! - **All or nothing**: any failing include aborts the whole render.
//!
//! ## Syntax
//!
//! - `{{include:parts/tools.md}}` or `{{include: parts/tools.md }}`

pub mod error;
pub mod include;
pub mod loader;
pub mod writer;

pub use error::TemplateError;
pub use include::{IncludeDirective, IncludeResolver, find_directives, render};
pub use loader::load;
pub use writer::{FsIncludeWriter, IncludeWriter, NoopIncludeWriter};

use std::path::Path;

/// Load the root template at `path` and render it with the filesystem writer
pub fn render_file(path: &Path) -> Result<String, TemplateError> {
    IncludeResolver::new(FsIncludeWriter).render_file(path)
}

/// Render the root template, persisting `.md` fallbacks only if `write_back`
pub fn render_prompt(path: &Path, write_back: bool) -> Result<String, TemplateError> {
    let writer: Box<dyn IncludeWriter> = if write_back {
        Box::new(FsIncludeWriter)
    } else {
        Box::new(NoopIncludeWriter)
    };
    IncludeResolver::new(writer).render_file(path)
}

#[cfg(test)]
mod tests;
