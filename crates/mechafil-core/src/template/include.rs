//! Include directive resolution

use super::error::TemplateError;
use super::loader::load;
use super::writer::{FsIncludeWriter, IncludeWriter};
use regex::Regex;
use std::io::ErrorKind;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

/// `{{include:PATH}}`, PATH bounded by the first `}`
const INCLUDE_PATTERN: &str = r"\{\{include:([^}]+)\}\}";

fn include_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(INCLUDE_PATTERN).expect("include pattern is a valid regex"))
}

/// A `{{include:PATH}}` occurrence in template text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Byte range of the whole directive
    pub span: Range<usize>,
    /// Directive text as written
    pub raw: String,
    /// Requested path, trimmed
    pub path: String,
}

/// Find every include directive in `text`, left to right
pub fn find_directives(text: &str) -> Vec<IncludeDirective> {
    include_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let path = caps.get(1)?;
            Some(IncludeDirective {
                span: whole.range(),
                raw: whole.as_str().to_string(),
                path: path.as_str().trim().to_string(),
            })
        })
        .collect()
}

/// Render `text` using the filesystem writer for fallback write-back
pub fn render(text: &str, base_dir: &Path) -> Result<String, TemplateError> {
    IncludeResolver::new(FsIncludeWriter).render(text, base_dir)
}

/// Single-pass include resolver
#[derive(Debug, Clone, Default)]
pub struct IncludeResolver<W> {
    writer: W,
}

impl<W: IncludeWriter> IncludeResolver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Load the root template and render it relative to its own directory
    pub fn render_file(&self, path: &Path) -> Result<String, TemplateError> {
        let text = load(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        tracing::debug!("Rendering system prompt template {}", path.display());
        self.render(&text, base_dir)
    }

    /// Replace every directive in `text` with its include content
    ///
    /// Each directive is resolved independently. The first failure aborts the
    /// render; the output is then checked for leftover directives.
    pub fn render(&self, text: &str, base_dir: &Path) -> Result<String, TemplateError> {
        let directives = find_directives(text);
        if directives.is_empty() {
            return Ok(text.to_string());
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for directive in &directives {
            let content = self.resolve(&directive.path, base_dir)?;
            output.push_str(&text[last..directive.span.start]);
            output.push_str(&content);
            output.push('\n');
            last = directive.span.end;
        }
        output.push_str(&text[last..]);

        verify_complete(&output)?;
        Ok(output)
    }

    /// Resolve one requested path to its trimmed content
    fn resolve(&self, requested: &str, base_dir: &Path) -> Result<String, TemplateError> {
        let resolved = normalize(&base_dir.join(requested));

        if let Some(content) = read_if_present(&resolved)? {
            return Ok(content);
        }

        let fallback = markdown_fallback(requested, &resolved);
        if let Some(md_path) = &fallback {
            if let Some(content) = read_if_present(md_path)? {
                tracing::info!(
                    "Include '{}' missing, using {}",
                    requested,
                    md_path.display()
                );
                if let Err(e) = self.writer.write_include(&resolved, &content) {
                    tracing::warn!("Failed to write back {}: {}", resolved.display(), e);
                }
                return Ok(content);
            }
        }

        Err(TemplateError::IncludeNotFound {
            requested: requested.to_string(),
            resolved,
            fallback,
        })
    }
}

/// `x.md` next to `x.txt`, only when the requested extension is exactly `.txt`
fn markdown_fallback(requested: &str, resolved: &Path) -> Option<PathBuf> {
    let is_txt = Path::new(requested)
        .extension()
        .is_some_and(|ext| ext == "txt");
    is_txt.then(|| resolved.with_extension("md"))
}

/// Trimmed content of `path`, or `None` if it does not exist
///
/// A file removed between renders is missing, not a read failure.
fn read_if_present(path: &Path) -> Result<Option<String>, TemplateError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.trim().to_string())),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(source) => Err(TemplateError::IncludeReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn verify_complete(rendered: &str) -> Result<(), TemplateError> {
    let remaining: Vec<String> = find_directives(rendered)
        .into_iter()
        .map(|d| d.raw)
        .collect();
    if remaining.is_empty() {
        Ok(())
    } else {
        Err(TemplateError::IncompleteRender { remaining })
    }
}

/// Absolute form of `path` with `.` and `..` removed lexically
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
