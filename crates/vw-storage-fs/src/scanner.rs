//! Source file discovery by filesystem walking.
//!
//! The scanner only identifies files that could form documents. No content is
//! read at this stage; `FsStorage` turns the results into documents.

use std::fs;
use std::path::{Path, PathBuf};

use vw_storage::has_markdown_extension;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// A markdown or MDX file found under the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceFile {
    /// Slash-separated path relative to the content root (e.g. "a/b.mdx").
    pub source_path: String,
    /// Absolute path to the file.
    pub path: PathBuf,
}

/// Walks the content root for `.md` and `.mdx` files.
///
/// Hidden entries and `node_modules` are never visited. `_`-prefixed entries
/// (partials, drafts) are left out of the served pages but still listed by
/// [`Scanner::scan_all`].
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: &Path) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
        }
    }

    /// Scan for servable pages, ordered by source path.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn scan(&self) -> Vec<SourceFile> {
        self.collect(false)
    }

    /// Scan for every content file, `_`-prefixed ones included.
    pub fn scan_all(&self) -> Vec<SourceFile> {
        self.collect(true)
    }

    /// Whether a path segment is one the page scan would visit.
    pub fn is_visible(segment: &str) -> bool {
        !segment.starts_with('.')
            && !segment.starts_with('_')
            && !SKIPPED_DIRS.contains(&segment)
    }

    fn collect(&self, include_private: bool) -> Vec<SourceFile> {
        let mut files = Vec::new();
        if self.source_dir.is_dir() {
            self.scan_directory(&self.source_dir, "", include_private, &mut files);
        }
        files.sort_by(|a, b| a.source_path.cmp(&b.source_path));
        files
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        prefix: &str,
        include_private: bool,
        files: &mut Vec<SourceFile>,
    ) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Failed to read directory, skipping");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || (name.starts_with('_') && !include_private) {
                continue;
            }

            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let rel = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };

            if file_type.is_dir() {
                if !SKIPPED_DIRS.contains(&name.as_str()) {
                    self.scan_directory(&entry.path(), &rel, include_private, files);
                }
            } else if file_type.is_file() && has_markdown_extension(&name) {
                files.push(SourceFile {
                    source_path: rel,
                    path: entry.path(),
                });
            }
        }
    }
}
