//! Two-phase content export: collect documents, then publish artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use vw_storage::{Storage, canonical_path, sidebar_label};

use crate::error::ExportError;
use crate::render;

/// Settings shared by both export phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Public URL of the docs root, e.g. `https://wiki.vara.network/docs`.
    pub base_url: String,
    /// Site title used as the index heading.
    pub title: String,
    /// One-line site description placed under the index heading.
    pub description: String,
    /// File name of the full-text artifact.
    pub full_filename: String,
    /// File name of the index artifact.
    pub index_filename: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            base_url: "https://wiki.vara.network/docs".to_owned(),
            title: "Vara Network Wiki".to_owned(),
            description: String::new(),
            full_filename: "llms-full.txt".to_owned(),
            index_filename: "llms.txt".to_owned(),
        }
    }
}

/// A document listed in the section index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Path relative to the content root, extension included.
    pub source_path: String,
    /// The document's `sidebar_label`.
    pub title: String,
}

impl IndexEntry {
    /// First segment of the source path.
    #[must_use]
    pub fn section(&self) -> &str {
        self.source_path
            .split_once('/')
            .map_or_else(|| stem(&self.source_path), |(first, _)| first)
    }

    /// Public URL of the document.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        document_url(base_url, &self.source_path)
    }
}

/// A document's text as it appears in the full-text export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub source_path: String,
    /// Source attribution comment followed by the file text.
    pub text: String,
}

/// Output of the collect phase, ordered by source path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    /// Documents with a `sidebar_label`.
    pub entries: Vec<IndexEntry>,
    /// Every readable document.
    pub documents: Vec<ExportedDocument>,
}

/// Artifacts written by the publish phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub full_path: PathBuf,
    pub index_path: PathBuf,
    pub documents: usize,
    pub indexed: usize,
}

/// Builds `llms-full.txt` and `llms.txt` from a content store.
#[derive(Debug, Clone)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    #[must_use]
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Read every content file in `storage`.
    ///
    /// Files are listed with [`Storage::scan_sources`], so files that share
    /// a URL path are all exported. Reads run in parallel. A file that can't
    /// be read is logged and left out; the result is sorted by source path
    /// either way.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Scan`] if the content tree can't be listed.
    pub fn collect(&self, storage: &dyn Storage) -> Result<Collected, ExportError> {
        let sources = storage.scan_sources()?;

        let mut read: Vec<ReadDocument> = sources
            .par_iter()
            .filter_map(|source_path| self.read_document(storage, source_path))
            .collect();
        read.sort_by(|a, b| a.document.source_path.cmp(&b.document.source_path));

        let mut collected = Collected::default();
        for ReadDocument { label, document } in read {
            if let Some(title) = label {
                collected.entries.push(IndexEntry {
                    source_path: document.source_path.clone(),
                    title,
                });
            }
            collected.documents.push(document);
        }

        tracing::info!(
            documents = collected.documents.len(),
            indexed = collected.entries.len(),
            skipped = sources.len() - collected.documents.len(),
            "Collected documents"
        );
        Ok(collected)
    }

    /// Write both artifacts into `output_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Write`] if the directory or either file can't
    /// be written.
    pub fn publish(
        &self,
        collected: &Collected,
        output_dir: &Path,
    ) -> Result<Published, ExportError> {
        fs::create_dir_all(output_dir).map_err(|source| ExportError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let full_path = output_dir.join(&self.options.full_filename);
        write_artifact(&full_path, &self.render_full(collected))?;

        let index_path = output_dir.join(&self.options.index_filename);
        write_artifact(&index_path, &self.render_index(collected))?;

        tracing::info!(
            full = %full_path.display(),
            index = %index_path.display(),
            "Published export"
        );
        Ok(Published {
            full_path,
            index_path,
            documents: collected.documents.len(),
            indexed: collected.entries.len(),
        })
    }

    /// Render the full-text artifact.
    #[must_use]
    pub fn render_full(&self, collected: &Collected) -> String {
        render::render_full(&collected.documents)
    }

    /// Render the section index artifact.
    #[must_use]
    pub fn render_index(&self, collected: &Collected) -> String {
        render::render_index(
            &self.options.title,
            &self.options.description,
            &self.options.base_url,
            &collected.entries,
        )
    }

    fn read_document(&self, storage: &dyn Storage, source_path: &str) -> Option<ReadDocument> {
        let content = match storage.read_source(source_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %source_path, error = %e, "Failed to read document, skipping");
                return None;
            }
        };

        let url = document_url(&self.options.base_url, source_path);
        Some(ReadDocument {
            label: sidebar_label(&content),
            document: ExportedDocument {
                source_path: source_path.to_owned(),
                text: format!("<!-- Source: {url} -->\n{content}"),
            },
        })
    }
}

/// A document read during collection.
struct ReadDocument {
    label: Option<String>,
    document: ExportedDocument,
}

/// Public URL of a document: base URL plus its canonical path.
fn document_url(base_url: &str, source_path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = canonical_path(source_path);
    if path.is_empty() {
        base.to_owned()
    } else {
        format!("{base}/{path}")
    }
}

fn write_artifact(path: &Path, content: &str) -> Result<(), ExportError> {
    fs::write(path, content).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn stem(file_name: &str) -> &str {
    file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem)
}
