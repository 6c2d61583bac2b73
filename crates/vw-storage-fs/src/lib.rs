//! Filesystem content store for the VW documentation pipeline.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](vw_storage::Storage) trait. It handles:
//!
//! - Recursive directory scanning for `.md` and `.mdx` files
//! - Title and description extraction from front matter
//! - Raw and processed body snapshots used as read fallbacks
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use vw_storage::Storage;
//! use vw_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("content/docs"));
//! for doc in storage.scan()? {
//!     println!("{}: {:?}", doc.path, doc.title);
//! }
//! ```

mod processed;
mod scanner;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use rayon::prelude::*;

use scanner::{Scanner, SourceFile};
use vw_storage::{Document, Storage, StorageError, StorageErrorKind, has_markdown_extension};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Per-document state captured at scan time.
#[derive(Debug, Clone)]
struct Snapshot {
    document: Document,
    file: PathBuf,
    /// File text as read at scan time, `None` if the file couldn't be read.
    raw: Option<String>,
    processed: Option<String>,
}

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for markdown and MDX files. Each scan
/// replaces the snapshot index used for lookups, so a page whose file later
/// disappears or becomes unreadable still has a fallback body.
pub struct FsStorage {
    /// Root directory of the content tree.
    source_dir: PathBuf,
    scanner: Scanner,
    /// URL path to snapshot, `None` until the first scan.
    index: RwLock<Option<HashMap<String, Snapshot>>>,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let scanner = Scanner::new(&source_dir);
        Self {
            source_dir,
            scanner,
            index: RwLock::new(None),
        }
    }

    /// Root directory of the content tree.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a URL path doesn't contain path traversal attempts.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        if path.split('/').any(|segment| segment == "..") {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Read one source file and capture its snapshot.
    fn build_snapshot(file: &SourceFile) -> Snapshot {
        match fs::read_to_string(&file.path) {
            Ok(content) => Snapshot {
                document: Document::from_source(file.source_path.as_str(), &content),
                file: file.path.clone(),
                processed: Some(processed::process(&content)),
                raw: Some(content),
            },
            Err(e) => {
                tracing::warn!(path = %file.source_path, error = %e, "Failed to read document during scan");
                Snapshot {
                    document: Document::new(file.source_path.as_str()),
                    file: file.path.clone(),
                    raw: None,
                    processed: None,
                }
            }
        }
    }

    /// Walk the content tree and rebuild the snapshot index.
    fn rescan(&self) -> Vec<Document> {
        let snapshots: Vec<Snapshot> = self
            .scanner
            .scan()
            .par_iter()
            .map(Self::build_snapshot)
            .collect();

        let mut index = HashMap::with_capacity(snapshots.len());
        let mut documents = Vec::with_capacity(snapshots.len());
        for snapshot in snapshots {
            match index.entry(snapshot.document.path.clone()) {
                Entry::Occupied(existing) => {
                    let existing: &Snapshot = existing.get();
                    tracing::warn!(
                        path = %snapshot.document.path,
                        kept = %existing.document.source_path,
                        skipped = %snapshot.document.source_path,
                        "Duplicate document path"
                    );
                }
                Entry::Vacant(slot) => {
                    documents.push(snapshot.document.clone());
                    slot.insert(snapshot);
                }
            }
        }

        tracing::debug!(count = documents.len(), dir = %self.source_dir.display(), "Scanned content tree");
        *self.index.write().unwrap() = Some(index);
        documents
    }

    /// Look up a snapshot, scanning first if the index is empty.
    ///
    /// A miss after the first scan only triggers a rescan when a file for
    /// `path` now exists on disk.
    fn snapshot(&self, path: &str) -> Result<Snapshot, StorageError> {
        Self::validate_path(path)?;

        if let Some(snapshot) = self.cached(path) {
            return Ok(snapshot);
        }
        let scanned = self.index.read().unwrap().is_some();
        if scanned && !self.may_exist(path) {
            return Err(StorageError::not_found(path).with_backend(BACKEND));
        }
        self.rescan();
        self.cached(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    /// Whether a file the page scan would map to `path` exists on disk.
    fn may_exist(&self, path: &str) -> bool {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .all(Scanner::is_visible)
            && self.candidate_files(path).iter().any(|file| file.is_file())
    }

    /// Files whose URL path would be `path`: `{path}.md`, `{path}/index.md`
    /// and `{path}/{last}.md`, each also as `.mdx`.
    fn candidate_files(&self, path: &str) -> Vec<PathBuf> {
        let mut stems = Vec::with_capacity(3);
        if path.is_empty() {
            stems.push("index".to_owned());
        } else {
            let last = path.rsplit('/').next().unwrap_or(path);
            stems.push(path.to_owned());
            stems.push(format!("{path}/index"));
            stems.push(format!("{path}/{last}"));
        }
        stems
            .iter()
            .flat_map(|stem| {
                ["md", "mdx"].map(|ext| self.source_dir.join(format!("{stem}.{ext}")))
            })
            .collect()
    }

    fn cached(&self, path: &str) -> Option<Snapshot> {
        self.index
            .read()
            .unwrap()
            .as_ref()
            .and_then(|index| index.get(path).cloned())
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        Ok(self.rescan())
    }

    fn get(&self, path: &str) -> Result<Option<Document>, StorageError> {
        match self.snapshot(path) {
            Ok(snapshot) => Ok(Some(snapshot.document)),
            Err(e) if e.kind == StorageErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let snapshot = self.snapshot(path)?;
        fs::read_to_string(&snapshot.file)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))
    }

    fn scan_sources(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .scanner
            .scan_all()
            .into_iter()
            .map(|file| file.source_path)
            .collect())
    }

    fn read_source(&self, source_path: &str) -> Result<String, StorageError> {
        let relative = Path::new(source_path);
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !contained || !has_markdown_extension(source_path) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(source_path)
                .with_backend(BACKEND));
        }
        fs::read_to_string(self.source_dir.join(relative))
            .map_err(|e| StorageError::io(e, Some(relative.to_path_buf())).with_backend(BACKEND))
    }

    fn raw_text(&self, path: &str) -> Result<String, StorageError> {
        self.snapshot(path)?
            .raw
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn processed_text(&self, path: &str) -> Result<String, StorageError> {
        self.snapshot(path)?
            .processed
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.snapshot(path).is_ok()
    }
}
