//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting document scanning and retrieval,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # URL Path Convention
//!
//! All path parameters in Storage methods are **URL paths**, not file paths:
//! - `""` - root (`index.md` at the content root)
//! - `"getting-started"` - standalone page
//! - `"vara-network/staking/nominate"` - nested page
//!
//! Storage implementations handle the mapping from URL paths to their internal storage format.

use std::path::PathBuf;

use crate::document::Document;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// The backend does not provide this accessor.
    Unsupported,
    /// Content is not valid UTF-8.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create an unsupported-accessor error with path.
    #[must_use]
    pub fn unsupported(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::Unsupported).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Unsupported => "Unsupported",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Content store for document discovery and text retrieval.
///
/// Provides a unified interface for accessing documents regardless of backend.
/// Besides the primary [`read`](Storage::read), a backend may expose two
/// fallback representations of the same document: a raw snapshot and a
/// processed snapshot. Callers that must never fail try them in that order.
///
/// # URL Paths
///
/// All path parameters are **URL paths** (see [`Document::path`]).
pub trait Storage: Send + Sync {
    /// Scan and return all documents, ordered by source path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails.
    fn scan(&self) -> Result<Vec<Document>, StorageError>;

    /// Look up a single document by URL path.
    ///
    /// The default implementation scans and filters.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails. A missing document is
    /// `Ok(None)`, not an error.
    fn get(&self, path: &str) -> Result<Option<Document>, StorageError> {
        Ok(self.scan()?.into_iter().find(|doc| doc.path == path))
    }

    /// Read the full source text of a document, front matter included.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// List the source path of every markdown/MDX file, ordered by source path.
    ///
    /// Unlike [`scan`](Storage::scan), files that share a URL path (e.g.
    /// `intro.md` and `intro/index.md`) are all listed. The default
    /// implementation maps the scanned documents.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails.
    fn scan_sources(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .scan()?
            .into_iter()
            .map(|doc| doc.source_path)
            .collect())
    }

    /// Read a file by its source path (relative to the content root,
    /// extension included).
    ///
    /// The default implementation reads the scanned document with that
    /// source path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if no such file exists or it can't be read.
    fn read_source(&self, source_path: &str) -> Result<String, StorageError> {
        let document = self
            .scan()?
            .into_iter()
            .find(|doc| doc.source_path == source_path)
            .ok_or_else(|| StorageError::not_found(source_path))?;
        self.read(&document.path)
    }

    /// Full text of the document as last captured by the backend, front
    /// matter included.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Unsupported`] unless the backend keeps raw snapshots.
    fn raw_text(&self, path: &str) -> Result<String, StorageError> {
        Err(StorageError::unsupported(path))
    }

    /// Processed body of the document (front matter removed, MDX statements
    /// dropped, code fence languages normalised).
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::Unsupported`] unless the backend keeps processed snapshots.
    fn processed_text(&self, path: &str) -> Result<String, StorageError> {
        Err(StorageError::unsupported(path))
    }

    /// Check if a document exists at the given URL path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &str) -> bool {
        matches!(self.get(path), Ok(Some(_)))
    }
}
