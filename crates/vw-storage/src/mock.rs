//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;

use crate::document::Document;
use crate::front_matter::strip_front_matter;
use crate::storage::{Storage, StorageError};

/// Mock storage for testing.
///
/// Stores documents and content in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use vw_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guide.md", "---\ntitle: Guide\n---\nContent.");
///
/// let docs = storage.scan().unwrap();
/// let content = storage.read("guide").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: Vec<Document>,
    contents: HashMap<String, String>,
    raw_texts: HashMap<String, String>,
    processed_texts: HashMap<String, String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a readable file. Metadata is derived from the content.
    #[must_use]
    pub fn with_file(mut self, source_path: &str, content: impl Into<String>) -> Self {
        let content = content.into();
        let document = Document::from_source(source_path, &content);
        self.contents.insert(document.path.clone(), content);
        self.push(document);
        self
    }

    /// Add a document whose primary source cannot be read.
    #[must_use]
    pub fn with_document(mut self, document: Document) -> Self {
        self.push(document);
        self
    }

    /// Provide a raw snapshot for a URL path.
    #[must_use]
    pub fn with_raw_text(mut self, path: &str, text: impl Into<String>) -> Self {
        self.raw_texts.insert(path.to_owned(), text.into());
        self
    }

    /// Provide a processed snapshot for a URL path.
    #[must_use]
    pub fn with_processed_text(mut self, path: &str, text: impl Into<String>) -> Self {
        self.processed_texts.insert(path.to_owned(), text.into());
        self
    }

    fn push(&mut self, document: Document) {
        self.documents.retain(|doc| doc.path != document.path);
        self.documents.push(document);
        self.documents.sort_by(|a, b| a.source_path.cmp(&b.source_path));
    }

    fn lookup(map: &HashMap<String, String>, path: &str) -> Result<String, StorageError> {
        map.get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        Ok(self.documents.clone())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::lookup(&self.contents, path)
    }

    fn raw_text(&self, path: &str) -> Result<String, StorageError> {
        Self::lookup(&self.raw_texts, path)
    }

    fn processed_text(&self, path: &str) -> Result<String, StorageError> {
        match self.processed_texts.get(path) {
            Some(text) => Ok(text.clone()),
            None => self
                .contents
                .get(path)
                .map(|content| strip_front_matter(content).to_owned())
                .ok_or_else(|| StorageError::not_found(path).with_backend("Mock")),
        }
    }
}
