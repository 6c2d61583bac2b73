//! Export error type.

use std::path::PathBuf;

use vw_storage::StorageError;

/// Error returned by [`Exporter`](crate::Exporter).
///
/// Unreadable individual documents are not errors; they are logged and
/// skipped during collection.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The content tree could not be listed.
    #[error("Failed to scan content: {0}")]
    Scan(#[from] StorageError),
    /// An output directory or artifact could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
