//! Content store abstraction for the VW documentation pipeline.
//!
//! This crate provides a [`Storage`] trait for abstracting document discovery and
//! text retrieval from the underlying content tree. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between the link rewriter, the exporter and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `get()`, `read()` and the fallback text accessors
//! - [`Document`] describing one markdown/MDX file in the content tree
//! - Front-matter helpers shared by every backend ([`split_front_matter`], [`FrontMatter`])
//! - Path helpers ([`canonical_path`], [`url_path`])
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in `vw-storage-fs`.

mod document;
mod front_matter;
#[cfg(feature = "mock")]
mod mock;
mod path;
mod storage;

pub use document::Document;
pub use front_matter::{
    FrontMatter, first_heading, sidebar_label, split_front_matter, strip_front_matter,
};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use path::{canonical_path, has_markdown_extension, url_path};
pub use storage::{Storage, StorageError, StorageErrorKind};
