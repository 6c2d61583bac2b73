//! `llms.txt` and `llms-full.txt` export for the VW documentation pipeline.
//!
//! Export runs in two phases:
//!
//! 1. [`Exporter::collect`] reads every document from a content store,
//!    prefixes each with a source comment and picks up `sidebar_label`s for
//!    the section index. Unreadable documents are logged and skipped.
//! 2. [`Exporter::publish`] writes the full-text concatenation and the
//!    section index. Any write failure is returned as an error.
//!
//! [`Exporter::render_full`] and [`Exporter::render_index`] produce the same
//! text without touching disk.

mod error;
mod exporter;
mod render;

pub use error::ExportError;
pub use exporter::{Collected, ExportOptions, ExportedDocument, Exporter, IndexEntry, Published};
pub use render::{DOCUMENT_SEPARATOR, Section, sections};
