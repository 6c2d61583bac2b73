//! Text rendering of the two export artifacts.

use std::collections::BTreeMap;

use crate::exporter::{ExportedDocument, IndexEntry};

/// Separator placed between documents in the full-text export.
pub const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Documents of one top-level section, sorted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// First path segment, as found in the content tree.
    pub name: &'a str,
    pub entries: Vec<&'a IndexEntry>,
}

impl Section<'_> {
    /// Section name with its first letter upper-cased.
    #[must_use]
    pub fn heading(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Group entries by section.
///
/// Sections come out in alphabetical order; entries within a section are
/// sorted by title ignoring case, then by source path.
#[must_use]
pub fn sections(entries: &[IndexEntry]) -> Vec<Section<'_>> {
    let mut grouped: BTreeMap<&str, Vec<&IndexEntry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.section()).or_default().push(entry);
    }

    grouped
        .into_iter()
        .map(|(name, mut entries)| {
            entries.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.source_path.cmp(&b.source_path))
            });
            Section { name, entries }
        })
        .collect()
}

/// Concatenate documents with the separator between them.
#[must_use]
pub fn render_full(documents: &[ExportedDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.text.as_str())
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

/// Render the section index.
///
/// ```text
/// # {title}
///
/// > {description}
///
/// ## {Section}
///
/// - [{title}]({url})
/// ```
#[must_use]
pub fn render_index(
    title: &str,
    description: &str,
    base_url: &str,
    entries: &[IndexEntry],
) -> String {
    let mut out = format!("# {title}\n");
    if !description.is_empty() {
        out.push_str(&format!("\n> {description}\n"));
    }

    for section in sections(entries) {
        out.push_str(&format!("\n## {}\n\n", section.heading()));
        for entry in section.entries {
            out.push_str(&format!("- [{}]({})\n", entry.title, entry.url(base_url)));
        }
    }

    out
}
