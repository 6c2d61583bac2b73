//! Quoted HTML attributes: `src="url"`, `href='url'`.
//!
//! The value may span lines but must be non-empty. Unquoted values and
//! brace expressions are left to other scanners.

use super::{LinkKind, LinkRef, attribute_values, ordered};

/// Find all quoted `src`/`href` attribute values in `text`.
pub(crate) fn scan(text: &str) -> Vec<LinkRef<'_>> {
    let bytes = text.as_bytes();
    let links = attribute_values(text)
        .filter_map(|start| {
            let quote = *bytes.get(start).filter(|&&b| b == b'"' || b == b'\'')?;
            let value_start = start + 1;
            let len = bytes[value_start..].iter().position(|&b| b == quote)?;
            (len > 0).then(|| {
                LinkRef::new(
                    text,
                    LinkKind::HtmlAttribute,
                    value_start..value_start + len,
                )
            })
        })
        .collect();
    ordered(links)
}
