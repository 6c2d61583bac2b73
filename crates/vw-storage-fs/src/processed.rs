//! Processed text representation of a document.
//!
//! The processed form is what a page looks like after MDX compilation, as
//! plain markdown: front matter removed, top-level `import`/`export`
//! statements dropped, and code fence languages the highlighter doesn't know
//! rewritten to `text`.

use vw_storage::strip_front_matter;

/// Fence languages replaced with `text`.
const UNSUPPORTED_LANGUAGES: &[&str] = &["math", "circom", "env"];

/// Build the processed text for a document's full source.
pub(crate) fn process(content: &str) -> String {
    let body = strip_front_matter(content);
    let mut tracker = FenceTracker::default();
    let mut out = String::with_capacity(body.len());

    for line in body.split_inclusive('\n') {
        let was_in_fence = tracker.in_fence();
        let is_marker = tracker.update(line);

        if !was_in_fence && !is_marker && is_mdx_statement(line) {
            continue;
        }
        if !was_in_fence && is_marker {
            out.push_str(&normalize_fence_language(line));
        } else {
            out.push_str(line);
        }
    }

    // Statement removal leaves leading blank lines behind.
    out.trim_start_matches(['\n', '\r']).to_owned()
}

/// Check for a top-level MDX `import` or `export` statement.
fn is_mdx_statement(line: &str) -> bool {
    line.starts_with("import ") || line.starts_with("export ")
}

/// Rewrite the info string of an opening fence line if its language is unsupported.
fn normalize_fence_language(line: &str) -> String {
    let indent = line.len() - line.trim_start().len();
    let trimmed = &line[indent..];
    let Some(fence_char) = trimmed.chars().next() else {
        return line.to_owned();
    };
    let fence_len = trimmed.chars().take_while(|&c| c == fence_char).count();
    let info = &trimmed[fence_len..];
    let lang_start = info.len() - info.trim_start().len();
    let lang_len = info[lang_start..]
        .find(|c: char| c.is_whitespace() || c == '{')
        .unwrap_or(info.len() - lang_start);
    let lang = &info[lang_start..lang_start + lang_len];

    if UNSUPPORTED_LANGUAGES.contains(&lang) {
        let lang_offset = indent + fence_len + lang_start;
        format!(
            "{}text{}",
            &line[..lang_offset],
            &line[lang_offset + lang_len..]
        )
    } else {
        line.to_owned()
    }
}

/// Tracks code fence state during line-by-line processing.
///
/// A closing fence must use the same character as the opening one and be at
/// least as long.
#[derive(Debug, Default)]
struct FenceTracker {
    fence_char: Option<char>,
    fence_len: usize,
}

impl FenceTracker {
    fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Update state for one line. Returns `true` for opening and closing markers.
    fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        if let Some(fence_char) = self.fence_char {
            let count = trimmed.chars().take_while(|&c| c == fence_char).count();
            if count >= self.fence_len && trimmed[count..].trim().is_empty() {
                self.fence_char = None;
                self.fence_len = 0;
                return true;
            }
            return false;
        }

        let Some(first) = trimmed.chars().next().filter(|c| matches!(c, '`' | '~')) else {
            return false;
        };
        let count = trimmed.chars().take_while(|&c| c == first).count();
        if count >= 3 {
            self.fence_char = Some(first);
            self.fence_len = count;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_process_strips_front_matter() {
        assert_eq!(process("---\ntitle: A\n---\n# A\n"), "# A\n");
    }

    #[test]
    fn test_process_drops_mdx_statements() {
        let content = "---\ntitle: A\n---\nimport Tabs from '@theme/Tabs';\nexport const x = 1;\n\n# A\n\nText\n";

        assert_eq!(process(content), "# A\n\nText\n");
    }

    #[test]
    fn test_process_keeps_statements_inside_fences() {
        let content = "# A\n\n```js\nimport x from 'y';\n```\n";

        assert_eq!(process(content), content);
    }

    #[test]
    fn test_process_keeps_indented_statements() {
        let content = "Text\n  import x\n";

        assert_eq!(process(content), content);
    }

    #[test]
    fn test_process_normalizes_unsupported_languages() {
        let content = "```math\nx^2\n```\n\n```circom title=\"c\"\nsignal\n```\n\n```env\nA=1\n```\n";

        assert_eq!(
            process(content),
            "```text\nx^2\n```\n\n```text title=\"c\"\nsignal\n```\n\n```text\nA=1\n```\n"
        );
    }

    #[test]
    fn test_process_keeps_supported_languages() {
        let content = "```rust\nfn main() {}\n```\n~~~mathematica\nx\n~~~\n";

        assert_eq!(process(content), content);
    }

    #[test]
    fn test_closing_fence_not_rewritten() {
        let content = "````md\n```math\n```\n````\n";

        assert_eq!(process(content), content);
    }

    #[test]
    fn test_fence_tracker() {
        let mut tracker = FenceTracker::default();

        assert!(tracker.update("```rust\n"));
        assert!(tracker.in_fence());
        assert!(!tracker.update("~~~\n"));
        assert!(!tracker.update("``\n"));
        assert!(tracker.update("```\n"));
        assert!(!tracker.in_fence());
    }
}
