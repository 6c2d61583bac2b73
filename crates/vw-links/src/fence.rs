//! Segmentation on triple-backtick fence markers.

/// Marker that opens and closes a fenced region.
const FENCE: &str = "```";

/// Apply `f` to every segment outside fences and reassemble the text.
///
/// Splitting on the marker makes even-indexed segments prose and odd-indexed
/// segments fenced. Fenced segments and the markers themselves are copied
/// byte for byte. An unclosed fence runs to the end of the text.
pub(crate) fn map_unfenced(content: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(content.len());
    for (i, segment) in content.split(FENCE).enumerate() {
        if i > 0 {
            out.push_str(FENCE);
        }
        if i % 2 == 0 {
            out.push_str(&f(segment));
        } else {
            out.push_str(segment);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn shout(content: &str) -> String {
        map_unfenced(content, str::to_uppercase)
    }

    #[test]
    fn test_no_fences() {
        assert_eq!(shout("abc"), "ABC");
    }

    #[test]
    fn test_fenced_segments_untouched() {
        assert_eq!(shout("a```b```c"), "A```b```C");
        assert_eq!(shout("```js\nx\n```\ny"), "```js\nx\n```\nY");
    }

    #[test]
    fn test_unclosed_fence() {
        assert_eq!(shout("a```b"), "A```b");
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(shout("``````"), "``````");
        assert_eq!(shout(""), "");
    }
}
