//! Backing stores for piece-table text.
//!
//! Two stores hold every char the buffer has ever seen: the immutable
//! original snapshot and an append-only log of inserted text. Pieces
//! address both by char offset, so the log's backing storage can grow
//! without invalidating anything a piece holds.

use std::ops::Range;

/// Byte offset of `char_offset` within `text`.
///
/// `char_offset` equal to the char count maps to `text.len()`.
pub(crate) fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Slice `text` by char range.
pub(crate) fn slice_chars(text: &str, char_range: Range<usize>) -> &str {
    let start = byte_offset(text, char_range.start);
    let tail = &text[start..];
    let end = byte_offset(tail, char_range.end - char_range.start);
    &tail[..end]
}

/// Immutable snapshot of the text the buffer was constructed with.
#[derive(Debug, Clone)]
pub(crate) struct OriginalText {
    text: String,
    len_chars: usize,
}

impl OriginalText {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len_chars = text.chars().count();
        Self { text, len_chars }
    }

    pub(crate) fn len_chars(&self) -> usize {
        self.len_chars
    }

    /// Slice by char range.
    ///
    /// Bounds are the piece sequence's responsibility; a piece
    /// addressing past its store is a core bug, not a caller error.
    pub(crate) fn slice(&self, char_range: Range<usize>) -> &str {
        debug_assert!(char_range.start <= char_range.end && char_range.end <= self.len_chars);
        slice_chars(&self.text, char_range)
    }
}

/// Append-only store for inserted text.
///
/// Text is only ever added at the end, and the char range handed back
/// by [`append`](AppendLog::append) stays valid for the life of the
/// log. Chars orphaned by later removals are never reclaimed.
#[derive(Debug, Clone, Default)]
pub(crate) struct AppendLog {
    text: String,
    len_chars: usize,
}

impl AppendLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `text`, returning the char range it now occupies.
    pub(crate) fn append(&mut self, text: &str) -> Range<usize> {
        let start = self.len_chars;
        self.text.push_str(text);
        self.len_chars += text.chars().count();
        start..self.len_chars
    }

    /// Slice by char range. Same contract as [`OriginalText::slice`].
    pub(crate) fn slice(&self, char_range: Range<usize>) -> &str {
        debug_assert!(char_range.start <= char_range.end && char_range.end <= self.len_chars);
        slice_chars(&self.text, char_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_chars_multibyte() {
        // 'é' and '世' are one char but multiple bytes
        let text = "aé世b";
        assert_eq!(slice_chars(text, 0..1), "a");
        assert_eq!(slice_chars(text, 1..3), "é世");
        assert_eq!(slice_chars(text, 3..4), "b");
        assert_eq!(slice_chars(text, 0..4), text);
        assert_eq!(slice_chars(text, 2..2), "");
    }

    #[test]
    fn test_append_ranges_stack() {
        let mut log = AppendLog::new();
        assert_eq!(log.append("abc"), 0..3);
        assert_eq!(log.append(""), 3..3);
        assert_eq!(log.append("dé"), 3..5);
        assert_eq!(log.slice(0..3), "abc");
        assert_eq!(log.slice(3..5), "dé");
    }

    #[test]
    fn test_original_is_fixed() {
        let original = OriginalText::new("Hello, World!");
        assert_eq!(original.len_chars(), 13);
        assert_eq!(original.slice(7..12), "World");
        assert_eq!(original.slice(0..13), "Hello, World!");
    }
}
