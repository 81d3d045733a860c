//! Text buffer abstraction.
//!
//! The `TextBuffer` trait is the contract every backing implementation
//! satisfies: the piece table for real documents, and a naive
//! contiguous-string implementation that doubles as the differential
//! oracle in tests.

use smol_str::SmolStr;
use std::ops::Range;

use crate::error::{OutOfRange, check_offset, check_range};
use crate::storage::{byte_offset, slice_chars};

/// A mutable text buffer addressed by char offsets.
///
/// All offsets are in Unicode scalar values (chars), not bytes.
/// Mutating and reading operations validate their positions against
/// the current length and reject violations with [`OutOfRange`]
/// rather than clamping.
pub trait TextBuffer {
    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Insert text at char offset. `char_offset == len_chars()`
    /// appends; larger offsets are rejected. Inserting the empty
    /// string is a no-op.
    fn insert(&mut self, char_offset: usize, text: &str) -> Result<(), OutOfRange>;

    /// Append text at end.
    fn push(&mut self, text: &str) -> Result<(), OutOfRange> {
        self.insert(self.len_chars(), text)
    }

    /// Remove a half-open char range. An empty range is a no-op.
    fn remove(&mut self, char_range: Range<usize>) -> Result<(), OutOfRange>;

    /// Replace a char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) -> Result<(), OutOfRange> {
        let start = char_range.start;
        self.remove(char_range)?;
        self.insert(start, text)
    }

    /// Get a char range as a `SmolStr`.
    ///
    /// SmolStr keeps short reads inline (no heap allocation) and makes
    /// longer ones cheap to clone.
    fn slice(&self, char_range: Range<usize>) -> Result<SmolStr, OutOfRange>;

    /// Materialize the whole document.
    fn text(&self) -> String;
}

/// Contiguous-string buffer.
///
/// Every edit moves the tail of the string, so it only suits small
/// documents. It doubles as the trusted baseline the piece table is
/// checked against in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from string.
    pub fn from_str(s: &str) -> Self {
        Self { text: s.to_owned() }
    }
}

impl TextBuffer for StringBuffer {
    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn insert(&mut self, char_offset: usize, text: &str) -> Result<(), OutOfRange> {
        check_offset(char_offset, self.len_chars())?;
        let at = byte_offset(&self.text, char_offset);
        self.text.insert_str(at, text);
        Ok(())
    }

    fn remove(&mut self, char_range: Range<usize>) -> Result<(), OutOfRange> {
        check_range(&char_range, self.len_chars())?;
        let start = byte_offset(&self.text, char_range.start);
        let end = byte_offset(&self.text, char_range.end);
        self.text.replace_range(start..end, "");
        Ok(())
    }

    fn slice(&self, char_range: Range<usize>) -> Result<SmolStr, OutOfRange> {
        check_range(&char_range, self.len_chars())?;
        Ok(SmolStr::new(slice_chars(&self.text, char_range)))
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}

impl From<&str> for StringBuffer {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for StringBuffer {
    fn from(s: String) -> Self {
        Self { text: s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut buf = StringBuffer::from_str("hello world");
        assert_eq!(buf.len_chars(), 11);
        assert_eq!(buf.text(), "hello world");

        buf.insert(5, " beautiful").unwrap();
        assert_eq!(buf.text(), "hello beautiful world");

        // " beautiful" is 10 chars at positions 5..15
        buf.remove(5..15).unwrap();
        assert_eq!(buf.text(), "hello world");
    }

    #[test]
    fn test_slice() {
        let buf = StringBuffer::from_str("hello world");
        assert_eq!(buf.slice(0..5).as_deref(), Ok("hello"));
        assert_eq!(buf.slice(6..11).as_deref(), Ok("world"));
        assert!(buf.slice(0..100).is_err());
    }

    #[test]
    fn test_replace() {
        let mut buf = StringBuffer::from_str("hello world");
        buf.replace(6..11, "rust").unwrap();
        assert_eq!(buf.text(), "hello rust");
    }

    #[test]
    fn test_push() {
        let mut buf = StringBuffer::new();
        assert!(buf.is_empty());
        buf.push("hé").unwrap();
        buf.push("llo").unwrap();
        assert_eq!(buf.text(), "héllo");
        assert_eq!(buf.len_chars(), 5);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut buf = StringBuffer::from_str("abc");
        assert_eq!(
            buf.insert(4, "x"),
            Err(OutOfRange::Offset { offset: 4, len: 3 })
        );
        assert!(buf.remove(2..1).is_err());
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut buf = StringBuffer::from_str("héllo");
        buf.insert(2, "ö").unwrap();
        assert_eq!(buf.text(), "héöllo");
        buf.remove(1..3).unwrap();
        assert_eq!(buf.text(), "hllo");
    }
}
