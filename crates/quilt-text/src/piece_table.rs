//! Piece-table implementation of [`TextBuffer`].
//!
//! The document is an ordered list of pieces referencing two stores:
//! the immutable original text and an append-only log of insertions.
//! Edits splice the piece list and never move stored text, so an
//! insertion in the middle of a large document costs a few piece
//! operations rather than a copy of the tail.

use std::fmt;
use std::ops::Range;

use smol_str::SmolStr;

use crate::error::{OutOfRange, check_offset, check_range};
use crate::piece::{Piece, PieceSequence, Source};
use crate::storage::{AppendLog, OriginalText};
use crate::text::TextBuffer;

/// Piece-table text buffer.
///
/// Construction never fails; an empty string yields an empty piece
/// list. Plain edits never merge pieces, so the piece count grows with
/// the edit history until [`compact`](PieceTableBuffer::compact) runs.
#[derive(Debug, Clone)]
pub struct PieceTableBuffer {
    original: OriginalText,
    appended: AppendLog,
    pieces: PieceSequence,
}

impl PieceTableBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::from_str("")
    }

    /// Create a buffer with `text` as its original content.
    pub fn from_str(text: &str) -> Self {
        let original = OriginalText::new(text);
        let pieces = PieceSequence::of_original(original.len_chars());
        Self {
            original,
            appended: AppendLog::new(),
            pieces,
        }
    }

    /// Number of pieces currently describing the document.
    pub fn piece_count(&self) -> usize {
        self.pieces.piece_count()
    }

    /// Merge neighboring pieces that reference contiguous runs of the
    /// same store.
    ///
    /// The document text and length are unchanged, and running it
    /// twice is the same as running it once. Call between edit bursts
    /// to keep long-lived buffers from fragmenting.
    pub fn compact(&mut self) {
        let before = self.pieces.piece_count();
        self.pieces.compact();
        tracing::debug!(
            target: "quilt::buffer",
            before,
            after = self.pieces.piece_count(),
            "compacted piece list"
        );
    }

    fn resolve(&self, piece: &Piece) -> &str {
        match piece.source {
            Source::Original => self.original.slice(piece.store_range()),
            Source::Appended => self.appended.slice(piece.store_range()),
        }
    }
}

impl Default for PieceTableBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer for PieceTableBuffer {
    fn len_chars(&self) -> usize {
        self.pieces.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) -> Result<(), OutOfRange> {
        check_offset(char_offset, self.len_chars())?;
        let range = self.appended.append(text);
        let inserted = range.len();
        if inserted == 0 {
            return Ok(());
        }
        self.pieces.insert(char_offset, Piece::appended(range));
        tracing::trace!(
            target: "quilt::buffer",
            char_offset,
            inserted,
            pieces = self.pieces.piece_count(),
            "insert"
        );
        Ok(())
    }

    fn remove(&mut self, char_range: Range<usize>) -> Result<(), OutOfRange> {
        check_range(&char_range, self.len_chars())?;
        if char_range.is_empty() {
            return Ok(());
        }
        let start = char_range.start;
        let removed = char_range.len();
        self.pieces.remove(char_range);
        tracing::trace!(
            target: "quilt::buffer",
            start,
            removed,
            pieces = self.pieces.piece_count(),
            "remove"
        );
        Ok(())
    }

    fn slice(&self, char_range: Range<usize>) -> Result<SmolStr, OutOfRange> {
        check_range(&char_range, self.len_chars())?;
        let mut out = String::with_capacity(char_range.len());
        for piece in self.pieces.covering(char_range) {
            out.push_str(self.resolve(&piece));
        }
        Ok(SmolStr::from(out))
    }

    fn text(&self) -> String {
        let mut out = String::new();
        for piece in self.pieces.iter() {
            out.push_str(self.resolve(piece));
        }
        out
    }
}

impl fmt::Display for PieceTableBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in self.pieces.iter() {
            f.write_str(self.resolve(piece))?;
        }
        Ok(())
    }
}

impl From<&str> for PieceTableBuffer {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for PieceTableBuffer {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_and_read_back() {
        let buf = PieceTableBuffer::from_str("Hello, World!");
        assert_eq!(buf.len_chars(), 13);
        assert_eq!(buf.slice(0..13).as_deref(), Ok("Hello, World!"));
        assert_eq!(buf.piece_count(), 1);
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut buf = PieceTableBuffer::from_str("Hello, World!");
        buf.insert(7, "wonderful ").unwrap();
        assert_eq!(buf.len_chars(), 23);
        assert_eq!(buf.slice(0..23).as_deref(), Ok("Hello, wonderful World!"));
        // Split original + inserted run.
        assert_eq!(buf.piece_count(), 3);
    }

    #[test]
    fn test_remove_within_original() {
        let mut buf = PieceTableBuffer::from_str("Hello, World!");
        buf.remove(5..7).unwrap();
        assert_eq!(buf.text(), "HelloWorld!");
        assert_eq!(buf.len_chars(), 11);
    }

    #[test]
    fn test_build_from_empty_by_appends() {
        let mut buf = PieceTableBuffer::new();
        buf.insert(0, "Hello").unwrap();
        buf.insert(5, ", ").unwrap();
        buf.insert(7, "World").unwrap();
        buf.insert(12, "!").unwrap();
        assert_eq!(buf.text(), "Hello, World!");
        assert_eq!(buf.piece_count(), 4);
        buf.remove(2..buf.len_chars() - 1).unwrap();
        assert_eq!(buf.text(), "He!");
    }

    #[test]
    fn test_remove_undoes_insert() {
        let mut buf = PieceTableBuffer::from_str("Hello, World!");
        buf.insert(7, "wonderful ").unwrap();
        buf.remove(7..17).unwrap();
        assert_eq!(buf.text(), "Hello, World!");
        // The split survives the removal; compaction heals it.
        assert_eq!(buf.piece_count(), 2);
        buf.compact();
        assert_eq!(buf.piece_count(), 1);
        assert_eq!(buf.text(), "Hello, World!");
    }

    #[test]
    fn test_empty_insert_is_noop() {
        let mut buf = PieceTableBuffer::from_str("abc");
        buf.insert(1, "").unwrap();
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.len_chars(), 3);
        assert_eq!(buf.piece_count(), 1);
    }

    #[test]
    fn test_empty_range_remove_is_noop() {
        let mut buf = PieceTableBuffer::from_str("abc");
        buf.remove(2..2).unwrap();
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.piece_count(), 1);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut buf = PieceTableBuffer::from_str("abc");
        assert_eq!(
            buf.insert(4, "x"),
            Err(OutOfRange::Offset { offset: 4, len: 3 })
        );
        assert_eq!(
            buf.remove(1..4),
            Err(OutOfRange::Range {
                start: 1,
                end: 4,
                len: 3
            })
        );
        assert_eq!(
            buf.remove(2..1),
            Err(OutOfRange::Range {
                start: 2,
                end: 1,
                len: 3
            })
        );
        assert_eq!(
            buf.slice(0..4),
            Err(OutOfRange::Range {
                start: 0,
                end: 4,
                len: 3
            })
        );
        // The failed calls left no trace.
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_slice_partial_reads() {
        let mut buf = PieceTableBuffer::from_str("Hello, World!");
        buf.insert(7, "wonderful ").unwrap();
        assert_eq!(buf.slice(0..5).as_deref(), Ok("Hello"));
        assert_eq!(buf.slice(7..17).as_deref(), Ok("wonderful "));
        assert_eq!(buf.slice(5..20).as_deref(), Ok(", wonderful Wor"));
        assert_eq!(buf.slice(22..23).as_deref(), Ok("!"));
        assert_eq!(buf.slice(3..3).as_deref(), Ok(""));
    }

    #[test]
    fn test_multibyte_chars_index_by_char() {
        let mut buf = PieceTableBuffer::from_str("héllo wörld");
        assert_eq!(buf.len_chars(), 11);
        buf.insert(6, "grüne ").unwrap();
        assert_eq!(buf.text(), "héllo grüne wörld");
        buf.remove(0..6).unwrap();
        assert_eq!(buf.text(), "grüne wörld");
        assert_eq!(buf.slice(6..11).as_deref(), Ok("wörld"));
    }

    #[test]
    fn test_display_renders_document() {
        let mut buf = PieceTableBuffer::from_str("Hello, World!");
        buf.insert(7, "wonderful ").unwrap();
        assert_eq!(format!("{buf}"), "Hello, wonderful World!");
    }

    #[test]
    fn test_edit_script_end_state() {
        let mut buf = PieceTableBuffer::from_str("the quick brown fox");
        buf.insert(4, "very ").unwrap();
        buf.remove(9..15).unwrap();
        buf.push(" jumps").unwrap();
        buf.insert(0, "> ").unwrap();
        insta::assert_snapshot!(buf.text(), @"> the very brown fox jumps");
    }

    #[test]
    fn test_compact_preserves_text() {
        let mut buf = PieceTableBuffer::from_str("abcdef");
        buf.insert(3, "XY").unwrap();
        buf.remove(3..5).unwrap();
        buf.insert(6, "Z").unwrap();
        let before = buf.text();
        buf.compact();
        assert_eq!(buf.text(), before);
        assert_eq!(buf.len_chars(), before.chars().count());
    }
}
