//! Error type for buffer edits.

use std::ops::Range;

use thiserror::Error;

/// A caller-supplied offset or range that does not fit the buffer.
///
/// Buffers reject bad positions instead of clamping them; clamping
/// would hide caller bugs. Offsets and ranges are in chars.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutOfRange {
    /// Offset past the end of the buffer.
    #[error("char offset {offset} out of range for buffer of length {len}")]
    Offset { offset: usize, len: usize },

    /// Range inverted or extending past the end of the buffer.
    #[error("char range {start}..{end} out of range for buffer of length {len}")]
    Range {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Validate an insertion offset. `offset == len` is the append position.
pub(crate) fn check_offset(offset: usize, len: usize) -> Result<(), OutOfRange> {
    if offset > len {
        return Err(OutOfRange::Offset { offset, len });
    }
    Ok(())
}

/// Validate a half-open char range against a buffer length.
pub(crate) fn check_range(range: &Range<usize>, len: usize) -> Result<(), OutOfRange> {
    if range.start > range.end || range.end > len {
        return Err(OutOfRange::Range {
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}
