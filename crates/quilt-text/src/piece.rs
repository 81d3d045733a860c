//! Piece descriptors and the ordered piece sequence.
//!
//! A piece is a `(store, start, length)` triple naming a run of chars
//! in one backing store. The document is the in-order concatenation of
//! the runs the pieces reference. Edits splice this list; stores are
//! never touched except to append, so a piece stays meaningful for as
//! long as the buffer lives.

use std::ops::Range;

/// Which backing store a piece references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    /// The immutable construction-time snapshot.
    Original,
    /// The append-only log of inserted text.
    Appended,
}

/// A run of chars in one backing store.
///
/// Holds char offsets into the store, never borrows from it. The
/// length is never zero while the piece sits in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Piece {
    pub(crate) source: Source,
    pub(crate) start: usize,
    pub(crate) length: usize,
}

impl Piece {
    pub(crate) fn original(char_range: Range<usize>) -> Self {
        Self {
            source: Source::Original,
            start: char_range.start,
            length: char_range.len(),
        }
    }

    pub(crate) fn appended(char_range: Range<usize>) -> Self {
        Self {
            source: Source::Appended,
            start: char_range.start,
            length: char_range.len(),
        }
    }

    /// Char range this piece covers within its store.
    pub(crate) fn store_range(&self) -> Range<usize> {
        self.start..self.start + self.length
    }

    /// Split into `[0, at)` and `[at, length)` fragments.
    ///
    /// Either side may come back empty; callers drop empty fragments
    /// rather than storing them.
    fn split(&self, at: usize) -> (Piece, Piece) {
        debug_assert!(at <= self.length);
        let left = Piece {
            length: at,
            ..*self
        };
        let right = Piece {
            start: self.start + at,
            length: self.length - at,
            ..*self
        };
        (left, right)
    }

    /// True if `other` continues this piece's run in the same store.
    fn abuts(&self, other: &Piece) -> bool {
        self.source == other.source && self.start + self.length == other.start
    }
}

/// Where a logical char offset falls in a piece sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    /// The piece at `index` contains the offset; its first char sits
    /// at logical offset `piece_start`.
    Inside { index: usize, piece_start: usize },
    /// The offset equals the document length.
    End,
}

/// Ordered list of pieces plus the total char length they cover.
///
/// The length counter is maintained incrementally so `len_chars` never
/// rescans the list.
#[derive(Debug, Clone, Default)]
pub(crate) struct PieceSequence {
    pieces: Vec<Piece>,
    len_chars: usize,
}

impl PieceSequence {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// One piece covering the whole original store, or nothing when
    /// the original is empty.
    pub(crate) fn of_original(len_chars: usize) -> Self {
        let mut pieces = Vec::new();
        if len_chars > 0 {
            pieces.push(Piece::original(0..len_chars));
        }
        Self { pieces, len_chars }
    }

    pub(crate) fn len_chars(&self) -> usize {
        self.len_chars
    }

    pub(crate) fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Resolve a logical char offset to the piece containing it.
    ///
    /// Walks the list front to back accumulating lengths. An offset on
    /// a piece boundary locates the piece to its right; only
    /// `offset == len_chars()` yields [`Location::End`].
    pub(crate) fn locate(&self, offset: usize) -> Location {
        debug_assert!(offset <= self.len_chars);
        let mut piece_start = 0;
        for (index, piece) in self.pieces.iter().enumerate() {
            if offset < piece_start + piece.length {
                return Location::Inside { index, piece_start };
            }
            piece_start += piece.length;
        }
        Location::End
    }

    /// Splice a non-empty piece into the list at logical `offset`.
    ///
    /// The caller has already validated `offset <= len_chars()`.
    pub(crate) fn insert(&mut self, offset: usize, piece: Piece) {
        debug_assert!(piece.length > 0);
        match self.locate(offset) {
            Location::End => self.pieces.push(piece),
            Location::Inside { index, piece_start } => {
                let rel = offset - piece_start;
                if rel == 0 {
                    self.pieces.insert(index, piece);
                } else {
                    // Strictly inside: both fragments are non-empty.
                    let (left, right) = self.pieces[index].split(rel);
                    self.pieces.splice(index..=index, [left, piece, right]);
                }
            }
        }
        self.len_chars += piece.length;
        self.debug_check();
    }

    /// Remove a non-empty, validated logical char range from the list.
    pub(crate) fn remove(&mut self, range: Range<usize>) {
        debug_assert!(range.start < range.end && range.end <= self.len_chars);
        let removed = range.len();
        let Location::Inside { index, piece_start } = self.locate(range.start) else {
            debug_assert!(false, "non-empty removal located past the end");
            return;
        };
        let piece = self.pieces[index];
        let rel_start = range.start - piece_start;

        if range.end <= piece_start + piece.length {
            // Whole range inside one piece: keep the fragments on
            // either side, dropping whichever is empty.
            let (left, rest) = piece.split(rel_start);
            let (_, right) = rest.split(range.end - range.start);
            let keep = [left, right].into_iter().filter(|p| p.length > 0);
            self.pieces.splice(index..=index, keep);
        } else {
            // Crosses piece boundaries: find the first piece that
            // survives past `range.end`, trim its head in place, then
            // splice out everything the range swallowed.
            let (left, _) = piece.split(rel_start);
            let mut logical_end = piece_start + piece.length;
            let mut last = index + 1;
            while last < self.pieces.len()
                && logical_end + self.pieces[last].length <= range.end
            {
                logical_end += self.pieces[last].length;
                last += 1;
            }
            if last < self.pieces.len() && range.end > logical_end {
                let trim = range.end - logical_end;
                let survivor = &mut self.pieces[last];
                survivor.start += trim;
                survivor.length -= trim;
            }
            let keep = if left.length > 0 { Some(left) } else { None };
            self.pieces.splice(index..last, keep);
        }
        self.len_chars -= removed;
        self.debug_check();
    }

    /// Pieces overlapping `range`, clipped to it, in document order.
    pub(crate) fn covering(&self, range: Range<usize>) -> impl Iterator<Item = Piece> + '_ {
        let mut piece_start = 0;
        self.pieces.iter().filter_map(move |piece| {
            let start = piece_start;
            piece_start += piece.length;
            let from = range.start.max(start);
            let to = range.end.min(piece_start);
            if from < to {
                Some(Piece {
                    source: piece.source,
                    start: piece.start + (from - start),
                    length: to - from,
                })
            } else {
                None
            }
        })
    }

    /// Merge neighbors that reference contiguous runs of the same
    /// store. Content and total length are unchanged; only the piece
    /// count can drop.
    pub(crate) fn compact(&mut self) {
        let mut merged: Vec<Piece> = Vec::with_capacity(self.pieces.len());
        for piece in self.pieces.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.abuts(&piece) => prev.length += piece.length,
                _ => merged.push(piece),
            }
        }
        self.pieces = merged;
        self.debug_check();
    }

    fn debug_check(&self) {
        debug_assert!(self.pieces.iter().all(|p| p.length > 0));
        debug_assert_eq!(
            self.pieces.iter().map(|p| p.length).sum::<usize>(),
            self.len_chars
        );
    }
}
