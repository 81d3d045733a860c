//! Minimal document model over a text buffer.

use crate::text::TextBuffer;

/// A document backed by any [`TextBuffer`].
///
/// Line counting only; cursors, selections, and rendering belong to
/// the host editor.
#[derive(Debug, Clone, Default)]
pub struct Document<T> {
    buffer: T,
}

impl<T: TextBuffer> Document<T> {
    /// Wrap an existing buffer.
    pub fn new(buffer: T) -> Self {
        Self { buffer }
    }

    /// Access the underlying buffer.
    pub fn buffer(&self) -> &T {
        &self.buffer
    }

    /// Mutable access to the underlying buffer.
    pub fn buffer_mut(&mut self) -> &mut T {
        &mut self.buffer
    }

    /// Unwrap into the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Number of lines, counting the line a trailing newline opens.
    ///
    /// An empty document has one line.
    pub fn line_count(&self) -> usize {
        self.buffer.text().matches('\n').count() + 1
    }
}
