//! quilt-text: piece-table text storage for editors.
//!
//! This crate provides:
//! - `TextBuffer` trait for text storage abstraction
//! - `PieceTableBuffer` - piece-table implementation; edits splice an
//!   ordered list of references into two append-stable stores instead
//!   of moving document text
//! - `StringBuffer` - naive contiguous implementation, the
//!   differential-testing oracle
//! - `Document<T>` - minimal line-counting wrapper, generic over
//!   TextBuffer

pub mod document;
pub mod error;
mod piece;
pub mod piece_table;
mod storage;
pub mod text;

pub use document::Document;
pub use error::OutOfRange;
pub use piece_table::PieceTableBuffer;
pub use smol_str::SmolStr;
pub use text::{StringBuffer, TextBuffer};
