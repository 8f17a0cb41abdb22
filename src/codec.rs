//! Read and write XQF game records.
//!
//! An XQF file is a 1 KiB header followed by a stream of move records:
//!
//! ```text
//! 0x000  "XQ" magic, version byte, key derivation seed bytes (16 bytes)
//! 0x010  initial piece placement, one native position per piece (32 bytes)
//! 0x033  game result
//! 0x040  record type
//! 0x050  length prefixed text fields (title, event, players, ...)
//! 0x400  move records, each optionally followed by a comment
//! ```
//!
//! A native position is `file * 10 + rank` counted from red's bottom left
//! corner. Any value of 90 or above means the piece is not on the board.
//!
//! Versions 11 and later obfuscate the placement and the move stream. A
//! [KeyStream] is derived from the first 16 bytes and every byte after the
//! header is shifted by a rotating key byte. Version 12 additionally rotates
//! which piece each placement slot belongs to.
//!
//! The [XqfWriter] only produces the version 10 layout, which every reader
//! accepts.

mod cipher;
mod header;
mod moves;
mod placement;
mod reader;
mod writer;

pub use cipher::*;
pub use header::*;
pub use reader::*;
pub use writer::*;
