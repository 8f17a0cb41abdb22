use crate::{Piece, Square, TextField};
use std::fmt;

/// An error that can occur when reading or writing an XQF record
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    pub(crate) fn eof(offset: usize) -> Error {
        Error::new(ErrorKind::Eof { offset })
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Returns the byte offset that the error occurs (if available)
    pub fn offset(&self) -> Option<usize> {
        self.0.offset()
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// The input is at or above the configured size cap
    TooLarge { len: u64, max: usize },

    /// Unexpected end of input
    Eof { offset: usize },

    /// The file does not start with `XQ`
    InvalidMagic([u8; 2]),

    /// A text field's length byte exceeds what the field can hold
    TextTooLong {
        field: TextField,
        len: u8,
        capacity: usize,
    },

    /// The result byte is outside of the four defined values
    InvalidResult(u8),

    /// The record type byte is outside of the four defined values
    InvalidRecordType(u8),

    /// The board holds more pieces of a kind than the placement block has
    /// slots for
    PieceOverflow { piece: Piece },

    /// A move references a square outside of the 9x10 play area
    OffBoard { square: Square },

    /// A header field holds characters the text encoding can't represent
    UnencodableText { field: TextField },

    /// A comment holds characters the text encoding can't represent. The
    /// ply is 0 for the opening comment.
    UnencodableComment { ply: usize },

    /// An IO error
    Io(std::io::Error),
}

impl ErrorKind {
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ErrorKind::Eof { offset } => Some(offset),
            ErrorKind::InvalidMagic(_) => Some(0),
            ErrorKind::TextTooLong { field, .. } => Some(field.offset()),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::TooLarge { len, max } => write!(
                f,
                "input of {} bytes exceeds the maximum of {} bytes",
                len, max
            ),
            ErrorKind::Eof { offset } => write!(f, "unexpected end of file (offset: {})", offset),
            ErrorKind::InvalidMagic(magic) => write!(
                f,
                "expected XQ magic but found {:02x}{:02x}",
                magic[0], magic[1]
            ),
            ErrorKind::TextTooLong {
                field,
                len,
                capacity,
            } => write!(
                f,
                "{} field claims {} bytes but holds at most {} (offset: {:#x})",
                field.name(),
                len,
                capacity,
                field.offset()
            ),
            ErrorKind::InvalidResult(x) => write!(f, "unknown game result: {}", x),
            ErrorKind::InvalidRecordType(x) => write!(f, "unknown record type: {}", x),
            ErrorKind::PieceOverflow { piece } => {
                write!(f, "too many {:?} pieces to encode a placement", piece)
            }
            ErrorKind::OffBoard { square } => {
                write!(f, "square {} is outside of the board", square.index())
            }
            ErrorKind::UnencodableText { field } => write!(
                f,
                "{} field has characters the encoding can't represent",
                field.name()
            ),
            ErrorKind::UnencodableComment { ply } => write!(
                f,
                "comment of ply {} has characters the encoding can't represent",
                ply
            ),
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}
