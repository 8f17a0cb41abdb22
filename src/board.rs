use crate::{Piece, Square, INITIAL_FEN};
use std::fmt;

/// A Xiangqi position laid out on a padded 16x16 grid
///
/// Only the 9x10 play area (see [Square::is_on_board]) is meaningful. Each
/// square holds at most one piece.
///
/// ```
/// use xqf::{Board, Piece, PieceKind, Square};
///
/// let board = Board::initial();
/// assert_eq!(board.get(Square::from_native(0)), Some(Piece::red(PieceKind::Rook)));
/// assert_eq!(board.pieces().count(), 32);
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Board {
    squares: [Option<Piece>; 256],
}

impl Board {
    /// A board without any pieces
    pub const fn empty() -> Self {
        Board {
            squares: [None; 256],
        }
    }

    /// The standard opening position
    pub fn initial() -> Self {
        // The initial placement is a known good constant
        Board::from_fen(INITIAL_FEN).unwrap()
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[usize::from(square.index())]
    }

    /// Places (or clears with `None`) a square, returning what was there
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[usize::from(square.index())], piece)
    }

    /// Occupied play area squares in ascending index order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// The padded grid as piece codes with zero for empty squares
    pub fn to_codes(&self) -> [u8; 256] {
        let mut out = [0u8; 256];
        for (code, piece) in out.iter_mut().zip(self.squares.iter()) {
            *code = piece.map_or(0, |x| x.code());
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.to_fen()).finish()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_fen()
    }
}

impl TryFrom<String> for Board {
    type Error = crate::FenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Board::from_fen(&value)
    }
}
