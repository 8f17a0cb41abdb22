use crate::{Board, Piece, Square};
use std::error;
use std::fmt;

/// Piece placement of the standard opening position
pub const INITIAL_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR";

/// An error that can occur when parsing the piece placement of a FEN
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// A letter that does not name a piece
    UnknownPiece(char),

    /// The placement did not describe 10 ranks
    RankCount(usize),

    /// A rank describes more than 9 files
    RankOverflow(usize),

    /// A rank describes fewer than 9 files
    RankUnderflow(usize),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenError::UnknownPiece(x) => write!(f, "unknown piece letter: {}", x),
            FenError::RankCount(x) => write!(f, "expected 10 ranks but found {}", x),
            FenError::RankOverflow(x) => write!(f, "rank {} has more than 9 files", x),
            FenError::RankUnderflow(x) => write!(f, "rank {} has fewer than 9 files", x),
        }
    }
}

impl error::Error for FenError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

impl Board {
    /// Parses the placement field of a FEN. Anything after the first space
    /// (side to move, counters) is ignored.
    ///
    /// ```
    /// use xqf::{Board, Piece, PieceKind, Square, INITIAL_FEN};
    ///
    /// let board = Board::from_fen("4k4/9/9/9/9/9/9/9/4p4/4K4 w - - 0 1")?;
    /// assert_eq!(board.pieces().count(), 3);
    /// assert_eq!(board.get(Square::from_native(41)), Some(Piece::black(PieceKind::Pawn)));
    /// assert_eq!(Board::from_fen(INITIAL_FEN)?, Board::initial());
    /// # Ok::<(), xqf::FenError>(())
    /// ```
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let placement = fen.split(' ').next().unwrap_or_default();
        let ranks = placement.split('/').count();
        if ranks != 10 {
            return Err(FenError::RankCount(ranks));
        }

        let mut board = Board::empty();
        for (rank, row) in placement.split('/').enumerate() {
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::UnknownPiece(c))?;
                    if file >= 9 {
                        return Err(FenError::RankOverflow(rank));
                    }
                    board.set(Square::from_file_rank(file, rank as u8), Some(piece));
                    file += 1;
                }

                if file > 9 {
                    return Err(FenError::RankOverflow(rank));
                }
            }

            if file != 9 {
                return Err(FenError::RankUnderflow(rank));
            }
        }

        Ok(board)
    }

    /// Formats the play area as a FEN placement field
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(INITIAL_FEN.len());
        for rank in 0..10 {
            if rank != 0 {
                out.push('/');
            }

            let mut empty = 0;
            for file in 0..9 {
                match self.get(Square::from_file_rank(file, rank)) {
                    Some(piece) => {
                        if empty != 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }

            if empty != 0 {
                out.push(char::from(b'0' + empty));
            }
        }
        out
    }
}
