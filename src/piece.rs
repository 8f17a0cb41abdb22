/// The two sides of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// The bit that tags a piece code with its side
    pub const fn tag(self) -> u8 {
        match self {
            Side::Red => 8,
            Side::Black => 16,
        }
    }
}

/// The seven kinds of Xiangqi pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    King,
    Advisor,
    Bishop,
    Knight,
    Rook,
    Cannon,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::King,
        PieceKind::Advisor,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Cannon,
        PieceKind::Pawn,
    ];

    /// Numeric kind in the 1 to 7 range
    pub const fn value(self) -> u8 {
        match self {
            PieceKind::King => 1,
            PieceKind::Advisor => 2,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 4,
            PieceKind::Rook => 5,
            PieceKind::Cannon => 6,
            PieceKind::Pawn => 7,
        }
    }

    /// How many of this kind each side starts with
    pub const fn count(self) -> usize {
        match self {
            PieceKind::King => 1,
            PieceKind::Pawn => 5,
            _ => 2,
        }
    }
}

/// A piece with its side
///
/// ```
/// use xqf::{Piece, PieceKind, Side};
///
/// let piece = Piece::new(Side::Black, PieceKind::Rook);
/// assert_eq!(piece.code(), 21);
/// assert_eq!(Piece::from_code(21), Some(piece));
/// assert_eq!(Piece::from_code(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Piece { side, kind }
    }

    pub const fn red(kind: PieceKind) -> Self {
        Piece::new(Side::Red, kind)
    }

    pub const fn black(kind: PieceKind) -> Self {
        Piece::new(Side::Black, kind)
    }

    /// Piece code where the side tag (8 or 16) is added to the kind value.
    /// Zero is reserved for an empty square.
    pub const fn code(self) -> u8 {
        self.side.tag() + self.kind.value()
    }

    pub fn from_code(code: u8) -> Option<Piece> {
        let side = match code & 0x18 {
            8 => Side::Red,
            16 => Side::Black,
            _ => return None,
        };

        let kind = match code & !0x18 {
            1 => PieceKind::King,
            2 => PieceKind::Advisor,
            3 => PieceKind::Bishop,
            4 => PieceKind::Knight,
            5 => PieceKind::Rook,
            6 => PieceKind::Cannon,
            7 => PieceKind::Pawn,
            _ => return None,
        };

        Some(Piece { side, kind })
    }

    /// Dense index in 0..14 with red kinds first
    pub(crate) const fn ordinal(self) -> usize {
        let side = match self.side {
            Side::Red => 0,
            Side::Black => 7,
        };
        side + self.kind.value() as usize - 1
    }

    /// The FEN letter: upper case for red and lower case for black
    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::King => 'K',
            PieceKind::Advisor => 'A',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Rook => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Pawn => 'P',
        };

        match self.side {
            Side::Red => c,
            Side::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a FEN letter. `E` and `H` are accepted for the bishop and
    /// knight as some tools write them.
    pub fn from_char(c: char) -> Option<Piece> {
        let kind = match c.to_ascii_uppercase() {
            'K' => PieceKind::King,
            'A' => PieceKind::Advisor,
            'B' | 'E' => PieceKind::Bishop,
            'N' | 'H' => PieceKind::Knight,
            'R' => PieceKind::Rook,
            'C' => PieceKind::Cannon,
            'P' => PieceKind::Pawn,
            _ => return None,
        };

        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };

        Some(Piece { side, kind })
    }
}
