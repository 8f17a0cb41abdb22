/// Index of the top rank within the padded 16x16 grid
pub const RANK_TOP: u8 = 3;

/// Index of the bottom rank within the padded 16x16 grid
pub const RANK_BOTTOM: u8 = 12;

/// Index of the leftmost file within the padded 16x16 grid
pub const FILE_LEFT: u8 = 3;

/// Index of the rightmost file within the padded 16x16 grid
pub const FILE_RIGHT: u8 = 11;

/// Number of squares in a native XQF coordinate system (9 files of 10 ranks)
pub const NATIVE_SQUARES: u8 = 90;

/// A square on the padded 16x16 board.
///
/// The play area occupies files 3 to 11 and ranks 3 to 12 with the origin in
/// the top left corner (black's side). XQF files use a different
/// coordinate: `file * 10 + rank` counted from the bottom left (red's side).
///
/// ```
/// use xqf::Square;
///
/// // red's left rook
/// let sq = Square::from_native(0);
/// assert_eq!((sq.x(), sq.y()), (3, 12));
/// assert_eq!(sq.to_native(), 0);
/// assert!(sq.is_on_board());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(u8);

impl Square {
    /// The top left corner of the padding, used for native positions that
    /// do not exist
    pub const OFF_BOARD: Square = Square(0);

    /// Wraps a padded grid index
    pub const fn new(index: u8) -> Self {
        Square(index)
    }

    /// Square from padded grid coordinates. Both must be below 16.
    pub const fn from_xy(x: u8, y: u8) -> Self {
        Square((y << 4) | (x & 0x0f))
    }

    /// Square from a coordinate within the play area where `file` is 0..9
    /// from the left and `rank` is 0..10 from the top.
    pub const fn from_file_rank(file: u8, rank: u8) -> Self {
        Square::from_xy(file + FILE_LEFT, rank + RANK_TOP)
    }

    /// Maps a native XQF position onto the padded grid.
    ///
    /// Positions at or above 90 do not describe a square and all map to
    /// [Square::OFF_BOARD].
    pub const fn from_native(pos: u8) -> Self {
        if pos >= NATIVE_SQUARES {
            return Square::OFF_BOARD;
        }

        let x = pos / 10 + FILE_LEFT;
        let y = 9 - pos % 10 + RANK_TOP;
        Square::from_xy(x, y)
    }

    /// Maps the square back to the native XQF position. Only meaningful for
    /// squares that are on the board.
    pub const fn to_native(self) -> u8 {
        let x = self.x().wrapping_sub(FILE_LEFT);
        let y = 9u8.wrapping_sub(self.y().wrapping_sub(RANK_TOP));
        x.wrapping_mul(10).wrapping_add(y)
    }

    /// The padded grid index
    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn x(self) -> u8 {
        self.0 & 0x0f
    }

    pub const fn y(self) -> u8 {
        self.0 >> 4
    }

    /// Returns true if the square is within the 9x10 play area
    pub const fn is_on_board(self) -> bool {
        let (x, y) = (self.x(), self.y());
        x >= FILE_LEFT && x <= FILE_RIGHT && y >= RANK_TOP && y <= RANK_BOTTOM
    }

    /// Iterates the 90 play area squares from the top rank down, left to
    /// right within a rank. This is ascending index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (RANK_TOP..=RANK_BOTTOM)
            .flat_map(|y| (FILE_LEFT..=FILE_RIGHT).map(move |x| Square::from_xy(x, y)))
    }
}
