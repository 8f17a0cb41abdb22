use super::header::PLACEMENT_OFFSET;
use crate::{
    util::get_array, Board, Error, ErrorKind, KeyStream, Piece, PieceKind, Square, XqfHeader,
};

/// Stored position of a piece that is not on the board
const CAPTURED: u8 = 0xff;

const fn slot_pieces() -> [Piece; 32] {
    use PieceKind::*;
    const ORDER: [PieceKind; 16] = [
        Rook, Knight, Bishop, Advisor, King, Advisor, Bishop, Knight, Rook, Cannon, Cannon, Pawn,
        Pawn, Pawn, Pawn, Pawn,
    ];

    let mut out = [Piece::red(King); 32];
    let mut i = 0;
    while i < ORDER.len() {
        out[i] = Piece::red(ORDER[i]);
        out[i + 16] = Piece::black(ORDER[i]);
        i += 1;
    }
    out
}

/// The piece each of the 32 placement slots describes
pub(crate) const SLOT_PIECES: [Piece; 32] = slot_pieces();

/// Reconstructs the starting position of a record
pub(crate) fn decode_placement(
    data: &[u8],
    header: &XqfHeader,
    keys: &KeyStream,
) -> Result<Board, Error> {
    if header.record_type().uses_initial_position() {
        return Ok(Board::initial());
    }

    let raw = get_array::<32>(data, PLACEMENT_OFFSET)?;
    let offset = keys.piece_offset();
    let mut positions = [CAPTURED; 32];
    for (i, x) in raw.iter().enumerate() {
        let slot = if header.has_permuted_placement() {
            (usize::from(offset) + 1 + i) % positions.len()
        } else {
            i
        };
        positions[slot] = x.wrapping_sub(offset);
    }

    let mut board = Board::empty();
    for (pos, piece) in positions.iter().zip(SLOT_PIECES.iter()) {
        let square = Square::from_native(*pos);
        if square.is_on_board() {
            board.set(square, Some(*piece));
        }
    }

    Ok(board)
}

/// Slots of a single piece identity, handed out last first
#[derive(Debug, Clone, Copy)]
struct SlotPool {
    slots: [u8; 5],
    len: usize,
}

impl SlotPool {
    const fn empty() -> Self {
        SlotPool {
            slots: [0; 5],
            len: 0,
        }
    }

    fn push(&mut self, slot: u8) {
        self.slots[self.len] = slot;
        self.len += 1;
    }

    fn pop(&mut self) -> Option<u8> {
        self.len = self.len.checked_sub(1)?;
        Some(self.slots[self.len])
    }
}

/// Pools for every piece identity, filled in ascending slot order
fn slot_pools() -> [SlotPool; 14] {
    let mut pools = [SlotPool::empty(); 14];
    for (slot, piece) in SLOT_PIECES.iter().enumerate() {
        pools[piece.ordinal()].push(slot as u8);
    }
    pools
}

/// Lays out the 32 byte placement block of a version 10 file
pub(crate) fn encode_placement(board: &Board) -> Result<[u8; 32], Error> {
    let mut out = [CAPTURED; 32];
    let mut pools = slot_pools();
    for (square, piece) in board.pieces() {
        let slot = pools[piece.ordinal()]
            .pop()
            .ok_or_else(|| Error::new(ErrorKind::PieceOverflow { piece }))?;
        out[usize::from(slot)] = square.to_native();
    }
    Ok(out)
}
