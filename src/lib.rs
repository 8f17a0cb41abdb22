/*!

A reader and writer for XQF, the binary game record format of the XQStudio
family of [Chinese Chess](https://en.wikipedia.org/wiki/Xiangqi) (Xiangqi)
tools.

An XQF file stores the header text of a game (title, event, players, ...),
its result, the starting position, and the moves played, each optionally
annotated with a comment. Files of version 11 and later are obfuscated with a
key derived from the file's own header, which this crate undoes
transparently.

## Features

- ✔ Complete: Decode versions 10 through 12, including obfuscated files
- ✔ Safe: Inputs are bounds checked and size capped, never panicking on malformed data
- ✔ Portable: Text is decoded as GBK by default, with pluggable encodings
- ✔ Interoperable: Starting positions convert to and from FEN, and records
  can be (de)serialized with [serde](https://serde.rs/) behind the `serde` feature

## Quick Start

```rust
use xqf::{GameRecord, GameResult, Move, MoveNode, Square, XqfReader, XqfWriter};

let mut record = GameRecord::new();
record.metadata.red_player = String::from("胡荣华");
record.metadata.black_player = String::from("杨官璘");
record.result = GameResult::RedWins;

// 炮二平五: the red cannon on native position 72 moves to 42
let opening = Move::new(Square::from_native(72), Square::from_native(42));
record.root.push_child(MoveNode::new(opening).with_comment("中炮"));

let data = XqfWriter::new().to_vec(&record)?;
let decoded = XqfReader::new().read(&data)?;

assert_eq!(decoded.metadata.red_player, "胡荣华");
assert_eq!(decoded.root.children[0].comment, "中炮");
assert_eq!(decoded, record);
# Ok::<(), xqf::Error>(())
```

## Positions

Boards are 16x16 with the 9x10 playing area offset by three files and ranks
so that move generators can run off the edge without bounds checks. The
file format addresses squares by a native position of `file * 10 + rank`,
which [Square::from_native] and [Square::to_native] convert.

```rust
use xqf::{Board, Piece, PieceKind, Square, INITIAL_FEN};

let board = Board::initial();
assert_eq!(board.to_fen(), INITIAL_FEN);
assert_eq!(board.get(Square::from_native(40)), Some(Piece::red(PieceKind::King)));
assert_eq!(board.get(Square::from_native(49)), Some(Piece::black(PieceKind::King)));
```

## Caveats

- Only the version 10 layout is written. It can be read by every XQF tool.
- The writer keeps the main line of a move tree and drops other variations.
- Header text longer than a field can hold is cut to fit when written.

*/

mod board;
mod codec;
mod encoding;
mod errors;
mod fen;
mod piece;
mod record;
mod square;
pub(crate) mod util;

pub use self::board::*;
pub use self::codec::*;
pub use self::encoding::*;
pub use self::errors::*;
pub use self::fen::{FenError, INITIAL_FEN};
pub use self::piece::*;
pub use self::record::*;
pub use self::square::*;
