use crate::{
    util::{get_array, get_slice, le_u32},
    Decryptor, Encoding, Error, ErrorKind, KeyStream, Move, MoveNode, Square, XqfHeader,
};

/// Added to a native source position when stored
const SOURCE_BIAS: u8 = 24;

/// Added to a native destination position when stored
const DESTINATION_BIAS: u8 = 32;

/// The fixed bytes of the leading record, which holds no move
const ROOT_RECORD: [u8; 4] = [SOURCE_BIAS, DESTINATION_BIAS, 0x00, 0xff];

const LEGACY_HAS_NEXT: u8 = 0xf0;
const HAS_NEXT: u8 = 0x80;
const HAS_COMMENT: u8 = 0x20;

/// A move record with its comment still encoded
#[derive(Debug)]
struct RawMove {
    from: u8,
    to: u8,
    has_next: bool,
    comment: Vec<u8>,
}

/// Walks the move stream that follows the header
struct MoveStream<'a, 'k> {
    data: &'a [u8],
    position: usize,
    keys: &'k KeyStream,
    decryptor: Decryptor<'k>,
    legacy: bool,
}

impl<'a, 'k> MoveStream<'a, 'k> {
    fn new(data: &'a [u8], header: &XqfHeader, keys: &'k KeyStream) -> Self {
        MoveStream {
            data,
            position: XqfHeader::SIZE,
            keys,
            decryptor: keys.decryptor(),
            legacy: !header.is_encrypted(),
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let out = get_array::<N>(self.data, self.position)?;
        self.position += N;
        Ok(out)
    }

    fn read(&mut self) -> Result<RawMove, Error> {
        let (from, to, has_next, comment_len) = if self.legacy {
            let record = self.take::<8>()?;
            let len = le_u32([record[4], record[5], record[6], record[7]]);
            (
                record[0],
                record[1],
                record[2] & LEGACY_HAS_NEXT != 0,
                i64::from(len),
            )
        } else {
            let record = self.take::<4>()?;
            let record = self.decryptor.decrypt_array(record);
            let len = if record[2] & HAS_COMMENT != 0 {
                let len = self.take::<4>()?;
                let len = le_u32(self.decryptor.decrypt_array(len));
                i64::from(len) - i64::from(self.keys.comment_offset())
            } else {
                0
            };
            (record[0], record[1], record[2] & HAS_NEXT != 0, len)
        };

        let comment = match usize::try_from(comment_len) {
            Ok(len) if len > 0 => {
                let raw = get_slice(self.data, self.position, len)?;
                self.position += len;
                self.decryptor.decrypt(raw)
            }
            _ => Vec::new(),
        };

        Ok(RawMove {
            from,
            to,
            has_next,
            comment,
        })
    }
}

/// Decodes the move stream as a single chain below `root`. Returns the
/// number of moves.
pub(crate) fn decode_moves<E: Encoding>(
    data: &[u8],
    header: &XqfHeader,
    keys: &KeyStream,
    encoding: &E,
    root: &mut MoveNode,
) -> Result<usize, Error> {
    let mut stream = MoveStream::new(data, header, keys);

    // The leading record is not a move. It only carries the opening comment.
    let first = stream.read()?;
    root.comment = encoding.decode(&first.comment).into_owned();

    let mut has_next = first.has_next;
    let mut tip = root;
    let mut count = 0;
    while has_next {
        let raw = stream.read()?;
        let from = raw
            .from
            .wrapping_sub(SOURCE_BIAS)
            .wrapping_sub(keys.source_offset());
        let to = raw
            .to
            .wrapping_sub(DESTINATION_BIAS)
            .wrapping_sub(keys.destination_offset());

        let mv = Move::new(Square::from_native(from), Square::from_native(to));
        log::trace!("move {}: {} -> {}", count + 1, from, to);

        let comment = encoding.decode(&raw.comment).into_owned();
        tip = tip.push_child(MoveNode::new(mv).with_comment(comment));
        has_next = raw.has_next;
        count += 1;
    }

    Ok(count)
}

fn native(square: Square) -> Result<u8, Error> {
    if square.is_on_board() {
        Ok(square.to_native())
    } else {
        Err(Error::new(ErrorKind::OffBoard { square }))
    }
}

/// Appends the version 10 move records of the main line starting at
/// `root`. Returns the number of moves written.
pub(crate) fn encode_moves<E: Encoding>(
    root: &MoveNode,
    encoding: &E,
    out: &mut Vec<u8>,
) -> Result<usize, Error> {
    let mut node = Some(root);
    let mut count = 0;
    while let Some(current) = node {
        let mut record = [0u8; 8];
        match current.mv {
            None => record[..4].copy_from_slice(&ROOT_RECORD),
            Some(mv) => {
                record[0] = native(mv.from)? + SOURCE_BIAS;
                record[1] = native(mv.to)? + DESTINATION_BIAS;
                count += 1;
            }
        }

        if !current.children.is_empty() {
            record[2] = LEGACY_HAS_NEXT;
        }

        if current.children.len() > 1 {
            log::debug!(
                "discarding {} variations after move {}",
                current.children.len() - 1,
                count
            );
        }

        let comment = encoding
            .encode(&current.comment)
            .ok_or_else(|| Error::new(ErrorKind::UnencodableComment { ply: count }))?;
        let len = u32::try_from(comment.len()).map_err(|_| {
            Error::new(ErrorKind::TooLarge {
                len: comment.len() as u64,
                max: u32::MAX as usize,
            })
        })?;
        record[4..].copy_from_slice(&len.to_le_bytes());

        out.extend_from_slice(&record);
        out.extend_from_slice(&comment);
        node = current.children.first();
    }

    Ok(count)
}
