use crate::{
    util::{get_array, get_slice, get_u8},
    Encoding, Error, ErrorKind, GameRecord, GameResult, Metadata, RecordType, TextField,
};

pub(crate) const PLACEMENT_OFFSET: usize = 0x10;
pub(crate) const RESULT_OFFSET: usize = 0x33;
pub(crate) const TYPE_OFFSET: usize = 0x40;

/// The version written by [XqfWriter](crate::XqfWriter). It predates the
/// obfuscated layouts.
pub(crate) const WRITE_VERSION: u8 = 10;

/// The fixed fields at the start of an XQF file
///
/// ```
/// use xqf::{GameResult, RecordType, XqfHeader};
///
/// let mut data = vec![0u8; 0x400];
/// data[..3].copy_from_slice(b"XQ\x0c");
/// data[0x33] = 1;
/// data[0x40] = 3;
///
/// let header = XqfHeader::from_slice(&data)?;
/// assert_eq!(header.version(), 12);
/// assert!(header.is_encrypted());
/// assert_eq!(header.result(), GameResult::RedWins);
/// assert_eq!(header.record_type(), RecordType::EndGame);
/// # Ok::<(), xqf::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XqfHeader {
    tags: [u8; 16],
    result: GameResult,
    record_type: RecordType,
}

impl XqfHeader {
    /// The leading bytes of every XQF file
    pub const MAGIC: [u8; 2] = *b"XQ";

    /// Size of the header. The move stream starts at this offset.
    pub const SIZE: usize = 0x400;

    /// Parses the fixed header fields
    pub fn from_slice(data: &[u8]) -> Result<Self, Error> {
        let magic = get_array::<2>(data, 0)?;
        if magic != Self::MAGIC {
            return Err(Error::new(ErrorKind::InvalidMagic(magic)));
        }

        let tags = get_array::<16>(data, 0)?;

        let result = get_u8(data, RESULT_OFFSET)?;
        let result = GameResult::from_u8(result)
            .ok_or_else(|| Error::new(ErrorKind::InvalidResult(result)))?;

        let record_type = get_u8(data, TYPE_OFFSET)?;
        let record_type = RecordType::from_u8(record_type)
            .ok_or_else(|| Error::new(ErrorKind::InvalidRecordType(record_type)))?;

        Ok(XqfHeader {
            tags,
            result,
            record_type,
        })
    }

    /// The first 16 bytes of the file, which seed the key stream
    pub fn tags(&self) -> &[u8; 16] {
        &self.tags
    }

    pub fn version(&self) -> u8 {
        self.tags[2]
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Versions 11 and up obfuscate the placement and the moves
    pub fn is_encrypted(&self) -> bool {
        self.version() >= 11
    }

    /// Versions 12 and up also rotate the placement slots
    pub fn has_permuted_placement(&self) -> bool {
        self.version() >= 12
    }
}

pub(crate) fn read_metadata<E: Encoding>(data: &[u8], encoding: &E) -> Result<Metadata, Error> {
    let mut metadata = Metadata::default();
    for field in TextField::ALL {
        *metadata.get_mut(field) = read_text(data, field, encoding)?;
    }
    Ok(metadata)
}

fn read_text<E: Encoding>(data: &[u8], field: TextField, encoding: &E) -> Result<String, Error> {
    let len = get_u8(data, field.offset())?;
    if usize::from(len) > field.capacity() {
        return Err(Error::new(ErrorKind::TextTooLong {
            field,
            len,
            capacity: field.capacity(),
        }));
    }

    let text = get_slice(data, field.offset() + 1, usize::from(len))?;
    Ok(encoding.decode(text).into_owned())
}

/// Lays out the header of a version 10 file. Reserved areas stay zeroed.
pub(crate) fn write_header<E: Encoding>(
    record: &GameRecord,
    placement: &[u8; 32],
    encoding: &E,
) -> Result<Vec<u8>, Error> {
    let mut out = vec![0u8; XqfHeader::SIZE];
    out[..2].copy_from_slice(&XqfHeader::MAGIC);
    out[2] = WRITE_VERSION;
    out[PLACEMENT_OFFSET..PLACEMENT_OFFSET + placement.len()].copy_from_slice(placement);
    out[RESULT_OFFSET] = record.result.value();
    out[TYPE_OFFSET] = record.record_type.value();

    for field in TextField::ALL {
        let text = encoding
            .encode(record.metadata.get(field))
            .ok_or_else(|| Error::new(ErrorKind::UnencodableText { field }))?;
        write_text(&mut out, field, &text);
    }

    Ok(out)
}

/// Writes the length byte and text, cutting text that doesn't fit
fn write_text(out: &mut [u8], field: TextField, text: &[u8]) {
    let len = text.len().min(field.capacity());
    if len < text.len() {
        log::debug!(
            "truncating {} field from {} to {} bytes",
            field,
            text.len(),
            len
        );
    }

    let start = field.offset();
    out[start] = len as u8;
    out[start + 1..start + 1 + len].copy_from_slice(&text[..len]);
}
